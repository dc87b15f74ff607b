//! The glyph bitmaps

use crate::{
    validate::{Validate, ValidationCtx},
    Error, FontWrite, TableWriter,
};

/// An owned, editable glyph table.
///
/// Every glyph has the same byte length. This is checked on construction
/// and on every replacement. The glyphs are stored back to back in a single
/// buffer, in index order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GlyphTable {
    glyph_size: usize,
    len: usize,
    data: Vec<u8>,
}

impl GlyphTable {
    /// Create a table where every glyph is `glyph_size` bytes.
    pub fn new(glyph_size: usize, glyphs: Vec<Vec<u8>>) -> Result<Self, Error> {
        if let Some((index, glyph)) = glyphs
            .iter()
            .enumerate()
            .find(|(_, glyph)| glyph.len() != glyph_size)
        {
            return Err(Error::InvalidGlyphLength {
                index,
                expected: glyph_size,
                actual: glyph.len(),
            });
        }
        Ok(GlyphTable {
            glyph_size,
            len: glyphs.len(),
            data: glyphs.concat(),
        })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The size of each glyph, in bytes.
    pub fn glyph_size(&self) -> usize {
        self.glyph_size
    }

    /// The bytes of every glyph, in index order.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn get(&self, index: usize) -> Result<&[u8], Error> {
        let start = self.start_of(index)?;
        Ok(&self.data[start..start + self.glyph_size])
    }

    /// Replace the glyph at `index`.
    ///
    /// On error the table is unchanged.
    pub fn replace(&mut self, index: usize, raster: Vec<u8>) -> Result<(), Error> {
        let start = self.start_of(index)?;
        if raster.len() != self.glyph_size {
            return Err(Error::InvalidGlyphLength {
                index,
                expected: self.glyph_size,
                actual: raster.len(),
            });
        }
        self.data[start..start + self.glyph_size].copy_from_slice(&raster);
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &[u8]> + '_ {
        (0..self.len).map(move |index| {
            let start = index * self.glyph_size;
            &self.data[start..start + self.glyph_size]
        })
    }

    fn start_of(&self, index: usize) -> Result<usize, Error> {
        if index >= self.len {
            return Err(Error::IndexOutOfRange {
                index,
                len: self.len,
            });
        }
        Ok(index * self.glyph_size)
    }
}

impl FontWrite for GlyphTable {
    fn write_into(&self, writer: &mut TableWriter) {
        writer.write_slice(&self.data);
    }
}

impl Validate for GlyphTable {
    fn validate_impl(&self, ctx: &mut ValidationCtx) {
        ctx.in_table("GlyphTable", |ctx| {
            ctx.in_field("glyphs", |ctx| {
                // only reachable through deserialization
                if self.len.checked_mul(self.glyph_size) != Some(self.data.len()) {
                    ctx.report(format!(
                        "{} bytes for {} glyphs of {} bytes",
                        self.data.len(),
                        self.len,
                        self.glyph_size
                    ));
                }
            })
        })
    }
}

impl From<&read::GlyphTable<'_>> for GlyphTable {
    fn from(from: &read::GlyphTable<'_>) -> Self {
        GlyphTable {
            glyph_size: from.glyph_size(),
            len: from.len(),
            data: from.as_bytes().to_vec(),
        }
    }
}
