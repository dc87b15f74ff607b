//! The glyph bitmaps

use crate::{
    read::{FontReadWithArgs, ReadArgs},
    tables::header::Header,
    FontData, ReadError,
};

/// Everything the glyph table needs to know from the header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GlyphTableArgs {
    /// Offset of the first glyph from the start of the file.
    pub header_len: usize,
    pub glyph_count: u32,
    /// Bytes per glyph.
    pub glyph_size: u32,
    pub width: u32,
    pub height: u32,
}

impl GlyphTableArgs {
    pub fn from_header(header: &Header) -> Self {
        GlyphTableArgs {
            header_len: header.header_len(),
            glyph_count: header.glyph_count(),
            glyph_size: header.glyph_size(),
            width: header.width(),
            height: header.height(),
        }
    }
}

/// The array of glyph bitmaps that follows the header.
///
/// Each glyph is `glyph_size` bytes. Rows are padded to a byte boundary
/// and pixels are stored most significant bit first.
#[derive(Clone, Copy, Debug)]
pub struct GlyphTable<'a> {
    data: FontData<'a>,
    glyph_count: usize,
    glyph_size: usize,
    width: u32,
    height: u32,
}

/// A single glyph bitmap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GlyphRef<'a> {
    bytes: &'a [u8],
    width: u32,
    height: u32,
}

impl ReadArgs for GlyphTable<'_> {
    type Args = GlyphTableArgs;
}

impl<'a> FontReadWithArgs<'a> for GlyphTable<'a> {
    /// Read the glyph table out of a whole file.
    ///
    /// `data` must start at the beginning of the file, since the glyphs are
    /// located by the header length in `args`.
    fn read_with_args(data: FontData<'a>, args: &GlyphTableArgs) -> Result<Self, ReadError> {
        let glyph_count = args.glyph_count as usize;
        let glyph_size = args.glyph_size as usize;
        let expected = glyph_count
            .checked_mul(glyph_size)
            .and_then(|len| len.checked_add(args.header_len))
            .unwrap_or(usize::MAX);
        let truncated = ReadError::TruncatedGlyphTable {
            expected,
            actual: data.len(),
        };
        let glyphs = data
            .slice(args.header_len..expected)
            .ok_or(truncated)?;
        Ok(GlyphTable {
            data: glyphs,
            glyph_count,
            glyph_size,
            width: args.width,
            height: args.height,
        })
    }
}

impl<'a> GlyphTable<'a> {
    /// The number of glyphs.
    pub fn len(&self) -> usize {
        self.glyph_count
    }

    pub fn is_empty(&self) -> bool {
        self.glyph_count == 0
    }

    /// Bytes per glyph.
    pub fn glyph_size(&self) -> usize {
        self.glyph_size
    }

    /// The glyph at `index`.
    pub fn get(&self, index: usize) -> Result<GlyphRef<'a>, ReadError> {
        if index >= self.glyph_count {
            return Err(ReadError::IndexOutOfRange {
                index,
                len: self.glyph_count,
            });
        }
        let start = index * self.glyph_size;
        let bytes = self
            .data
            .as_bytes()
            .get(start..start + self.glyph_size)
            .ok_or(ReadError::OutOfBounds)?;
        Ok(GlyphRef {
            bytes,
            width: self.width,
            height: self.height,
        })
    }

    /// Iterate over the glyphs, in index order.
    pub fn iter(&self) -> impl Iterator<Item = GlyphRef<'a>> + 'a {
        let (width, height) = (self.width, self.height);
        let glyph_size = self.glyph_size;
        let bytes = self.data.as_bytes();
        (0..self.glyph_count).map(move |index| {
            let start = index * glyph_size;
            GlyphRef {
                bytes: &bytes[start..start + glyph_size],
                width,
                height,
            }
        })
    }

    /// The raw bytes of every glyph.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.data.as_bytes()
    }

    /// The file offset of the first byte after the last glyph.
    pub fn end_offset(&self) -> usize {
        self.data.file_offset() + self.data.len()
    }
}

impl<'a> GlyphRef<'a> {
    /// The raw bitmap.
    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes per row, including padding.
    pub fn stride(&self) -> usize {
        types::row_bytes(self.width) as usize
    }

    /// `true` if the pixel at column `x` of row `y` is set.
    ///
    /// Out of range coordinates are never set.
    pub fn pixel(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let byte = y as usize * self.stride() + x as usize / 8;
        let mask = 0x80 >> (x % 8);
        self.bytes.get(byte).is_some_and(|b| b & mask != 0)
    }

    /// Iterate over rows of pixels, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = impl Iterator<Item = bool> + 'a> + 'a {
        let glyph = *self;
        (0..self.height).map(move |y| (0..glyph.width).map(move |x| glyph.pixel(x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FontRead;
    use psf_test_data::{psf1, psf2};

    fn read_table(data: &[u8]) -> Result<GlyphTable<'_>, ReadError> {
        let data = FontData::new(data);
        let header = Header::read(data)?;
        GlyphTable::read_with_args(data, &GlyphTableArgs::from_header(&header))
    }

    #[test]
    fn all_zero_psf1() {
        let data = psf1::plain_8x8();
        let glyphs = read_table(&data).unwrap();
        assert_eq!(glyphs.len(), 256);
        assert_eq!(glyphs.glyph_size(), 8);
        assert!(glyphs.iter().all(|glyph| glyph.bytes() == [0u8; 8]));
        assert_eq!(glyphs.end_offset(), 4 + 2048);
    }

    #[test]
    fn random_access() {
        let data = psf1::counting_with_table();
        let glyphs = read_table(&data).unwrap();
        assert_eq!(glyphs.get(0x41).unwrap().bytes(), &[0x41]);
        assert_eq!(glyphs.get(255).unwrap().bytes(), &[0xFF]);
        assert_eq!(
            glyphs.get(256),
            Err(ReadError::IndexOutOfRange {
                index: 256,
                len: 256
            })
        );
    }

    #[test]
    fn truncated() {
        let data = psf1::plain_8x8();
        let err = read_table(&data[..2000]).unwrap_err();
        assert_eq!(
            err,
            ReadError::TruncatedGlyphTable {
                expected: 2052,
                actual: 2000
            }
        );
    }

    #[test]
    fn skips_extended_header() {
        let data = psf2::extended_header();
        let glyphs = read_table(&data).unwrap();
        assert_eq!(glyphs.len(), 1);
        assert_eq!(glyphs.get(0).unwrap().bytes(), &[0xAA]);
    }

    #[test]
    fn pixels() {
        let data = psf2::wide_glyphs();
        let glyphs = read_table(&data).unwrap();
        let glyph = glyphs.get(0).unwrap();
        assert_eq!((glyph.width(), glyph.height()), (9, 2));
        assert_eq!(glyph.stride(), 2);
        let rows: Vec<Vec<bool>> = glyph.rows().map(|row| row.collect()).collect();
        // row 0: 0x80 0x80 -> pixels 0 and 8
        assert_eq!(
            rows[0],
            [true, false, false, false, false, false, false, false, true]
        );
        // row 1: 0x01 0x00 -> pixel 7
        assert_eq!(
            rows[1],
            [false, false, false, false, false, false, false, true, false]
        );
        assert!(!glyph.pixel(9, 0));
        assert!(!glyph.pixel(0, 2));
    }
}
