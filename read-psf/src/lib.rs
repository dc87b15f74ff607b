//! Reading PC Screen Font files
//!
//! This crate provides memory safe parsing of [PSF] bitmap fonts, the format
//! used by the Linux console. Both header revisions are supported:
//!
//! - PSF1: 256 or 512 glyphs, each 8 pixels wide, with an optional UTF-16
//!   unicode table;
//! - PSF2: any number of glyphs of any size, with an optional UTF-8 unicode
//!   table.
//!
//! Parsing borrows the input: glyph bitmaps are handed out as slices of the
//! original buffer. Only the unicode table is decoded into owned values.
//!
//! For creating or modifying fonts, see the companion crate [`write-psf`].
//!
//! # Example
//!
//! ```no_run
//! # let path_to_my_font_file = std::path::Path::new("");
//! use read_psf::PsfRef;
//! let font_bytes = std::fs::read(path_to_my_font_file).unwrap();
//! let font = PsfRef::new(&font_bytes).expect("failed to read font data");
//! let glyph = font.glyph(b'A' as usize).expect("font has no 'A'");
//! for row in glyph.rows() {
//!     let line: String = row.map(|set| if set { '#' } else { '.' }).collect();
//!     println!("{line}");
//! }
//! ```
//!
//! [PSF]: https://www.win.tue.nl/~aeb/linux/kbd/font-formats-1.html
//! [`write-psf`]: https://docs.rs/write-psf/

#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

mod font_data;
mod read;
pub mod tables;

pub use font_data::FontData;
pub use read::{FontRead, FontReadWithArgs, ReadArgs, ReadError};
pub use tables::glyphs::{GlyphRef, GlyphTable, GlyphTableArgs};
pub use tables::header::{detect, Header, Psf1Header, Psf2Header};
pub use tables::unicode::{UnicodeEntry, UnicodeTable, UnicodeTableArgs};

/// Public re-export of the psf-types crate.
pub extern crate psf_types as types;

use types::FormatVersion;

/// Reference to an in-memory font.
///
/// Creating one runs the whole decode pipeline: the header is detected and
/// validated, the glyph table is located, and the unicode table (if the
/// header announces one) is decoded. Any failure is returned unchanged.
#[derive(Clone, Debug)]
pub struct PsfRef<'a> {
    data: FontData<'a>,
    header: Header,
    glyphs: GlyphTable<'a>,
    unicode_table: Option<UnicodeTable<'a>>,
}

impl<'a> PsfRef<'a> {
    /// Creates a new reference to an in-memory font backed by the given data.
    pub fn new(data: &'a [u8]) -> Result<Self, ReadError> {
        Self::read(FontData::new(data))
    }

    /// Returns the underlying font data.
    pub fn data(&self) -> FontData<'a> {
        self.data
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    /// The header revision this font was stored with.
    pub fn format_version(&self) -> FormatVersion {
        self.header.format_version()
    }

    /// Glyph width in pixels.
    pub fn width(&self) -> u32 {
        self.header.width()
    }

    /// Glyph height in pixels.
    pub fn height(&self) -> u32 {
        self.header.height()
    }

    pub fn glyphs(&self) -> GlyphTable<'a> {
        self.glyphs
    }

    /// The glyph at `index`.
    pub fn glyph(&self, index: usize) -> Result<GlyphRef<'a>, ReadError> {
        self.glyphs.get(index)
    }

    /// The unicode table, if the font has one.
    pub fn unicode_table(&self) -> Option<&UnicodeTable<'a>> {
        self.unicode_table.as_ref()
    }
}

impl<'a> FontRead<'a> for PsfRef<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let header = Header::read(data)?;
        let glyphs: GlyphTable = data.read_with_args(&GlyphTableArgs::from_header(&header))?;
        let unicode_table = if header.has_unicode_table() {
            let table_data = data
                .split_off(glyphs.end_offset() - data.file_offset())
                .ok_or(ReadError::OutOfBounds)?;
            Some(table_data.read_with_args::<UnicodeTable>(&UnicodeTableArgs {
                version: header.format_version(),
                glyph_count: header.glyph_count(),
            })?)
        } else {
            None
        };
        Ok(PsfRef {
            data,
            header,
            glyphs,
            unicode_table,
        })
    }
}
