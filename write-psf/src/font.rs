//! An owned, editable font

use std::{
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use read::{PsfRef, UnicodeEntry};
use tempfile::NamedTempFile;
use types::{glyph_byte_len, FormatVersion, PSF1_GLYPH_WIDTH};

use crate::{
    tables::{
        glyphs::GlyphTable,
        header::Header,
        unicode::{has_v1_reserved, UnicodeTable},
    },
    validate::{Validate, ValidationCtx},
    write::{dump_table, FontWrite, TableWriter},
    Error,
};

/// A font that can be edited and written out in either format version.
///
/// The font only knows its geometry, its glyphs and its unicode table; the
/// header is rebuilt whenever the font is written, so reading and writing a
/// font may change header details (such as an extended PSF2 header) that
/// carry no meaning.
///
/// # Example
///
/// ```no_run
/// use write_psf::Font;
/// # fn main() -> Result<(), write_psf::Error> {
/// let mut font = Font::open("default8x16.psf")?;
/// let mut bar = vec![0u8; font.glyph_size()];
/// bar[7] = 0xFF;
/// font.replace_glyph(b'_' as usize, bar)?;
/// let path = font.save_derived("default8x16.psf", None)?;
/// println!("wrote {}", path.display());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Font {
    width: u32,
    height: u32,
    glyphs: GlyphTable,
    unicode_table: Option<Vec<UnicodeEntry>>,
}

impl Font {
    /// Create a font from glyphs of `width` by `height` pixels.
    ///
    /// Each glyph must be `height * ceil(width / 8)` bytes: rows are padded
    /// to a whole byte, most significant bit first.
    pub fn new(width: u32, height: u32, glyphs: Vec<Vec<u8>>) -> Result<Self, Error> {
        let glyph_size =
            glyph_byte_len(width, height).ok_or(Error::VersionConstraintViolated {
                version: FormatVersion::V2,
                reason: "glyph size does not fit in 32 bits",
            })?;
        Ok(Font {
            width,
            height,
            glyphs: GlyphTable::new(glyph_size as usize, glyphs)?,
            unicode_table: None,
        })
    }

    /// Parse a font from bytes in either format.
    pub fn load(data: &[u8]) -> Result<Self, Error> {
        let font = PsfRef::new(data)?;
        log::debug!(
            "loaded {} font with {} {}x{} glyphs",
            font.format_version(),
            font.glyphs().len(),
            font.width(),
            font.height()
        );
        Ok(Font::from(&font))
    }

    /// Read and parse the font at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        let data = std::fs::read(path.as_ref())?;
        Self::load(&data)
    }

    /// Glyph width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Glyph height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    /// The size of every glyph, in bytes.
    pub fn glyph_size(&self) -> usize {
        self.glyphs.glyph_size()
    }

    pub fn glyphs(&self) -> &GlyphTable {
        &self.glyphs
    }

    /// The bitmap of the glyph at `index`.
    pub fn glyph(&self, index: usize) -> Result<&[u8], Error> {
        self.glyphs.get(index)
    }

    /// Replace the bitmap of the glyph at `index`.
    ///
    /// The unicode table is not touched. On error the font is unchanged.
    pub fn replace_glyph(&mut self, index: usize, raster: impl Into<Vec<u8>>) -> Result<(), Error> {
        self.glyphs.replace(index, raster.into())
    }

    pub fn unicode_table(&self) -> Option<&[UnicodeEntry]> {
        self.unicode_table.as_deref()
    }

    /// The unicode entry for the glyph at `index`, if the font has a table.
    pub fn unicode_entry(&self, index: usize) -> Result<Option<&UnicodeEntry>, Error> {
        if index >= self.glyphs.len() {
            return Err(Error::IndexOutOfRange {
                index,
                len: self.glyphs.len(),
            });
        }
        Ok(self
            .unicode_table
            .as_ref()
            .and_then(|table| table.get(index)))
    }

    /// Replace (or remove) the unicode table.
    ///
    /// A table must have exactly one entry per glyph.
    pub fn set_unicode_table(&mut self, table: Option<Vec<UnicodeEntry>>) -> Result<(), Error> {
        if let Some(table) = &table {
            if table.len() != self.glyphs.len() {
                return Err(Error::UnicodeTableLength {
                    expected: self.glyphs.len(),
                    actual: table.len(),
                });
            }
        }
        self.unicode_table = table;
        Ok(())
    }

    /// The first glyph that renders `c` on its own.
    pub fn glyph_for_char(&self, c: char) -> Option<usize> {
        self.unicode_table
            .as_ref()?
            .iter()
            .position(|entry| entry.codepoints.contains(&c))
    }

    /// The version used when saving without an explicit version.
    ///
    /// This is PSF1 when the font fits in it, and PSF2 otherwise. A unicode
    /// table that maps U+FFFE or U+FFFF only fits in PSF2.
    pub fn preferred_version(&self) -> FormatVersion {
        if self.width == PSF1_GLYPH_WIDTH
            && matches!(self.glyphs.len(), 256 | 512)
            && self.height <= u8::MAX as u32
            && !self.unicode_table.as_deref().is_some_and(has_v1_reserved)
        {
            FormatVersion::V1
        } else {
            FormatVersion::V2
        }
    }

    /// Encode the font.
    ///
    /// If `version` is `None`, the [preferred version][Self::preferred_version]
    /// is used.
    pub fn to_bytes(&self, version: Option<FormatVersion>) -> Result<Vec<u8>, Error> {
        let version = version.unwrap_or_else(|| self.preferred_version());
        let header = Header::new(
            version,
            self.glyphs.len(),
            self.width,
            self.height,
            self.unicode_table.is_some(),
        )?;
        let file = FontFile {
            header,
            glyphs: &self.glyphs,
            unicode_table: self
                .unicode_table
                .as_deref()
                .map(|entries| UnicodeTable::new(version, entries)),
        };
        let bytes = dump_table(&file)?;
        log::debug!(
            "encoded {} glyphs as {version}, {} bytes",
            self.glyphs.len(),
            bytes.len()
        );
        Ok(bytes)
    }

    /// Write the font to `path`, replacing any existing file.
    ///
    /// The font is fully encoded before anything is written, and the file is
    /// replaced in one step once the new contents are on disk, so a failed
    /// save leaves any existing file as it was.
    pub fn save(
        &self,
        path: impl AsRef<Path>,
        version: Option<FormatVersion>,
    ) -> Result<(), Error> {
        let path = path.as_ref();
        let bytes = self.to_bytes(version)?;
        let file = temp_file_for(path, &bytes)?;
        if let Ok(existing) = std::fs::metadata(path) {
            file.as_file().set_permissions(existing.permissions())?;
        }
        file.persist(path).map_err(|e| Error::Io(e.error))?;
        log::debug!("wrote '{}'", path.display());
        Ok(())
    }

    /// Write the font next to `source`, named after the version written.
    ///
    /// Saving `fonts/latin.psf` as PSF2 creates `fonts/latin.psf2.psf`. An
    /// existing file is never overwritten. Returns the path written.
    pub fn save_derived(
        &self,
        source: impl AsRef<Path>,
        version: Option<FormatVersion>,
    ) -> Result<PathBuf, Error> {
        let version = version.unwrap_or_else(|| self.preferred_version());
        let path = derived_path(source.as_ref(), version)?;
        let bytes = self.to_bytes(Some(version))?;
        if path.exists() {
            return Err(Error::FileExists(path));
        }
        temp_file_for(&path, &bytes)?
            .persist_noclobber(&path)
            .map_err(|e| match e.error.kind() {
                ErrorKind::AlreadyExists => Error::FileExists(path.clone()),
                _ => Error::Io(e.error),
            })?;
        log::debug!("wrote '{}'", path.display());
        Ok(path)
    }
}

/// A temporary file holding `bytes`, in the directory `path` will live in.
///
/// The file is removed when dropped, unless it is persisted.
fn temp_file_for(path: &Path, bytes: &[u8]) -> Result<NamedTempFile, Error> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(bytes)?;
    file.as_file().sync_all()?;
    Ok(file)
}

/// `dir/name.psf` -> `dir/name.psf<major>.psf`
fn derived_path(source: &Path, version: FormatVersion) -> Result<PathBuf, Error> {
    let stem = source.file_stem().ok_or_else(|| {
        Error::Io(std::io::Error::new(
            ErrorKind::InvalidInput,
            format!("'{}' has no file name", source.display()),
        ))
    })?;
    let mut name = stem.to_os_string();
    name.push(format!(".psf{}.psf", version.major()));
    Ok(source.with_file_name(name))
}

/// Everything that is written to disk, in order.
struct FontFile<'a> {
    header: Header,
    glyphs: &'a GlyphTable,
    unicode_table: Option<UnicodeTable<'a>>,
}

impl FontWrite for FontFile<'_> {
    fn write_into(&self, writer: &mut TableWriter) {
        self.header.write_into(writer);
        self.glyphs.write_into(writer);
        self.unicode_table.write_into(writer);
    }
}

impl Validate for FontFile<'_> {
    fn validate_impl(&self, ctx: &mut ValidationCtx) {
        self.header.validate_impl(ctx);
        self.glyphs.validate_impl(ctx);
        if let Some(table) = &self.unicode_table {
            if table.entries.len() != self.glyphs.len() {
                ctx.in_table("UnicodeTable", |ctx| {
                    ctx.report(format!(
                        "{} entries for {} glyphs",
                        table.entries.len(),
                        self.glyphs.len()
                    ))
                });
            }
            table.validate_impl(ctx);
        }
    }
}

impl From<&PsfRef<'_>> for Font {
    fn from(from: &PsfRef<'_>) -> Self {
        if let Some(table) = from.unicode_table() {
            let trailing = table.trailing_bytes().len();
            if trailing > 0 {
                log::trace!("ignoring {trailing} bytes after the unicode table");
            }
        }
        Font {
            width: from.width(),
            height: from.height(),
            glyphs: GlyphTable::from(&from.glyphs()),
            unicode_table: from.unicode_table().map(|table| table.entries().to_vec()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use psf_test_data::{psf1, psf2};

    fn blank_font(width: u32, height: u32, count: usize) -> Font {
        let size = glyph_byte_len(width, height).unwrap() as usize;
        Font::new(width, height, vec![vec![0; size]; count]).unwrap()
    }

    #[test]
    fn load_psf1() {
        let font = Font::load(&psf1::plain_8x8()).unwrap();
        assert_eq!((font.width(), font.height()), (8, 8));
        assert_eq!(font.glyph_count(), 256);
        assert_eq!(font.glyph_size(), 8);
        assert!(font.unicode_table().is_none());
        assert_eq!(font.unicode_entry(3).unwrap(), None);
        assert_eq!(font.glyph_for_char('A'), None);
    }

    #[test]
    fn load_psf2() {
        let font = Font::load(&psf2::two_glyphs()).unwrap();
        assert_eq!(font.glyph(0).unwrap(), &[0x01]);
        assert_eq!(
            font.unicode_entry(1).unwrap(),
            Some(&UnicodeEntry::new(['B']))
        );
        assert_eq!(font.glyph_for_char('B'), Some(1));
        assert!(matches!(
            font.unicode_entry(2),
            Err(Error::IndexOutOfRange { index: 2, len: 2 })
        ));
    }

    #[test]
    fn load_errors_are_propagated() {
        assert!(matches!(
            Font::load(b"nope"),
            Err(Error::Read(read::ReadError::UnrecognizedFormat))
        ));
        assert!(matches!(
            Font::load(&psf1::has_seq_mode()),
            Err(Error::Read(read::ReadError::FeatureUnsupported(_)))
        ));
    }

    #[test]
    fn new_checks_glyph_sizes() {
        assert!(matches!(
            Font::new(9, 2, vec![vec![0; 4], vec![0; 2]]),
            Err(Error::InvalidGlyphLength {
                index: 1,
                expected: 4,
                actual: 2
            })
        ));
    }

    #[test]
    fn replace_glyph_leaves_unicode_alone() {
        let mut font = Font::load(&psf2::two_glyphs()).unwrap();
        let before = font.unicode_table().map(<[_]>::to_vec);
        font.replace_glyph(1, [0x01]).unwrap();
        assert_eq!(font.glyph(1).unwrap(), &[0x01]);
        assert_eq!(font.unicode_table().map(<[_]>::to_vec), before);

        let unchanged = font.clone();
        assert!(matches!(
            font.replace_glyph(0, vec![0, 0]),
            Err(Error::InvalidGlyphLength { .. })
        ));
        assert!(matches!(
            font.replace_glyph(2, vec![0]),
            Err(Error::IndexOutOfRange { .. })
        ));
        assert_eq!(font, unchanged);
    }

    #[test]
    fn set_unicode_table() {
        let mut font = blank_font(8, 8, 256);
        assert!(matches!(
            font.set_unicode_table(Some(vec![UnicodeEntry::default(); 3])),
            Err(Error::UnicodeTableLength {
                expected: 256,
                actual: 3
            })
        ));
        assert!(font.unicode_table().is_none());

        let mut table = vec![UnicodeEntry::default(); 256];
        table[0x41] = UnicodeEntry::new(['A', 'a']);
        font.set_unicode_table(Some(table)).unwrap();
        assert_eq!(font.glyph_for_char('a'), Some(0x41));

        font.set_unicode_table(None).unwrap();
        assert!(font.unicode_table().is_none());
    }

    #[test]
    fn preferred_version() {
        assert_eq!(blank_font(8, 16, 256).preferred_version(), FormatVersion::V1);
        assert_eq!(blank_font(8, 16, 512).preferred_version(), FormatVersion::V1);
        assert_eq!(blank_font(8, 16, 300).preferred_version(), FormatVersion::V2);
        assert_eq!(blank_font(9, 16, 256).preferred_version(), FormatVersion::V2);
        assert_eq!(blank_font(8, 300, 256).preferred_version(), FormatVersion::V2);
    }

    #[test]
    fn explicit_version_constraints() {
        let font = blank_font(9, 16, 256);
        assert!(matches!(
            font.to_bytes(Some(FormatVersion::V1)),
            Err(Error::VersionConstraintViolated {
                version: FormatVersion::V1,
                ..
            })
        ));
        assert!(font.to_bytes(Some(FormatVersion::V2)).is_ok());
    }

    #[test]
    fn psf2_roundtrip_is_exact() {
        let data = psf2::two_glyphs();
        let font = Font::load(&data).unwrap();
        assert_eq!(font.to_bytes(Some(FormatVersion::V2)).unwrap(), data.to_vec());
        // two glyphs don't fit in a PSF1 font
        assert_eq!(font.preferred_version(), FormatVersion::V2);
    }

    #[test]
    fn psf1_roundtrip_is_exact() {
        for data in [psf1::plain_8x8(), psf1::counting_with_table()] {
            let font = Font::load(&data).unwrap();
            assert_eq!(font.to_bytes(None).unwrap(), data.to_vec());
        }
    }

    #[test]
    fn extended_header_is_normalized() {
        let font = Font::load(&psf2::extended_header()).unwrap();
        let bytes = font.to_bytes(None).unwrap();
        assert_eq!(bytes, psf2::header(0, 32, 0, 1, 1, 1, 8).push(0xAAu8).to_vec());
    }

    #[test]
    fn change_version() {
        let font = Font::load(&psf1::counting_with_table()).unwrap();
        let bytes = font.to_bytes(Some(FormatVersion::V2)).unwrap();
        let reloaded = Font::load(&bytes).unwrap();
        assert_eq!(reloaded, font);
        assert_eq!(
            PsfRef::new(&bytes).unwrap().format_version(),
            FormatVersion::V2
        );
    }

    #[test]
    fn sequences_survive_psf1() {
        let font = Font::load(&psf2::sequences()).unwrap();
        let mut glyphs: Vec<Vec<u8>> = font.glyphs().iter().map(<[u8]>::to_vec).collect();
        glyphs.resize(256, vec![0]);
        let mut big = Font::new(8, 1, glyphs).unwrap();
        let mut table = font.unicode_table().unwrap().to_vec();
        table.resize(256, UnicodeEntry::default());
        big.set_unicode_table(Some(table)).unwrap();

        let bytes = big.to_bytes(None).unwrap();
        assert_eq!(&bytes[..4], &[0x36, 0x04, 0x02, 0x01]);
        assert_eq!(Font::load(&bytes).unwrap(), big);
    }

    #[test]
    fn v1_markers_need_psf2() {
        let mut font = blank_font(8, 1, 256);
        let mut table = vec![UnicodeEntry::default(); 256];
        table[7] = UnicodeEntry::new(['\u{FFFE}']);
        font.set_unicode_table(Some(table)).unwrap();
        assert!(matches!(
            font.to_bytes(Some(FormatVersion::V1)),
            Err(Error::ValidationFailed(_))
        ));
        assert_eq!(font.preferred_version(), FormatVersion::V2);
        let bytes = font.to_bytes(None).unwrap();
        assert_eq!(Font::load(&bytes).unwrap(), font);
    }

    #[test]
    fn load_rejects_empty_glyphs() {
        let data = psf2::header(0, 32, 0, u32::MAX, 0, 0, 0);
        assert!(matches!(
            Font::load(&data),
            Err(Error::Read(read::ReadError::MalformedHeader(_)))
        ));
    }

    #[test]
    fn empty_glyphs_only_fit_psf1() {
        let font = blank_font(8, 0, 256);
        assert_eq!(font.glyph_size(), 0);
        let bytes = font.to_bytes(None).unwrap();
        assert_eq!(bytes, [0x36, 0x04, 0x00, 0x00]);
        assert_eq!(Font::load(&bytes).unwrap(), font);
        assert!(matches!(
            font.to_bytes(Some(FormatVersion::V2)),
            Err(Error::VersionConstraintViolated {
                version: FormatVersion::V2,
                ..
            })
        ));
    }

    #[test]
    fn derived_paths() {
        assert_eq!(
            derived_path(Path::new("fonts/latin.psf"), FormatVersion::V2).unwrap(),
            Path::new("fonts/latin.psf2.psf")
        );
        assert_eq!(
            derived_path(Path::new("latin"), FormatVersion::V1).unwrap(),
            Path::new("latin.psf1.psf")
        );
        assert!(derived_path(Path::new(".."), FormatVersion::V1).is_err());
    }
}
