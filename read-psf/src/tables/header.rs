//! The two header layouts, and how to tell them apart
//!
//! A version 1 header is four bytes: two magic bytes, a mode byte and the
//! glyph height. A version 2 header is eight little-endian `u32`s, and may be
//! followed by reserved bytes up to `headersize`.

use types::{
    glyph_byte_len, FormatVersion, Psf1Mode, Psf2Flags, PSF1_GLYPH_WIDTH, PSF1_HEADER_LEN,
    PSF1_MAGIC, PSF1_MAX_MODE, PSF2_HEADER_LEN, PSF2_MAGIC, PSF2_MAX_VERSION,
};

use crate::{FontData, FontRead, ReadError};

const PSF1_HAS_SEQ_MSG: &str = "the PSF1 'has sequences' mode is not implemented; \
    its meaning is not distinguished from 'has unicode table' by any authoritative source";

/// Determine which header revision `data` starts with.
///
/// The two magic numbers share no common prefix, so at most one of them
/// can match.
pub fn detect(data: &[u8]) -> Result<FormatVersion, ReadError> {
    if data.starts_with(&PSF2_MAGIC) {
        Ok(FormatVersion::V2)
    } else if data.starts_with(&PSF1_MAGIC) {
        Ok(FormatVersion::V1)
    } else {
        Err(ReadError::UnrecognizedFormat)
    }
}

/// A version 1 header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Psf1Header {
    mode: Psf1Mode,
    charsize: u8,
}

/// A version 2 header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Psf2Header {
    version: u32,
    header_size: u32,
    flags: Psf2Flags,
    length: u32,
    charsize: u32,
    height: u32,
    width: u32,
}

/// Either kind of header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Header {
    V1(Psf1Header),
    V2(Psf2Header),
}

// a header that ends early is a bad header, not a bad offset
fn truncated(err: ReadError) -> ReadError {
    match err {
        ReadError::OutOfBounds => ReadError::MalformedHeader("header is truncated"),
        other => other,
    }
}

impl Psf1Header {
    /// The mode flags.
    pub fn mode(&self) -> Psf1Mode {
        self.mode
    }

    /// Bytes per glyph, which is also the glyph height.
    pub fn charsize(&self) -> u8 {
        self.charsize
    }

    /// The header fields after the magic number, in file order.
    pub fn fields(&self) -> [(&'static str, u32); 2] {
        [
            ("mode", self.mode.bits() as u32),
            ("charsize", self.charsize as u32),
        ]
    }
}

impl<'a> FontRead<'a> for Psf1Header {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        if cursor.read_bytes(PSF1_MAGIC.len()).map_err(truncated)? != PSF1_MAGIC {
            return Err(ReadError::UnrecognizedFormat);
        }
        let mode: u8 = cursor.read().map_err(truncated)?;
        let charsize: u8 = cursor.read().map_err(truncated)?;
        if mode > PSF1_MAX_MODE {
            return Err(ReadError::MalformedHeader("PSF1 mode out of range"));
        }
        let mode = Psf1Mode::from_bits_truncate(mode);
        if mode.contains(Psf1Mode::HAS_SEQ) {
            return Err(ReadError::FeatureUnsupported(PSF1_HAS_SEQ_MSG));
        }
        Ok(Psf1Header { mode, charsize })
    }
}

impl Psf2Header {
    pub fn version(&self) -> u32 {
        self.version
    }

    /// The offset of the glyph table from the start of the file.
    pub fn header_size(&self) -> u32 {
        self.header_size
    }

    pub fn flags(&self) -> Psf2Flags {
        self.flags
    }

    /// The number of glyphs.
    pub fn length(&self) -> u32 {
        self.length
    }

    /// Bytes per glyph.
    pub fn charsize(&self) -> u32 {
        self.charsize
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    /// The header fields after the magic number, in file order.
    pub fn fields(&self) -> [(&'static str, u32); 7] {
        [
            ("version", self.version),
            ("headersize", self.header_size),
            ("flags", self.flags.bits()),
            ("length", self.length),
            ("charsize", self.charsize),
            ("height", self.height),
            ("width", self.width),
        ]
    }
}

impl<'a> FontRead<'a> for Psf2Header {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        if cursor.read_bytes(PSF2_MAGIC.len()).map_err(truncated)? != PSF2_MAGIC {
            return Err(ReadError::UnrecognizedFormat);
        }
        let version: u32 = cursor.read().map_err(truncated)?;
        let header_size: u32 = cursor.read().map_err(truncated)?;
        let flags: u32 = cursor.read().map_err(truncated)?;
        let length: u32 = cursor.read().map_err(truncated)?;
        let charsize: u32 = cursor.read().map_err(truncated)?;
        let height: u32 = cursor.read().map_err(truncated)?;
        let width: u32 = cursor.read().map_err(truncated)?;

        if version > PSF2_MAX_VERSION {
            return Err(ReadError::VersionUnsupported(version));
        }
        if (header_size as usize) < PSF2_HEADER_LEN {
            return Err(ReadError::MalformedHeader(
                "PSF2 headersize is smaller than the header",
            ));
        }
        if glyph_byte_len(width, height) != Some(charsize) {
            return Err(ReadError::MalformedHeader(
                "PSF2 charsize does not match height * ceil(width / 8)",
            ));
        }
        if charsize == 0 {
            return Err(ReadError::MalformedHeader("PSF2 glyphs have no pixels"));
        }
        Ok(Psf2Header {
            version,
            header_size,
            flags: Psf2Flags::from_bits_truncate(flags),
            length,
            charsize,
            height,
            width,
        })
    }
}

impl Header {
    /// Which revision this header belongs to.
    pub fn format_version(&self) -> FormatVersion {
        match self {
            Header::V1(_) => FormatVersion::V1,
            Header::V2(_) => FormatVersion::V2,
        }
    }

    /// The offset of the glyph table.
    pub fn header_len(&self) -> usize {
        match self {
            Header::V1(_) => PSF1_HEADER_LEN,
            Header::V2(header) => header.header_size as usize,
        }
    }

    pub fn glyph_count(&self) -> u32 {
        match self {
            Header::V1(header) => header.mode.glyph_count(),
            Header::V2(header) => header.length,
        }
    }

    /// Bytes per glyph.
    pub fn glyph_size(&self) -> u32 {
        match self {
            Header::V1(header) => header.charsize as u32,
            Header::V2(header) => header.charsize,
        }
    }

    /// Glyph width in pixels.
    pub fn width(&self) -> u32 {
        match self {
            Header::V1(_) => PSF1_GLYPH_WIDTH,
            Header::V2(header) => header.width,
        }
    }

    /// Glyph height in pixels.
    pub fn height(&self) -> u32 {
        match self {
            Header::V1(header) => header.charsize as u32,
            Header::V2(header) => header.height,
        }
    }

    pub fn has_unicode_table(&self) -> bool {
        match self {
            Header::V1(header) => header.mode.has_unicode_table(),
            Header::V2(header) => header.flags.has_unicode_table(),
        }
    }
}

impl<'a> FontRead<'a> for Header {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        match detect(data.as_bytes())? {
            FormatVersion::V1 => Psf1Header::read(data).map(Header::V1),
            FormatVersion::V2 => Psf2Header::read(data).map(Header::V2),
        }
    }
}
