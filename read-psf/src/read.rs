//! Traits for interpreting font data

use types::FormatVersion;

use crate::font_data::FontData;

/// A type that can be read from raw font data.
///
/// This trait is implemented for items that are self-describing: that is,
/// items that do not require any external state in order to interpret their
/// underlying bytes. (Items that require external state implement
/// [`FontReadWithArgs`] instead)
pub trait FontRead<'a>: Sized {
    /// Read an instance of `Self` from the provided data, performing validation.
    ///
    /// This method is responsible for ensuring the input data is consistent:
    /// that any versioned fields hold supported values, and that any array
    /// lengths are not out-of-bounds.
    fn read(data: FontData<'a>) -> Result<Self, ReadError>;
}

/// A trait for a type that needs additional arguments to be read.
pub trait ReadArgs {
    type Args: Copy;
}

/// A trait for types that require external data in order to be constructed.
///
/// The glyph table needs to know the glyph count and size from the header,
/// and the unicode table additionally needs to know which format revision
/// it is encoded in. If a type requires multiple arguments, they are passed
/// as a tuple.
pub trait FontReadWithArgs<'a>: Sized + ReadArgs {
    /// read an item, using the provided args.
    fn read_with_args(data: FontData<'a>, args: &Self::Args) -> Result<Self, ReadError>;
}

// a blanket impl of ReadArgs/FontReadWithArgs for general FontRead types.
impl<'a, T: FontRead<'a>> ReadArgs for T {
    type Args = ();
}

impl<'a, T: FontRead<'a>> FontReadWithArgs<'a> for T {
    fn read_with_args(data: FontData<'a>, _: &Self::Args) -> Result<Self, ReadError> {
        Self::read(data)
    }
}

/// An error that occurs when reading font data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadError {
    /// A read went past the end of the data.
    OutOfBounds,
    /// The data starts with neither known magic number.
    UnrecognizedFormat,
    /// A version 2 header declares a minor version we don't know.
    VersionUnsupported(u32),
    /// A header field holds an impossible value.
    MalformedHeader(&'static str),
    /// The font uses a feature that is known but not implemented.
    FeatureUnsupported(&'static str),
    /// The data ends before the last glyph.
    TruncatedGlyphTable { expected: usize, actual: usize },
    /// The unicode table could not be decoded.
    ///
    /// `offset` is the position in the file where decoding failed.
    MalformedUnicodeTable {
        version: FormatVersion,
        offset: usize,
        reason: &'static str,
    },
    /// A glyph was requested that the font does not have.
    IndexOutOfRange { index: usize, len: usize },
}

impl std::fmt::Display for ReadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReadError::OutOfBounds => write!(f, "An offset was out of bounds"),
            ReadError::UnrecognizedFormat => write!(f, "No PSF1 or PSF2 magic number found"),
            ReadError::VersionUnsupported(version) => {
                write!(f, "Unsupported PSF2 version {version}")
            }
            ReadError::MalformedHeader(msg) => write!(f, "Malformed header: '{msg}'"),
            ReadError::FeatureUnsupported(msg) => write!(f, "Unsupported feature: {msg}"),
            ReadError::TruncatedGlyphTable { expected, actual } => write!(
                f,
                "Glyph table truncated: expected at least {expected} bytes, found {actual}"
            ),
            ReadError::MalformedUnicodeTable {
                version,
                offset,
                reason,
            } => write!(
                f,
                "Malformed {version} unicode table at offset 0x{offset:X}: '{reason}'"
            ),
            ReadError::IndexOutOfRange { index, len } => {
                write!(f, "Glyph index {index} out of range for {len} glyphs")
            }
        }
    }
}

impl std::error::Error for ReadError {}
