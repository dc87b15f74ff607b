//! Errors that occur during writing

use std::path::PathBuf;

use read::ReadError;
use types::FormatVersion;

use crate::validate::ValidationReport;

/// An error that occurred while building, editing or writing a font
#[derive(Debug)]
pub enum Error {
    /// The source data could not be parsed.
    Read(ReadError),
    /// A glyph bitmap does not have the size implied by the font geometry.
    InvalidGlyphLength {
        index: usize,
        expected: usize,
        actual: usize,
    },
    IndexOutOfRange {
        index: usize,
        len: usize,
    },
    /// The font cannot be represented in the requested format version.
    VersionConstraintViolated {
        version: FormatVersion,
        reason: &'static str,
    },
    /// A unicode table must have exactly one entry per glyph.
    UnicodeTableLength {
        expected: usize,
        actual: usize,
    },
    ValidationFailed(ValidationReport),
    /// Refused to overwrite an existing file.
    FileExists(PathBuf),
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Read(error) => write!(f, "Failed to read font: {error}"),
            Error::InvalidGlyphLength {
                index,
                expected,
                actual,
            } => write!(
                f,
                "Glyph {index} is {actual} bytes long, but glyphs in this font are {expected} bytes"
            ),
            Error::IndexOutOfRange { index, len } => {
                write!(f, "Glyph index {index} out of range for font with {len} glyphs")
            }
            Error::VersionConstraintViolated { version, reason } => {
                write!(f, "Font cannot be written as {version}: {reason}")
            }
            Error::UnicodeTableLength { expected, actual } => write!(
                f,
                "Unicode table has {actual} entries, but the font has {expected} glyphs"
            ),
            Error::ValidationFailed(report) => report.fmt(f),
            Error::FileExists(path) => {
                write!(f, "Refusing to overwrite existing file '{}'", path.display())
            }
            Error::Io(error) => write!(f, "I/O error: {error}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Read(error) => Some(error),
            Error::Io(error) => Some(error),
            _ => None,
        }
    }
}

impl From<ReadError> for Error {
    fn from(src: ReadError) -> Error {
        Error::Read(src)
    }
}

impl From<ValidationReport> for Error {
    fn from(src: ValidationReport) -> Error {
        Error::ValidationFailed(src)
    }
}

impl From<std::io::Error> for Error {
    fn from(src: std::io::Error) -> Error {
        Error::Io(src)
    }
}
