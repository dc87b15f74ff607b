//! The two revisions of the format

use std::{fmt::Display, str::FromStr};

/// One of the two incompatible header revisions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FormatVersion {
    /// The original format: 8 pixel wide glyphs, 256 or 512 of them, and a
    /// UTF-16 unicode table.
    V1,
    /// The extended format: arbitrary glyph geometry and count, and a UTF-8
    /// unicode table.
    V2,
}

/// An error returned when parsing a [`FormatVersion`] from a string.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvalidFormatVersion;

impl FormatVersion {
    /// The major version number, as it appears in the format's name.
    pub const fn major(self) -> u8 {
        match self {
            FormatVersion::V1 => 1,
            FormatVersion::V2 => 2,
        }
    }

    /// Length in bytes of a header of this version, without extension.
    pub const fn header_len(self) -> usize {
        match self {
            FormatVersion::V1 => crate::PSF1_HEADER_LEN,
            FormatVersion::V2 => crate::PSF2_HEADER_LEN,
        }
    }
}

impl Display for FormatVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PSF{}", self.major())
    }
}

impl FromStr for FormatVersion {
    type Err = InvalidFormatVersion;

    /// Accepts `1` or `2`, optionally prefixed with `v` or `psf`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let digits = s
            .strip_prefix("psf")
            .or_else(|| s.strip_prefix("PSF"))
            .or_else(|| s.strip_prefix('v'))
            .or_else(|| s.strip_prefix('V'))
            .unwrap_or(s);
        match digits {
            "1" => Ok(FormatVersion::V1),
            "2" => Ok(FormatVersion::V2),
            _ => Err(InvalidFormatVersion),
        }
    }
}

impl Display for InvalidFormatVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "expected a format version of 1 or 2")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InvalidFormatVersion {}
