//! Common scalar types, magic numbers and flag sets used in [PC Screen Font][psf] files
//!
//! PSF comes in two incompatible revisions. Both store their integers
//! little-endian, which is the only thing they agree on.
//!
//! [psf]: https://www.win.tue.nl/~aeb/linux/kbd/font-formats-1.html

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(any(feature = "std", test))]
#[macro_use]
extern crate std;

#[cfg(all(not(feature = "std"), not(test)))]
#[macro_use]
extern crate core as std;

mod flags;
mod raw;
mod version;


pub use flags::{Psf1Mode, Psf2Flags};
pub use raw::ScalarLE;
pub use version::{FormatVersion, InvalidFormatVersion};

/// The two magic bytes at the start of a version 1 file.
pub const PSF1_MAGIC: [u8; 2] = [0x36, 0x04];

/// The magic number at the start of a version 2 file, `0x864ab572`.
pub const PSF2_MAGIC: [u8; 4] = 0x864a_b572_u32.to_le_bytes();

/// The largest mode value a version 1 header may carry.
pub const PSF1_MAX_MODE: u8 = 0x05;

/// The length in bytes of a version 1 header.
pub const PSF1_HEADER_LEN: usize = 4;

/// The length in bytes of a version 2 header, without any extension.
pub const PSF2_HEADER_LEN: usize = 32;

/// The only minor version of the version 2 format that has been published.
pub const PSF2_MAX_VERSION: u32 = 0;

/// The width in pixels of every version 1 glyph.
pub const PSF1_GLYPH_WIDTH: u32 = 8;

/// Terminates a glyph's entry in a version 1 unicode table.
pub const PSF1_SEPARATOR: u16 = 0xFFFF;

/// Introduces a combining sequence in a version 1 unicode table.
pub const PSF1_START_SEQ: u16 = 0xFFFE;

/// Terminates a glyph's entry in a version 2 unicode table.
pub const PSF2_SEPARATOR: u8 = 0xFF;

/// Introduces a combining sequence in a version 2 unicode table.
pub const PSF2_START_SEQ: u8 = 0xFE;

/// The number of bytes needed to store one row of a glyph `width` pixels wide.
#[inline]
pub const fn row_bytes(width: u32) -> u32 {
    width.div_ceil(8)
}

/// The number of bytes needed to store a `width` × `height` glyph.
///
/// Each row is padded to a byte boundary, so this is
/// `height * ceil(width / 8)`. Returns `None` on overflow.
#[inline]
pub const fn glyph_byte_len(width: u32, height: u32) -> Option<u32> {
    height.checked_mul(row_bytes(width))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn psf2_magic_is_little_endian() {
        assert_eq!(PSF2_MAGIC, [0x72, 0xb5, 0x4a, 0x86]);
    }

    #[test]
    fn magics_share_no_prefix() {
        assert_ne!(PSF1_MAGIC[0], PSF2_MAGIC[0]);
    }

    #[test]
    fn glyph_len() {
        assert_eq!(glyph_byte_len(8, 16), Some(16));
        assert_eq!(glyph_byte_len(1, 1), Some(1));
        assert_eq!(glyph_byte_len(9, 18), Some(36));
        assert_eq!(glyph_byte_len(12, 0), Some(0));
        assert_eq!(glyph_byte_len(u32::MAX, u32::MAX), None);
    }
}
