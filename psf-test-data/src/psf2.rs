//! Version 2 fonts

use crate::{le_buffer, LeBuffer};

/// Just a header, built from the raw field values.
pub fn header(
    version: u32,
    headersize: u32,
    flags: u32,
    length: u32,
    charsize: u32,
    height: u32,
    width: u32,
) -> LeBuffer {
    le_buffer!(
        [0x72u8, 0xb5, 0x4a, 0x86],
        (version),
        (headersize),
        (flags),
        (length),
        (charsize),
        (height),
        (width),
    )
}

/// Two 1x1 glyphs, the first set, mapped to 'A' and 'B'.
pub fn two_glyphs() -> LeBuffer {
    header(0, 32, 1, 2, 1, 1, 1)
        .extend([0x01u8, 0x00])
        .extend([0x41u8, 0xFF, 0x42, 0xFF])
}

/// A header of 40 bytes followed by a single 8x1 glyph.
pub fn extended_header() -> LeBuffer {
    header(0, 40, 0, 1, 1, 1, 8)
        .extend([0u8; 8])
        .push(0xAAu8)
}

/// Two 9x2 glyphs.
///
/// Glyph 0 has pixels (0, 0), (8, 0) and (7, 1) set. Glyph 1 is fully set,
/// with the padding bits clear.
pub fn wide_glyphs() -> LeBuffer {
    header(0, 32, 0, 2, 4, 2, 9)
        .extend([0x80u8, 0x80, 0x01, 0x00])
        .extend([0xFFu8, 0x80, 0xFF, 0x80])
}

/// Two 8x1 glyphs whose table uses combining sequences.
///
/// Glyph 0 maps to 'Å' and 'A', and to 'A' U+030A. Glyph 1 maps only to the
/// sequences 'e' U+0301 and 'E' U+0301.
pub fn sequences() -> LeBuffer {
    header(0, 32, 1, 2, 1, 1, 8)
        .extend([0x18u8, 0x3C])
        .extend([0xC3u8, 0x85, 0x41, 0xFE, 0x41, 0xCC, 0x8A, 0xFF])
        .extend([0xFEu8, 0x65, 0xCC, 0x81, 0xFE, 0x45, 0xCC, 0x81, 0xFF])
}
