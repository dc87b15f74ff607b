//! Version 1 fonts

use crate::{le_buffer, LeBuffer};

/// 256 blank 8x8 glyphs, no unicode table.
pub fn plain_8x8() -> LeBuffer {
    le_buffer!([0x36u8, 0x04], 0x00u8, 8u8).extend(vec![0u8; 256 * 8])
}

/// 256 glyphs of 8x1 where glyph `i` is the single byte `i`, with a table.
///
/// Every glyph maps to the character with the same value, except:
///
/// - glyph 0x01 maps to U+1F600, stored as a surrogate pair;
/// - glyph 0x41 maps to 'A' and 'Α' (greek), plus the sequence
///   'A' U+0301;
/// - glyph 0xFF has an empty entry.
pub fn counting_with_table() -> LeBuffer {
    let mut buf = le_buffer!([0x36u8, 0x04], 0x02u8, 1u8).extend(0..=255u8);
    for glyph in 0..=255u16 {
        buf = match glyph {
            0x01 => buf.extend([0xD83Du16, 0xDE00]),
            0x41 => buf.extend([0x0041u16, 0x0391, 0xFFFE, 0x0041, 0x0301]),
            0xFF => buf,
            _ => buf.push(glyph),
        };
        buf = buf.push(0xFFFFu16);
    }
    buf
}

/// A header with the (unsupported) sequences bit set.
pub fn has_seq_mode() -> LeBuffer {
    le_buffer!([0x36u8, 0x04], 0x04u8, 8u8).extend(vec![0u8; 256 * 8])
}

/// 512 glyphs of 8x16; glyph `i` has its first row set to `i as u8`.
pub fn five_twelve_8x16() -> LeBuffer {
    let mut buf = le_buffer!([0x36u8, 0x04], 0x01u8, 16u8);
    for glyph in 0..512u32 {
        buf = buf.push(glyph as u8).extend([0u8; 15]);
    }
    buf
}
