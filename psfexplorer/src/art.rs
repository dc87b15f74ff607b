//! Reading glyphs drawn as text
//!
//! Each line is one row of pixels. `#` or `0` is a set pixel and `.` or a
//! space is a clear one. Short rows, including empty lines, are padded with
//! clear pixels.

use psf_types::{glyph_byte_len, row_bytes};

use crate::Error;

/// Pack text art into a glyph bitmap of `width` by `height` pixels.
pub fn parse(text: &str, width: u32, height: u32) -> Result<Vec<u8>, Error> {
    let size = glyph_byte_len(width, height)
        .ok_or_else(|| Error::new("glyph is too large"))? as usize;
    let stride = row_bytes(width) as usize;
    let rows: Vec<&str> = text.lines().collect();
    if rows.len() != height as usize {
        return Err(Error(format!(
            "expected {height} rows of pixels, found {}",
            rows.len()
        )));
    }

    let mut bitmap = vec![0u8; size];
    for (y, row) in rows.iter().enumerate() {
        let pixels = row.chars().count();
        if pixels > width as usize {
            return Err(Error(format!(
                "row {y} has {pixels} pixels, the font is {width} wide"
            )));
        }
        for (x, c) in row.chars().enumerate() {
            let set = match c {
                '#' | '0' => true,
                '.' | ' ' => false,
                other => {
                    return Err(Error(format!(
                        "unexpected '{}' in row {y}",
                        other.escape_default()
                    )))
                }
            };
            if set {
                bitmap[y * stride + x / 8] |= 0x80 >> (x % 8);
            }
        }
    }
    Ok(bitmap)
}
