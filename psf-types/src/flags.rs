//! Header bitfields

bitflags::bitflags! {
    /// The `mode` byte of a version 1 header.
    #[derive(Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Psf1Mode: u8 {
        /// The font has 512 glyphs instead of 256.
        const MODE_512 = 0x01;
        /// A unicode table follows the glyphs.
        const HAS_TAB = 0x02;
        /// The font has combining sequences.
        ///
        /// Nobody agrees on how this differs from `HAS_TAB`, and we refuse
        /// to read fonts that set it.
        const HAS_SEQ = 0x04;
    }
}

bitflags::bitflags! {
    /// The `flags` field of a version 2 header.
    #[derive(Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Psf2Flags: u32 {
        /// A unicode table follows the glyphs.
        const HAS_UNICODE_TABLE = 0x01;
    }
}

impl Psf1Mode {
    /// The number of glyphs in a font with this mode.
    pub fn glyph_count(self) -> u32 {
        if self.contains(Psf1Mode::MODE_512) {
            512
        } else {
            256
        }
    }

    /// `true` if a unicode table follows the glyphs.
    pub fn has_unicode_table(self) -> bool {
        self.contains(Psf1Mode::HAS_TAB)
    }
}

impl Psf2Flags {
    /// `true` if a unicode table follows the glyphs.
    pub fn has_unicode_table(self) -> bool {
        self.contains(Psf2Flags::HAS_UNICODE_TABLE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn psf1_glyph_count() {
        assert_eq!(Psf1Mode::empty().glyph_count(), 256);
        assert_eq!(Psf1Mode::MODE_512.glyph_count(), 512);
        assert_eq!((Psf1Mode::MODE_512 | Psf1Mode::HAS_TAB).glyph_count(), 512);
    }

    #[test]
    fn unknown_psf2_flags_are_dropped() {
        let flags = Psf2Flags::from_bits_truncate(0xF1);
        assert_eq!(flags, Psf2Flags::HAS_UNICODE_TABLE);
        assert!(flags.has_unicode_table());
    }
}
