//! PSF1 and PSF2 headers

use types::{
    glyph_byte_len, FormatVersion, Psf1Mode, Psf2Flags, PSF1_GLYPH_WIDTH, PSF1_MAGIC,
    PSF2_HEADER_LEN, PSF2_MAGIC, PSF2_MAX_VERSION,
};

use crate::{
    validate::{Validate, ValidationCtx},
    Error, FontWrite, TableWriter,
};

/// A version 1 header.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Psf1Header {
    pub mode: Psf1Mode,
    /// Bytes per glyph, which is also the glyph height.
    pub charsize: u8,
}

/// A version 2 header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Psf2Header {
    pub version: u32,
    /// Offset of the glyph table. Anything past the first 32 bytes is
    /// written as zeros.
    pub header_size: u32,
    pub flags: Psf2Flags,
    /// The number of glyphs.
    pub length: u32,
    pub charsize: u32,
    pub height: u32,
    pub width: u32,
}

/// Either header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Header {
    V1(Psf1Header),
    V2(Psf2Header),
}

impl Psf1Header {
    /// The header for `glyph_count` glyphs of 8 by `height` pixels.
    ///
    /// Returns an error if the geometry can't be expressed in PSF1.
    pub fn new(glyph_count: usize, height: u32, has_unicode_table: bool) -> Result<Self, Error> {
        let violated = |reason| Error::VersionConstraintViolated {
            version: FormatVersion::V1,
            reason,
        };
        let mut mode = match glyph_count {
            256 => Psf1Mode::empty(),
            512 => Psf1Mode::MODE_512,
            _ => return Err(violated("PSF1 fonts have exactly 256 or 512 glyphs")),
        };
        mode.set(Psf1Mode::HAS_TAB, has_unicode_table);
        let charsize = u8::try_from(height)
            .map_err(|_| violated("PSF1 glyphs are at most 255 pixels high"))?;
        Ok(Psf1Header { mode, charsize })
    }

    /// The field values in file order, after the magic.
    pub fn fields(&self) -> [u8; 2] {
        [self.mode.bits(), self.charsize]
    }
}

impl Psf2Header {
    /// The header for `glyph_count` glyphs of `width` by `height` pixels.
    pub fn new(
        glyph_count: usize,
        width: u32,
        height: u32,
        has_unicode_table: bool,
    ) -> Result<Self, Error> {
        let violated = |reason| Error::VersionConstraintViolated {
            version: FormatVersion::V2,
            reason,
        };
        let length =
            u32::try_from(glyph_count).map_err(|_| violated("too many glyphs for PSF2"))?;
        let charsize = glyph_byte_len(width, height)
            .ok_or_else(|| violated("glyph size does not fit in 32 bits"))?;
        if charsize == 0 {
            return Err(violated("PSF2 glyphs are at least one byte"));
        }
        let mut flags = Psf2Flags::empty();
        flags.set(Psf2Flags::HAS_UNICODE_TABLE, has_unicode_table);
        Ok(Psf2Header {
            version: PSF2_MAX_VERSION,
            header_size: PSF2_HEADER_LEN as u32,
            flags,
            length,
            charsize,
            height,
            width,
        })
    }

    /// The field values in file order, after the magic.
    pub fn fields(&self) -> [u32; 7] {
        [
            self.version,
            self.header_size,
            self.flags.bits(),
            self.length,
            self.charsize,
            self.height,
            self.width,
        ]
    }
}

impl Header {
    /// The header for a font with the given geometry, in the given version.
    pub fn new(
        version: FormatVersion,
        glyph_count: usize,
        width: u32,
        height: u32,
        has_unicode_table: bool,
    ) -> Result<Self, Error> {
        match version {
            FormatVersion::V1 if width != PSF1_GLYPH_WIDTH => {
                Err(Error::VersionConstraintViolated {
                    version,
                    reason: "PSF1 glyphs are always 8 pixels wide",
                })
            }
            FormatVersion::V1 => {
                Psf1Header::new(glyph_count, height, has_unicode_table).map(Header::V1)
            }
            FormatVersion::V2 => {
                Psf2Header::new(glyph_count, width, height, has_unicode_table).map(Header::V2)
            }
        }
    }

    pub fn format_version(&self) -> FormatVersion {
        match self {
            Header::V1(_) => FormatVersion::V1,
            Header::V2(_) => FormatVersion::V2,
        }
    }
}

impl FontWrite for Psf1Header {
    fn write_into(&self, writer: &mut TableWriter) {
        writer.write_slice(&PSF1_MAGIC);
        self.fields().as_slice().write_into(writer);
    }
}

impl FontWrite for Psf2Header {
    fn write_into(&self, writer: &mut TableWriter) {
        writer.write_slice(&PSF2_MAGIC);
        self.fields().as_slice().write_into(writer);
        writer.pad((self.header_size as usize).saturating_sub(PSF2_HEADER_LEN));
    }
}

impl FontWrite for Header {
    fn write_into(&self, writer: &mut TableWriter) {
        match self {
            Header::V1(header) => header.write_into(writer),
            Header::V2(header) => header.write_into(writer),
        }
    }
}

impl Validate for Psf1Header {
    fn validate_impl(&self, ctx: &mut ValidationCtx) {
        ctx.in_table("Psf1Header", |ctx| {
            ctx.in_field("mode", |ctx| {
                if self.mode.contains(Psf1Mode::HAS_SEQ) {
                    ctx.report("the 'has sequences' mode is not supported");
                }
            })
        })
    }
}

impl Validate for Psf2Header {
    fn validate_impl(&self, ctx: &mut ValidationCtx) {
        ctx.in_table("Psf2Header", |ctx| {
            ctx.in_field("version", |ctx| {
                if self.version > PSF2_MAX_VERSION {
                    ctx.report(format!("unknown version {}", self.version));
                }
            });
            ctx.in_field("headersize", |ctx| {
                if (self.header_size as usize) < PSF2_HEADER_LEN {
                    ctx.report(format!(
                        "header must be at least {PSF2_HEADER_LEN} bytes, got {}",
                        self.header_size
                    ));
                }
            });
            ctx.in_field("charsize", |ctx| {
                let expected = glyph_byte_len(self.width, self.height);
                if expected != Some(self.charsize) {
                    ctx.report(format!(
                        "{}x{} glyphs need {expected:?} bytes, charsize is {}",
                        self.width, self.height, self.charsize
                    ));
                } else if self.charsize == 0 {
                    ctx.report("glyphs must be at least one byte");
                }
            });
        })
    }
}

impl Validate for Header {
    fn validate_impl(&self, ctx: &mut ValidationCtx) {
        match self {
            Header::V1(header) => header.validate_impl(ctx),
            Header::V2(header) => header.validate_impl(ctx),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dump_table;
    use psf_test_data::{psf1, psf2};

    #[test]
    fn psf1_header() {
        let data = psf1::plain_8x8();
        let header = Header::new(FormatVersion::V1, 256, 8, 8, false).unwrap();
        assert_eq!(dump_table(&header).unwrap(), &data[..4]);
    }

    #[test]
    fn psf2_extended_header_is_padded() {
        let data = psf2::extended_header();
        let header = Psf2Header {
            version: 0,
            header_size: 40,
            flags: Psf2Flags::empty(),
            length: 1,
            charsize: 1,
            height: 1,
            width: 8,
        };
        assert_eq!(dump_table(&header).unwrap(), &data[..40]);
    }

    #[test]
    fn psf1_constraints() {
        assert!(matches!(
            Header::new(FormatVersion::V1, 256, 9, 16, false),
            Err(Error::VersionConstraintViolated {
                version: FormatVersion::V1,
                ..
            })
        ));
        assert!(Header::new(FormatVersion::V1, 300, 8, 16, false).is_err());
        assert!(Header::new(FormatVersion::V1, 256, 8, 256, false).is_err());
        let header = Header::new(FormatVersion::V1, 512, 8, 255, true).unwrap();
        assert_eq!(
            header,
            Header::V1(Psf1Header {
                mode: Psf1Mode::MODE_512 | Psf1Mode::HAS_TAB,
                charsize: 255,
            })
        );
    }

    #[test]
    fn psf2_new() {
        let header = Header::new(FormatVersion::V2, 3, 9, 2, true).unwrap();
        let bytes = dump_table(&header).unwrap();
        assert_eq!(bytes, psf2::header(0, 32, 1, 3, 4, 2, 9).to_vec());
    }

    #[test]
    fn psf2_glyphs_have_bytes() {
        for (width, height) in [(0, 16), (8, 0), (0, 0)] {
            assert!(matches!(
                Header::new(FormatVersion::V2, 1, width, height, false),
                Err(Error::VersionConstraintViolated {
                    version: FormatVersion::V2,
                    ..
                })
            ));
        }
        let header = Psf2Header {
            version: 0,
            header_size: 32,
            flags: Psf2Flags::empty(),
            length: u32::MAX,
            charsize: 0,
            height: 0,
            width: 0,
        };
        let report = header.validate().unwrap_err();
        let paths: Vec<_> = report.iter().map(|(path, _)| path).collect();
        assert_eq!(paths, ["Psf2Header.charsize"]);
    }

    #[test]
    fn validation() {
        let header = Psf2Header {
            version: 1,
            header_size: 16,
            flags: Psf2Flags::empty(),
            length: 1,
            charsize: 8,
            height: 8,
            width: 9,
        };
        let report = header.validate().unwrap_err();
        let paths: Vec<_> = report.iter().map(|(path, _)| path).collect();
        assert_eq!(
            paths,
            [
                "Psf2Header.version",
                "Psf2Header.headersize",
                "Psf2Header.charsize"
            ]
        );

        let header = Psf1Header {
            mode: Psf1Mode::HAS_SEQ,
            charsize: 8,
        };
        assert!(header.validate().is_err());
    }
}
