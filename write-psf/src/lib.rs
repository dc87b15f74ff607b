//! Writing PC Screen Font files
//!
//! This crate provides [`Font`], an owned font that can be loaded from either
//! format version, edited, and written out in either version. Before anything
//! is written, the font is checked by a [validation pass][validate], and a
//! font that can't be represented in the requested version is rejected
//! without touching the filesystem.
//!
//! The lower-level pieces ([`tables`], [`FontWrite`] and [`dump_table`]) are
//! public, for callers that want to assemble a file by hand.
//!
//! # Example
//!
//! ```
//! use write_psf::{types::FormatVersion, Font};
//!
//! // 256 glyphs of 8x2 pixels, all blank except glyph 1.
//! let mut glyphs = vec![vec![0u8; 2]; 256];
//! glyphs[1] = vec![0b1000_0001, 0b0111_1110];
//! let font = Font::new(8, 2, glyphs).unwrap();
//!
//! let bytes = font.to_bytes(None).unwrap();
//! assert_eq!(&bytes[..4], &[0x36, 0x04, 0x00, 0x02]);
//! assert_eq!(font.preferred_version(), FormatVersion::V1);
//! assert_eq!(Font::load(&bytes).unwrap(), font);
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![forbid(unsafe_code)]

mod error;
mod font;
pub mod tables;
pub mod validate;
mod write;

pub use error::Error;
pub use font::Font;
pub use write::{dump_table, FontWrite, TableWriter};

/// Public re-export of the read-psf crate.
pub extern crate read_psf as read;

/// Public re-export of the psf-types crate.
pub extern crate psf_types as types;
