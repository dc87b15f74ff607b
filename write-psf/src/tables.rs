//! The parts of a PSF file.

pub mod glyphs;
pub mod header;
pub mod unicode;
