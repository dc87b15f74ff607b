//! The parts of a PSF file, in the order they appear on disk

pub mod glyphs;
pub mod header;
pub mod unicode;
