//! test data shared between the psf crates.
//!
//! Fonts are assembled by hand with [`le_buffer!`] so that each fixture
//! documents its own layout.

pub mod lebuffer;
pub mod psf1;
pub mod psf2;

pub use lebuffer::LeBuffer;
