//! Input frames and per-pixel weighting
//!
//! The quantizer reads pixels through the [`PixelSource`] trait so callers can
//! plug in their own image types. [`Frame`] is the owned RGBA8 raster the
//! crate ships for convenience.

mod frame;
mod weight;

pub use frame::{Frame, PixelSource};
pub use weight::{PixelWeight, Uniform};
