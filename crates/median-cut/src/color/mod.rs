//! Color types
//!
//! This module provides the 8-bit RGBA color used throughout the crate and
//! the weighted [`ColorSample`] the histogram and partitioner operate on.
//!
//! # Types
//!
//! - [`Rgba8`]: straight (non-premultiplied) 8-bit RGBA color
//! - [`ColorSample`]: a color paired with its accumulated weight
//! - [`ColorBucket`]: a working collection of samples

mod rgba;
mod sample;

pub use rgba::Rgba8;
pub use sample::{total_weight, ColorBucket, ColorSample};
