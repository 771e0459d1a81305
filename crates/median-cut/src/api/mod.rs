//! Public API for the median-cut crate.
//!
//! This module provides the high-level API: the [`MedianCutQuantizer`]
//! builder and the [`QuantizeError`] unified error type.

mod builder;
mod error;

pub use builder::{MedianCutQuantizer, QuantizedAnimation};
pub use error::QuantizeError;
