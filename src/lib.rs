//! framepal - shared-palette quantization for animated indexed images
//!
//! Decodes PNG frames, builds one median cut palette for the whole set with
//! the `median-cut` crate, and writes an indexed APNG or a PNG sequence.
//! This library exposes modules for integration testing.

pub mod config;
pub mod decode;
pub mod encode;
pub mod error;
pub mod pipeline;
