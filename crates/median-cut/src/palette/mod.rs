//! Palette types
//!
//! This module provides the append-only [`Palette`] produced by quantization
//! together with its error types.

mod error;
mod palette;

pub use error::{PaletteError, ParseColorError};
pub use palette::{Palette, MAX_PALETTE_SIZE};
