//! Error types for palette operations

use thiserror::Error;

/// Error type for parsing hex color strings.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseColorError {
    /// Hex string has invalid length (must be 3, 6 or 8 characters after stripping '#')
    #[error("invalid hex color length (expected 3, 6 or 8 characters)")]
    InvalidLength,
    /// Invalid hexadecimal character encountered
    #[error("invalid hex character: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}

/// Error type for palette construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PaletteError {
    /// Requested capacity exceeds what an indexed image can address
    #[error("palette capacity {0} exceeds the maximum of 256 entries")]
    CapacityTooLarge(usize),
    /// No room left for another entry
    #[error("palette is full ({capacity} entries)")]
    Full {
        /// Capacity of the palette
        capacity: usize,
    },
    /// Invalid hex color string
    #[error("invalid color: {0}")]
    ParseColor(#[from] ParseColorError),
}
