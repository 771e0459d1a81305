//! Unified error type for the median-cut public API.

use crate::palette::PaletteError;
use thiserror::Error;

/// Unified error type for quantization and frame emission.
///
/// Every variant is a precondition violation reported before any work
/// starts. Median cut itself cannot fail.
///
/// # Example
///
/// ```
/// use median_cut::{Frame, MedianCutQuantizer, QuantizeError, Rgba8};
///
/// let frames = [
///     Frame::filled(2, 2, Rgba8::opaque(0, 0, 0)),
///     Frame::filled(3, 2, Rgba8::opaque(0, 0, 0)),
/// ];
/// let err = MedianCutQuantizer::new().quantize(&frames).unwrap_err();
/// assert!(matches!(err, QuantizeError::BoundsMismatch { index: 1, .. }));
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuantizeError {
    /// An encode session needs at least one frame
    #[error("no frames provided")]
    NoFrames,
    /// A frame's bounds differ from the first frame's
    #[error(
        "frame {index} is {actual_width}x{actual_height}, expected {expected_width}x{expected_height}"
    )]
    BoundsMismatch {
        index: usize,
        expected_width: usize,
        expected_height: usize,
        actual_width: usize,
        actual_height: usize,
    },
    /// Pixel buffer length does not match the frame dimensions
    #[error("frame has {actual} pixels, expected {expected}")]
    PixelCount { expected: usize, actual: usize },
    /// Palette capacity outside 1..=256
    #[error("palette capacity must be between 1 and 256, got {0}")]
    InvalidCapacity(usize),
    /// Cache key width outside 1..=8 bits per channel
    #[error("cache key bits must be between 1 and 8, got {0}")]
    InvalidKeyBits(u8),
    /// Palette construction error
    #[error("palette error: {0}")]
    Palette(#[from] PaletteError),
}
