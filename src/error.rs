use std::path::PathBuf;

use median_cut::{ParseColorError, QuantizeError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FramepalError {
    #[error("Quantize error: {0}")]
    Quantize(#[from] QuantizeError),

    #[error("Failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: DecodeError,
    },

    #[error("Encode error: {0}")]
    Encode(#[from] EncodeError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid seed color {value:?}: {source}")]
    SeedColor {
        value: String,
        #[source]
        source: ParseColorError,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("PNG decode error: {0}")]
    Png(#[from] png::DecodingError),

    #[error("Unsupported color type: {0:?}")]
    UnsupportedColor(png::ColorType),

    #[error("Frame error: {0}")]
    Frame(#[from] QuantizeError),
}

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("No frames to encode")]
    NoFrames,

    #[error("Palette is empty")]
    EmptyPalette,

    #[error("Unsupported dimensions: {width}x{height}")]
    UnsupportedDimensions { width: usize, height: usize },

    #[error("Frame {index} is {width}x{height}, expected {expected_width}x{expected_height}")]
    FrameSize {
        index: usize,
        width: usize,
        height: usize,
        expected_width: usize,
        expected_height: usize,
    },

    #[error("PNG encode error: {0}")]
    Png(#[from] png::EncodingError),

    #[error("Manifest error: {0}")]
    Manifest(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
