//! PNG frame loading.
//!
//! Any PNG color type is accepted. Palettes, low bit depths and 16-bit
//! samples are normalized to 8-bit RGB(A) before conversion to a [`Frame`].

use std::io::Cursor;
use std::path::{Path, PathBuf};

use median_cut::{Frame, PixelSource, Rgba8};

use crate::error::{DecodeError, FramepalError};

/// Decode the first image of a PNG file into a frame.
pub fn decode_png(bytes: &[u8]) -> Result<Frame, DecodeError> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder.read_info()?;
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf)?;
    let data = &buf[..info.buffer_size()];
    let width = info.width as usize;
    let height = info.height as usize;

    let pixels: Vec<Rgba8> = match info.color_type {
        png::ColorType::Rgba => data
            .chunks_exact(4)
            .map(|p| Rgba8::new(p[0], p[1], p[2], p[3]))
            .collect(),
        png::ColorType::Rgb => data
            .chunks_exact(3)
            .map(|p| Rgba8::opaque(p[0], p[1], p[2]))
            .collect(),
        png::ColorType::GrayscaleAlpha => data
            .chunks_exact(2)
            .map(|p| Rgba8::new(p[0], p[0], p[0], p[1]))
            .collect(),
        png::ColorType::Grayscale => data.iter().map(|&v| Rgba8::opaque(v, v, v)).collect(),
        other => return Err(DecodeError::UnsupportedColor(other)),
    };

    Ok(Frame::new(width, height, pixels)?)
}

/// Read and decode one PNG file.
pub fn load_frame(path: &Path) -> Result<Frame, FramepalError> {
    let bytes = std::fs::read(path)?;
    let frame = decode_png(&bytes).map_err(|source| FramepalError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(
        path = %path.display(),
        width = frame.width(),
        height = frame.height(),
        "Decoded frame"
    );
    Ok(frame)
}

/// Read and decode every file in order.
pub fn load_frames(paths: &[PathBuf]) -> Result<Vec<Frame>, FramepalError> {
    paths.iter().map(|path| load_frame(path)).collect()
}
