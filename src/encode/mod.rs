//! Output containers for quantized frame sets.
//!
//! Both encoders write every frame against the one shared palette:
//!
//! - [`ApngEncoder`]: a single animated indexed PNG
//! - [`PngSequenceEncoder`]: one indexed PNG per frame plus a JSON manifest

mod apng;
mod frames;
mod pack;

pub use apng::{delay_fraction, ApngEncoder};
pub use frames::{FrameManifest, ManifestEntry, PngSequenceEncoder};
pub use pack::{bit_depth_for, encode_indexed_png, pack_indices};

use median_cut::{Disposal, IndexedFrame, Palette};

use crate::error::EncodeError;

/// Writes a palette and its indexed frames to some container.
pub trait FrameEncoder {
    fn encode(&mut self, palette: &Palette, frames: &[IndexedFrame]) -> Result<(), EncodeError>;
}

/// Check that `frames` can be written: at least one frame, a non-empty
/// palette, non-zero dimensions that fit PNG headers, and every frame the
/// size of the first. Returns the shared dimensions.
pub fn validate(palette: &Palette, frames: &[IndexedFrame]) -> Result<(u32, u32), EncodeError> {
    let first = frames.first().ok_or(EncodeError::NoFrames)?;
    if palette.is_empty() {
        return Err(EncodeError::EmptyPalette);
    }

    let (width, height) = (first.width(), first.height());
    let (Ok(png_width), Ok(png_height)) = (u32::try_from(width), u32::try_from(height)) else {
        return Err(EncodeError::UnsupportedDimensions { width, height });
    };
    if width == 0 || height == 0 {
        return Err(EncodeError::UnsupportedDimensions { width, height });
    }

    for (index, frame) in frames.iter().enumerate() {
        if (frame.width(), frame.height()) != (width, height) {
            return Err(EncodeError::FrameSize {
                index,
                width: frame.width(),
                height: frame.height(),
                expected_width: width,
                expected_height: height,
            });
        }
    }

    Ok((png_width, png_height))
}

/// Lowercase name used in manifests and logs.
pub fn disposal_name(disposal: Disposal) -> &'static str {
    match disposal {
        Disposal::None => "none",
        Disposal::Background => "background",
        Disposal::Previous => "previous",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use median_cut::{FrameTiming, Rgba8};

    fn palette() -> Palette {
        let mut palette = Palette::with_capacity(4).unwrap();
        palette.push(Rgba8::opaque(0, 0, 0)).unwrap();
        palette
    }

    fn frame(width: usize, height: usize) -> IndexedFrame {
        IndexedFrame::new(vec![0; width * height], width, height, FrameTiming::default())
    }

    #[test]
    fn test_validate_accepts_matching_frames() {
        assert_eq!(validate(&palette(), &[frame(3, 2), frame(3, 2)]).unwrap(), (3, 2));
    }

    #[test]
    fn test_validate_rejects_empty_inputs() {
        assert!(matches!(validate(&palette(), &[]), Err(EncodeError::NoFrames)));
        let empty = Palette::with_capacity(4).unwrap();
        assert!(matches!(
            validate(&empty, &[frame(1, 1)]),
            Err(EncodeError::EmptyPalette)
        ));
    }

    #[test]
    fn test_validate_rejects_zero_area() {
        assert!(matches!(
            validate(&palette(), &[frame(0, 4)]),
            Err(EncodeError::UnsupportedDimensions { width: 0, height: 4 })
        ));
    }

    #[test]
    fn test_validate_rejects_size_change() {
        assert!(matches!(
            validate(&palette(), &[frame(2, 2), frame(2, 2), frame(2, 3)]),
            Err(EncodeError::FrameSize { index: 2, .. })
        ));
    }
}
