//! Indexed frames and per-frame timing metadata.

use crate::palette::Palette;

/// Default display time of a frame, in milliseconds.
pub const DEFAULT_DELAY_MS: u32 = 100;

/// How the canvas is prepared before the next frame is composited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Disposal {
    /// Leave the frame in place.
    None,
    /// Clear the frame's area to the background (fully transparent).
    #[default]
    Background,
    /// Restore the canvas to what it was before this frame.
    Previous,
}

/// Display time and disposal of one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameTiming {
    /// Display time in milliseconds
    pub delay_ms: u32,
    /// Disposal applied after the frame is shown
    pub disposal: Disposal,
}

impl FrameTiming {
    pub fn new(delay_ms: u32, disposal: Disposal) -> Self {
        Self { delay_ms, disposal }
    }
}

impl Default for FrameTiming {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY_MS, Disposal::default())
    }
}

/// One frame mapped onto a shared palette.
///
/// Stores one `u8` palette index per pixel in row-major order. The palette
/// itself is shared by every frame of the session and is not owned here.
///
/// # Example
///
/// ```
/// use median_cut::{FrameTiming, IndexedFrame, Palette, Rgba8};
///
/// let mut palette = Palette::with_capacity(2).unwrap();
/// palette.push(Rgba8::opaque(0, 0, 0)).unwrap();
/// palette.push(Rgba8::opaque(255, 255, 255)).unwrap();
///
/// let frame = IndexedFrame::new(vec![0, 1, 1, 0], 2, 2, FrameTiming::default());
/// assert_eq!(frame.indices(), &[0, 1, 1, 0]);
/// assert_eq!(frame.to_rgba(&palette).len(), 2 * 2 * 4);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedFrame {
    indices: Vec<u8>,
    width: usize,
    height: usize,
    timing: FrameTiming,
}

impl IndexedFrame {
    /// # Panics (debug only)
    ///
    /// Debug-asserts that `indices.len() == width * height`.
    pub fn new(indices: Vec<u8>, width: usize, height: usize, timing: FrameTiming) -> Self {
        debug_assert_eq!(
            indices.len(),
            width * height,
            "indices length ({}) must match width * height ({}x{}={})",
            indices.len(),
            width,
            height,
            width * height,
        );
        Self {
            indices,
            width,
            height,
            timing,
        }
    }

    /// Palette indices, one per pixel, row-major.
    #[inline]
    pub fn indices(&self) -> &[u8] {
        &self.indices
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn timing(&self) -> FrameTiming {
        self.timing
    }

    /// Replace the timing metadata.
    pub fn set_timing(&mut self, timing: FrameTiming) {
        self.timing = timing;
    }

    /// Expand back to `[R, G, B, A, ...]` bytes through `palette`.
    ///
    /// Indices outside the palette render as transparent.
    pub fn to_rgba(&self, palette: &Palette) -> Vec<u8> {
        let mut rgba = Vec::with_capacity(self.indices.len() * 4);
        for &idx in &self.indices {
            let color = palette.get(idx as usize).unwrap_or_default();
            rgba.extend_from_slice(&color.to_bytes());
        }
        rgba
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba8;

    #[test]
    fn test_default_timing() {
        let timing = FrameTiming::default();
        assert_eq!(timing.delay_ms, 100);
        assert_eq!(timing.disposal, Disposal::Background);
    }

    #[test]
    fn test_to_rgba_through_palette() {
        let mut palette = Palette::with_capacity(2).unwrap();
        palette.push(Rgba8::opaque(9, 8, 7)).unwrap();
        palette.reserve_transparent().unwrap();
        let frame = IndexedFrame::new(vec![1, 0], 2, 1, FrameTiming::default());
        assert_eq!(frame.to_rgba(&palette), vec![0, 0, 0, 0, 9, 8, 7, 255]);
    }
}
