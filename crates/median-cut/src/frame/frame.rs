//! Owned RGBA8 frames and the pixel-access trait.

use crate::api::QuantizeError;
use crate::color::Rgba8;

/// Read access to a rectangular grid of RGBA8 pixels.
///
/// Coordinates are zero-based; callers never request pixels outside
/// `0..width` x `0..height`.
pub trait PixelSource {
    /// Width in pixels.
    fn width(&self) -> usize;
    /// Height in pixels.
    fn height(&self) -> usize;
    /// The pixel at column `x`, row `y`.
    fn pixel(&self, x: usize, y: usize) -> Rgba8;

    /// `(width, height)`
    fn dimensions(&self) -> (usize, usize) {
        (self.width(), self.height())
    }
}

/// An owned RGBA8 raster in row-major order.
///
/// # Example
///
/// ```
/// use median_cut::{Frame, PixelSource, Rgba8};
///
/// let frame = Frame::filled(2, 2, Rgba8::opaque(255, 0, 0));
/// assert_eq!(frame.dimensions(), (2, 2));
/// assert_eq!(frame.pixel(1, 1), Rgba8::opaque(255, 0, 0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    width: usize,
    height: usize,
    pixels: Vec<Rgba8>,
}

impl Frame {
    /// Wrap row-major pixels.
    ///
    /// # Errors
    ///
    /// Returns [`QuantizeError::PixelCount`] when `pixels.len() != width * height`.
    pub fn new(width: usize, height: usize, pixels: Vec<Rgba8>) -> Result<Self, QuantizeError> {
        if pixels.len() != width * height {
            return Err(QuantizeError::PixelCount {
                expected: width * height,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build a frame from tightly packed `[R, G, B, A, ...]` bytes.
    pub fn from_rgba_bytes(width: usize, height: usize, bytes: &[u8]) -> Result<Self, QuantizeError> {
        if bytes.len() != width * height * 4 {
            return Err(QuantizeError::PixelCount {
                expected: width * height,
                actual: bytes.len() / 4,
            });
        }
        let pixels = bytes
            .chunks_exact(4)
            .map(|p| Rgba8::new(p[0], p[1], p[2], p[3]))
            .collect();
        Self::new(width, height, pixels)
    }

    /// A frame where every pixel has the same color.
    pub fn filled(width: usize, height: usize, color: Rgba8) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width * height],
        }
    }

    /// All pixels in row-major order.
    #[inline]
    pub fn pixels(&self) -> &[Rgba8] {
        &self.pixels
    }

    /// Mutable access for in-place edits.
    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [Rgba8] {
        &mut self.pixels
    }
}

impl PixelSource for Frame {
    #[inline]
    fn width(&self) -> usize {
        self.width
    }

    #[inline]
    fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn pixel(&self, x: usize, y: usize) -> Rgba8 {
        self.pixels[y * self.width + x]
    }
}

impl<T: PixelSource + ?Sized> PixelSource for &T {
    fn width(&self) -> usize {
        (**self).width()
    }

    fn height(&self) -> usize {
        (**self).height()
    }

    fn pixel(&self, x: usize, y: usize) -> Rgba8 {
        (**self).pixel(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_wrong_length() {
        let err = Frame::new(2, 2, vec![Rgba8::default(); 3]).unwrap_err();
        assert_eq!(
            err,
            QuantizeError::PixelCount {
                expected: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn test_from_rgba_bytes_row_major() {
        let bytes = [
            1, 0, 0, 255, 2, 0, 0, 255, //
            3, 0, 0, 255, 4, 0, 0, 0,
        ];
        let frame = Frame::from_rgba_bytes(2, 2, &bytes).unwrap();
        assert_eq!(frame.pixel(1, 0), Rgba8::opaque(2, 0, 0));
        assert_eq!(frame.pixel(0, 1), Rgba8::opaque(3, 0, 0));
        assert_eq!(frame.pixel(1, 1), Rgba8::new(4, 0, 0, 0));
    }

    #[test]
    fn test_reference_is_pixel_source() {
        fn area<S: PixelSource>(s: S) -> usize {
            s.width() * s.height()
        }
        let frame = Frame::filled(3, 2, Rgba8::TRANSPARENT);
        assert_eq!(area(&frame), 6);
    }
}
