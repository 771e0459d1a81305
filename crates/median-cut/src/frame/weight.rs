//! Per-pixel weighting used while building the histogram.

use super::PixelSource;

/// Assigns an importance weight to each sampled pixel.
///
/// The default is [`Uniform`]. Any closure with the signature
/// `Fn(&dyn PixelSource, x, y) -> u32` works as a weighting, which lets
/// callers substitute saliency maps. A weight of 0 drops the pixel from the
/// histogram.
pub trait PixelWeight {
    fn weight(&self, image: &dyn PixelSource, x: usize, y: usize) -> u32;
}

/// Every pixel counts once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Uniform;

impl PixelWeight for Uniform {
    #[inline]
    fn weight(&self, _image: &dyn PixelSource, _x: usize, _y: usize) -> u32 {
        1
    }
}

impl<F> PixelWeight for F
where
    F: Fn(&dyn PixelSource, usize, usize) -> u32,
{
    #[inline]
    fn weight(&self, image: &dyn PixelSource, x: usize, y: usize) -> u32 {
        self(image, x, y)
    }
}
