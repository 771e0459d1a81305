//! MedianCutQuantizer builder -- the primary ergonomic entry point for the crate.
//!
//! [`MedianCutQuantizer`] chains histogram, median cut and aggregation into
//! a shared palette, and optionally maps the frames onto it.

use crate::color::Rgba8;
use crate::frame::{PixelSource, PixelWeight, Uniform};
use crate::output::{FrameTiming, IndexedFrame};
use crate::palette::{Palette, MAX_PALETTE_SIZE};
use crate::quantize::{aggregate_into, build_histogram, partition, Aggregation, ScratchPool};
use crate::remap::{CacheStats, FrameIndexer, PaletteIndexCache, DEFAULT_KEY_BITS};

use super::error::QuantizeError;

/// A palette together with every frame mapped onto it.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantizedAnimation {
    /// The shared palette
    pub palette: Palette,
    /// One indexed frame per input frame, in input order
    pub frames: Vec<IndexedFrame>,
    /// Index cache statistics of the emission session
    pub cache_stats: CacheStats,
}

/// High-level median cut quantizer for frame sequences.
///
/// # Design
///
/// - Configuration methods consume and return `self` (standard builder pattern)
/// - [`quantize()`](Self::quantize) takes `&self`, so one quantizer serves any
///   number of independent frame sets, from any number of threads
/// - Preconditions are checked before any pixel is read
///
/// # Example
///
/// ```
/// use median_cut::{Aggregation, Frame, MedianCutQuantizer, Rgba8};
///
/// let frames = [
///     Frame::filled(2, 2, Rgba8::opaque(255, 0, 0)),
///     Frame::filled(2, 2, Rgba8::opaque(0, 255, 0)),
/// ];
///
/// let quantizer = MedianCutQuantizer::new()
///     .capacity(16)
///     .aggregation(Aggregation::Mean);
///
/// let palette = quantizer.quantize(&frames).unwrap();
/// assert_eq!(palette.len(), 2);
/// assert_eq!(palette.transparent_index(), None);
/// ```
pub struct MedianCutQuantizer {
    aggregation: Aggregation,
    capacity: usize,
    reserve_transparent: bool,
    key_bits: u8,
    seed_colors: Vec<Rgba8>,
    weighting: Box<dyn PixelWeight + Send + Sync>,
}

impl MedianCutQuantizer {
    /// Create a quantizer with defaults: 256 colors, [`Aggregation::Mode`],
    /// uniform weighting, transparency reserved only when observed.
    pub fn new() -> Self {
        Self {
            aggregation: Aggregation::Mode,
            capacity: MAX_PALETTE_SIZE,
            reserve_transparent: false,
            key_bits: DEFAULT_KEY_BITS,
            seed_colors: Vec::new(),
            weighting: Box::new(Uniform),
        }
    }

    /// Set the bucket aggregation mode.
    #[inline]
    pub fn aggregation(mut self, aggregation: Aggregation) -> Self {
        self.aggregation = aggregation;
        self
    }

    /// Set the palette capacity (1..=256), seed colors and the transparent
    /// slot included.
    #[inline]
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Always reserve a transparent slot, even when no pixel has alpha 0.
    #[inline]
    pub fn reserve_transparent(mut self, reserve: bool) -> Self {
        self.reserve_transparent = reserve;
        self
    }

    /// Bits per channel kept in the emission cache key (1..=8).
    #[inline]
    pub fn key_bits(mut self, bits: u8) -> Self {
        self.key_bits = bits;
        self
    }

    /// Colors placed at the start of the palette ahead of quantized ones.
    pub fn seed_colors<I: IntoIterator<Item = Rgba8>>(mut self, colors: I) -> Self {
        self.seed_colors = colors.into_iter().collect();
        self
    }

    /// Replace the per-pixel weighting (default: [`Uniform`]).
    pub fn weighting<W: PixelWeight + Send + Sync + 'static>(mut self, weighting: W) -> Self {
        self.weighting = Box::new(weighting);
        self
    }

    /// Build the shared palette for `frames`.
    ///
    /// The palette holds the seed colors, then one color per median cut
    /// bucket, then the transparent slot when any pixel had alpha 0 (or
    /// reservation was forced). An empty frame list yields a palette with
    /// only the seed colors and, if forced, the transparent slot.
    ///
    /// # Errors
    ///
    /// - [`QuantizeError::InvalidCapacity`] for a capacity outside 1..=256
    /// - [`QuantizeError::BoundsMismatch`] when frame dimensions differ
    /// - [`QuantizeError::Palette`] when the seed colors leave no room
    pub fn quantize<S: PixelSource>(&self, frames: &[S]) -> Result<Palette, QuantizeError> {
        if !(1..=MAX_PALETTE_SIZE).contains(&self.capacity) {
            return Err(QuantizeError::InvalidCapacity(self.capacity));
        }

        let mut palette = Palette::with_capacity(self.capacity)?;
        for &color in &self.seed_colors {
            palette.push(color)?;
        }

        let histogram = build_histogram(frames, self.weighting.as_ref(), ScratchPool::global())?;
        let reserve = self.reserve_transparent || histogram.transparency_observed;
        if reserve && palette.remaining() == 0 {
            return Err(crate::palette::PaletteError::Full {
                capacity: self.capacity,
            }
            .into());
        }

        let target = palette.remaining() - usize::from(reserve);
        let distinct = histogram.len();
        let buckets = partition(histogram.samples, target);
        aggregate_into(&mut palette, &buckets, self.aggregation)?;
        if reserve {
            palette.reserve_transparent()?;
        }

        tracing::debug!(
            frames = frames.len(),
            distinct_colors = distinct,
            buckets = buckets.len(),
            palette = palette.len(),
            transparent = ?palette.transparent_index(),
            aggregation = self.aggregation.name(),
            "Quantized frames"
        );

        Ok(palette)
    }

    /// Quantize `frames` and map each of them onto the resulting palette.
    ///
    /// Every frame gets the same `timing`; adjust individual frames with
    /// [`IndexedFrame::set_timing`].
    ///
    /// # Errors
    ///
    /// [`QuantizeError::NoFrames`] for an empty frame list, plus every error
    /// of [`quantize()`](Self::quantize) and an invalid cache key width.
    pub fn quantize_frames<S: PixelSource>(
        &self,
        frames: &[S],
        timing: FrameTiming,
    ) -> Result<QuantizedAnimation, QuantizeError> {
        if frames.is_empty() {
            return Err(QuantizeError::NoFrames);
        }
        let cache = PaletteIndexCache::new(self.key_bits)?;
        let palette = self.quantize(frames)?;

        let mut indexer = FrameIndexer::with_cache(&palette, cache);
        let indexed: Vec<IndexedFrame> = frames
            .iter()
            .map(|frame| indexer.index_frame(frame, timing))
            .collect();
        let cache_stats = indexer.stats();

        tracing::debug!(
            frames = indexed.len(),
            hits = cache_stats.hits,
            misses = cache_stats.misses,
            "Indexed frames"
        );

        Ok(QuantizedAnimation {
            palette,
            frames: indexed,
            cache_stats,
        })
    }
}

impl Default for MedianCutQuantizer {
    fn default() -> Self {
        Self::new()
    }
}
