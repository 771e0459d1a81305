//! Per-session frame emission.

use crate::api::QuantizeError;
use crate::frame::PixelSource;
use crate::output::{FrameTiming, IndexedFrame};
use crate::palette::Palette;

use super::index_cache::{CacheStats, PaletteIndexCache};

/// Maps frames onto a fixed palette, one encode session at a time.
///
/// Fully transparent pixels go straight to the palette's reserved
/// transparent slot when it has one. Every other pixel is resolved through
/// the session's [`PaletteIndexCache`], so each distinct truncated color
/// costs at most one palette search for the whole session.
///
/// # Example
///
/// ```
/// use median_cut::{Frame, FrameIndexer, FrameTiming, Palette, Rgba8};
///
/// let mut palette = Palette::with_capacity(2).unwrap();
/// palette.push(Rgba8::opaque(255, 0, 0)).unwrap();
/// palette.reserve_transparent().unwrap();
///
/// let mut frame = Frame::filled(2, 1, Rgba8::opaque(255, 0, 0));
/// frame.pixels_mut()[1] = Rgba8::TRANSPARENT;
///
/// let mut indexer = FrameIndexer::new(&palette);
/// let indexed = indexer.index_frame(&frame, FrameTiming::default());
/// assert_eq!(indexed.indices(), &[0, 1]);
/// ```
#[derive(Debug)]
pub struct FrameIndexer<'p> {
    palette: &'p Palette,
    cache: PaletteIndexCache,
}

impl<'p> FrameIndexer<'p> {
    /// Start a session with the default cache key width.
    pub fn new(palette: &'p Palette) -> Self {
        Self {
            palette,
            cache: PaletteIndexCache::default(),
        }
    }

    /// Start a session keeping `key_bits` bits per channel in cache keys.
    pub fn with_key_bits(palette: &'p Palette, key_bits: u8) -> Result<Self, QuantizeError> {
        Ok(Self {
            palette,
            cache: PaletteIndexCache::new(key_bits)?,
        })
    }

    /// Start a session with an existing (usually empty) cache.
    pub fn with_cache(palette: &'p Palette, cache: PaletteIndexCache) -> Self {
        Self { palette, cache }
    }

    /// Palette indices of every pixel of `frame`, row-major.
    pub fn index_pixels<S: PixelSource + ?Sized>(&mut self, frame: &S) -> Vec<u8> {
        let (width, height) = frame.dimensions();
        let transparent = self.palette.transparent_index();
        let mut indices = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                let color = frame.pixel(x, y);
                let index = match transparent {
                    Some(index) if color.is_transparent() => index,
                    _ => self.cache.resolve(self.palette, color),
                };
                indices.push(index);
            }
        }
        indices
    }

    /// Index `frame` and attach its timing.
    pub fn index_frame<S: PixelSource + ?Sized>(&mut self, frame: &S, timing: FrameTiming) -> IndexedFrame {
        let (width, height) = frame.dimensions();
        let indices = self.index_pixels(frame);
        IndexedFrame::new(indices, width, height, timing)
    }

    /// The palette this session maps onto.
    #[inline]
    pub fn palette(&self) -> &'p Palette {
        self.palette
    }

    /// Cache hit and miss counts so far.
    #[inline]
    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba8;
    use crate::frame::Frame;

    #[test]
    fn test_transparent_pixels_skip_lookup() {
        let mut palette = Palette::with_capacity(3).unwrap();
        palette.push(Rgba8::opaque(0, 0, 0)).unwrap();
        palette.reserve_transparent().unwrap();

        let frame = Frame::filled(4, 4, Rgba8::new(50, 60, 70, 0));
        let mut indexer = FrameIndexer::new(&palette);
        assert_eq!(indexer.index_pixels(&frame), vec![1; 16]);
        assert_eq!(indexer.stats(), CacheStats::default());
    }

    #[test]
    fn test_transparent_without_reserved_slot_uses_rgb() {
        let mut palette = Palette::with_capacity(2).unwrap();
        palette.push(Rgba8::opaque(0, 0, 0)).unwrap();
        palette.push(Rgba8::opaque(255, 255, 255)).unwrap();

        let frame = Frame::filled(1, 1, Rgba8::new(250, 250, 250, 0));
        let mut indexer = FrameIndexer::new(&palette);
        assert_eq!(indexer.index_pixels(&frame), vec![1]);
    }

    #[test]
    fn test_cache_shared_across_frames() {
        let mut palette = Palette::with_capacity(2).unwrap();
        palette.push(Rgba8::opaque(255, 0, 0)).unwrap();
        palette.push(Rgba8::opaque(0, 0, 255)).unwrap();

        let frames = [
            Frame::filled(8, 8, Rgba8::opaque(255, 0, 0)),
            Frame::filled(8, 8, Rgba8::opaque(0, 0, 255)),
            Frame::filled(8, 8, Rgba8::opaque(255, 0, 0)),
        ];
        let mut indexer = FrameIndexer::new(&palette);
        for frame in &frames {
            indexer.index_frame(frame, FrameTiming::default());
        }
        let stats = indexer.stats();
        assert_eq!(stats.misses, 2);
        assert_eq!(stats.hits, 3 * 64 - 2);
    }

    #[test]
    fn test_sessions_do_not_share_state() {
        let mut palette = Palette::with_capacity(1).unwrap();
        palette.push(Rgba8::opaque(9, 9, 9)).unwrap();
        let frame = Frame::filled(2, 2, Rgba8::opaque(9, 9, 9));

        let mut first = FrameIndexer::new(&palette);
        first.index_pixels(&frame);
        let second = FrameIndexer::new(&palette);
        assert_eq!(first.stats().misses, 1);
        assert_eq!(second.stats(), CacheStats::default());
    }

    #[test]
    fn test_invalid_key_bits() {
        let palette = Palette::with_capacity(1).unwrap();
        assert!(matches!(
            FrameIndexer::with_key_bits(&palette, 0),
            Err(QuantizeError::InvalidKeyBits(0))
        ));
    }
}
