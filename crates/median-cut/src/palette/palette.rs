//! Append-only indexed palette with nearest-color lookup.

use super::error::PaletteError;
use crate::color::Rgba8;

/// Largest palette an 8-bit index buffer can address.
pub const MAX_PALETTE_SIZE: usize = 256;

/// An ordered set of colors; a pixel's index is the entry's position.
///
/// Entries are only ever appended, and the quantizer hands the palette out
/// by value once construction is finished, so indices stay stable for the
/// lifetime of an encode session.
///
/// # Example
///
/// ```
/// use median_cut::{Palette, Rgba8};
///
/// let mut palette = Palette::with_capacity(4).unwrap();
/// palette.push(Rgba8::opaque(0, 0, 0)).unwrap();
/// palette.push(Rgba8::opaque(255, 255, 255)).unwrap();
///
/// assert_eq!(palette.len(), 2);
/// assert_eq!(palette.remaining(), 2);
/// assert_eq!(palette.nearest_index(Rgba8::opaque(200, 200, 200)), Some(1));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Rgba8>,
    capacity: usize,
    transparent_index: Option<u8>,
}

impl Palette {
    /// Create an empty palette that can hold up to `capacity` entries.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::CapacityTooLarge`] when `capacity > 256`.
    pub fn with_capacity(capacity: usize) -> Result<Self, PaletteError> {
        if capacity > MAX_PALETTE_SIZE {
            return Err(PaletteError::CapacityTooLarge(capacity));
        }
        Ok(Self {
            colors: Vec::with_capacity(capacity),
            capacity,
            transparent_index: None,
        })
    }

    /// Append a color, returning its index.
    ///
    /// Duplicates are allowed; lookups resolve to the first occurrence.
    pub fn push(&mut self, color: Rgba8) -> Result<u8, PaletteError> {
        if self.colors.len() >= self.capacity {
            return Err(PaletteError::Full {
                capacity: self.capacity,
            });
        }
        self.colors.push(color);
        // capacity <= 256, so the new index always fits
        Ok((self.colors.len() - 1) as u8)
    }

    /// Append the transparent slot and remember its index.
    ///
    /// Calling this twice returns the slot reserved the first time.
    pub fn reserve_transparent(&mut self) -> Result<u8, PaletteError> {
        if let Some(index) = self.transparent_index {
            return Ok(index);
        }
        let index = self.push(Rgba8::TRANSPARENT)?;
        self.transparent_index = Some(index);
        Ok(index)
    }

    /// Index of the reserved transparent slot, if one exists.
    #[inline]
    pub fn transparent_index(&self) -> Option<u8> {
        self.transparent_index
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Maximum number of entries.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Entries that can still be appended.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.capacity - self.colors.len()
    }

    /// All entries in index order.
    #[inline]
    pub fn colors(&self) -> &[Rgba8] {
        &self.colors
    }

    /// Entry at `index`, if present.
    #[inline]
    pub fn get(&self, index: usize) -> Option<Rgba8> {
        self.colors.get(index).copied()
    }

    /// Resolve a color to a palette index.
    ///
    /// An opaque entry with identical RGB wins immediately. Otherwise the
    /// opaque entry with the smallest squared RGB distance is chosen, the
    /// first one on ties. Transparent entries are only considered when the
    /// palette has nothing else. Returns `None` for an empty palette.
    pub fn nearest_index(&self, color: Rgba8) -> Option<u8> {
        let target = color.to_opaque();
        let mut best: Option<(usize, u32)> = None;
        for (i, entry) in self.colors.iter().enumerate() {
            if entry.is_transparent() {
                continue;
            }
            let distance = entry.to_opaque().distance_sq(target);
            if distance == 0 {
                return Some(i as u8);
            }
            if best.map_or(true, |(_, d)| distance < d) {
                best = Some((i, distance));
            }
        }
        match best {
            Some((i, _)) => Some(i as u8),
            None => self
                .transparent_index
                .or_else(|| (!self.colors.is_empty()).then_some(0)),
        }
    }

    /// Flat `[R, G, B, ...]` bytes, the layout of a PNG `PLTE` chunk.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.colors.iter().flat_map(|c| [c.r, c.g, c.b]).collect()
    }

    /// Per-entry alpha bytes, the layout of a PNG `tRNS` chunk.
    ///
    /// Trailing opaque entries are trimmed; `None` when every entry is opaque.
    pub fn to_alpha_bytes(&self) -> Option<Vec<u8>> {
        let last = self.colors.iter().rposition(|c| c.a != 255)?;
        Some(self.colors[..=last].iter().map(|c| c.a).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_limit() {
        assert!(Palette::with_capacity(256).is_ok());
        assert_eq!(
            Palette::with_capacity(257),
            Err(PaletteError::CapacityTooLarge(257))
        );
    }

    #[test]
    fn test_push_until_full() {
        let mut palette = Palette::with_capacity(2).unwrap();
        assert_eq!(palette.push(Rgba8::opaque(1, 1, 1)), Ok(0));
        assert_eq!(palette.push(Rgba8::opaque(2, 2, 2)), Ok(1));
        assert_eq!(
            palette.push(Rgba8::opaque(3, 3, 3)),
            Err(PaletteError::Full { capacity: 2 })
        );
        assert_eq!(palette.remaining(), 0);
    }

    #[test]
    fn test_full_palette_indexes_255() {
        let mut palette = Palette::with_capacity(256).unwrap();
        for i in 0..=255u8 {
            assert_eq!(palette.push(Rgba8::opaque(i, 0, 0)), Ok(i));
        }
        assert_eq!(palette.nearest_index(Rgba8::opaque(255, 0, 0)), Some(255));
    }

    #[test]
    fn test_reserve_transparent_is_idempotent() {
        let mut palette = Palette::with_capacity(4).unwrap();
        palette.push(Rgba8::opaque(9, 9, 9)).unwrap();
        assert_eq!(palette.reserve_transparent(), Ok(1));
        assert_eq!(palette.reserve_transparent(), Ok(1));
        assert_eq!(palette.len(), 2);
        assert_eq!(palette.transparent_index(), Some(1));
    }

    #[test]
    fn test_nearest_skips_transparent_slot() {
        let mut palette = Palette::with_capacity(4).unwrap();
        palette.reserve_transparent().unwrap();
        palette.push(Rgba8::opaque(40, 40, 40)).unwrap();
        // Opaque black is closer to the transparent slot's RGB but must not map there
        assert_eq!(palette.nearest_index(Rgba8::opaque(0, 0, 0)), Some(1));
    }

    #[test]
    fn test_nearest_first_wins_ties() {
        let mut palette = Palette::with_capacity(4).unwrap();
        palette.push(Rgba8::opaque(0, 0, 0)).unwrap();
        palette.push(Rgba8::opaque(20, 0, 0)).unwrap();
        assert_eq!(palette.nearest_index(Rgba8::opaque(10, 0, 0)), Some(0));
    }

    #[test]
    fn test_nearest_falls_back_to_transparent_only_palette() {
        let mut palette = Palette::with_capacity(1).unwrap();
        assert_eq!(palette.nearest_index(Rgba8::opaque(1, 2, 3)), None);
        palette.reserve_transparent().unwrap();
        assert_eq!(palette.nearest_index(Rgba8::opaque(1, 2, 3)), Some(0));
    }

    #[test]
    fn test_chunk_bytes() {
        let mut palette = Palette::with_capacity(4).unwrap();
        palette.push(Rgba8::opaque(1, 2, 3)).unwrap();
        assert_eq!(palette.to_alpha_bytes(), None);
        palette.reserve_transparent().unwrap();
        palette.push(Rgba8::opaque(4, 5, 6)).unwrap();
        assert_eq!(palette.to_rgb_bytes(), vec![1, 2, 3, 0, 0, 0, 4, 5, 6]);
        assert_eq!(palette.to_alpha_bytes(), Some(vec![255, 0]));
    }
}
