//! Truncated-color lookup cache.
//!
//! The key keeps only the top `key_bits` bits of each RGB channel, so
//! near-identical colors share an entry and a cached index. That loss is
//! intended: it bounds the number of palette searches per session by the
//! number of distinct keys, independent of resolution and frame count.

use std::collections::HashMap;

use crate::api::QuantizeError;
use crate::color::Rgba8;
use crate::palette::Palette;

/// Bits kept per channel when none are configured.
pub const DEFAULT_KEY_BITS: u8 = 6;

/// Hit and miss counts of a [`PaletteIndexCache`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that searched the palette
    pub misses: u64,
}

/// Per-session map from truncated color key to palette index.
///
/// Only valid for the palette it was filled against; a session creates its
/// own cache and drops it when done.
#[derive(Debug, Clone)]
pub struct PaletteIndexCache {
    key_bits: u8,
    entries: HashMap<u32, u8>,
    stats: CacheStats,
}

impl PaletteIndexCache {
    /// Create an empty cache keeping `key_bits` bits per channel.
    ///
    /// # Errors
    ///
    /// [`QuantizeError::InvalidKeyBits`] unless `1 <= key_bits <= 8`.
    pub fn new(key_bits: u8) -> Result<Self, QuantizeError> {
        if !(1..=8).contains(&key_bits) {
            return Err(QuantizeError::InvalidKeyBits(key_bits));
        }
        Ok(Self {
            key_bits,
            entries: HashMap::new(),
            stats: CacheStats::default(),
        })
    }

    /// The truncated key of `color`. Alpha is not part of the key.
    #[inline]
    pub fn key(&self, color: Rgba8) -> u32 {
        let bits = self.key_bits as u32;
        let shift = 8 - bits;
        (color.r as u32 >> shift) << (2 * bits) | (color.g as u32 >> shift) << bits | color.b as u32 >> shift
    }

    /// Resolve `color` to an index of `palette`, searching the palette only
    /// on the first lookup of its key. An empty palette resolves to 0.
    pub fn resolve(&mut self, palette: &Palette, color: Rgba8) -> u8 {
        let key = self.key(color);
        if let Some(&index) = self.entries.get(&key) {
            self.stats.hits += 1;
            return index;
        }
        self.stats.misses += 1;
        let index = palette.nearest_index(color).unwrap_or(0);
        self.entries.insert(key, index);
        index
    }

    #[inline]
    pub fn key_bits(&self) -> u8 {
        self.key_bits
    }

    /// Number of cached keys.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}

impl Default for PaletteIndexCache {
    fn default() -> Self {
        Self {
            key_bits: DEFAULT_KEY_BITS,
            entries: HashMap::new(),
            stats: CacheStats::default(),
        }
    }
}
