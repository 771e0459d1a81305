//! Weighted color samples

use super::Rgba8;

/// A color paired with its accumulated weight.
///
/// A weight of zero marks an empty slot in the histogram's sparse table and
/// never appears in a compacted bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColorSample {
    /// Occurrence or priority count
    pub weight: u32,
    /// The sampled color
    pub color: Rgba8,
}

impl ColorSample {
    /// The empty-slot sentinel.
    pub const EMPTY: Self = Self {
        weight: 0,
        color: Rgba8::TRANSPARENT,
    };

    #[inline]
    pub const fn new(weight: u32, color: Rgba8) -> Self {
        Self { weight, color }
    }

    /// Whether this is an empty table slot.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.weight == 0
    }
}

/// A working collection of samples. Order carries no meaning outside of
/// partitioning.
pub type ColorBucket = Vec<ColorSample>;

/// Sum of sample weights, widened so many saturated samples cannot overflow.
pub fn total_weight(samples: &[ColorSample]) -> u64 {
    samples.iter().map(|s| s.weight as u64).sum()
}
