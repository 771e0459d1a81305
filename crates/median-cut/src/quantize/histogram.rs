//! Weighted color histogram over one or more same-bounds frames.
//!
//! Colors are accumulated into an array-backed sparse table (weight 0 marks
//! an empty slot) sized to twice the frame area. The slot is the 24-bit RGB
//! value modulo the table size; collisions probe forward with a step that
//! grows by one per attempt. Probing is deliberately approximate: it only
//! has to find either an empty slot or the same color.

use crate::api::QuantizeError;
use crate::color::{total_weight, ColorBucket, ColorSample, Rgba8};
use crate::frame::{PixelSource, PixelWeight};

use super::pool::{ScratchBuffer, ScratchPool};

/// Compacted histogram of the opaque pixels of a frame set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Histogram {
    /// One sample per distinct opaque color, weight > 0.
    pub samples: ColorBucket,
    /// Whether any sampled pixel had alpha 0.
    pub transparency_observed: bool,
}

impl Histogram {
    /// Number of distinct colors.
    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Sum of all sample weights.
    pub fn total_weight(&self) -> u64 {
        total_weight(&self.samples)
    }
}

/// Build the weighted histogram of `frames`.
///
/// Pixels with alpha 0 set [`Histogram::transparency_observed`] and are
/// otherwise ignored. Every other pixel is sampled as opaque and contributes
/// the weight `weighting` assigns it; a weight of 0 skips the pixel. With
/// [`Uniform`](crate::Uniform) weighting the total weight equals the number
/// of opaque pixels.
///
/// An empty frame list yields an empty histogram.
///
/// # Errors
///
/// [`QuantizeError::BoundsMismatch`] when a frame's dimensions differ from the
/// first frame's. Checked before any pixel is read.
pub fn build_histogram<S, W>(
    frames: &[S],
    weighting: &W,
    pool: &ScratchPool,
) -> Result<Histogram, QuantizeError>
where
    S: PixelSource,
    W: PixelWeight + ?Sized,
{
    let Some(first) = frames.first() else {
        return Ok(Histogram::default());
    };
    let (width, height) = first.dimensions();
    check_bounds(frames, width, height)?;

    let size = width * height * 2;
    if size == 0 {
        return Ok(Histogram::default());
    }

    let mut table = SparseTable::new(pool, size);
    let mut transparency_observed = false;

    for frame in frames {
        for y in 0..height {
            for x in 0..width {
                let color = frame.pixel(x, y);
                if color.is_transparent() {
                    transparency_observed = true;
                    continue;
                }
                let weight = weighting.weight(frame, x, y);
                if weight != 0 {
                    table.add(color.to_opaque(), weight);
                }
            }
        }
    }

    let samples = table.compact();
    tracing::debug!(
        frames = frames.len(),
        width,
        height,
        colors = samples.len(),
        transparency_observed,
        "Built color histogram"
    );

    Ok(Histogram {
        samples,
        transparency_observed,
    })
}

fn check_bounds<S: PixelSource>(frames: &[S], width: usize, height: usize) -> Result<(), QuantizeError> {
    for (index, frame) in frames.iter().enumerate() {
        let (actual_width, actual_height) = frame.dimensions();
        if (actual_width, actual_height) != (width, height) {
            return Err(QuantizeError::BoundsMismatch {
                index,
                expected_width: width,
                expected_height: height,
                actual_width,
                actual_height,
            });
        }
    }
    Ok(())
}

/// Open-addressing table over a pooled buffer.
struct SparseTable<'p> {
    pool: &'p ScratchPool,
    slots: ScratchBuffer<'p>,
    occupied: usize,
}

impl<'p> SparseTable<'p> {
    fn new(pool: &'p ScratchPool, size: usize) -> Self {
        Self {
            pool,
            slots: pool.checkout(size),
            occupied: 0,
        }
    }

    fn add(&mut self, color: Rgba8, weight: u32) {
        // A single frame never fills more than half the table. Frame sets
        // with more distinct colors than that grow it instead.
        if self.occupied * 2 >= self.slots.len() {
            self.grow();
        }
        while !Self::probe(&mut self.slots, color, weight, &mut self.occupied) {
            self.grow();
        }
    }

    /// Returns false when no usable slot turned up within `len` probes.
    fn probe(slots: &mut [ColorSample], color: Rgba8, weight: u32, occupied: &mut usize) -> bool {
        let size = slots.len();
        let mut index = color.rgb24() as usize;
        for step in 1..=size {
            let slot = &mut slots[index % size];
            if slot.is_empty() {
                *slot = ColorSample::new(weight, color);
                *occupied += 1;
                return true;
            }
            if slot.color == color {
                slot.weight = slot.weight.saturating_add(weight);
                return true;
            }
            index += 1 + step;
        }
        false
    }

    fn grow(&mut self) {
        let mut len = self.slots.len() * 2;
        loop {
            let mut bigger = self.pool.checkout(len);
            let mut occupied = 0;
            let rehashed = self
                .slots
                .iter()
                .filter(|s| !s.is_empty())
                .all(|s| Self::probe(&mut bigger, s.color, s.weight, &mut occupied));
            if rehashed {
                tracing::trace!(
                    from = self.slots.len(),
                    to = len,
                    colors = occupied,
                    "Grew histogram table"
                );
                self.slots = bigger;
                self.occupied = occupied;
                return;
            }
            len *= 2;
        }
    }

    fn compact(&self) -> ColorBucket {
        self.slots.iter().copied().filter(|s| !s.is_empty()).collect()
    }
}
