//! Median cut partitioning of a weighted color collection.
//!
//! Buckets live in an arena and the work queue holds arena indices, so a
//! split never aliases or copies the parent: the lower half stays in the
//! parent's slot and the upper half is pushed as a new entry.
//!
//! Tie-breaking, which decides which colors survive near the target count:
//! - the split channel is the one with the largest max-min spread, checked
//!   in the order red, green, blue (first wins);
//! - samples are stably sorted by that channel;
//! - the cut goes at the position in `1..len` that best balances the weight
//!   of the two halves (first such position wins).

use std::collections::VecDeque;

use crate::color::{total_weight, ColorBucket, ColorSample, Rgba8};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    #[inline]
    fn value(self, color: Rgba8) -> u8 {
        match self {
            Channel::Red => color.r,
            Channel::Green => color.g,
            Channel::Blue => color.b,
        }
    }
}

/// Split `samples` into at most `target` non-empty buckets.
///
/// Returns at least `min(target, samples.len())` buckets; every input sample
/// ends up in exactly one of them. Buckets with a single sample are never
/// split, so low color diversity yields fewer buckets than requested. Empty
/// input or a zero target yields no buckets.
///
/// Deterministic: identical input produces an identical partition.
///
/// # Example
///
/// ```
/// use median_cut::{partition, ColorSample, Rgba8};
///
/// let samples = vec![
///     ColorSample::new(3, Rgba8::opaque(0, 0, 0)),
///     ColorSample::new(1, Rgba8::opaque(128, 0, 0)),
///     ColorSample::new(2, Rgba8::opaque(255, 0, 0)),
/// ];
/// let buckets = partition(samples, 2);
/// assert_eq!(buckets.len(), 2);
/// assert!(buckets.iter().all(|b| !b.is_empty()));
/// ```
pub fn partition(samples: ColorBucket, target: usize) -> Vec<ColorBucket> {
    if samples.is_empty() || target == 0 {
        return Vec::new();
    }

    let sample_count = samples.len();
    let mut arena: Vec<ColorBucket> = Vec::with_capacity(target.min(sample_count));
    arena.push(samples);
    let mut queue: VecDeque<usize> = VecDeque::with_capacity(target.min(sample_count));
    queue.push_back(0);

    // Some queued bucket has two or more samples while the queue is shorter
    // than the sample count, so every pass makes progress.
    while queue.len() < target && queue.len() < sample_count {
        let Some(handle) = queue.pop_front() else {
            break;
        };
        let upper = match arena[handle].len() {
            0 | 1 => {
                queue.push_back(handle);
                continue;
            }
            2 => arena[handle].split_off(1),
            _ => split_bucket(&mut arena[handle]),
        };
        arena.push(upper);
        queue.push_back(handle);
        queue.push_back(arena.len() - 1);
    }

    tracing::trace!(
        samples = sample_count,
        target,
        buckets = queue.len(),
        "Median cut finished"
    );

    queue
        .into_iter()
        .map(|handle| std::mem::take(&mut arena[handle]))
        .collect()
}

/// Sort `bucket` along its widest channel and cut it at the weighted median.
/// Leaves the lower half in `bucket` and returns the upper half.
fn split_bucket(bucket: &mut ColorBucket) -> ColorBucket {
    let channel = widest_channel(bucket);
    bucket.sort_by_key(|s| channel.value(s.color));
    let cut = weighted_median(bucket);
    bucket.split_off(cut)
}

fn widest_channel(bucket: &[ColorSample]) -> Channel {
    let mut min = [u8::MAX; 3];
    let mut max = [u8::MIN; 3];
    for sample in bucket {
        let c = sample.color;
        for (i, v) in [c.r, c.g, c.b].into_iter().enumerate() {
            min[i] = min[i].min(v);
            max[i] = max[i].max(v);
        }
    }
    let spread = |i: usize| max[i].saturating_sub(min[i]);

    let mut widest = Channel::Red;
    let mut widest_spread = spread(0);
    for (i, channel) in [(1, Channel::Green), (2, Channel::Blue)] {
        if spread(i) > widest_spread {
            widest = channel;
            widest_spread = spread(i);
        }
    }
    widest
}

/// Cut position in `1..len` minimizing the weight difference between halves.
fn weighted_median(bucket: &[ColorSample]) -> usize {
    let total = total_weight(bucket);
    let mut prefix = 0u64;
    let mut best = 1;
    let mut best_diff = u64::MAX;
    for (i, sample) in bucket[..bucket.len() - 1].iter().enumerate() {
        prefix += sample.weight as u64;
        let diff = (2 * prefix).abs_diff(total);
        if diff < best_diff {
            best_diff = diff;
            best = i + 1;
        }
    }
    best
}
