//! Reduce each bucket to the single color that represents it.

use crate::color::{ColorSample, Rgba8};
use crate::palette::{Palette, PaletteError};

/// How a bucket is reduced to one palette color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Aggregation {
    /// The most heavily weighted color in the bucket (first wins ties).
    /// Every palette entry is a color that actually occurs in the input.
    #[default]
    Mode,
    /// The weight-proportional average of the bucket, rounded per channel.
    Mean,
}

impl Aggregation {
    /// Lower-case name as used in configuration.
    pub fn name(self) -> &'static str {
        match self {
            Aggregation::Mode => "mode",
            Aggregation::Mean => "mean",
        }
    }
}

/// The representative color of `bucket`, or `None` if it carries no weight.
///
/// # Example
///
/// ```
/// use median_cut::{representative, Aggregation, ColorSample, Rgba8};
///
/// let bucket = [
///     ColorSample::new(3, Rgba8::opaque(0, 0, 0)),
///     ColorSample::new(1, Rgba8::opaque(200, 100, 40)),
/// ];
/// assert_eq!(representative(&bucket, Aggregation::Mode), Some(Rgba8::opaque(0, 0, 0)));
/// assert_eq!(representative(&bucket, Aggregation::Mean), Some(Rgba8::opaque(50, 25, 10)));
/// ```
pub fn representative(bucket: &[ColorSample], aggregation: Aggregation) -> Option<Rgba8> {
    match aggregation {
        Aggregation::Mode => mode(bucket),
        Aggregation::Mean => mean(bucket),
    }
}

/// Append one representative per bucket to `palette`.
///
/// Buckets without weight contribute nothing.
///
/// # Errors
///
/// [`PaletteError::Full`] when the palette runs out of room; callers size
/// the partition to the palette's remaining capacity so this only signals
/// a caller bug.
pub fn aggregate_into(
    palette: &mut Palette,
    buckets: &[Vec<ColorSample>],
    aggregation: Aggregation,
) -> Result<(), PaletteError> {
    for bucket in buckets {
        if let Some(color) = representative(bucket, aggregation) {
            palette.push(color)?;
        }
    }
    Ok(())
}

fn mode(bucket: &[ColorSample]) -> Option<Rgba8> {
    let mut best: Option<&ColorSample> = None;
    for sample in bucket.iter().filter(|s| !s.is_empty()) {
        if best.map_or(true, |b| sample.weight > b.weight) {
            best = Some(sample);
        }
    }
    best.map(|s| s.color)
}

fn mean(bucket: &[ColorSample]) -> Option<Rgba8> {
    let mut total = 0u64;
    let mut sums = [0u64; 3];
    for sample in bucket {
        let w = sample.weight as u64;
        total += w;
        sums[0] += sample.color.r as u64 * w;
        sums[1] += sample.color.g as u64 * w;
        sums[2] += sample.color.b as u64 * w;
    }
    if total == 0 {
        return None;
    }
    // Round half up; the quotient never exceeds 255
    let channel = |sum: u64| ((sum + total / 2) / total) as u8;
    Some(Rgba8::opaque(channel(sums[0]), channel(sums[1]), channel(sums[2])))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_picks_heaviest() {
        let bucket = [
            ColorSample::new(2, Rgba8::opaque(1, 1, 1)),
            ColorSample::new(7, Rgba8::opaque(2, 2, 2)),
            ColorSample::new(3, Rgba8::opaque(3, 3, 3)),
        ];
        assert_eq!(mode(&bucket), Some(Rgba8::opaque(2, 2, 2)));
    }

    #[test]
    fn test_mode_first_seen_wins_ties() {
        let bucket = [
            ColorSample::new(4, Rgba8::opaque(9, 0, 0)),
            ColorSample::new(4, Rgba8::opaque(0, 9, 0)),
        ];
        assert_eq!(mode(&bucket), Some(Rgba8::opaque(9, 0, 0)));
    }

    #[test]
    fn test_mean_rounds_to_nearest() {
        // (0 * 1 + 255 * 2) / 3 = 170
        // (0 * 1 + 1 * 2) / 3 = 0.67 -> 1
        let bucket = [
            ColorSample::new(1, Rgba8::opaque(0, 0, 0)),
            ColorSample::new(2, Rgba8::opaque(255, 1, 0)),
        ];
        assert_eq!(mean(&bucket), Some(Rgba8::opaque(170, 1, 0)));
    }

    #[test]
    fn test_mean_handles_saturated_weights() {
        let bucket = [
            ColorSample::new(u32::MAX, Rgba8::opaque(255, 255, 255)),
            ColorSample::new(u32::MAX, Rgba8::opaque(255, 255, 255)),
        ];
        assert_eq!(mean(&bucket), Some(Rgba8::opaque(255, 255, 255)));
    }

    #[test]
    fn test_weightless_bucket_has_no_representative() {
        assert_eq!(representative(&[], Aggregation::Mode), None);
        assert_eq!(representative(&[], Aggregation::Mean), None);
    }

    #[test]
    fn test_aggregate_appends_after_existing_entries() {
        let mut palette = Palette::with_capacity(4).unwrap();
        palette.push(Rgba8::opaque(1, 2, 3)).unwrap();
        let buckets = vec![
            vec![ColorSample::new(1, Rgba8::opaque(10, 0, 0))],
            vec![ColorSample::new(1, Rgba8::opaque(20, 0, 0))],
        ];
        aggregate_into(&mut palette, &buckets, Aggregation::Mode).unwrap();
        assert_eq!(
            palette.colors(),
            &[
                Rgba8::opaque(1, 2, 3),
                Rgba8::opaque(10, 0, 0),
                Rgba8::opaque(20, 0, 0)
            ]
        );
    }

    #[test]
    fn test_aggregate_reports_overflow() {
        let mut palette = Palette::with_capacity(1).unwrap();
        let buckets = vec![
            vec![ColorSample::new(1, Rgba8::opaque(10, 0, 0))],
            vec![ColorSample::new(1, Rgba8::opaque(20, 0, 0))],
        ];
        assert_eq!(
            aggregate_into(&mut palette, &buckets, Aggregation::Mean),
            Err(PaletteError::Full { capacity: 1 })
        );
    }
}
