// src/data_analysis/cumulative.rs

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::data_analysis::distance::frame_displacement;
use crate::data_input::{DerivedSeries, PositionTensor, Sample};
use crate::error::Result;

/// Running total of a per-frame series plus the frames that did not contribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CumulativeSeries {
    /// Total after each frame. Every entry is `Valid`.
    pub totals: DerivedSeries,
    /// Frames whose increment was missing and counted as zero.
    pub skipped_frames: Vec<usize>,
}

impl CumulativeSeries {
    /// Final total, or 0 for an empty series.
    pub fn total(&self) -> f64 {
        self.totals
            .samples()
            .last()
            .and_then(Sample::value)
            .unwrap_or(0.0)
    }
}

/// Running sum of `series`. Missing frames add nothing and are listed in
/// `skipped_frames`, so one gap does not poison the rest of the total.
pub fn cumulative(series: &DerivedSeries) -> CumulativeSeries {
    let mut totals = DerivedSeries::pending(series.len());
    let mut skipped_frames = Vec::new();
    let mut running = 0.0;

    for (frame, sample) in series.iter().enumerate() {
        match sample {
            Sample::Valid(v) => running += v,
            Sample::Missing => skipped_frames.push(frame),
            Sample::Pending => {
                warn!(frame, "accumulating a frame that was never computed, skipping");
                skipped_frames.push(frame);
            }
        }
        totals.set(frame, Sample::Valid(running));
    }

    debug!(
        frames = series.len(),
        skipped = skipped_frames.len(),
        total = running,
        "cumulative series computed"
    );
    CumulativeSeries {
        totals,
        skipped_frames,
    }
}

/// Distance travelled by one landmark: running sum of its per-frame displacement.
pub fn distance_travelled(
    tensor: &PositionTensor,
    node: &str,
    instance: &str,
) -> Result<CumulativeSeries> {
    Ok(cumulative(&frame_displacement(tensor, node, instance)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_running_sum_skips_missing() {
        let series = DerivedSeries::from_samples(vec![
            Sample::Valid(1.0),
            Sample::Missing,
            Sample::Valid(2.0),
            Sample::Pending,
            Sample::Valid(0.5),
        ]);
        let result = cumulative(&series);
        assert_eq!(result.totals.valid_values(), vec![1.0, 1.0, 3.0, 3.0, 3.5]);
        assert_eq!(result.skipped_frames, vec![1, 3]);
        assert!(result.totals.is_complete());
        assert_eq!(result.total(), 3.5);
    }

    #[test]
    fn test_non_negative_input_is_non_decreasing() {
        let values: Vec<f64> = (0..50)
            .map(|i| if i % 7 == 3 { f64::NAN } else { ((i * 37) % 11) as f64 * 0.25 })
            .collect();
        let result = cumulative(&DerivedSeries::from_values(&values));
        let totals = result.totals.valid_values();
        assert_eq!(totals.len(), 50);
        assert!(totals.windows(2).all(|w| w[1] >= w[0]));
    }

    #[test]
    fn test_distance_travelled_unit_steps() {
        let frames: Vec<_> = (0..4).map(|i| Some((i as f64, 0.0))).collect();
        let tensor = PositionTensor::from_frames(&frames, "head", "m").unwrap();
        let travelled = distance_travelled(&tensor, "head", "m").unwrap();
        let totals = travelled.totals.valid_values();
        for (got, want) in totals.iter().zip([0.0, 1.0, 2.0, 3.0]) {
            assert_abs_diff_eq!(*got, want, epsilon = 1e-12);
        }
        assert!(travelled.skipped_frames.is_empty());
    }

    #[test]
    fn test_empty_series() {
        let result = cumulative(&DerivedSeries::default());
        assert!(result.totals.is_empty());
        assert_eq!(result.total(), 0.0);
    }
}
