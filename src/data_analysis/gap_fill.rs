// src/data_analysis/gap_fill.rs

use ndarray::s;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::AnalysisConfig;
use crate::coord_names::{coord_name, COORD_COUNT};
use crate::data_analysis::interpolation::fill_runs;
use crate::data_analysis::quality::{assess, MissingRun};
use crate::data_input::PositionTensor;
use crate::error::{PoseError, Result};

/// A (node, instance) pair with missing runs too long to fill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnfilledPair {
    pub node: usize,
    pub instance: usize,
    /// Longest missing run of the pair, filled or not.
    pub longest_run: usize,
    /// Runs left missing in the output tensor.
    pub runs: Vec<MissingRun>,
}

/// Pairs the filler left (partly) missing because a run exceeded the threshold.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UnfillableSet {
    entries: Vec<UnfilledPair>,
}

impl UnfillableSet {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &UnfilledPair> {
        self.entries.iter()
    }

    pub fn get(&self, node: usize, instance: usize) -> Option<&UnfilledPair> {
        self.entries
            .iter()
            .find(|e| e.node == node && e.instance == instance)
    }

    pub fn contains(&self, node: usize, instance: usize) -> bool {
        self.get(node, instance).is_some()
    }
}

/// An interpolation failure isolated to one pair.
#[derive(Debug, Clone, PartialEq)]
pub struct PairFailure {
    pub node: usize,
    pub instance: usize,
    pub error: PoseError,
}

/// Result of a fill pass: the new tensor plus everything it could not fill.
#[derive(Debug, Clone)]
pub struct FillOutcome {
    pub tensor: PositionTensor,
    pub unfillable: UnfillableSet,
    pub failures: Vec<PairFailure>,
}

impl FillOutcome {
    /// True when every missing position of the input was filled.
    pub fn is_complete(&self) -> bool {
        self.unfillable.is_empty() && self.failures.is_empty()
    }
}

/// Fills missing positions of every (node, instance) pair.
///
/// Each pair is handled on its own: runs up to `missing_run_threshold` frames
/// long are interpolated with the configured method, longer runs stay missing
/// and are listed in the returned [`UnfillableSet`]. A pair whose series
/// cannot support the method is recorded in `failures` and left as it was;
/// the remaining pairs are still filled. The input tensor is not modified.
pub fn fill(tensor: &PositionTensor, config: &AnalysisConfig) -> Result<FillOutcome> {
    let report = assess(tensor)?;
    let threshold = config.missing_run_threshold();
    let method = config.interpolation_method();
    let frame_count = tensor.frame_count();

    let mut data = tensor.data().to_owned();
    let mut unfillable = UnfillableSet::default();
    let mut failures = Vec::new();
    let mut filled_frames = 0usize;

    for stats in report.entries() {
        if stats.runs.is_empty() {
            continue;
        }
        let (node, instance) = (stats.node, stats.instance);

        let (fillable, too_long): (Vec<MissingRun>, Vec<MissingRun>) =
            stats.runs.iter().copied().partition(|r| r.len <= threshold);

        if !too_long.is_empty() {
            // A half-observed position is missing; blank both coordinates so
            // the output agrees with the gap report.
            for run in &too_long {
                data.slice_mut(s![run.start..run.end(), node, .., instance])
                    .fill(f64::NAN);
            }
            warn!(
                node = tensor.nodes().name(node).unwrap_or("?"),
                instance = tensor.instances().name(instance).unwrap_or("?"),
                longest_run = stats.longest_run,
                threshold,
                "missing run exceeds threshold, left unfilled"
            );
            unfillable.entries.push(UnfilledPair {
                node,
                instance,
                longest_run: stats.longest_run,
                runs: too_long,
            });
        }
        if fillable.is_empty() {
            continue;
        }

        let valid: Vec<usize> = (0..frame_count)
            .filter(|&f| !tensor.is_missing(f, node, instance))
            .collect();

        let mut filled_coords = Vec::with_capacity(COORD_COUNT);
        let mut pair_result = Ok(());
        for coord in 0..COORD_COUNT {
            let mut series = data.slice(s![.., node, coord, instance]).to_vec();
            if let Err(e) = fill_runs(&mut series, &valid, &fillable, method) {
                pair_result = Err((coord, e));
                break;
            }
            filled_coords.push(series);
        }

        match pair_result {
            Ok(()) => {
                for (coord, series) in filled_coords.into_iter().enumerate() {
                    for run in &fillable {
                        for frame in run.start..run.end() {
                            data[[frame, node, coord, instance]] = series[frame];
                        }
                    }
                }
                filled_frames += fillable.iter().map(|r| r.len).sum::<usize>();
            }
            Err((coord, error)) => {
                warn!(
                    node = tensor.nodes().name(node).unwrap_or("?"),
                    instance = tensor.instances().name(instance).unwrap_or("?"),
                    coord = coord_name(coord),
                    %error,
                    "gap fill failed for pair"
                );
                failures.push(PairFailure {
                    node,
                    instance,
                    error,
                });
            }
        }
    }

    info!(
        method = method.name(),
        filled_frames,
        unfillable_pairs = unfillable.len(),
        failed_pairs = failures.len(),
        "gap fill complete"
    );

    Ok(FillOutcome {
        tensor: tensor.with_data(data)?,
        unfillable,
        failures,
    })
}
