// src/data_analysis/quality.rs

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::data_input::PositionTensor;
use crate::error::{PoseError, Result};
use crate::types::PairKey;

/// A maximal block of consecutive frames where a position is unobserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingRun {
    pub start: usize,
    pub len: usize,
}

impl MissingRun {
    /// One past the last missing frame.
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

/// Completeness of one (node, instance) position track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairGapStats {
    pub node: usize,
    pub instance: usize,
    pub missing_frames: usize,
    pub missing_fraction: f64,
    pub longest_run: usize,
    pub runs: Vec<MissingRun>,
}

/// Per-(node, instance) missing-data statistics for one tensor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapReport {
    pub frame_count: usize,
    instance_count: usize,
    entries: Vec<PairGapStats>,
}

impl GapReport {
    pub fn entries(&self) -> &[PairGapStats] {
        &self.entries
    }

    pub fn get(&self, node: usize, instance: usize) -> Option<&PairGapStats> {
        if instance >= self.instance_count {
            return None;
        }
        self.entries.get(node * self.instance_count + instance)
    }

    /// Pairs whose longest run is above `threshold` frames.
    /// Advisory only: nothing here stops a caller from filling them.
    pub fn exceeding(&self, threshold: usize) -> Vec<PairKey> {
        self.entries
            .iter()
            .filter(|e| e.longest_run > threshold)
            .map(|e| (e.node, e.instance))
            .collect()
    }

    pub fn total_missing(&self) -> usize {
        self.entries.iter().map(|e| e.missing_frames).sum()
    }
}

/// Whole-recording overview handed to the reporting layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSummary {
    pub frame_count: usize,
    pub node_count: usize,
    pub instance_count: usize,
    pub node_names: Vec<String>,
    /// Share of NaN coordinates, in percent.
    pub missing_data_percentage: f64,
    /// Number of stored coordinates (frames x nodes x 2 x instances).
    pub total_tracking_points: usize,
}

/// Finds the missing runs of a per-frame missing mask.
pub fn missing_runs(mask: impl IntoIterator<Item = bool>) -> Vec<MissingRun> {
    let mut runs = Vec::new();
    let mut current: Option<MissingRun> = None;
    for (frame, missing) in mask.into_iter().enumerate() {
        if missing {
            if let Some(run) = current.as_mut() {
                run.len += 1;
            } else {
                current = Some(MissingRun { start: frame, len: 1 });
            }
        } else if let Some(run) = current.take() {
            runs.push(run);
        }
    }
    runs.extend(current);
    runs
}

/// Scans the frame axis of every (node, instance) pair for missing positions.
pub fn assess(tensor: &PositionTensor) -> Result<GapReport> {
    let frame_count = tensor.frame_count();
    if frame_count == 0 {
        return Err(PoseError::Shape("tensor has no frames".into()));
    }

    let entries: Vec<PairGapStats> = tensor
        .pair_keys()
        .map(|(node, instance)| {
            let runs = missing_runs((0..frame_count).map(|f| tensor.is_missing(f, node, instance)));
            let missing_frames: usize = runs.iter().map(|r| r.len).sum();
            let longest_run = runs.iter().map(|r| r.len).max().unwrap_or(0);
            PairGapStats {
                node,
                instance,
                missing_frames,
                missing_fraction: missing_frames as f64 / frame_count as f64,
                longest_run,
                runs,
            }
        })
        .collect();

    let report = GapReport {
        frame_count,
        instance_count: tensor.instance_count(),
        entries,
    };
    debug!(
        frames = frame_count,
        missing = report.total_missing(),
        "assessed tracking completeness"
    );
    Ok(report)
}

/// Recording-level counts and the overall missing-coordinate percentage.
pub fn summarize(tensor: &PositionTensor) -> Result<DataSummary> {
    if tensor.frame_count() == 0 {
        return Err(PoseError::Shape("tensor has no frames".into()));
    }
    let data = tensor.data();
    let total = data.len();
    let missing = data.iter().filter(|v| v.is_nan()).count();
    Ok(DataSummary {
        frame_count: tensor.frame_count(),
        node_count: tensor.node_count(),
        instance_count: tensor.instance_count(),
        node_names: tensor.nodes().names().to_vec(),
        missing_data_percentage: if total == 0 {
            0.0
        } else {
            missing as f64 / total as f64 * 100.0
        },
        total_tracking_points: total,
    })
}
