// src/data_input/derived_series.rs

use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// State of one derived per-frame value.
///
/// Missing data is carried explicitly rather than through NaN so every stage
/// has to decide, in a visible branch, what a gap means for it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Sample {
    Valid(f64),
    Missing,
    /// Allocated but not yet written by the producing engine.
    Pending,
}

impl Sample {
    /// NaN maps to `Missing`, anything else to `Valid`.
    pub fn from_f64(value: f64) -> Self {
        if value.is_nan() {
            Sample::Missing
        } else {
            Sample::Valid(value)
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Sample::Valid(v) => Some(*v),
            Sample::Missing | Sample::Pending => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Sample::Valid(_))
    }
}

/// Per-frame values aligned 1:1 with the frame axis of the source tensor.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DerivedSeries {
    samples: Vec<Sample>,
}

impl DerivedSeries {
    /// Series of `len` frames, every one `Pending`.
    pub fn pending(len: usize) -> Self {
        Self {
            samples: vec![Sample::Pending; len],
        }
    }

    pub fn from_samples(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    /// Builds a series from plain floats; NaN entries become `Missing`.
    pub fn from_values(values: &[f64]) -> Self {
        Self {
            samples: values.iter().copied().map(Sample::from_f64).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn get(&self, frame: usize) -> Option<Sample> {
        self.samples.get(frame).copied()
    }

    pub(crate) fn set(&mut self, frame: usize, sample: Sample) {
        self.samples[frame] = sample;
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }

    /// Values of the `Valid` frames, in frame order.
    pub fn valid_values(&self) -> Vec<f64> {
        self.samples.iter().filter_map(Sample::value).collect()
    }

    /// Frame indices that are not `Valid`.
    pub fn missing_frames(&self) -> Vec<usize> {
        self.samples
            .iter()
            .enumerate()
            .filter(|(_, s)| !s.is_valid())
            .map(|(i, _)| i)
            .collect()
    }

    /// True when the producing engine wrote every frame.
    pub fn is_complete(&self) -> bool {
        !self.samples.iter().any(|s| matches!(s, Sample::Pending))
    }

    /// Dense array for plotting layers; non-valid frames take `fill`.
    pub fn to_array_with(&self, fill: f64) -> Array1<f64> {
        self.samples
            .iter()
            .map(|s| s.value().unwrap_or(fill))
            .collect()
    }
}
