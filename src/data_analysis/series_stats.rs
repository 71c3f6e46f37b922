// src/data_analysis/series_stats.rs

use ndarray::Array1;
use ndarray_stats::{QuantileExt, SummaryStatisticsExt};
use serde::{Deserialize, Serialize};

use crate::data_input::DerivedSeries;

/// Summary of the valid frames of a derived series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesStats {
    /// Number of valid frames the statistics are based on.
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    /// Population standard deviation.
    pub std_dev: f64,
}

impl SeriesStats {
    /// Statistics over the `Valid` frames; `None` when there are none.
    pub fn from_series(series: &DerivedSeries) -> Option<Self> {
        let values = Array1::from(series.valid_values());
        let mean = SummaryStatisticsExt::mean(&values).ok()?;
        let min = *values.min().ok()?;
        let max = *values.max().ok()?;
        let std_dev = values.std(0.0);
        Some(Self {
            count: values.len(),
            mean,
            min,
            max,
            std_dev,
        })
    }

    /// Coefficient of variation (std / mean); `None` for a zero mean.
    pub fn coefficient_of_variation(&self) -> Option<f64> {
        if self.mean.abs() > f64::EPSILON {
            Some(self.std_dev / self.mean)
        } else {
            None
        }
    }
}
