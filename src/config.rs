// src/config.rs

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_FRAME_RATE, DEFAULT_MISSING_RUN_THRESHOLD, DEFAULT_POLYORDER, DEFAULT_WINDOW_LENGTH,
    HIGH_FRAME_RATE_ADVISORY, LARGE_WINDOW_ADVISORY, SMALL_WINDOW_ADVISORY,
};
use crate::error::{PoseError, Result};

/// How gaps inside a coordinate series are filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterpolationMethod {
    /// Straight line between the nearest valid neighbours.
    #[default]
    Linear,
    /// Copy of the nearest valid neighbour (ties go to the earlier frame).
    Nearest,
    /// Natural cubic spline through every valid sample of the series.
    Cubic,
}

impl InterpolationMethod {
    pub fn name(&self) -> &'static str {
        match self {
            InterpolationMethod::Linear => "linear",
            InterpolationMethod::Nearest => "nearest",
            InterpolationMethod::Cubic => "cubic",
        }
    }
}

/// Which landmark and which animal pairs the derived metrics are computed for.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricTargets {
    /// Landmark used for velocity/distance. `None` selects the first node.
    pub node: Option<String>,
    /// Instance pairs for inter-animal distance. Empty selects every unordered pair.
    pub instance_pairs: Vec<(String, String)>,
}

/// Parameters for one analysis run. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    interpolation_method: InterpolationMethod,
    missing_run_threshold: usize,
    window_length: usize,
    polyorder: usize,
    frame_rate: f64,
    targets: MetricTargets,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            interpolation_method: InterpolationMethod::Linear,
            missing_run_threshold: DEFAULT_MISSING_RUN_THRESHOLD,
            window_length: DEFAULT_WINDOW_LENGTH,
            polyorder: DEFAULT_POLYORDER,
            frame_rate: DEFAULT_FRAME_RATE,
            targets: MetricTargets::default(),
        }
    }
}

impl AnalysisConfig {
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder::new()
    }

    pub fn interpolation_method(&self) -> InterpolationMethod {
        self.interpolation_method
    }

    /// Longest missing run (in frames) that is still filled.
    pub fn missing_run_threshold(&self) -> usize {
        self.missing_run_threshold
    }

    pub fn window_length(&self) -> usize {
        self.window_length
    }

    pub fn polyorder(&self) -> usize {
        self.polyorder
    }

    /// Frames per second, used to turn per-frame rates into per-second rates.
    pub fn frame_rate(&self) -> f64 {
        self.frame_rate
    }

    pub fn targets(&self) -> &MetricTargets {
        &self.targets
    }

    /// Checks every data-independent constraint. The window-vs-recording
    /// length check needs the data and happens in the velocity engine.
    pub fn validate(&self) -> Result<()> {
        validate_smoothing(self.window_length, self.polyorder)?;
        if !self.frame_rate.is_finite() || self.frame_rate <= 0.0 {
            return Err(PoseError::Config(format!(
                "frame_rate must be positive and finite, got {}",
                self.frame_rate
            )));
        }
        if let Some(node) = &self.targets.node {
            if node.is_empty() {
                return Err(PoseError::Config("target node name is empty".into()));
            }
        }
        for (a, b) in &self.targets.instance_pairs {
            if a == b {
                return Err(PoseError::Config(format!(
                    "instance pair ('{}', '{}') names the same animal twice",
                    a, b
                )));
            }
        }
        Ok(())
    }

    /// Non-fatal remarks about settings that are legal but probably unintended.
    pub fn advisories(&self) -> Vec<String> {
        let mut notes = Vec::new();
        if self.window_length >= LARGE_WINDOW_ADVISORY {
            notes.push(format!(
                "window_length {} is very large and may over-smooth velocity",
                self.window_length
            ));
        }
        if self.window_length < SMALL_WINDOW_ADVISORY {
            notes.push(format!(
                "window_length {} is very small and may leave velocity noisy",
                self.window_length
            ));
        }
        if self.frame_rate > HIGH_FRAME_RATE_ADVISORY {
            notes.push(format!(
                "frame_rate {} fps is unusually high; check the recording metadata",
                self.frame_rate
            ));
        }
        notes
    }
}

/// Window/order rules shared by config validation and the velocity engine.
pub(crate) fn validate_smoothing(window_length: usize, polyorder: usize) -> Result<()> {
    if window_length % 2 == 0 {
        return Err(PoseError::Config(format!(
            "window_length must be odd, got {}",
            window_length
        )));
    }
    if polyorder >= window_length {
        return Err(PoseError::Config(format!(
            "polyorder {} must be less than window_length {}",
            polyorder, window_length
        )));
    }
    if window_length < polyorder + 2 {
        return Err(PoseError::Config(format!(
            "window_length {} must be at least polyorder + 2 ({})",
            window_length,
            polyorder + 2
        )));
    }
    Ok(())
}

/// Builder for [`AnalysisConfig`]. Unset fields keep their defaults.
#[derive(Debug, Clone, Default)]
pub struct AnalysisConfigBuilder {
    config: AnalysisConfig,
}

impl AnalysisConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn interpolation_method(mut self, method: InterpolationMethod) -> Self {
        self.config.interpolation_method = method;
        self
    }

    pub fn missing_run_threshold(mut self, frames: usize) -> Self {
        self.config.missing_run_threshold = frames;
        self
    }

    pub fn window_length(mut self, window_length: usize) -> Self {
        self.config.window_length = window_length;
        self
    }

    pub fn polyorder(mut self, polyorder: usize) -> Self {
        self.config.polyorder = polyorder;
        self
    }

    pub fn frame_rate(mut self, fps: f64) -> Self {
        self.config.frame_rate = fps;
        self
    }

    pub fn target_node(mut self, node: impl Into<String>) -> Self {
        self.config.targets.node = Some(node.into());
        self
    }

    pub fn instance_pair(mut self, a: impl Into<String>, b: impl Into<String>) -> Self {
        self.config.targets.instance_pairs.push((a.into(), b.into()));
        self
    }

    pub fn build(self) -> Result<AnalysisConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_default_config() {
        let config = AnalysisConfig::default();
        assert_eq!(config.frame_rate(), 30.0);
        assert_eq!(config.window_length(), 25);
        assert_eq!(config.polyorder(), 3);
        assert_eq!(config.interpolation_method(), InterpolationMethod::Linear);
        assert!(config.validate().is_ok());
        assert!(config.advisories().is_empty());
    }

    #[test]
    fn test_builder_overrides_only_what_is_set() {
        let config = AnalysisConfig::builder()
            .frame_rate(60.0)
            .window_length(15)
            .build()
            .unwrap();
        assert_eq!(config.frame_rate(), 60.0);
        assert_eq!(config.window_length(), 15);
        assert_eq!(config.polyorder(), 3);
    }

    #[test]
    fn test_even_window_rejected() {
        let err = AnalysisConfig::builder().window_length(24).build().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn test_polyorder_too_high_rejected() {
        let err = AnalysisConfig::builder()
            .window_length(5)
            .polyorder(5)
            .build()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);

        // odd and polyorder < window, but no room for the derivative
        let err = AnalysisConfig::builder()
            .window_length(5)
            .polyorder(4)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("polyorder + 2"));
    }

    #[test]
    fn test_bad_frame_rate_rejected() {
        assert!(AnalysisConfig::builder().frame_rate(0.0).build().is_err());
        assert!(AnalysisConfig::builder().frame_rate(f64::NAN).build().is_err());
    }

    #[test]
    fn test_self_pair_rejected() {
        let err = AnalysisConfig::builder()
            .instance_pair("mouse1", "mouse1")
            .build()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn test_advisories() {
        let config = AnalysisConfig::builder()
            .window_length(3)
            .polyorder(1)
            .frame_rate(240.0)
            .build()
            .unwrap();
        let notes = config.advisories();
        assert_eq!(notes.len(), 2);
        assert!(notes[0].contains("very small"));
        assert!(notes[1].contains("unusually high"));
    }
}
