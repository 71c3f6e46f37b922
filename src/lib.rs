// src/lib.rs - Library interface for pose-tracking metrics

pub mod config;
pub mod constants;
pub mod coord_names;
pub mod data_analysis;
pub mod data_input;
pub mod error;
pub mod pipeline;
pub mod types;

pub use config::{AnalysisConfig, AnalysisConfigBuilder, InterpolationMethod, MetricTargets};
pub use data_input::{DerivedSeries, InstanceSet, LabelKind, LabelSet, NodeSet, PositionTensor, Sample};
pub use error::{ErrorKind, PoseError, Result};
pub use pipeline::{AnalysisReport, InstanceSpeed, InstanceTravel, PairDistance, Pipeline};

pub fn crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
