// src/data_input/mod.rs

pub mod derived_series;
pub mod labels;
pub mod position_tensor;

pub use derived_series::{DerivedSeries, Sample};
pub use labels::{InstanceSet, LabelKind, LabelSet, NodeSet};
pub use position_tensor::PositionTensor;
