// src/data_analysis/mod.rs

pub mod cumulative;
pub mod derivative;
pub mod distance;
pub mod gap_fill;
pub mod interpolation;
pub mod quality;
pub mod series_stats;
pub mod velocity;

pub use cumulative::{cumulative, distance_travelled, CumulativeSeries};
pub use derivative::{savgol_derivative_coefficients, smoothed_derivative};
pub use distance::{frame_displacement, inter_instance_distance, pairwise_distance, InstancePair};
pub use gap_fill::{fill, FillOutcome, PairFailure, UnfillableSet, UnfilledPair};
pub use quality::{assess, summarize, DataSummary, GapReport, MissingRun, PairGapStats};
pub use series_stats::SeriesStats;
pub use velocity::{velocities_for_node, velocity, InstanceVelocity, VelocitySeries};

// src/data_analysis/mod.rs
