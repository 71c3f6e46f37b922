// src/constants.rs

// Analysis defaults, matching the settings most recordings were tuned against.
pub const DEFAULT_FRAME_RATE: f64 = 30.0;
pub const DEFAULT_WINDOW_LENGTH: usize = 25;
pub const DEFAULT_POLYORDER: usize = 3;
pub const DEFAULT_MISSING_RUN_THRESHOLD: usize = 10;

// Config sanity thresholds. Crossing these is reported, never rejected.
pub const LARGE_WINDOW_ADVISORY: usize = 100;
pub const SMALL_WINDOW_ADVISORY: usize = 5;
pub const HIGH_FRAME_RATE_ADVISORY: f64 = 200.0;

// Cubic spline fill needs this many valid samples in a coordinate series.
pub const CUBIC_MIN_VALID_SAMPLES: usize = 4;
// Linear and nearest fill only need one sample to hold from.
pub const HOLD_MIN_VALID_SAMPLES: usize = 1;

// Singular values below this are dropped from the local polynomial fit.
pub const PSEUDO_INVERSE_EPSILON: f64 = 1e-12;

// src/constants.rs
