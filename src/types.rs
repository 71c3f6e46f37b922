// src/types.rs
// Type aliases shared by the engines

use crate::coord_names::COORD_COUNT;
use ndarray::Array4;

// Every engine assumes planar tracking. 3D data is rejected at tensor construction.
const _: () = assert!(COORD_COUNT == 2, "COORD_COUNT must be 2 for planar tracking");

/// Raw storage: (frame, node, coordinate, instance). NaN marks a missing coordinate.
pub type PositionArray = Array4<f64>;

/// A planar point; `None` when either coordinate is missing.
pub type Point = Option<(f64, f64)>;

/// (node index, instance index) key used by every per-pair report.
pub type PairKey = (usize, usize);
