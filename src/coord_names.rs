//! Centralized coordinate-axis naming utilities
//!
//! Provides consistent axis names for the coordinate axis of a position tensor.

/// Get the axis name for a given coordinate index
///
/// # Arguments
/// * `index` - Coordinate index (0=x, 1=y)
///
/// # Panics
/// Panics if index is greater than 1
pub fn coord_name(index: usize) -> &'static str {
    match index {
        0 => "x",
        1 => "y",
        _ => panic!(
            "Invalid coordinate index: {}. Expected 0 (x) or 1 (y)",
            index
        ),
    }
}

/// Number of coordinate axes tracked per landmark.
pub const COORD_COUNT: usize = 2;

/// Get all coordinate names as a static array
pub const COORD_NAMES: [&str; COORD_COUNT] = ["x", "y"];
