// src/data_analysis/derivative.rs

use nalgebra::DMatrix;
use tracing::trace;

use crate::config::validate_smoothing;
use crate::constants::PSEUDO_INVERSE_EPSILON;
use crate::data_input::{DerivedSeries, Sample};
use crate::error::{PoseError, Result};

/// Weights that turn `window_len` consecutive samples into the first derivative
/// (per sample step) of their least-squares polynomial, evaluated at sample
/// `eval_pos` of the window.
///
/// The polynomial order is capped at `window_len - 1`, which is what lets a
/// shortened window at the recording edges still be fitted.
pub fn savgol_derivative_coefficients(
    window_len: usize,
    polyorder: usize,
    eval_pos: usize,
) -> Result<Vec<f64>> {
    if window_len < 2 {
        return Err(PoseError::Config(format!(
            "derivative window needs at least 2 samples, got {}",
            window_len
        )));
    }
    if eval_pos >= window_len {
        return Err(PoseError::Config(format!(
            "evaluation position {} outside window of {}",
            eval_pos, window_len
        )));
    }
    let order = polyorder.min(window_len - 1);
    if order == 0 {
        // A constant fit has no slope.
        return Ok(vec![0.0; window_len]);
    }

    // Vandermonde matrix in offsets from the evaluation sample, so the fitted
    // linear coefficient is the derivative at that sample. Offsets are scaled
    // into [-1, 1] to keep wide, high-order fits well conditioned.
    let scale = eval_pos.max(window_len - 1 - eval_pos) as f64;
    let vandermonde = DMatrix::from_fn(window_len, order + 1, |row, col| {
        ((row as f64 - eval_pos as f64) / scale).powi(col as i32)
    });
    let pinv = vandermonde
        .pseudo_inverse(PSEUDO_INVERSE_EPSILON)
        .map_err(|e| PoseError::Config(format!("polynomial fit failed: {}", e)))?;
    Ok(pinv.row(1).iter().map(|w| w / scale).collect())
}

/// Polynomial-smoothed first derivative of a per-frame series, in units per frame.
///
/// NaN inputs are missing samples. Frames whose fitting window touches one are
/// `Missing` in the output. Frames within `window_length / 2` of either end use
/// a window cut at the boundary and re-fitted, so the output has one value per
/// input frame.
pub fn smoothed_derivative(
    values: &[f64],
    window_length: usize,
    polyorder: usize,
) -> Result<DerivedSeries> {
    validate_smoothing(window_length, polyorder)?;
    let n = values.len();
    if window_length > n {
        return Err(PoseError::Config(format!(
            "window_length {} exceeds the {} frames available",
            window_length, n
        )));
    }

    let half = window_length / 2;
    let centered = savgol_derivative_coefficients(window_length, polyorder, half)?;
    let mut out = DerivedSeries::pending(n);

    for frame in 0..n {
        let lo = frame.saturating_sub(half);
        let hi = (frame + half).min(n - 1);
        let window = &values[lo..=hi];
        if window.iter().any(|v| v.is_nan()) {
            out.set(frame, Sample::Missing);
            continue;
        }

        let value = if window.len() == window_length {
            dot(&centered, window)
        } else {
            trace!(frame, len = window.len(), "refitting shortened boundary window");
            let weights = savgol_derivative_coefficients(window.len(), polyorder, frame - lo)?;
            dot(&weights, window)
        };
        out.set(frame, Sample::Valid(value));
    }

    Ok(out)
}

fn dot(weights: &[f64], window: &[f64]) -> f64 {
    weights.iter().zip(window).map(|(w, v)| w * v).sum()
}
