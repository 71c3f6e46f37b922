// src/data_analysis/interpolation.rs

use crate::config::InterpolationMethod;
use crate::constants::{CUBIC_MIN_VALID_SAMPLES, HOLD_MIN_VALID_SAMPLES};
use crate::data_analysis::quality::MissingRun;
use crate::error::{PoseError, Result};

/// Natural cubic spline (zero curvature at both ends) through strictly increasing knots.
#[derive(Debug, Clone)]
pub struct NaturalCubicSpline {
    xs: Vec<f64>,
    ys: Vec<f64>,
    second_derivs: Vec<f64>,
}

impl NaturalCubicSpline {
    /// Fits the spline. Requires at least two knots and increasing `xs`.
    pub fn new(xs: &[f64], ys: &[f64]) -> Result<Self> {
        if xs.len() != ys.len() {
            return Err(PoseError::Shape(format!(
                "spline knots: {} x values vs {} y values",
                xs.len(),
                ys.len()
            )));
        }
        let n = xs.len();
        if n < 2 {
            return Err(PoseError::Interpolation {
                method: "cubic",
                required: 2,
                available: n,
            });
        }
        if xs.windows(2).any(|w| w[1] <= w[0]) {
            return Err(PoseError::Shape("spline knots must be strictly increasing".into()));
        }

        let mut second_derivs = vec![0.0; n];
        if n > 2 {
            // Tridiagonal system for the interior second derivatives (Thomas algorithm).
            let m = n - 2;
            let mut diag = vec![0.0; m];
            let mut upper = vec![0.0; m];
            let mut rhs = vec![0.0; m];
            for k in 0..m {
                let i = k + 1;
                let h_prev = xs[i] - xs[i - 1];
                let h_next = xs[i + 1] - xs[i];
                diag[k] = 2.0 * (h_prev + h_next);
                upper[k] = h_next;
                rhs[k] = 6.0 * ((ys[i + 1] - ys[i]) / h_next - (ys[i] - ys[i - 1]) / h_prev);
            }
            for k in 1..m {
                let lower = xs[k + 1] - xs[k];
                let factor = lower / diag[k - 1];
                diag[k] -= factor * upper[k - 1];
                rhs[k] -= factor * rhs[k - 1];
            }
            second_derivs[m] = rhs[m - 1] / diag[m - 1];
            for k in (0..m - 1).rev() {
                second_derivs[k + 1] = (rhs[k] - upper[k] * second_derivs[k + 2]) / diag[k];
            }
        }

        Ok(Self {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
            second_derivs,
        })
    }

    /// Evaluates the spline. Outside the knot range the end segments are extended.
    pub fn eval(&self, x: f64) -> f64 {
        let n = self.xs.len();
        let seg = self.xs.partition_point(|&k| k <= x).clamp(1, n - 1) - 1;
        let (x0, x1) = (self.xs[seg], self.xs[seg + 1]);
        let (y0, y1) = (self.ys[seg], self.ys[seg + 1]);
        let (m0, m1) = (self.second_derivs[seg], self.second_derivs[seg + 1]);
        let h = x1 - x0;
        let a = x1 - x;
        let b = x - x0;
        m0 * a.powi(3) / (6.0 * h)
            + m1 * b.powi(3) / (6.0 * h)
            + (y0 / h - m0 * h / 6.0) * a
            + (y1 / h - m1 * h / 6.0) * b
    }
}

/// Minimum number of valid samples a method needs to fill anything.
pub fn min_valid_samples(method: InterpolationMethod) -> usize {
    match method {
        InterpolationMethod::Linear | InterpolationMethod::Nearest => HOLD_MIN_VALID_SAMPLES,
        InterpolationMethod::Cubic => CUBIC_MIN_VALID_SAMPLES,
    }
}

/// Fills the given runs of `values` in place.
///
/// `valid` lists the frames that hold observed values, in increasing order.
/// Runs touching either end of the recording are held at the nearest observed
/// value whatever the method; interior runs use `method`. Frames outside
/// `runs` are never written.
pub fn fill_runs(
    values: &mut [f64],
    valid: &[usize],
    runs: &[MissingRun],
    method: InterpolationMethod,
) -> Result<()> {
    if runs.is_empty() {
        return Ok(());
    }
    let required = min_valid_samples(method);
    if valid.len() < required {
        return Err(PoseError::Interpolation {
            method: method.name(),
            required,
            available: valid.len(),
        });
    }

    let spline = match method {
        InterpolationMethod::Cubic => {
            let xs: Vec<f64> = valid.iter().map(|&f| f as f64).collect();
            let ys: Vec<f64> = valid.iter().map(|&f| values[f]).collect();
            Some(NaturalCubicSpline::new(&xs, &ys)?)
        }
        InterpolationMethod::Linear | InterpolationMethod::Nearest => None,
    };

    let first = valid[0];
    let last = valid[valid.len() - 1];
    for run in runs {
        if run.end() <= first {
            let hold = values[first];
            values[run.start..run.end()].fill(hold);
            continue;
        }
        if run.start > last {
            let hold = values[last];
            values[run.start..run.end()].fill(hold);
            continue;
        }

        let left = run.start - 1;
        let right = run.end();
        let (v_left, v_right) = (values[left], values[right]);
        for frame in run.start..run.end() {
            values[frame] = match (method, &spline) {
                (InterpolationMethod::Cubic, Some(spline)) => spline.eval(frame as f64),
                (InterpolationMethod::Nearest, _) => {
                    if frame - left <= right - frame {
                        v_left
                    } else {
                        v_right
                    }
                }
                _ => v_left + (v_right - v_left) * (frame - left) as f64 / (right - left) as f64,
            };
        }
    }
    Ok(())
}
