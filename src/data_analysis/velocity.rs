// src/data_analysis/velocity.rs

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::AnalysisConfig;
use crate::data_analysis::derivative::smoothed_derivative;
use crate::data_input::{DerivedSeries, PositionTensor, Sample};
use crate::error::{PoseError, Result};

/// Smoothed velocity of one landmark, in tensor units per second.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VelocitySeries {
    /// Magnitude of (vx, vy).
    pub speed: DerivedSeries,
    /// Signed x velocity.
    pub vx: DerivedSeries,
    /// Signed y velocity.
    pub vy: DerivedSeries,
}

/// Velocity of one landmark for one named instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceVelocity {
    pub instance: String,
    pub velocity: VelocitySeries,
}

/// Differentiates the position track of (`node`, `instance`) with a local
/// polynomial fit of `config.polyorder()` over `config.window_length()` frames.
///
/// Expects a filled tensor. Positions that are still missing make every frame
/// whose window overlaps them `Missing`. A window/order combination that does
/// not fit the recording is a configuration error for the whole call.
pub fn velocity(
    tensor: &PositionTensor,
    node: &str,
    instance: &str,
    config: &AnalysisConfig,
) -> Result<VelocitySeries> {
    let (node_idx, instance_idx) = tensor.resolve(node, instance)?;
    let frame_count = tensor.frame_count();
    if frame_count == 0 {
        return Err(PoseError::Shape("tensor has no frames".into()));
    }

    let mut xs = Vec::with_capacity(frame_count);
    let mut ys = Vec::with_capacity(frame_count);
    for frame in 0..frame_count {
        let (x, y) = tensor
            .point(frame, node_idx, instance_idx)
            .unwrap_or((f64::NAN, f64::NAN));
        xs.push(x);
        ys.push(y);
    }

    let dx = smoothed_derivative(&xs, config.window_length(), config.polyorder())?;
    let dy = smoothed_derivative(&ys, config.window_length(), config.polyorder())?;
    let fps = config.frame_rate();

    let mut speed = DerivedSeries::pending(frame_count);
    let mut vx = DerivedSeries::pending(frame_count);
    let mut vy = DerivedSeries::pending(frame_count);
    for frame in 0..frame_count {
        match (dx.get(frame).and_then(|s| s.value()), dy.get(frame).and_then(|s| s.value())) {
            (Some(dx_f), Some(dy_f)) => {
                let (vel_x, vel_y) = (dx_f * fps, dy_f * fps);
                vx.set(frame, Sample::Valid(vel_x));
                vy.set(frame, Sample::Valid(vel_y));
                speed.set(frame, Sample::Valid(vel_x.hypot(vel_y)));
            }
            _ => {
                vx.set(frame, Sample::Missing);
                vy.set(frame, Sample::Missing);
                speed.set(frame, Sample::Missing);
            }
        }
    }

    debug!(
        node,
        instance,
        frames = frame_count,
        missing = speed.missing_frames().len(),
        "velocity computed"
    );
    Ok(VelocitySeries { speed, vx, vy })
}

/// Velocity of `node` for every instance, in instance order.
pub fn velocities_for_node(
    tensor: &PositionTensor,
    node: &str,
    config: &AnalysisConfig,
) -> Result<Vec<InstanceVelocity>> {
    tensor
        .instances()
        .names()
        .iter()
        .map(|instance| {
            Ok(InstanceVelocity {
                instance: instance.clone(),
                velocity: velocity(tensor, node, instance, config)?,
            })
        })
        .collect()
}
