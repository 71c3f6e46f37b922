// src/data_analysis/distance.rs

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::data_input::{DerivedSeries, PositionTensor, Sample};
use crate::error::{PoseError, Result};

/// Which instances the two landmarks of a distance belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstancePair {
    pub first: String,
    pub second: String,
}

impl InstancePair {
    /// Both landmarks on the same animal (e.g. head-to-tail length).
    pub fn same(instance: impl Into<String>) -> Self {
        let instance = instance.into();
        Self {
            first: instance.clone(),
            second: instance,
        }
    }

    /// Landmarks on two different animals.
    pub fn between(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
        }
    }

    pub fn is_same(&self) -> bool {
        self.first == self.second
    }
}

/// Per-frame Euclidean distance between `node_a` on the first instance and
/// `node_b` on the second.
///
/// A frame where either position is missing yields `Missing`, keeping the
/// output frame-aligned with the tensor.
pub fn pairwise_distance(
    tensor: &PositionTensor,
    node_a: &str,
    node_b: &str,
    instances: &InstancePair,
) -> Result<DerivedSeries> {
    let (a_node, a_inst) = tensor.resolve(node_a, &instances.first)?;
    let (b_node, b_inst) = tensor.resolve(node_b, &instances.second)?;
    let frame_count = tensor.frame_count();
    if frame_count == 0 {
        return Err(PoseError::Shape("tensor has no frames".into()));
    }

    let mut out = DerivedSeries::pending(frame_count);
    for frame in 0..frame_count {
        let sample = match (
            tensor.point(frame, a_node, a_inst),
            tensor.point(frame, b_node, b_inst),
        ) {
            (Some((ax, ay)), Some((bx, by))) => Sample::Valid((ax - bx).hypot(ay - by)),
            _ => Sample::Missing,
        };
        out.set(frame, sample);
    }

    debug!(
        node_a,
        node_b,
        first = %instances.first,
        second = %instances.second,
        missing = out.missing_frames().len(),
        "pairwise distance computed"
    );
    Ok(out)
}

/// Distance between the same landmark on two animals.
pub fn inter_instance_distance(
    tensor: &PositionTensor,
    node: &str,
    first: &str,
    second: &str,
) -> Result<DerivedSeries> {
    pairwise_distance(tensor, node, node, &InstancePair::between(first, second))
}

/// Step length of one landmark between consecutive frames.
///
/// Frame 0 has no predecessor and is `Valid(0.0)`; any other frame is `Missing`
/// when it or its predecessor is missing.
pub fn frame_displacement(
    tensor: &PositionTensor,
    node: &str,
    instance: &str,
) -> Result<DerivedSeries> {
    let (node_idx, instance_idx) = tensor.resolve(node, instance)?;
    let frame_count = tensor.frame_count();
    if frame_count == 0 {
        return Err(PoseError::Shape("tensor has no frames".into()));
    }

    let mut out = DerivedSeries::pending(frame_count);
    out.set(0, Sample::Valid(0.0));
    for frame in 1..frame_count {
        let sample = match (
            tensor.point(frame - 1, node_idx, instance_idx),
            tensor.point(frame, node_idx, instance_idx),
        ) {
            (Some((px, py)), Some((x, y))) => Sample::Valid((x - px).hypot(y - py)),
            _ => Sample::Missing,
        };
        out.set(frame, sample);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_input::{InstanceSet, NodeSet};
    use crate::error::ErrorKind;
    use ndarray::Array4;

    fn two_mice() -> PositionTensor {
        let nodes = NodeSet::nodes(["head", "tail"]).unwrap();
        let instances = InstanceSet::instances(["mouse1", "mouse2"]).unwrap();
        let mut data = Array4::<f64>::zeros((3, 2, 2, 2));
        // mouse1 head at (0,0), tail at (0,-2); mouse2 head at (3,4)
        data[[0, 1, 1, 0]] = -2.0;
        data[[0, 0, 0, 1]] = 3.0;
        data[[0, 0, 1, 1]] = 4.0;
        // frame 1: mouse2 head missing
        data[[1, 0, 0, 1]] = f64::NAN;
        data[[1, 0, 1, 1]] = f64::NAN;
        PositionTensor::new(data, nodes, instances).unwrap()
    }

    #[test]
    fn test_inter_animal_three_four_five() {
        let tensor = two_mice();
        let d = inter_instance_distance(&tensor, "head", "mouse1", "mouse2").unwrap();
        assert_eq!(d.get(0), Some(Sample::Valid(5.0)));
        assert_eq!(d.get(1), Some(Sample::Missing));
        assert_eq!(d.get(2), Some(Sample::Valid(0.0)));
        assert_eq!(d.len(), 3);
    }

    #[test]
    fn test_intra_animal_length() {
        let tensor = two_mice();
        let d = pairwise_distance(&tensor, "head", "tail", &InstancePair::same("mouse1")).unwrap();
        assert_eq!(d.get(0), Some(Sample::Valid(2.0)));
    }

    #[test]
    fn test_self_distance_zero() {
        let tensor = two_mice();
        let pair = InstancePair::same("mouse2");
        assert!(pair.is_same());
        let d = pairwise_distance(&tensor, "head", "head", &pair).unwrap();
        assert_eq!(d.samples(), &[Sample::Valid(0.0), Sample::Missing, Sample::Valid(0.0)]);
    }

    #[test]
    fn test_unknown_labels() {
        let tensor = two_mice();
        let err = inter_instance_distance(&tensor, "nose", "mouse1", "mouse2").unwrap_err();
        assert_eq!(err, PoseError::UnknownNode("nose".into()));
        let err = inter_instance_distance(&tensor, "head", "mouse1", "mouse9").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Index);
    }

    #[test]
    fn test_frame_displacement() {
        let frames = [Some((0.0, 0.0)), Some((3.0, 4.0)), None, Some((3.0, 5.0))];
        let tensor = PositionTensor::from_frames(&frames, "head", "m").unwrap();
        let steps = frame_displacement(&tensor, "head", "m").unwrap();
        assert_eq!(
            steps.samples(),
            &[Sample::Valid(0.0), Sample::Valid(5.0), Sample::Missing, Sample::Missing]
        );
    }
}
