// src/data_input/position_tensor.rs

use ndarray::{s, Array4, ArrayView1};

use crate::coord_names::COORD_COUNT;
use crate::data_input::labels::{InstanceSet, LabelKind, NodeSet};
use crate::error::{PoseError, Result};
use crate::types::{PairKey, Point, PositionArray};

/// Per-frame landmark coordinates for every tracked instance of one recording.
///
/// Indexed as (frame, node, coordinate, instance). A NaN coordinate marks an
/// unobserved position. The core never mutates a tensor it was handed; stages
/// that change values build a new one.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionTensor {
    data: PositionArray,
    nodes: NodeSet,
    instances: InstanceSet,
}

impl PositionTensor {
    /// Wraps a loader-supplied array after checking it against the labels.
    pub fn new(data: PositionArray, nodes: NodeSet, instances: InstanceSet) -> Result<Self> {
        if nodes.kind() != LabelKind::Node || instances.kind() != LabelKind::Instance {
            return Err(PoseError::Shape(
                "label sets passed in the wrong order (expected nodes, then instances)".into(),
            ));
        }
        let (_, node_axis, coord_axis, instance_axis) = data.dim();
        if coord_axis != COORD_COUNT {
            return Err(PoseError::Shape(format!(
                "coordinate axis has length {}, expected {}",
                coord_axis, COORD_COUNT
            )));
        }
        if node_axis != nodes.len() {
            return Err(PoseError::Shape(format!(
                "tensor has {} nodes but {} node names were supplied",
                node_axis,
                nodes.len()
            )));
        }
        if instance_axis != instances.len() {
            return Err(PoseError::Shape(format!(
                "tensor has {} instances but {} instance names were supplied",
                instance_axis,
                instances.len()
            )));
        }
        if data.iter().any(|v| v.is_infinite()) {
            return Err(PoseError::Shape(
                "coordinates must be finite or NaN (missing)".into(),
            ));
        }
        Ok(Self {
            data,
            nodes,
            instances,
        })
    }

    /// Builds a tensor from a flat buffer in (frame, node, coordinate, instance) order.
    pub fn from_shape_vec(
        frame_count: usize,
        values: Vec<f64>,
        nodes: NodeSet,
        instances: InstanceSet,
    ) -> Result<Self> {
        let shape = (frame_count, nodes.len(), COORD_COUNT, instances.len());
        let data = Array4::from_shape_vec(shape, values)
            .map_err(|e| PoseError::Shape(format!("buffer does not fit {:?}: {}", shape, e)))?;
        Self::new(data, nodes, instances)
    }

    /// Single node, single instance tensor from per-frame points. `None` frames become NaN.
    pub fn from_frames(frames: &[Point], node: &str, instance: &str) -> Result<Self> {
        let mut data = Array4::<f64>::from_elem((frames.len(), 1, COORD_COUNT, 1), f64::NAN);
        for (frame, point) in frames.iter().enumerate() {
            if let Some((x, y)) = point {
                data[[frame, 0, 0, 0]] = *x;
                data[[frame, 0, 1, 0]] = *y;
            }
        }
        Self::new(
            data,
            NodeSet::nodes([node])?,
            InstanceSet::instances([instance])?,
        )
    }

    pub fn frame_count(&self) -> usize {
        self.data.dim().0
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    pub fn nodes(&self) -> &NodeSet {
        &self.nodes
    }

    pub fn instances(&self) -> &InstanceSet {
        &self.instances
    }

    pub fn data(&self) -> &PositionArray {
        &self.data
    }

    /// Resolves a (node name, instance name) pair to axis indices.
    pub fn resolve(&self, node: &str, instance: &str) -> Result<PairKey> {
        Ok((self.nodes.index_of(node)?, self.instances.index_of(instance)?))
    }

    /// Every (node, instance) index pair in node-major order.
    pub fn pair_keys(&self) -> impl Iterator<Item = PairKey> + '_ {
        (0..self.node_count())
            .flat_map(move |node| (0..self.instance_count()).map(move |instance| (node, instance)))
    }

    /// One coordinate of one landmark over the frame axis.
    pub fn coord_series(&self, node: usize, coord: usize, instance: usize) -> ArrayView1<'_, f64> {
        self.data.slice(s![.., node, coord, instance])
    }

    pub fn point(&self, frame: usize, node: usize, instance: usize) -> Point {
        let x = self.data[[frame, node, 0, instance]];
        let y = self.data[[frame, node, 1, instance]];
        if x.is_nan() || y.is_nan() {
            None
        } else {
            Some((x, y))
        }
    }

    /// A position counts as missing when either coordinate is missing.
    pub fn is_missing(&self, frame: usize, node: usize, instance: usize) -> bool {
        self.point(frame, node, instance).is_none()
    }

    /// Copy of this tensor with the values replaced. Shape must not change.
    pub(crate) fn with_data(&self, data: PositionArray) -> Result<Self> {
        if data.dim() != self.data.dim() {
            return Err(PoseError::Shape(format!(
                "replacement data {:?} does not match tensor {:?}",
                data.dim(),
                self.data.dim()
            )));
        }
        Ok(Self {
            data,
            nodes: self.nodes.clone(),
            instances: self.instances.clone(),
        })
    }
}
