// src/data_input/labels.rs

use serde::{Deserialize, Serialize};

use crate::error::{PoseError, Result};

/// Which label axis a set describes. Decides the error raised on a failed lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LabelKind {
    Node,
    Instance,
}

/// Ordered, duplicate-free names for one tensor axis.
/// Order is fixed for the whole recording; indices are stable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelSet {
    kind: LabelKind,
    names: Vec<String>,
}

/// Named anatomical landmarks (e.g. "head", "thorax").
pub type NodeSet = LabelSet;

/// Tracked-animal identifiers.
pub type InstanceSet = LabelSet;

impl LabelSet {
    pub fn new<I, S>(kind: LabelKind, names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        for (i, name) in names.iter().enumerate() {
            if names[..i].contains(name) {
                return Err(PoseError::Shape(format!(
                    "duplicate {:?} label '{}'",
                    kind, name
                )));
            }
        }
        Ok(Self { kind, names })
    }

    pub fn nodes<I, S>(names: I) -> Result<NodeSet>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(LabelKind::Node, names)
    }

    pub fn instances<I, S>(names: I) -> Result<InstanceSet>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(LabelKind::Instance, names)
    }

    pub fn kind(&self) -> LabelKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Name at `index`, if in range.
    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    /// Resolve a name to its axis index.
    pub fn index_of(&self, name: &str) -> Result<usize> {
        self.names
            .iter()
            .position(|n| n == name)
            .ok_or_else(|| match self.kind {
                LabelKind::Node => PoseError::UnknownNode(name.to_string()),
                LabelKind::Instance => PoseError::UnknownInstance(name.to_string()),
            })
    }
}
