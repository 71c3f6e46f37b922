// src/pipeline.rs

use tracing::{info, warn};

use crate::config::AnalysisConfig;
use crate::data_analysis::cumulative::{distance_travelled, CumulativeSeries};
use crate::data_analysis::distance::{inter_instance_distance, InstancePair};
use crate::data_analysis::gap_fill::{fill, FillOutcome};
use crate::data_analysis::quality::{assess, summarize, DataSummary, GapReport};
use crate::data_analysis::series_stats::SeriesStats;
use crate::data_analysis::velocity::{velocities_for_node, VelocitySeries};
use crate::data_input::{DerivedSeries, PositionTensor};
use crate::error::{PoseError, Result};

/// Speed of the target landmark for one instance, with its summary.
#[derive(Debug, Clone, PartialEq)]
pub struct InstanceSpeed {
    pub instance: String,
    pub velocity: VelocitySeries,
    pub stats: Option<SeriesStats>,
}

/// Distance between the target landmark of two instances.
#[derive(Debug, Clone, PartialEq)]
pub struct PairDistance {
    pub pair: InstancePair,
    pub distance: DerivedSeries,
    pub stats: Option<SeriesStats>,
}

/// Path length walked by the target landmark of one instance.
#[derive(Debug, Clone, PartialEq)]
pub struct InstanceTravel {
    pub instance: String,
    pub travelled: CumulativeSeries,
}

/// Everything one pipeline run produces.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub summary: DataSummary,
    /// Completeness of the input, before any filling.
    pub gap_report: GapReport,
    pub fill: FillOutcome,
    /// Landmark the metrics below were computed for.
    pub node: String,
    pub velocities: Vec<InstanceSpeed>,
    pub distances: Vec<PairDistance>,
    pub distance_travelled: Vec<InstanceTravel>,
}

/// Runs quality assessment, gap filling and the derived metrics with one
/// validated configuration.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: AnalysisConfig,
}

impl Pipeline {
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        config.validate()?;
        for note in config.advisories() {
            warn!("{}", note);
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn run(&self, tensor: &PositionTensor) -> Result<AnalysisReport> {
        let summary = summarize(tensor)?;
        let gap_report = assess(tensor)?;
        info!(
            frames = summary.frame_count,
            nodes = summary.node_count,
            instances = summary.instance_count,
            missing_pct = summary.missing_data_percentage,
            "starting analysis"
        );

        let filled = fill(tensor, &self.config)?;
        let node = self.target_node(tensor)?;
        let data = &filled.tensor;

        let velocities = velocities_for_node(data, &node, &self.config)?
            .into_iter()
            .map(|v| InstanceSpeed {
                stats: SeriesStats::from_series(&v.velocity.speed),
                instance: v.instance,
                velocity: v.velocity,
            })
            .collect();

        let distances = self
            .instance_pairs(tensor)
            .into_iter()
            .map(|pair| {
                let distance = inter_instance_distance(data, &node, &pair.first, &pair.second)?;
                Ok(PairDistance {
                    stats: SeriesStats::from_series(&distance),
                    pair,
                    distance,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let distance_travelled = tensor
            .instances()
            .names()
            .iter()
            .map(|instance| {
                Ok(InstanceTravel {
                    instance: instance.clone(),
                    travelled: distance_travelled(data, &node, instance)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        info!(
            node = node.as_str(),
            unfillable = filled.unfillable.len(),
            failures = filled.failures.len(),
            "analysis complete"
        );
        Ok(AnalysisReport {
            summary,
            gap_report,
            fill: filled,
            node,
            velocities,
            distances,
            distance_travelled,
        })
    }

    fn target_node(&self, tensor: &PositionTensor) -> Result<String> {
        match &self.config.targets().node {
            Some(node) => {
                tensor.nodes().index_of(node)?;
                Ok(node.clone())
            }
            None => tensor
                .nodes()
                .name(0)
                .map(str::to_owned)
                .ok_or_else(|| PoseError::Shape("tensor has no nodes".into())),
        }
    }

    fn instance_pairs(&self, tensor: &PositionTensor) -> Vec<InstancePair> {
        let configured = &self.config.targets().instance_pairs;
        if !configured.is_empty() {
            return configured
                .iter()
                .map(|(a, b)| InstancePair::between(a.as_str(), b.as_str()))
                .collect();
        }
        let names = tensor.instances().names();
        let mut pairs = Vec::new();
        for (i, first) in names.iter().enumerate() {
            for second in &names[i + 1..] {
                pairs.push(InstancePair::between(first.as_str(), second.as_str()));
            }
        }
        pairs
    }
}
