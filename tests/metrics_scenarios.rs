// tests/metrics_scenarios.rs

use approx::assert_abs_diff_eq;
use ndarray::Array4;
use pose_metrics::data_analysis::{
    cumulative, distance_travelled, fill, inter_instance_distance, pairwise_distance, velocity,
    InstancePair,
};
use pose_metrics::{
    AnalysisConfig, InstanceSet, InterpolationMethod, NodeSet, PositionTensor, Sample,
};

fn gapped_walk() -> PositionTensor {
    let frames = [
        Some((0.0, 0.0)),
        Some((1.0, 0.0)),
        Some((2.0, 0.0)),
        None,
        None,
        Some((5.0, 0.0)),
        Some((6.0, 0.0)),
        Some((7.0, 0.0)),
        Some((8.0, 0.0)),
        Some((9.0, 0.0)),
    ];
    PositionTensor::from_frames(&frames, "head", "mouse1").unwrap()
}

fn linear_config(threshold: usize) -> AnalysisConfig {
    AnalysisConfig::builder()
        .interpolation_method(InterpolationMethod::Linear)
        .missing_run_threshold(threshold)
        .window_length(5)
        .polyorder(2)
        .build()
        .unwrap()
}

#[test]
fn short_gap_is_filled_linearly() {
    let outcome = fill(&gapped_walk(), &linear_config(3)).unwrap();
    assert!(outcome.unfillable.is_empty());
    assert!(outcome.failures.is_empty());
    assert_eq!(outcome.tensor.point(3, 0, 0), Some((3.0, 0.0)));
    assert_eq!(outcome.tensor.point(4, 0, 0), Some((4.0, 0.0)));
}

#[test]
fn gap_above_threshold_stays_missing() {
    let outcome = fill(&gapped_walk(), &linear_config(1)).unwrap();
    assert!(outcome.tensor.is_missing(3, 0, 0));
    assert!(outcome.tensor.is_missing(4, 0, 0));
    let pair = outcome.unfillable.get(0, 0).unwrap();
    assert_eq!(pair.longest_run, 2);
    assert_eq!(outcome.unfillable.len(), 1);
}

#[test]
fn constant_velocity_is_recovered() {
    let frames: Vec<_> = (0..20).map(|f| Some((f as f64, 0.0))).collect();
    let tensor = PositionTensor::from_frames(&frames, "head", "mouse1").unwrap();
    let config = AnalysisConfig::builder()
        .window_length(5)
        .polyorder(2)
        .frame_rate(1.0)
        .build()
        .unwrap();
    let v = velocity(&tensor, "head", "mouse1", &config).unwrap();
    assert_eq!(v.speed.len(), 20);
    for sample in v.speed.iter() {
        assert_abs_diff_eq!(sample.value().unwrap(), 1.0, epsilon = 1e-9);
    }
}

#[test]
fn three_four_five_distance() {
    let nodes = NodeSet::nodes(["centroid"]).unwrap();
    let instances = InstanceSet::instances(["a", "b"]).unwrap();
    let mut data = Array4::<f64>::zeros((1, 1, 2, 2));
    data[[0, 0, 0, 1]] = 3.0;
    data[[0, 0, 1, 1]] = 4.0;
    let tensor = PositionTensor::new(data, nodes, instances).unwrap();
    let d = inter_instance_distance(&tensor, "centroid", "a", "b").unwrap();
    assert_abs_diff_eq!(d.get(0).unwrap().value().unwrap(), 5.0, epsilon = 1e-12);
}

#[test]
fn clean_tensor_is_unchanged_by_fill() {
    let nodes = NodeSet::nodes(["head", "tail"]).unwrap();
    let instances = InstanceSet::instances(["m1", "m2"]).unwrap();
    let data = Array4::from_shape_fn((15, 2, 2, 2), |(f, n, c, i)| {
        (f as f64).sin() + n as f64 * 2.0 - c as f64 + i as f64 * 0.5
    });
    let tensor = PositionTensor::new(data, nodes, instances).unwrap();
    for method in [
        InterpolationMethod::Linear,
        InterpolationMethod::Nearest,
        InterpolationMethod::Cubic,
    ] {
        let config = AnalysisConfig::builder()
            .interpolation_method(method)
            .build()
            .unwrap();
        let outcome = fill(&tensor, &config).unwrap();
        assert!(outcome.is_complete());
        assert_eq!(outcome.tensor, tensor);
    }
}

#[test]
fn observed_positions_survive_every_method() {
    let frames: Vec<_> = (0..16)
        .map(|f| {
            if f % 5 == 2 {
                None
            } else {
                Some((f as f64 * 0.3, (f as f64).powi(2) * 0.1))
            }
        })
        .collect();
    let tensor = PositionTensor::from_frames(&frames, "head", "m").unwrap();
    for method in [
        InterpolationMethod::Linear,
        InterpolationMethod::Nearest,
        InterpolationMethod::Cubic,
    ] {
        let config = AnalysisConfig::builder()
            .interpolation_method(method)
            .build()
            .unwrap();
        let outcome = fill(&tensor, &config).unwrap();
        assert!(outcome.is_complete(), "{} left gaps", method.name());
        for (f, original) in frames.iter().enumerate() {
            match original {
                Some(p) => assert_eq!(outcome.tensor.point(f, 0, 0), Some(*p)),
                None => assert!(!outcome.tensor.is_missing(f, 0, 0)),
            }
        }
    }
}

#[test]
fn self_distance_is_zero() {
    let frames: Vec<_> = (0..8).map(|f| Some((f as f64, 2.0 * f as f64))).collect();
    let tensor = PositionTensor::from_frames(&frames, "head", "m").unwrap();
    let d = pairwise_distance(&tensor, "head", "head", &InstancePair::same("m")).unwrap();
    assert!(d.iter().all(|s| *s == Sample::Valid(0.0)));
}

#[test]
fn velocity_is_frame_aligned_for_every_instance() {
    let nodes = NodeSet::nodes(["thorax"]).unwrap();
    let instances = InstanceSet::instances(["f1", "f2", "f3"]).unwrap();
    let data = Array4::from_shape_fn((40, 1, 2, 3), |(f, _, c, i)| {
        (f as f64 * 0.2 * (i as f64 + 1.0)).cos() * if c == 0 { 1.0 } else { 2.0 }
    });
    let tensor = PositionTensor::new(data, nodes, instances).unwrap();
    let config = AnalysisConfig::builder()
        .window_length(7)
        .polyorder(3)
        .build()
        .unwrap();
    for instance in ["f1", "f2", "f3"] {
        let v = velocity(&tensor, "thorax", instance, &config).unwrap();
        assert_eq!(v.speed.len(), 40);
        assert_eq!(v.vx.len(), 40);
        assert!(v.speed.is_complete());
    }
}

#[test]
fn cumulative_distance_never_decreases() {
    let frames: Vec<_> = (0..30)
        .map(|f| {
            if (10..13).contains(&f) {
                None
            } else {
                Some(((f as f64 * 0.7).sin() * 5.0, (f as f64 * 0.3).cos() * 5.0))
            }
        })
        .collect();
    let tensor = PositionTensor::from_frames(&frames, "head", "m").unwrap();
    let travelled = distance_travelled(&tensor, "head", "m").unwrap();
    let totals = travelled.totals.valid_values();
    assert_eq!(totals.len(), 30);
    assert!(totals.windows(2).all(|w| w[1] >= w[0]));
    // displacement is missing at the gap and on the frame after it
    assert_eq!(travelled.skipped_frames, vec![10, 11, 12, 13]);

    let again = cumulative(&travelled.totals);
    assert!(again.skipped_frames.is_empty());
}
