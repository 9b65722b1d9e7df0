use super::*;
use crate::core::{Landmark, LandmarkSet, Pose};
use crate::shared::StrategyKind;
use std::collections::BTreeMap;

fn curve(values: [f64; 8]) -> BezierCurve {
    BezierCurve::from_slice(&values, 0).unwrap()
}

fn line_x() -> BezierCurve {
    curve([0.0, 0.0, 10.0, 0.0, 20.0, 0.0, 30.0, 0.0])
}

fn line_up() -> BezierCurve {
    curve([30.0, 0.0, 30.0, 10.0, 30.0, 20.0, 30.0, 30.0])
}

fn poses() -> LandmarkSet {
    vec![Pose {
        person_id: 0,
        landmarks: vec![Landmark::new("NOSE", 0.5, 0.5)],
    }]
}

fn skeletons(count: usize) -> BTreeMap<usize, LandmarkSet> {
    (0..count).map(|i| (i, poses())).collect()
}

fn animation(frames: Vec<Vec<BezierCurve>>) -> SubjectAnimation {
    let count = frames.len();
    SubjectAnimation::from_tracks("chloe", frames, skeletons(count))
}

#[test]
fn test_all_frames_share_point_count() {
    let anim = animation(vec![vec![line_x(), line_up()], vec![line_x()]]);
    let result = assemble_subject(&anim, &PipelineOptions::default()).unwrap();

    // 1 + 2·10 Stützpunkte im längsten Frame
    assert_eq!(result.spline_frames.len(), 2);
    assert!(result.spline_frames.iter().all(|f| f.len() == 21));
    assert_eq!(result.points_per_frame(), 21);
    assert_eq!(result.num_frames, 2);
    assert!(result.failed_frames.is_empty());
    assert_eq!(result.bezier_curves[0].len(), 2);
    assert_eq!(result.one_person_skeletons.len(), 2);
}

#[test]
fn test_endpoints_match_anchors() {
    let anim = animation(vec![vec![line_x(), line_up()]]);
    let result = assemble_subject(&anim, &PipelineOptions::default()).unwrap();
    let frame = &result.spline_frames[0];
    assert_eq!(frame[0], DVec2::new(0.0, 0.0));
    assert_eq!(frame[frame.len() - 1], DVec2::new(30.0, 30.0));
}

#[test]
fn test_outlying_controls_are_smoothed() {
    let wild = curve([0.0, 0.0, 100.0, 0.0, 100.0, 100.0, 0.0, 100.0]);
    let anim = animation(vec![vec![wild]]);
    let result = assemble_subject(&anim, &PipelineOptions::default()).unwrap();
    assert_eq!(
        result.bezier_curves[0][0],
        curve([0.0, 0.0, 0.0, 50.0, 0.0, 50.0, 0.0, 100.0])
    );
    // Nach dem Glätten liegt die Kontur auf der y-Achse
    assert!(result.spline_frames[0].iter().all(|p| p.x.abs() < 1e-9));
}

#[test]
fn test_num_points_override() {
    let options = PipelineOptions {
        num_points: Some(8),
        ..Default::default()
    };
    let anim = animation(vec![vec![line_x(), line_up()], vec![line_x()]]);
    let result = assemble_subject(&anim, &options).unwrap();
    assert!(result.spline_frames.iter().all(|f| f.len() == 8));

    let invalid = PipelineOptions {
        num_points: Some(1),
        ..Default::default()
    };
    assert!(matches!(
        assemble_subject(&anim, &invalid),
        Err(SplineError::InvalidParameter(_))
    ));
}

#[test]
fn test_degenerate_frame_is_recorded() {
    let dot = curve([5.0; 8]);
    let anim = animation(vec![vec![line_x()], vec![dot], vec![line_x()]]);
    let result = assemble_subject(&anim, &PipelineOptions::default()).unwrap();

    assert_eq!(result.spline_frames[0].len(), 11);
    assert!(result.spline_frames[1].is_empty());
    assert_eq!(result.spline_frames[2].len(), 11);
    assert_eq!(result.failed_frames.len(), 1);
    assert_eq!(result.failed_frames[0].frame, 1);
    assert!(result.failed_frames[0].reason.contains("Degeneriert"));
}

#[test]
fn test_empty_frame_stays_empty() {
    let anim = animation(vec![vec![line_x()], vec![]]);
    let result = assemble_subject(&anim, &PipelineOptions::default()).unwrap();
    assert_eq!(result.spline_frames[0].len(), 11);
    assert!(result.spline_frames[1].is_empty());
    assert!(result.failed_frames.is_empty());
}

#[test]
fn test_subject_without_contours() {
    let anim = animation(vec![vec![], vec![]]);
    let result = assemble_subject(&anim, &PipelineOptions::default()).unwrap();
    assert_eq!(result.points_per_frame(), 0);
    assert!(result.spline_frames.iter().all(Vec::is_empty));
}

#[test]
fn test_mismatch_rejected_unless_relaxed() {
    let anim = SubjectAnimation::from_tracks(
        "jah",
        vec![vec![line_x()], vec![line_x()], vec![line_x()]],
        skeletons(2),
    );
    let err = assemble_subject(&anim, &PipelineOptions::default()).unwrap_err();
    assert_eq!(
        err,
        SplineError::Mismatch {
            subject: "jah".to_string(),
            curve_frames: 3,
            skeleton_frames: 2,
        }
    );

    let relaxed = PipelineOptions {
        require_aligned_tracks: false,
        ..Default::default()
    };
    let result = assemble_subject(&anim, &relaxed).unwrap();
    assert_eq!(result.spline_frames.len(), 3);
    assert_eq!(result.num_frames, 2);
    assert_eq!(result.one_person_skeletons.len(), 2);
}

#[test]
fn test_tangent_preserving_strategy() {
    let options = PipelineOptions {
        strategy: StrategyKind::TangentPreserving,
        ..Default::default()
    };
    let anim = animation(vec![vec![line_x(), line_up()], vec![line_x()]]);
    let result = assemble_subject(&anim, &options).unwrap();
    // 3 + 2·2 Stützpunkte im längsten Frame
    assert!(result.spline_frames.iter().all(|f| f.len() == 7));
}

#[test]
fn test_lookup_table_matches_binary_search() {
    let lut = PipelineOptions {
        resample_method: crate::shared::ResampleMethod::LookupTable,
        ..Default::default()
    };
    let anim = animation(vec![vec![line_x(), line_up()]]);
    let a = assemble_subject(&anim, &PipelineOptions::default()).unwrap();
    let b = assemble_subject(&anim, &lut).unwrap();
    for (p, q) in a.spline_frames[0].iter().zip(&b.spline_frames[0]) {
        assert!(p.distance(*q) < 0.6, "{:?} vs {:?}", p, q);
    }
}

#[test]
fn test_assemble_all_continues_after_failure() {
    let good = animation(vec![vec![line_x()]]);
    let bad = SubjectAnimation::from_tracks("jah", vec![vec![line_x()]], skeletons(3));
    let also_good = SubjectAnimation::from_tracks("sara", vec![vec![line_up()]], skeletons(1));

    let output = assemble_all(&[good, bad, also_good], &PipelineOptions::default());
    let names: Vec<&str> = output.subjects.iter().map(|s| s.subject.as_str()).collect();
    assert_eq!(names, vec!["chloe", "sara"]);
    assert_eq!(output.failures.len(), 1);
    assert_eq!(output.failures[0].subject, "jah");
}

fn spacing_within(points: &[DVec2], tolerance: f64) -> Result<(), Vec<f64>> {
    let spacings: Vec<f64> = points.windows(2).map(|w| w[0].distance(w[1])).collect();
    let mean = spacings.iter().sum::<f64>() / spacings.len() as f64;
    if spacings
        .iter()
        .all(|d| (d - mean).abs() <= tolerance * mean)
    {
        Ok(())
    } else {
        Err(spacings)
    }
}

/// L-förmige Kontur in Pixelgröße (900 × 900).
fn large_l_contour() -> Vec<BezierCurve> {
    vec![
        curve([0.0, 0.0, 0.0, 300.0, 0.0, 600.0, 0.0, 900.0]),
        curve([0.0, 900.0, 300.0, 900.0, 600.0, 900.0, 900.0, 900.0]),
    ]
}

#[test]
fn test_large_contour_stays_equidistant_with_repair() {
    let options = PipelineOptions::default();
    assert!(options.repair_gaps);
    let anim = animation(vec![large_l_contour()]);
    let result = assemble_subject(&anim, &options).unwrap();
    let frame = &result.spline_frames[0];
    assert_eq!(frame.len(), 21);
    if let Err(spacings) = spacing_within(frame, 0.15) {
        panic!("Abstände nicht gleichmäßig: {:?}", spacings);
    }
}

#[test]
fn test_repair_leaves_coarse_frames_unchanged() {
    let contour = vec![
        curve([0.0, 0.0, 0.0, 150.0, 0.0, 250.0, 0.0, 400.0]),
        curve([0.0, 400.0, 150.0, 400.0, 250.0, 400.0, 400.0, 400.0]),
    ];
    for strategy in [StrategyKind::TangentPreserving, StrategyKind::FixedSampling] {
        let with_repair = PipelineOptions {
            strategy,
            ..Default::default()
        };
        let without_repair = PipelineOptions {
            repair_gaps: false,
            ..with_repair.clone()
        };
        let anim = animation(vec![contour.clone()]);
        assert_eq!(
            assemble_subject(&anim, &with_repair).unwrap().spline_frames,
            assemble_subject(&anim, &without_repair).unwrap().spline_frames,
            "Strategie {:?}",
            strategy
        );
    }
}

#[test]
fn test_invalid_options_rejected_up_front() {
    let anim = animation(vec![vec![line_x()]]);
    let no_samples = PipelineOptions {
        samples_per_curve: 0,
        ..Default::default()
    };
    assert!(matches!(
        assemble_subject(&anim, &no_samples),
        Err(SplineError::InvalidParameter(_))
    ));
    let zero_epsilon = PipelineOptions {
        search_epsilon: 0.0,
        ..Default::default()
    };
    assert!(matches!(
        assemble_subject(&anim, &zero_epsilon),
        Err(SplineError::InvalidParameter(_))
    ));
}

#[test]
fn test_control_polygon_strategy() {
    let options = PipelineOptions {
        strategy: StrategyKind::ControlPolygon,
        ..Default::default()
    };
    let anim = animation(vec![vec![line_x(), line_up()], vec![line_x()]]);
    let result = assemble_subject(&anim, &options).unwrap();
    assert!(result.spline_frames.iter().all(|f| f.len() == 8));
    assert!(result.failed_frames.is_empty());
}
