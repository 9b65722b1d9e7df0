//! Integrationstests für Ein-/Ausgabe der JSON-Dateien und der Optionen.

use contour_spline::json::{parse_contours, parse_skeletons};
use contour_spline::{
    assemble_all, ingest, read_results, write_results_to_file, PipelineOptions, ResampleMethod,
};

const CONTOURS: &str = include_str!("fixtures/contours.json");
const SKELETONS: &str = include_str!("fixtures/skeletons.json");

#[test]
fn test_output_file_round_trip() {
    let report = ingest(CONTOURS, SKELETONS).unwrap();
    let output = assemble_all(&report.animations, &PipelineOptions::default());

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("allPeopleData.json");
    write_results_to_file(&path, &output.subjects).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();
    let chloe = &value[0];
    assert_eq!(chloe["subject"], "chloe");
    assert_eq!(chloe["numFrames"], 2);
    assert!(chloe["splineFrames"][0][0]["x"].is_number());
    assert_eq!(chloe["bezierCurves"][1].as_array().unwrap().len(), 3);
    assert!(chloe.get("failedFrames").is_none());

    let restored = read_results(&content).unwrap();
    assert_eq!(restored.len(), output.subjects.len());
    assert_eq!(restored[1].failed_frames.len(), 1);
}

#[test]
fn test_write_to_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fehlt").join("out.json");
    let err = write_results_to_file(&path, &[]).unwrap_err();
    assert!(format!("{:#}", err).contains("fehlt"));
}

#[test]
fn test_fixture_tracks() {
    let (contours, quarantined) = parse_contours(CONTOURS).unwrap();
    assert_eq!(contours.keys().collect::<Vec<_>>(), vec!["chloe", "jah", "sara"]);
    assert_eq!(quarantined.len(), 1);

    let skeletons = parse_skeletons(SKELETONS).unwrap();
    assert_eq!(skeletons.tracks["sara"].len(), 2);
    assert!(!skeletons.tracks.contains_key("rupal"));
}

#[test]
fn test_options_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("contour_spline.toml");
    std::fs::write(
        &path,
        "resample_method = \"lookup_table\"\nnum_points = 64\ngap_threshold = 25.0\n",
    )
    .unwrap();

    let options = PipelineOptions::load_from_file(&path);
    assert_eq!(options.resample_method, ResampleMethod::LookupTable);
    assert_eq!(options.num_points, Some(64));
    assert_eq!(options.gap_threshold, 25.0);
    assert_eq!(options.samples_per_curve, 10);

    let missing = PipelineOptions::load_from_file(&dir.path().join("gibt_es_nicht.toml"));
    assert_eq!(missing, PipelineOptions::default());
}
