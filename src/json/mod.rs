//! JSON-Ein- und Ausgabe: Kontur-Export, Skelett-Export, konsolidiertes Ergebnis.

pub mod parser;
pub mod writer;

pub use parser::{
    ingest, parse_contours, parse_frame_key, parse_skeletons, IngestReport, QuarantinedSubject,
    SkeletonTracks,
};
pub use writer::{read_results, write_results, write_results_to_file};

/// Serde-Adapter: Punkt-Frames als `[[{"x": .., "y": ..}]]` statt `[[[x, y]]]`.
pub(crate) mod xy_frames {
    use glam::DVec2;
    use serde::ser::SerializeSeq;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    struct XyPoint {
        x: f64,
        y: f64,
    }

    pub fn serialize<S: Serializer>(frames: &[Vec<DVec2>], serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(frames.len()))?;
        for frame in frames {
            let points: Vec<XyPoint> = frame.iter().map(|p| XyPoint { x: p.x, y: p.y }).collect();
            seq.serialize_element(&points)?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Vec<DVec2>>, D::Error> {
        let frames: Vec<Vec<XyPoint>> = Vec::deserialize(deserializer)?;
        Ok(frames
            .into_iter()
            .map(|frame| frame.into_iter().map(|p| DVec2::new(p.x, p.y)).collect())
            .collect())
    }
}
