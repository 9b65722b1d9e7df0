//! Konsolidiertes Ergebnis pro Subjekt, wie es an Rendering und Export geht.

use super::{BezierCurve, LandmarkSet};
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Frame, dessen Verarbeitung fehlgeschlagen ist (Punktliste bleibt leer).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameFailure {
    pub frame: usize,
    pub reason: String,
}

/// Resampelte Frames, Original-Kurven und Skelett-Track eines Subjekts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectResult {
    pub subject: String,
    /// Pro Frame exakt gleich viele Punkte (außer fehlgeschlagene/leere Frames)
    #[serde(with = "crate::json::xy_frames")]
    pub spline_frames: Vec<Vec<DVec2>>,
    pub one_person_skeletons: Vec<Option<LandmarkSet>>,
    /// Geglättete Kurven, Eingabe des Samplings
    pub bezier_curves: Vec<Vec<BezierCurve>>,
    pub num_frames: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failed_frames: Vec<FrameFailure>,
}

impl SubjectResult {
    /// Punktanzahl der nicht-leeren Frames (0 wenn keiner existiert).
    pub fn points_per_frame(&self) -> usize {
        self.spline_frames
            .iter()
            .map(Vec::len)
            .find(|&len| len > 0)
            .unwrap_or(0)
    }
}
