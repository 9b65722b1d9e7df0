//! Wiedergabe-Helfer: Interpolation zwischen Frames und Render-Übergabe.

use crate::core::{SplineError, SubjectResult};
use crate::shared::PipelineOptions;
use glam::DVec2;

/// Punktweise Interpolation `a·(1−t) + b·t`.
pub fn lerp_frames(a: &[DVec2], b: &[DVec2], t: f64) -> Result<Vec<DVec2>, SplineError> {
    if a.len() != b.len() {
        return Err(SplineError::LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    Ok(a.iter().zip(b).map(|(&p, &q)| p * (1.0 - t) + q * t).collect())
}

/// Frame an einer gebrochenen Zeitposition, mit Wraparound am Ende.
///
/// `None` bei leerer Sequenz, nicht-endlicher Zeit oder wenn die beiden
/// Nachbar-Frames unterschiedlich viele Punkte haben.
pub fn sample_frame_at(frames: &[Vec<DVec2>], time: f64) -> Option<Vec<DVec2>> {
    if frames.is_empty() || !time.is_finite() {
        return None;
    }
    let count = frames.len() as f64;
    let base = time.floor();
    let t = time - base;
    let current = base.rem_euclid(count) as usize;
    let next = (current + 1) % frames.len();
    if t == 0.0 {
        return Some(frames[current].clone());
    }
    lerp_frames(&frames[current], &frames[next], t).ok()
}

/// Skaliertes Landmark für die Anzeige.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub name: String,
    pub position: DVec2,
}

/// Read-only Daten eines Frames für einen Renderer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameScene {
    pub frame_index: usize,
    /// Resampelte Konturpunkte (Bildkoordinaten)
    pub spline_points: Vec<DVec2>,
    /// Landmarks der ersten Person, mit `canvas_size` skaliert
    pub markers: Vec<Marker>,
}

impl FrameScene {
    /// Baut die Szene für `frame_index`. Fehlende Daten ergeben leere Listen.
    pub fn build(result: &SubjectResult, frame_index: usize, canvas_size: f64) -> Self {
        let spline_points = result
            .spline_frames
            .get(frame_index)
            .cloned()
            .unwrap_or_default();

        let markers = result
            .one_person_skeletons
            .get(frame_index)
            .and_then(Option::as_ref)
            .and_then(|poses| poses.first())
            .map(|pose| {
                pose.landmarks
                    .iter()
                    .map(|lm| Marker {
                        name: lm.name.clone(),
                        position: DVec2::new(lm.x, lm.y) * canvas_size,
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            frame_index,
            spline_points,
            markers,
        }
    }

    /// Wie [`FrameScene::build`], mit `canvas_size` aus den Optionen.
    pub fn from_options(
        result: &SubjectResult,
        frame_index: usize,
        options: &PipelineOptions,
    ) -> Self {
        Self::build(result, frame_index, options.canvas_size)
    }

    pub fn has_content(&self) -> bool {
        !self.spline_points.is_empty() || !self.markers.is_empty()
    }

    /// Liniensegmente für Skelett-Kanten, deren Endpunkte beide vorhanden sind.
    pub fn bones(&self, connections: &[(String, String)]) -> Vec<(DVec2, DVec2)> {
        let position = |name: &str| {
            self.markers
                .iter()
                .find(|m| m.name == name)
                .map(|m| m.position)
        };
        connections
            .iter()
            .filter_map(|(from, to)| Some((position(from)?, position(to)?)))
            .collect()
    }
}
