//! Zusammenführung von Kurven- und Skelett-Track eines Subjekts.
//!
//! Beide Tracks werden beim Einlesen explizit pro Frame-Index ausgerichtet,
//! statt sich auf gleich lange Arrays zu verlassen.

use super::{BezierCurve, LandmarkSet, SplineError};
use std::collections::BTreeMap;

/// Ein Frame mit optionaler Kontur und optionalen Posen.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationFrame {
    /// 0-basierter Frame-Index
    pub index: usize,
    pub curves: Option<Vec<BezierCurve>>,
    pub poses: Option<LandmarkSet>,
}

/// Animation eines Subjekts (z.B. einer Performerin) über alle Frames.
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectAnimation {
    pub name: String,
    pub frames: Vec<AnimationFrame>,
    curve_frame_count: usize,
    skeleton_frame_count: usize,
}

impl SubjectAnimation {
    /// Richtet Kurven-Frames (in Reihenfolge) und Skelett-Frames (nach Index) aus.
    pub fn from_tracks(
        name: impl Into<String>,
        curve_frames: Vec<Vec<BezierCurve>>,
        skeleton_frames: BTreeMap<usize, LandmarkSet>,
    ) -> Self {
        let curve_frame_count = curve_frames.len();
        let skeleton_frame_count = skeleton_frames.len();
        let skeleton_span = skeleton_frames
            .keys()
            .next_back()
            .map_or(0, |&last| last + 1);
        let frame_count = curve_frame_count.max(skeleton_span);

        let mut curves_iter = curve_frames.into_iter();
        let mut skeleton_frames = skeleton_frames;
        let frames = (0..frame_count)
            .map(|index| AnimationFrame {
                index,
                curves: curves_iter.next(),
                poses: skeleton_frames.remove(&index),
            })
            .collect();

        Self {
            name: name.into(),
            frames,
            curve_frame_count,
            skeleton_frame_count,
        }
    }

    /// Anzahl der Frames mit Kontur.
    pub fn curve_frame_count(&self) -> usize {
        self.curve_frame_count
    }

    /// Anzahl der Skelett-Einträge (entspricht `numFrames` im Export).
    pub fn skeleton_frame_count(&self) -> usize {
        self.skeleton_frame_count
    }

    /// Prüft, ob beide Tracks gleich viele Frames haben.
    pub fn validate(&self) -> Result<(), SplineError> {
        if self.curve_frame_count != self.skeleton_frame_count {
            return Err(SplineError::Mismatch {
                subject: self.name.clone(),
                curve_frames: self.curve_frame_count,
                skeleton_frames: self.skeleton_frame_count,
            });
        }
        Ok(())
    }

    /// Kurven-Frames in Reihenfolge (nur Frames mit Kontur).
    pub fn curve_frames(&self) -> impl Iterator<Item = &[BezierCurve]> {
        self.frames.iter().filter_map(|f| f.curves.as_deref())
    }

    /// Posen für Frame `0..skeleton_frame_count`, `None` bei Lücken.
    pub fn skeleton_track(&self) -> Vec<Option<LandmarkSet>> {
        (0..self.skeleton_frame_count)
            .map(|i| self.frames.get(i).and_then(|f| f.poses.clone()))
            .collect()
    }
}
