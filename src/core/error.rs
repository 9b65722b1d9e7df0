//! Fehlertypen der Resampling-Pipeline.

use thiserror::Error;

/// Fehler beim Verarbeiten von Kurven, Splines und Tracks.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SplineError {
    /// Kurve hat nicht exakt 8 Werte `[x1, y1, x2, y2, x3, y3, x4, y4]`
    #[error("Kurve {curve_index} hat {len} Werte, erwartet werden exakt 8 (x1, y1, x2, y2, x3, y3, x4, y4)")]
    Format { curve_index: usize, len: usize },

    /// Spline ohne messbare Länge oder mit nicht-endlichen Punkten
    #[error("Degenerierter Spline: {0}")]
    DegenerateSpline(String),

    /// Kurven- und Skelett-Track eines Subjekts haben unterschiedliche Frame-Anzahl
    #[error(
        "Subjekt '{subject}': {curve_frames} Kurven-Frames, aber {skeleton_frames} Skelett-Frames"
    )]
    Mismatch {
        subject: String,
        curve_frames: usize,
        skeleton_frames: usize,
    },

    /// Zwei Punktfolgen, die paarweise verarbeitet werden, sind unterschiedlich lang
    #[error("Punktfolgen unterschiedlich lang: {left} vs. {right}")]
    LengthMismatch { left: usize, right: usize },

    /// Ungültiger Parameter (z.B. `num_points < 2`)
    #[error("Ungültiger Parameter: {0}")]
    InvalidParameter(String),
}
