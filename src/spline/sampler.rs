//! Feste parametrische Abtastung verbundener Bézier-Segmente.

use crate::core::{parse_frame, BezierCurve, SplineError};
use glam::DVec2;

/// Tastet einen Frame mit `samples_per_curve` Punkten pro Segment ab.
///
/// Der Startanker des ersten Segments wird einmal vorangestellt, danach
/// liefert jedes Segment die Punkte bei `t = i / k` für `i = 1..=k`.
/// Ergebnis: `1 + L·k` Punkte, Übergangspunkte werden nicht dedupliziert.
pub fn sample_bezier_frame(curves: &[BezierCurve], samples_per_curve: usize) -> Vec<DVec2> {
    let Some(first) = curves.first() else {
        return Vec::new();
    };

    let mut points = Vec::with_capacity(1 + curves.len() * samples_per_curve);
    points.push(first.p0);
    for curve in curves {
        for i in 1..=samples_per_curve {
            let t = i as f64 / samples_per_curve as f64;
            points.push(curve.point_at(t));
        }
    }
    points
}

/// Wie [`sample_bezier_frame`], aber auf Rohdaten aus dem Export.
///
/// Schlägt mit `SplineError::Format` fehl, sobald ein Segment nicht exakt
/// 8 Werte hat. Ein leerer Frame ergibt eine leere Punktliste.
pub fn sample_raw_frame(raw: &[Vec<f64>], samples_per_curve: usize) -> Result<Vec<DVec2>, SplineError> {
    if samples_per_curve == 0 {
        return Err(SplineError::InvalidParameter(
            "samples_per_curve muss mindestens 1 sein".to_string(),
        ));
    }
    let curves = parse_frame(raw)?;
    Ok(sample_bezier_frame(&curves, samples_per_curve))
}
