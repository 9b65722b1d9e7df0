//! Glättung einzelner Bézier-Segmente mit ausreißenden Kontrollpunkten.

use crate::core::BezierCurve;

/// Kollabiert beide Kontrollpunkte auf die Ankermitte, wenn **beide**
/// weiter als `threshold` von ihrem Anker entfernt sind.
///
/// Das Segment wird dadurch zu einer nahezu geraden Linie. Sonst bleibt
/// es unverändert.
pub fn smooth_curve(curve: &BezierCurve, threshold: f64) -> BezierCurve {
    let dist_start = curve.p0.distance(curve.p1);
    let dist_end = curve.p3.distance(curve.p2);
    if dist_start > threshold && dist_end > threshold {
        let mid = (curve.p0 + curve.p3) * 0.5;
        return BezierCurve::new(curve.p0, mid, mid, curve.p3);
    }
    *curve
}

/// Glättet alle Segmente eines Frames.
pub fn smooth_frame(curves: &[BezierCurve], threshold: f64) -> Vec<BezierCurve> {
    curves.iter().map(|c| smooth_curve(c, threshold)).collect()
}
