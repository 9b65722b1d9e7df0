//! Kubische Bézier-Segmente im 8-Tupel-Format des Kontur-Exports.

use super::SplineError;
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Kubisches Bézier-Segment: Anker P0, Kontrollpunkte P1/P2, Anker P3.
///
/// Wird als flaches Array `[x1, y1, x2, y2, x3, y3, x4, y4]` (de)serialisiert.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "[f64; 8]")]
pub struct BezierCurve {
    pub p0: DVec2,
    pub p1: DVec2,
    pub p2: DVec2,
    pub p3: DVec2,
}

impl BezierCurve {
    pub fn new(p0: DVec2, p1: DVec2, p2: DVec2, p3: DVec2) -> Self {
        Self { p0, p1, p2, p3 }
    }

    /// Baut ein Segment aus exakt 8 Werten.
    ///
    /// `curve_index` landet nur in der Fehlermeldung.
    pub fn from_slice(values: &[f64], curve_index: usize) -> Result<Self, SplineError> {
        let &[x1, y1, x2, y2, x3, y3, x4, y4] = values else {
            return Err(SplineError::Format {
                curve_index,
                len: values.len(),
            });
        };
        Ok(Self::new(
            DVec2::new(x1, y1),
            DVec2::new(x2, y2),
            DVec2::new(x3, y3),
            DVec2::new(x4, y4),
        ))
    }

    pub fn to_array(&self) -> [f64; 8] {
        [
            self.p0.x, self.p0.y, self.p1.x, self.p1.y, self.p2.x, self.p2.y, self.p3.x, self.p3.y,
        ]
    }

    /// B(t) = (1-t)³·P0 + 3(1-t)²t·P1 + 3(1-t)t²·P2 + t³·P3
    ///
    /// An den Rändern werden die Anker exakt zurückgegeben.
    pub fn point_at(&self, t: f64) -> DVec2 {
        if t <= 0.0 {
            return self.p0;
        }
        if t >= 1.0 {
            return self.p3;
        }
        cubic_bezier(self.p0, self.p1, self.p2, self.p3, t)
    }
}

impl TryFrom<Vec<f64>> for BezierCurve {
    type Error = SplineError;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        Self::from_slice(&values, 0)
    }
}

impl From<BezierCurve> for [f64; 8] {
    fn from(curve: BezierCurve) -> Self {
        curve.to_array()
    }
}

/// B(t) = (1-t)³·P0 + 3(1-t)²t·P1 + 3(1-t)t²·P2 + t³·P3
pub fn cubic_bezier(p0: DVec2, p1: DVec2, p2: DVec2, p3: DVec2, t: f64) -> DVec2 {
    let inv = 1.0 - t;
    let inv2 = inv * inv;
    let t2 = t * t;
    inv2 * inv * p0 + 3.0 * inv2 * t * p1 + 3.0 * inv * t2 * p2 + t2 * t * p3
}

/// Validiert einen Roh-Frame und wandelt ihn in typisierte Segmente.
///
/// Bricht beim ersten Segment mit falscher Länge ab.
pub fn parse_frame(raw: &[Vec<f64>]) -> Result<Vec<BezierCurve>, SplineError> {
    raw.iter()
        .enumerate()
        .map(|(index, values)| BezierCurve::from_slice(values, index))
        .collect()
}
