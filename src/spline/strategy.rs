//! Austauschbare Umwandlung Bézier-Frame → Catmull-Rom-Stützpunkte.

use super::sampler::sample_bezier_frame;
use crate::core::BezierCurve;
use crate::shared::{PipelineOptions, StrategyKind};
use glam::DVec2;

/// Gemeinsame Schnittstelle beider Umwandlungsstrategien.
pub trait BezierToSplineStrategy: Send + Sync {
    /// Kurzname für Logs.
    fn name(&self) -> &'static str;

    /// Liefert die Stützpunkte der Catmull-Rom-Spline für einen Frame.
    fn to_spline_points(&self, curves: &[BezierCurve]) -> Vec<DVec2>;
}

/// Feste Abtastung mit `samples_per_curve` Punkten pro Segment.
#[derive(Debug, Clone, Copy)]
pub struct FixedSampling {
    pub samples_per_curve: usize,
}

impl BezierToSplineStrategy for FixedSampling {
    fn name(&self) -> &'static str {
        "fixed_sampling"
    }

    fn to_spline_points(&self, curves: &[BezierCurve]) -> Vec<DVec2> {
        sample_bezier_frame(curves, self.samples_per_curve)
    }
}

/// Rekonstruktion mit virtuellen Randpunkten und einem Zwischenpunkt pro Segment.
///
/// Die Spannung von 0.1 ist empirisch, die Ausgabe ist nicht exakt
/// äquivalent zur Bézier-Kurve.
#[derive(Debug, Clone, Copy)]
pub struct TangentPreserving {
    pub tension: f64,
}

/// Punkte gelten als identisch unterhalb dieses Abstands pro Achse.
const SAME_POINT_EPSILON: f64 = 1e-10;

impl TangentPreserving {
    /// Spiegelt `control` am `anchor`, damit die Tangente erhalten bleibt.
    fn virtual_point(anchor: DVec2, control: DVec2) -> DVec2 {
        2.0 * anchor - control
    }

    fn intermediate_point(&self, curve: &BezierCurve) -> DVec2 {
        curve.p0 + (curve.p3 - curve.p0) * 0.5 + (curve.p1 - curve.p2) * self.tension
    }
}

impl BezierToSplineStrategy for TangentPreserving {
    fn name(&self) -> &'static str {
        "tangent_preserving"
    }

    fn to_spline_points(&self, curves: &[BezierCurve]) -> Vec<DVec2> {
        let (Some(first), Some(last)) = (curves.first(), curves.last()) else {
            return Vec::new();
        };

        let mut points = Vec::with_capacity(3 + curves.len() * 3);
        points.push(Self::virtual_point(first.p0, first.p1));
        points.push(first.p0);

        for curve in curves {
            let connected = points
                .last()
                .is_some_and(|&p| (p - curve.p0).abs().max_element() < SAME_POINT_EPSILON);
            if !connected {
                points.push(curve.p0);
            }
            points.push(self.intermediate_point(curve));
            points.push(curve.p3);
        }

        points.push(Self::virtual_point(last.p3, last.p2));
        points
    }
}

/// Direkte Umrechnung der Bézier-Kontrollpunkte in Catmull-Rom-Stützpunkte.
///
/// Pro Segment: P0, `(6·P1 − P0) / 5`, `(6·P2 − P3) / 5`, P3. Anker an
/// Segmentübergängen erscheinen doppelt.
#[derive(Debug, Clone, Copy, Default)]
pub struct ControlPolygon;

impl BezierToSplineStrategy for ControlPolygon {
    fn name(&self) -> &'static str {
        "control_polygon"
    }

    fn to_spline_points(&self, curves: &[BezierCurve]) -> Vec<DVec2> {
        curves
            .iter()
            .flat_map(|c| {
                [
                    c.p0,
                    (6.0 * c.p1 - c.p0) / 5.0,
                    (6.0 * c.p2 - c.p3) / 5.0,
                    c.p3,
                ]
            })
            .collect()
    }
}

impl StrategyKind {
    /// Erzeugt die konfigurierte Strategie.
    pub fn build(self, options: &PipelineOptions) -> Box<dyn BezierToSplineStrategy> {
        match self {
            StrategyKind::FixedSampling => Box::new(FixedSampling {
                samples_per_curve: options.samples_per_curve,
            }),
            StrategyKind::TangentPreserving => Box::new(TangentPreserving {
                tension: options.tension,
            }),
            StrategyKind::ControlPolygon => Box::new(ControlPolygon),
        }
    }
}
