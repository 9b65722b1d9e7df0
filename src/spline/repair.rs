//! Erkennung und Reparatur degenerierter Punkte nach dem Resampling.
//!
//! Ein innerer Punkt gilt als degeneriert, wenn er NaN/∞ enthält oder zu
//! beiden Nachbarn weiter als die wirksame Lückenschwelle entfernt ist.
//! Die Schwelle richtet sich nach dem typischen Punktabstand des Frames,
//! damit gleichmäßig grobe Frames nicht komplett als Lücke gelten.
//! Randpunkte werden nie verändert.

use crate::shared::options::{GAP_SPACING_FACTOR, GAP_THRESHOLD};
use crate::shared::PipelineOptions;
use glam::DVec2;

/// Regel, ab wann ein Abstand als Lücke zählt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GapRule {
    /// Untergrenze der Schwelle in Bildkoordinaten
    pub min_gap: f64,
    /// Vielfaches des typischen Punktabstands
    pub spacing_factor: f64,
}

impl Default for GapRule {
    fn default() -> Self {
        Self {
            min_gap: GAP_THRESHOLD,
            spacing_factor: GAP_SPACING_FACTOR,
        }
    }
}

impl GapRule {
    pub fn from_options(options: &PipelineOptions) -> Self {
        Self {
            min_gap: options.gap_threshold,
            spacing_factor: options.gap_spacing_factor,
        }
    }

    /// Wirksame Schwelle: `max(min_gap, spacing_factor · typischer Abstand)`.
    ///
    /// Typischer Abstand ist der untere Median der endlichen Nachbarabstände,
    /// einzelne Ausreißer verschieben ihn nicht.
    pub fn threshold_for(&self, points: &[DVec2]) -> f64 {
        let mut spacings: Vec<f64> = points
            .windows(2)
            .map(|w| w[0].distance(w[1]))
            .filter(|d| d.is_finite())
            .collect();
        if spacings.is_empty() {
            return self.min_gap;
        }
        spacings.sort_unstable_by(f64::total_cmp);
        let typical = spacings[(spacings.len() - 1) / 2];
        self.min_gap.max(self.spacing_factor * typical)
    }
}

/// Ergebnis eines Reparatur-Durchlaufs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepairReport {
    /// Indizes, die durch das Nachbarmittel ersetzt wurden
    pub repaired: Vec<usize>,
    /// Indizes, die erkannt, aber nicht ersetzt wurden
    pub unrepaired: Vec<usize>,
}

impl RepairReport {
    pub fn is_clean(&self) -> bool {
        self.repaired.is_empty() && self.unrepaired.is_empty()
    }

    pub fn flagged_count(&self) -> usize {
        self.repaired.len() + self.unrepaired.len()
    }
}

fn is_degenerate(prev: DVec2, point: DVec2, next: DVec2, threshold: f64) -> bool {
    if !point.is_finite() {
        return true;
    }
    point.distance(prev) > threshold && point.distance(next) > threshold
}

/// Markiert degenerierte Punkte ohne sie zu verändern.
pub fn detect_degenerate(points: &[DVec2], rule: GapRule) -> Vec<usize> {
    if points.len() < 3 {
        return points
            .iter()
            .enumerate()
            .filter(|(_, p)| !p.is_finite())
            .map(|(i, _)| i)
            .collect();
    }
    let threshold = rule.threshold_for(points);
    let mut flagged: Vec<usize> = (1..points.len() - 1)
        .filter(|&i| is_degenerate(points[i - 1], points[i], points[i + 1], threshold))
        .collect();
    for i in [0, points.len() - 1] {
        if !points[i].is_finite() {
            flagged.push(i);
        }
    }
    flagged.sort_unstable();
    flagged
}

/// Ersetzt degenerierte innere Punkte durch das Mittel ihrer Nachbarn.
///
/// Arbeitet in Leserichtung, ein reparierter Punkt dient dem nächsten als
/// Nachbar. Ohne zwei endliche Nachbarn bleibt der Punkt stehen und wird
/// als `unrepaired` gemeldet.
pub fn repair_points(points: &mut [DVec2], rule: GapRule) -> RepairReport {
    let mut report = RepairReport::default();
    for i in detect_degenerate(points, rule) {
        if i == 0 || i + 1 >= points.len() {
            report.unrepaired.push(i);
            continue;
        }
        let (prev, next) = (points[i - 1], points[i + 1]);
        if prev.is_finite() && next.is_finite() {
            points[i] = (prev + next) * 0.5;
            report.repaired.push(i);
        } else {
            report.unrepaired.push(i);
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(n: usize) -> Vec<DVec2> {
        (0..n).map(|i| DVec2::new(i as f64, 0.0)).collect()
    }

    #[test]
    fn test_clean_input_untouched() {
        let mut pts = line(6);
        let report = repair_points(&mut pts, GapRule::default());
        assert!(report.is_clean());
        assert_eq!(pts, line(6));
    }

    #[test]
    fn test_nan_point_replaced_by_neighbor_average() {
        let mut pts = line(5);
        pts[2] = DVec2::new(f64::NAN, 0.0);
        let report = repair_points(&mut pts, GapRule::default());
        assert_eq!(report.repaired, vec![2]);
        assert_eq!(pts[2], DVec2::new(2.0, 0.0));
    }

    #[test]
    fn test_isolated_gap_point_replaced() {
        let mut pts = line(5);
        pts[3] = DVec2::new(3.0, 500.0);
        let report = repair_points(&mut pts, GapRule::default());
        assert_eq!(report.repaired, vec![3]);
        assert_eq!(pts[3], DVec2::new(3.0, 0.0));
    }

    #[test]
    fn test_gap_on_one_side_only_is_kept() {
        // Sprung zwischen zwei Konturteilen: nur ein Nachbar weit weg
        let mut pts = vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(1.0, 0.0),
            DVec2::new(100.0, 0.0),
            DVec2::new(101.0, 0.0),
        ];
        let before = pts.clone();
        assert!(repair_points(&mut pts, GapRule::default()).is_clean());
        assert_eq!(pts, before);
    }

    #[test]
    fn test_endpoints_never_modified() {
        let mut pts = line(4);
        pts[0] = DVec2::new(f64::NAN, f64::NAN);
        let report = repair_points(&mut pts, GapRule::default());
        assert_eq!(report.unrepaired, vec![0]);
        assert!(pts[0].x.is_nan());
    }

    #[test]
    fn test_neighboring_nans_unrepaired() {
        let mut pts = line(5);
        pts[1] = DVec2::NAN;
        pts[2] = DVec2::NAN;
        let report = repair_points(&mut pts, GapRule::default());
        assert_eq!(report.flagged_count(), 2);
        assert_eq!(report.unrepaired, vec![1, 2]);
        assert_eq!(detect_degenerate(&pts, GapRule::default()), vec![1, 2]);
    }

    #[test]
    fn test_uniform_coarse_spacing_untouched() {
        // Gleichmäßig 90 Einheiten Abstand: größer als min_gap, aber keine Lücke
        let mut pts: Vec<DVec2> = (0..12).map(|i| DVec2::new(i as f64 * 90.0, 0.0)).collect();
        let before = pts.clone();
        let report = repair_points(&mut pts, GapRule::default());
        assert!(report.is_clean(), "{:?}", report);
        assert_eq!(pts, before);
    }

    #[test]
    fn test_spike_in_coarse_frame_still_repaired() {
        let mut pts: Vec<DVec2> = (0..8).map(|i| DVec2::new(i as f64 * 90.0, 0.0)).collect();
        pts[4] = DVec2::new(360.0, 2000.0);
        let report = repair_points(&mut pts, GapRule::default());
        assert_eq!(report.repaired, vec![4]);
        assert_eq!(pts[4], DVec2::new(360.0, 0.0));
    }

    #[test]
    fn test_threshold_for() {
        let rule = GapRule::default();
        assert_eq!(rule.threshold_for(&line(5)), 40.0);
        assert_eq!(rule.threshold_for(&[]), 40.0);
        let coarse: Vec<DVec2> = (0..4).map(|i| DVec2::new(i as f64 * 50.0, 0.0)).collect();
        assert_eq!(rule.threshold_for(&coarse), 50.0 * GAP_SPACING_FACTOR);
    }
}
