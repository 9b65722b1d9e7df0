//! Äquidistantes Resampling entlang einer Catmull-Rom-Spline.
//!
//! Die Spline läuft durch die dichte Punktliste des Samplers. Ausgegeben
//! werden exakt `num_points` Punkte in gleichen Bogenlängen-Abständen, damit
//! alle Frames eines Subjekts dieselbe Topologie haben.

use crate::core::SplineError;
use crate::shared::options::{ARC_LENGTH_SAMPLES, SEARCH_EPSILON, SEARCH_SAMPLES};
use crate::shared::spline_geometry::{approx_length, arc_length_table, catmull_rom_at};
use crate::shared::{PipelineOptions, ResampleMethod};
use glam::DVec2;

/// Obergrenze der Halbierungsschritte; danach ist das Intervall unterhalb
/// der f64-Auflösung auf [0, 1].
const MAX_BISECTION_STEPS: usize = 64;

/// Parameter des Resamplings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resampler {
    pub method: ResampleMethod,
    /// Stützstellen für Gesamtlänge und Längentabelle
    pub arc_length_samples: usize,
    /// Stützstellen pro Teillänge in der Binärsuche
    pub search_samples: usize,
    /// Abbruch bei Intervallbreite oder Längendifferenz unterhalb dieses Werts
    pub epsilon: f64,
}

impl Default for Resampler {
    fn default() -> Self {
        Self {
            method: ResampleMethod::BinarySearch,
            arc_length_samples: ARC_LENGTH_SAMPLES,
            search_samples: SEARCH_SAMPLES,
            epsilon: SEARCH_EPSILON,
        }
    }
}

impl Resampler {
    pub fn from_options(options: &PipelineOptions) -> Self {
        Self {
            method: options.resample_method,
            arc_length_samples: options.arc_length_samples,
            search_samples: options.search_samples,
            epsilon: options.search_epsilon,
        }
    }

    /// Verteilt exakt `num_points` Punkte gleichmäßig (Arc-Length) auf der Spline.
    ///
    /// Erster und letzter Punkt werden unverändert aus `points` übernommen.
    pub fn resample(&self, points: &[DVec2], num_points: usize) -> Result<Vec<DVec2>, SplineError> {
        if num_points < 2 {
            return Err(SplineError::InvalidParameter(format!(
                "num_points muss mindestens 2 sein, war {}",
                num_points
            )));
        }
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(SplineError::InvalidParameter(format!(
                "epsilon muss positiv sein, war {}",
                self.epsilon
            )));
        }
        if self.arc_length_samples == 0 || self.search_samples == 0 {
            return Err(SplineError::InvalidParameter(
                "Stützstellen-Anzahl muss mindestens 1 sein".to_string(),
            ));
        }
        let (&first, &last) = match (points.first(), points.last()) {
            (Some(first), Some(last)) if points.len() >= 2 => (first, last),
            _ => {
                return Err(SplineError::DegenerateSpline(format!(
                    "mindestens 2 Stützpunkte nötig, erhalten {}",
                    points.len()
                )))
            }
        };

        let eval = |t: f64| catmull_rom_at(points, t).unwrap_or(first);

        // Tabelle nur für LookupTable, Gesamtlänge in beiden Fällen mit derselben Auflösung
        let table = match self.method {
            ResampleMethod::LookupTable => Some(arc_length_table(eval, self.arc_length_samples)),
            ResampleMethod::BinarySearch => None,
        };
        let total_length = match &table {
            Some(table) => table.last().copied().unwrap_or(0.0),
            None => approx_length(eval, 1.0, self.arc_length_samples),
        };
        if !total_length.is_finite() || total_length <= f64::EPSILON {
            return Err(SplineError::DegenerateSpline(format!(
                "Bogenlänge {} nicht verwendbar",
                total_length
            )));
        }

        let segment_length = total_length / (num_points - 1) as f64;

        let mut result = Vec::with_capacity(num_points);
        result.push(first);
        for i in 1..num_points - 1 {
            let target = i as f64 * segment_length;
            let t = match &table {
                Some(table) => t_from_table(table, target),
                None => self.search_t(&eval, target),
            };
            result.push(eval(t));
        }
        // Endpunkt immer exakt übernehmen
        result.push(last);
        Ok(result)
    }

    /// Binärsuche nach t mit Bogenlänge(0..t) ≈ `target`.
    ///
    /// Jeder Schritt schätzt die Teillänge neu über `search_samples` Stützstellen.
    fn search_t(&self, eval: &impl Fn(f64) -> DVec2, target: f64) -> f64 {
        let mut left = 0.0;
        let mut right = 1.0;
        for _ in 0..MAX_BISECTION_STEPS {
            if right - left <= self.epsilon {
                break;
            }
            let mid = (left + right) * 0.5;
            let distance = approx_length(eval, mid, self.search_samples);
            if (distance - target).abs() < self.epsilon {
                return mid;
            }
            if distance < target {
                left = mid;
            } else {
                right = mid;
            }
        }
        (left + right) * 0.5
    }
}

/// Interpoliert t linear zwischen den Tabelleneinträgen um `target`.
fn t_from_table(table: &[f64], target: f64) -> f64 {
    let samples = table.len() - 1;
    let idx = table.partition_point(|&len| len < target).clamp(1, samples);

    let len_before = table[idx - 1];
    let len_after = table[idx];
    let frac = if (len_after - len_before).abs() > f64::EPSILON {
        ((target - len_before) / (len_after - len_before)).clamp(0.0, 1.0)
    } else {
        0.0
    };
    ((idx - 1) as f64 + frac) / samples as f64
}

/// Resampling mit Standardparametern (Binärsuche, 1000/100 Stützstellen, ε = 1e-6).
pub fn resample_equidistant(points: &[DVec2], num_points: usize) -> Result<Vec<DVec2>, SplineError> {
    Resampler::default().resample(points, num_points)
}
