//! Zentrale Konfiguration der Resampling-Pipeline.
//!
//! `PipelineOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use crate::core::SplineError;
use serde::{Deserialize, Serialize};

// ── Glättung ────────────────────────────────────────────────────────

/// Abstand Anker→Kontrollpunkt, ab dem ein Segment geglättet wird.
pub const SMOOTHING_THRESHOLD: f64 = 20.0;

// ── Bézier-Sampling ─────────────────────────────────────────────────

/// Abtastpunkte pro Bézier-Segment (ohne Startpunkt).
pub const SAMPLES_PER_CURVE: usize = 10;
/// Spannung der tangentenerhaltenden Konvertierung (empirisch, nicht hergeleitet).
pub const TANGENT_TENSION: f64 = 0.1;

// ── Arc-Length-Resampling ───────────────────────────────────────────

/// Stützstellen für die Gesamtlänge der Spline.
pub const ARC_LENGTH_SAMPLES: usize = 1000;
/// Stützstellen pro Teillängen-Schätzung in der Binärsuche.
pub const SEARCH_SAMPLES: usize = 100;
/// Abbruchschwelle der Binärsuche (Intervallbreite und Längendifferenz).
pub const SEARCH_EPSILON: f64 = 1e-6;

// ── Reparatur ───────────────────────────────────────────────────────

/// Mindestabstand zu beiden Nachbarn, ab dem ein Punkt als Ausreißer gilt.
pub const GAP_THRESHOLD: f64 = 40.0;
/// Vielfaches des typischen Punktabstands, ab dem ein Abstand als Lücke gilt.
pub const GAP_SPACING_FACTOR: f64 = 3.0;

// ── Playback ────────────────────────────────────────────────────────

/// Kantenlänge der Zielfläche für normalisierte Landmarks.
pub const CANVAS_SIZE: f64 = 512.0;

/// Umwandlung Bézier-Frame → Spline-Stützpunkte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Feste Abtastung jedes Segments
    #[default]
    FixedSampling,
    /// Tangentenerhaltende Rekonstruktion mit virtuellen Randpunkten
    TangentPreserving,
    /// Bézier-Kontrollpunkte direkt als Catmull-Rom-Stützpunkte
    ControlPolygon,
}

/// Suchverfahren für die Bogenlängen-Parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResampleMethod {
    /// Binärsuche mit Neuberechnung der Teillänge pro Schritt
    #[default]
    BinarySearch,
    /// Einmalige kumulierte Längentabelle pro Frame
    LookupTable,
}

/// Alle zur Laufzeit änderbaren Pipeline-Optionen.
/// Wird als `contour_spline.toml` gelesen (Pfad per CLI überschreibbar).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineOptions {
    // ── Glättung ────────────────────────────────────────────────
    /// Schwelle für das Kollabieren ausreißender Kontrollpunkte
    pub smoothing_threshold: f64,

    // ── Konvertierung ───────────────────────────────────────────
    /// Gewählte Bézier→Spline-Strategie
    pub strategy: StrategyKind,
    /// Abtastpunkte pro Segment (FixedSampling)
    pub samples_per_curve: usize,
    /// Spannung (TangentPreserving)
    pub tension: f64,

    // ── Resampling ──────────────────────────────────────────────
    /// Suchverfahren
    pub resample_method: ResampleMethod,
    /// Feste Punktanzahl pro Frame; `None` = Maximum über alle Frames des Subjekts
    pub num_points: Option<usize>,
    /// Stützstellen der Gesamtlänge
    pub arc_length_samples: usize,
    /// Stützstellen pro Teillänge in der Binärsuche
    pub search_samples: usize,
    /// Abbruchschwelle der Binärsuche
    pub search_epsilon: f64,

    // ── Reparatur ───────────────────────────────────────────────
    /// Ausreißer-Abstand zu beiden Nachbarn (Untergrenze)
    pub gap_threshold: f64,
    /// Ausreißer-Abstand als Vielfaches des typischen Punktabstands
    pub gap_spacing_factor: f64,
    /// Ausreißer und NaN-Punkte durch Nachbarmittel ersetzen
    pub repair_gaps: bool,

    // ── Ingestion ───────────────────────────────────────────────
    /// Kurven- und Skelett-Track müssen gleich lang sein
    pub require_aligned_tracks: bool,

    // ── Ausführung / Playback ───────────────────────────────────
    /// Worker-Threads (0 = rayon-Standard)
    pub threads: usize,
    /// Zielgröße für Landmark-Skalierung
    pub canvas_size: f64,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            smoothing_threshold: SMOOTHING_THRESHOLD,

            strategy: StrategyKind::default(),
            samples_per_curve: SAMPLES_PER_CURVE,
            tension: TANGENT_TENSION,

            resample_method: ResampleMethod::default(),
            num_points: None,
            arc_length_samples: ARC_LENGTH_SAMPLES,
            search_samples: SEARCH_SAMPLES,
            search_epsilon: SEARCH_EPSILON,

            gap_threshold: GAP_THRESHOLD,
            gap_spacing_factor: GAP_SPACING_FACTOR,
            repair_gaps: true,

            require_aligned_tracks: true,

            threads: 0,
            canvas_size: CANVAS_SIZE,
        }
    }
}

impl PipelineOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    ///
    /// Werte, die `validate` ablehnt, gelten ebenfalls als Fehler.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<Self>(&content) {
                Ok(opts) => match opts.validate() {
                    Ok(()) => {
                        log::info!("Optionen geladen aus: {}", path.display());
                        opts
                    }
                    Err(e) => {
                        log::warn!("Optionen ungültig, verwende Standardwerte: {}", e);
                        Self::default()
                    }
                },
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Prüft Werte, mit denen die Pipeline nicht sinnvoll (oder nicht
    /// terminierend) laufen kann.
    pub fn validate(&self) -> Result<(), SplineError> {
        let invalid = |msg: String| Err(SplineError::InvalidParameter(msg));
        if !(self.search_epsilon.is_finite() && self.search_epsilon > 0.0) {
            return invalid(format!(
                "search_epsilon muss positiv sein, war {}",
                self.search_epsilon
            ));
        }
        for (name, value) in [
            ("samples_per_curve", self.samples_per_curve),
            ("arc_length_samples", self.arc_length_samples),
            ("search_samples", self.search_samples),
        ] {
            if value == 0 {
                return invalid(format!("{} muss mindestens 1 sein", name));
            }
        }
        if let Some(n) = self.num_points.filter(|&n| n < 2) {
            return invalid(format!("num_points muss mindestens 2 sein, war {}", n));
        }
        if !(self.gap_threshold >= 0.0 && self.gap_spacing_factor > 0.0) {
            return invalid(format!(
                "gap_threshold ({}) und gap_spacing_factor ({}) müssen positiv sein",
                self.gap_threshold, self.gap_spacing_factor
            ));
        }
        if !(self.canvas_size.is_finite() && self.canvas_size > 0.0) {
            return invalid(format!("canvas_size muss positiv sein, war {}", self.canvas_size));
        }
        Ok(())
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Standardpfad der Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("contour-spline"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("contour_spline.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let opts = PipelineOptions::default();
        assert_eq!(opts.smoothing_threshold, 20.0);
        assert_eq!(opts.samples_per_curve, 10);
        assert_eq!(opts.arc_length_samples, 1000);
        assert_eq!(opts.search_samples, 100);
        assert_eq!(opts.strategy, StrategyKind::FixedSampling);
        assert_eq!(opts.resample_method, ResampleMethod::BinarySearch);
        assert!(opts.num_points.is_none());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let opts: PipelineOptions = toml::from_str(
            "samples_per_curve = 4\nstrategy = \"tangent_preserving\"\nresample_method = \"lookup_table\"\n",
        )
        .unwrap();
        assert_eq!(opts.samples_per_curve, 4);
        assert_eq!(opts.strategy, StrategyKind::TangentPreserving);
        assert_eq!(opts.resample_method, ResampleMethod::LookupTable);
        assert_eq!(opts.smoothing_threshold, SMOOTHING_THRESHOLD);
        assert_eq!(opts.gap_threshold, GAP_THRESHOLD);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("opts.toml");
        let opts = PipelineOptions {
            num_points: Some(64),
            repair_gaps: false,
            ..PipelineOptions::default()
        };
        opts.save_to_file(&path).unwrap();
        assert_eq!(PipelineOptions::load_from_file(&path), opts);
    }

    #[test]
    fn test_missing_or_broken_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert_eq!(
            PipelineOptions::load_from_file(&missing),
            PipelineOptions::default()
        );

        let broken = dir.path().join("broken.toml");
        std::fs::write(&broken, "samples_per_curve = \"viele\"").unwrap();
        assert_eq!(
            PipelineOptions::load_from_file(&broken),
            PipelineOptions::default()
        );
    }

    #[test]
    fn test_validate_rejects_non_terminating_search() {
        for epsilon in [0.0, -1e-6, f64::NAN] {
            let opts = PipelineOptions {
                search_epsilon: epsilon,
                ..PipelineOptions::default()
            };
            assert!(
                matches!(opts.validate(), Err(SplineError::InvalidParameter(_))),
                "epsilon {} akzeptiert",
                epsilon
            );
        }
        assert!(PipelineOptions::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_sample_counts() {
        let cases = [
            PipelineOptions {
                samples_per_curve: 0,
                ..PipelineOptions::default()
            },
            PipelineOptions {
                arc_length_samples: 0,
                ..PipelineOptions::default()
            },
            PipelineOptions {
                search_samples: 0,
                ..PipelineOptions::default()
            },
            PipelineOptions {
                num_points: Some(1),
                ..PipelineOptions::default()
            },
            PipelineOptions {
                gap_spacing_factor: 0.0,
                ..PipelineOptions::default()
            },
            PipelineOptions {
                canvas_size: 0.0,
                ..PipelineOptions::default()
            },
        ];
        for opts in cases {
            assert!(opts.validate().is_err(), "{:?} akzeptiert", opts);
        }
    }

    #[test]
    fn test_invalid_file_values_fall_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("zero_epsilon.toml");
        std::fs::write(&path, "search_epsilon = 0.0\nsamples_per_curve = 4\n").unwrap();
        assert_eq!(
            PipelineOptions::load_from_file(&path),
            PipelineOptions::default()
        );
    }

    #[test]
    fn test_config_path_file_name() {
        let path = PipelineOptions::config_path();
        assert_eq!(path.file_name().unwrap(), "contour_spline.toml");
    }
}
