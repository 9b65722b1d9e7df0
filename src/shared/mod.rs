//! Geteilte, layer-neutrale Bausteine.
//!
//! Enthält Konfiguration und reine Spline-Geometrie, die sowohl von
//! `spline` als auch von `app` genutzt werden.
pub mod options;
pub mod spline_geometry;

pub use options::{PipelineOptions, ResampleMethod, StrategyKind};
