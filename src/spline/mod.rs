//! Resampling-Kern: Glättung → Bézier-Abtastung → äquidistantes Resampling → Reparatur.

pub mod repair;
pub mod resampler;
pub mod sampler;
pub mod smoother;
pub mod strategy;

pub use repair::{detect_degenerate, repair_points, GapRule, RepairReport};
pub use resampler::{resample_equidistant, Resampler};
pub use sampler::{sample_bezier_frame, sample_raw_frame};
pub use smoother::{smooth_curve, smooth_frame};
pub use strategy::{BezierToSplineStrategy, ControlPolygon, FixedSampling, TangentPreserving};
