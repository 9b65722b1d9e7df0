//! Core-Domänentypen: Bézier-Segmente, Landmarks, ausgerichtete Subjekt-Animationen, Ergebnisse.

pub mod animation;
pub mod bezier;
mod error;
pub mod landmark;
pub mod result;

pub use animation::{AnimationFrame, SubjectAnimation};
pub use bezier::{cubic_bezier, parse_frame, BezierCurve};
pub use error::SplineError;
pub use landmark::{Landmark, LandmarkSet, Pose};
pub use result::{FrameFailure, SubjectResult};
