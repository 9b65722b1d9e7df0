//! Contour Spline Library.
//! Wandelt Bézier-Konturen pro Frame in äquidistante Punktfolgen gleicher
//! Länge und richtet sie am Skelett-Track aus.

pub mod app;
pub mod core;
pub mod json;
pub mod shared;
pub mod spline;

pub use app::{assemble_all, assemble_subject, AssemblyOutput, FrameScene, SubjectFailure};
pub use core::{
    AnimationFrame, BezierCurve, FrameFailure, Landmark, LandmarkSet, Pose, SplineError,
    SubjectAnimation, SubjectResult,
};
pub use json::{ingest, read_results, write_results, write_results_to_file, IngestReport};
pub use shared::{PipelineOptions, ResampleMethod, StrategyKind};
pub use spline::{resample_equidistant, BezierToSplineStrategy, Resampler};
