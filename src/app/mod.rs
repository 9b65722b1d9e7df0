//! Application-Layer: Zusammenbau der Subjekte und Wiedergabe-Helfer.

pub mod assembler;
pub mod playback;

pub use assembler::{assemble_all, assemble_subject, AssemblyOutput, SubjectFailure};
pub use playback::{lerp_frames, sample_frame_at, FrameScene, Marker};
