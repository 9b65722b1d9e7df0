//! Frame-Assembler: führt Kurven- und Skelett-Track eines Subjekts durch die
//! komplette Pipeline (Glätten → Konvertieren → Resampeln → Reparieren).

use crate::core::{BezierCurve, FrameFailure, SplineError, SubjectAnimation, SubjectResult};
use crate::shared::PipelineOptions;
use crate::spline::{
    detect_degenerate, repair_points, smooth_frame, BezierToSplineStrategy, GapRule, Resampler,
};
use glam::DVec2;
use rayon::prelude::*;

/// Subjekt, das komplett verworfen wurde.
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectFailure {
    pub subject: String,
    pub error: SplineError,
}

/// Ergebnis über alle Subjekte eines Laufs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssemblyOutput {
    pub subjects: Vec<SubjectResult>,
    pub failures: Vec<SubjectFailure>,
}

/// Verarbeitet ein Subjekt.
///
/// Frames werden parallel verarbeitet, die Reihenfolge bleibt erhalten.
/// Scheitert ein einzelner Frame, bleibt seine Punktliste leer und er wird
/// in `failed_frames` vermerkt. Fehler auf Subjekt-Ebene (Track-Mismatch,
/// ungültige Optionen) brechen ab.
pub fn assemble_subject(
    animation: &SubjectAnimation,
    options: &PipelineOptions,
) -> Result<SubjectResult, SplineError> {
    options.validate()?;
    if let Err(e) = animation.validate() {
        if options.require_aligned_tracks {
            return Err(e);
        }
        log::warn!("{} (fehlende Seiten bleiben leer)", e);
    }

    let curve_frames: Vec<&[BezierCurve]> = animation.curve_frames().collect();
    let strategy = options.strategy.build(options);

    let smoothed: Vec<Vec<BezierCurve>> = curve_frames
        .par_iter()
        .map(|curves| smooth_frame(curves, options.smoothing_threshold))
        .collect();
    let sampled: Vec<Vec<DVec2>> = smoothed
        .par_iter()
        .map(|curves| strategy.to_spline_points(curves))
        .collect();

    let num_points = options
        .num_points
        .unwrap_or_else(|| sampled.iter().map(Vec::len).max().unwrap_or(0));
    log::debug!(
        "Subjekt '{}': {} Frames, Strategie {}, {} Punkte pro Frame",
        animation.name,
        sampled.len(),
        strategy.name(),
        num_points
    );

    let resampler = Resampler::from_options(options);
    let processed: Vec<Result<Vec<DVec2>, SplineError>> = sampled
        .par_iter()
        .enumerate()
        .map(|(frame, points)| {
            resample_frame(&animation.name, frame, &resampler, points, num_points, options)
        })
        .collect();

    let mut spline_frames = Vec::with_capacity(processed.len());
    let mut failed_frames = Vec::new();
    for (frame, outcome) in processed.into_iter().enumerate() {
        match outcome {
            Ok(points) => spline_frames.push(points),
            Err(e) => {
                log::warn!("Subjekt '{}', Frame {}: {}", animation.name, frame, e);
                failed_frames.push(FrameFailure {
                    frame,
                    reason: e.to_string(),
                });
                spline_frames.push(Vec::new());
            }
        }
    }

    Ok(SubjectResult {
        subject: animation.name.clone(),
        spline_frames,
        one_person_skeletons: animation.skeleton_track(),
        bezier_curves: smoothed,
        num_frames: animation.skeleton_frame_count(),
        failed_frames,
    })
}

fn resample_frame(
    subject: &str,
    frame: usize,
    resampler: &Resampler,
    points: &[DVec2],
    num_points: usize,
    options: &PipelineOptions,
) -> Result<Vec<DVec2>, SplineError> {
    if points.is_empty() {
        return Ok(Vec::new());
    }
    let mut resampled = resampler.resample(points, num_points)?;

    if options.repair_gaps {
        let report = repair_points(&mut resampled, GapRule::from_options(options));
        if !report.is_clean() {
            log::warn!(
                "Subjekt '{}', Frame {}: degenerierte Punkte, repariert {:?}, offen {:?}",
                subject,
                frame,
                report.repaired,
                report.unrepaired
            );
        }
    } else {
        let flagged = detect_degenerate(&resampled, GapRule::from_options(options));
        if !flagged.is_empty() {
            log::warn!(
                "Subjekt '{}', Frame {}: degenerierte Punkte {:?} (Reparatur deaktiviert)",
                subject,
                frame,
                flagged
            );
        }
    }

    let non_finite = resampled.iter().filter(|p| !p.is_finite()).count();
    if non_finite > 0 {
        return Err(SplineError::DegenerateSpline(format!(
            "{} nicht-endliche Punkte nach der Reparatur",
            non_finite
        )));
    }
    Ok(resampled)
}

/// Verarbeitet alle Subjekte in Eingabereihenfolge.
///
/// Ein fehlgeschlagenes Subjekt stoppt die anderen nicht.
pub fn assemble_all(animations: &[SubjectAnimation], options: &PipelineOptions) -> AssemblyOutput {
    let mut output = AssemblyOutput::default();
    for animation in animations {
        match assemble_subject(animation, options) {
            Ok(result) => {
                log::info!(
                    "Subjekt '{}': {} Frames, {} Punkte pro Frame",
                    result.subject,
                    result.spline_frames.len(),
                    result.points_per_frame()
                );
                output.subjects.push(result);
            }
            Err(error) => {
                log::error!("Subjekt '{}' verworfen: {}", animation.name, error);
                output.failures.push(SubjectFailure {
                    subject: animation.name.clone(),
                    error,
                });
            }
        }
    }
    output
}

#[cfg(test)]
mod tests;
