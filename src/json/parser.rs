//! Parser für Kontur- und Skelett-Exporte der Extraktions-Pipeline.
//!
//! Ein unlesbares Dokument ist ein harter Fehler. Ein einzelnes fehlerhaftes
//! Subjekt (z.B. flach exportierte Zahlen statt 8er-Arrays) wird dagegen in
//! Quarantäne gestellt und die übrigen Subjekte werden weiterverarbeitet.

use crate::core::{parse_frame, BezierCurve, LandmarkSet, SubjectAnimation};
use anyhow::{Context, Result};
use indexmap::IndexMap;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// `000001.png` (1-basiert) oder `frame_0.png` (0-basiert).
static FRAME_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:frame_(?P<zero>\d+)|(?P<one>\d+))\.png$").expect("gültiges Frame-Key-Pattern")
});

/// Ausgeschlossenes Subjekt mit Begründung.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuarantinedSubject {
    pub subject: String,
    pub reason: String,
}

impl QuarantinedSubject {
    fn new(subject: &str, reason: impl Into<String>) -> Self {
        Self {
            subject: subject.to_string(),
            reason: reason.into(),
        }
    }
}

/// Skelett-Tracks pro Subjekt, nach 0-basiertem Frame-Index.
#[derive(Debug, Clone, Default)]
pub struct SkeletonTracks {
    pub tracks: IndexMap<String, BTreeMap<usize, LandmarkSet>>,
    /// Kanten des Skeletts als Landmark-Namenspaare
    pub connections: Vec<(String, String)>,
    pub quarantined: Vec<QuarantinedSubject>,
}

/// Ergebnis der Ingestion beider Exporte.
#[derive(Debug, Clone, Default)]
pub struct IngestReport {
    pub animations: Vec<SubjectAnimation>,
    pub connections: Vec<(String, String)>,
    pub quarantined: Vec<QuarantinedSubject>,
}

#[derive(Deserialize)]
struct RawContourTrack {
    frames: Vec<Vec<Vec<f64>>>,
}

#[derive(Deserialize)]
struct RawSkeletonExport {
    data: IndexMap<String, Value>,
    #[serde(default)]
    connections: Vec<(String, String)>,
}

/// Wandelt einen Frame-Key in den 0-basierten Frame-Index.
pub fn parse_frame_key(key: &str) -> Option<usize> {
    let caps = FRAME_KEY.captures(key)?;
    if let Some(zero) = caps.name("zero") {
        return zero.as_str().parse().ok();
    }
    let one: usize = caps.name("one")?.as_str().parse().ok()?;
    one.checked_sub(1)
}

fn parse_contour_track(subject: &str, value: Value) -> Result<Vec<Vec<BezierCurve>>, QuarantinedSubject> {
    let raw: RawContourTrack = serde_json::from_value(value)
        .map_err(|e| QuarantinedSubject::new(subject, format!("Kontur-Track fehlerhaft: {}", e)))?;
    raw.frames
        .iter()
        .enumerate()
        .map(|(index, frame)| {
            parse_frame(frame)
                .map_err(|e| QuarantinedSubject::new(subject, format!("Frame {}: {}", index, e)))
        })
        .collect()
}

/// Parsed den Kontur-Export `{ "<subject>": { "frames": [[[8 Werte], ...], ...] } }`.
pub fn parse_contours(
    json: &str,
) -> Result<(IndexMap<String, Vec<Vec<BezierCurve>>>, Vec<QuarantinedSubject>)> {
    let subjects: IndexMap<String, Value> =
        serde_json::from_str(json).context("Kontur-Export ist kein JSON-Objekt")?;

    let mut tracks = IndexMap::with_capacity(subjects.len());
    let mut quarantined = Vec::new();
    for (subject, value) in subjects {
        match parse_contour_track(&subject, value) {
            Ok(frames) => {
                log::debug!("Kontur '{}': {} Frames", subject, frames.len());
                tracks.insert(subject, frames);
            }
            Err(q) => {
                log::warn!("Subjekt '{}' in Quarantäne: {}", q.subject, q.reason);
                quarantined.push(q);
            }
        }
    }
    Ok((tracks, quarantined))
}

fn parse_skeleton_track(
    subject: &str,
    value: Value,
) -> Result<BTreeMap<usize, LandmarkSet>, QuarantinedSubject> {
    let frames: IndexMap<String, LandmarkSet> = serde_json::from_value(value)
        .map_err(|e| QuarantinedSubject::new(subject, format!("Skelett-Track fehlerhaft: {}", e)))?;

    let mut track = BTreeMap::new();
    for (key, poses) in frames {
        let index = parse_frame_key(&key).ok_or_else(|| {
            QuarantinedSubject::new(subject, format!("unbekannter Frame-Key '{}'", key))
        })?;
        if track.insert(index, poses).is_some() {
            return Err(QuarantinedSubject::new(
                subject,
                format!("Frame {} doppelt vorhanden (Key '{}')", index, key),
            ));
        }
    }
    Ok(track)
}

/// Parsed den Skelett-Export `{ "data": { "<subject>": { "000001.png": [Pose] } }, "connections": [...] }`.
pub fn parse_skeletons(json: &str) -> Result<SkeletonTracks> {
    let raw: RawSkeletonExport =
        serde_json::from_str(json).context("Skelett-Export hat kein 'data'-Objekt")?;

    let mut result = SkeletonTracks {
        connections: raw.connections,
        ..SkeletonTracks::default()
    };
    for (subject, value) in raw.data {
        match parse_skeleton_track(&subject, value) {
            Ok(track) => {
                log::debug!("Skelett '{}': {} Frames", subject, track.len());
                result.tracks.insert(subject, track);
            }
            Err(q) => {
                log::warn!("Subjekt '{}' in Quarantäne: {}", q.subject, q.reason);
                result.quarantined.push(q);
            }
        }
    }
    Ok(result)
}

/// Liest beide Exporte und richtet sie pro Subjekt aus.
///
/// Reihenfolge: Subjekte des Kontur-Exports, danach reine Skelett-Subjekte.
/// Ein in einem der beiden Exporte gesperrtes Subjekt fehlt im Ergebnis.
pub fn ingest(contours_json: &str, skeletons_json: &str) -> Result<IngestReport> {
    let (mut contours, mut quarantined) = parse_contours(contours_json)?;
    let skeletons = parse_skeletons(skeletons_json)?;
    quarantined.extend(skeletons.quarantined);
    let mut tracks = skeletons.tracks;

    let blocked = |name: &str| quarantined.iter().any(|q| q.subject == name);

    let mut names: Vec<String> = contours.keys().cloned().collect();
    names.extend(tracks.keys().filter(|k| !contours.contains_key(*k)).cloned());

    let animations = names
        .into_iter()
        .filter(|name| !blocked(name))
        .map(|name| {
            let curves = contours.shift_remove(&name).unwrap_or_default();
            let poses = tracks.shift_remove(&name).unwrap_or_default();
            SubjectAnimation::from_tracks(name, curves, poses)
        })
        .collect::<Vec<_>>();

    log::info!(
        "{} Subjekte eingelesen, {} in Quarantäne",
        animations.len(),
        quarantined.len()
    );

    Ok(IngestReport {
        animations,
        connections: skeletons.connections,
        quarantined,
    })
}
