//! Writer für das konsolidierte Ergebnis (ein JSON-Dokument pro Lauf).

use crate::core::SubjectResult;
use anyhow::{Context, Result};
use std::path::Path;

/// Serialisiert alle Subjekte als formatiertes JSON-Array.
pub fn write_results(results: &[SubjectResult]) -> Result<String> {
    serde_json::to_string_pretty(results).context("Ergebnis nicht serialisierbar")
}

/// Schreibt das Ergebnis in eine Datei.
pub fn write_results_to_file(path: &Path, results: &[SubjectResult]) -> Result<()> {
    let content = write_results(results)?;
    std::fs::write(path, content)
        .with_context(|| format!("Ergebnis konnte nicht geschrieben werden: {}", path.display()))?;
    log::info!(
        "{} Subjekte gespeichert nach: {}",
        results.len(),
        path.display()
    );
    Ok(())
}

/// Liest ein zuvor geschriebenes Ergebnis wieder ein (z.B. für Renderer).
pub fn read_results(json: &str) -> Result<Vec<SubjectResult>> {
    serde_json::from_str(json).context("Ergebnis-JSON fehlerhaft")
}
