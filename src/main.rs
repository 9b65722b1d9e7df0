//! contour-spline: Bézier-Kontur-Export + Skelett-Export → äquidistante Spline-Frames.

use anyhow::{Context, Result};
use contour_spline::{assemble_all, ingest, write_results_to_file, PipelineOptions};
use std::path::{Path, PathBuf};
use structopt::StructOpt;

#[derive(StructOpt, Debug)]
#[structopt(name = "contour-spline")]
struct Args {
    /// Kontur-Export (JSON mit Bézier-Frames pro Subjekt)
    #[structopt(short, long, parse(from_os_str))]
    contours: PathBuf,

    /// Skelett-Export (JSON mit Landmarks pro Bild)
    #[structopt(short, long, parse(from_os_str))]
    skeletons: PathBuf,

    /// Zieldatei für das konsolidierte Ergebnis
    #[structopt(short, long, parse(from_os_str), default_value = "allPeopleData.json")]
    output: PathBuf,

    /// Optionen als TOML. Default: contour_spline.toml neben der Binary
    #[structopt(long, parse(from_os_str))]
    config: Option<PathBuf>,

    /// Nur diese Subjekte verarbeiten (mehrfach angebbar)
    #[structopt(long = "subject")]
    subjects: Vec<String>,

    /// Worker-Threads (überschreibt die Konfiguration, 0 = rayon-Standard)
    #[structopt(short = "j", long)]
    threads: Option<usize>,

    /// Debug-Logging
    #[structopt(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::from_args();

    let level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    log::info!("contour-spline v{} startet...", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(args) {
        log::error!("Verarbeitung fehlgeschlagen: {:#}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let config_path = args.config.unwrap_or_else(PipelineOptions::config_path);
    let mut options = PipelineOptions::load_from_file(&config_path);
    if let Some(threads) = args.threads {
        options.threads = threads;
    }

    if options.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(options.threads)
            .build_global()
            .context("Thread-Pool konnte nicht erstellt werden")?;
        log::info!("{} Worker-Threads", options.threads);
    }

    let contours = read_input(&args.contours)?;
    let skeletons = read_input(&args.skeletons)?;
    let mut report = ingest(&contours, &skeletons)?;

    if !args.subjects.is_empty() {
        report
            .animations
            .retain(|a| args.subjects.iter().any(|s| *s == a.name));
        for wanted in &args.subjects {
            if !report.animations.iter().any(|a| a.name == *wanted) {
                log::warn!("Subjekt '{}' nicht in den Eingabedaten", wanted);
            }
        }
    }

    let output = assemble_all(&report.animations, &options);
    write_results_to_file(&args.output, &output.subjects)?;

    if !output.failures.is_empty() {
        log::warn!(
            "{} von {} Subjekten verworfen",
            output.failures.len(),
            report.animations.len()
        );
    }
    Ok(())
}

fn read_input(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Eingabe konnte nicht gelesen werden: {}", path.display()))
}
