//! Batch rendering of scenario directories
//!
//! Uses Rayon to render scenarios concurrently. Every job builds its own
//! controller and stepper, so runs never share state.

use rayon::prelude::*;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::config::RecorderSettings;
use super::runner::{ReplayOutcome, run_replay};
use super::scenario::parse_scenario_file;
use crate::error::ReplayError;

/// Result of rendering one scenario file
#[derive(Debug)]
pub struct BatchResult {
    pub scenario: PathBuf,
    pub result: Result<ReplayOutcome, ReplayError>,
}

/// Initialize the global pool with `threads` workers (0 = Rayon's default)
pub fn init_parallel(threads: usize) -> Result<(), rayon::ThreadPoolBuildError> {
    if threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()?;
    }
    Ok(())
}

/// All `*.toml` files directly inside `dir`, sorted by name
pub fn discover_scenarios(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    paths.sort();
    Ok(paths)
}

/// Render one scenario on top of `base`; output defaults to `<out_dir>/<name>.gif`
pub fn render_scenario(
    base: &RecorderSettings,
    path: &Path,
    out_dir: &Path,
) -> Result<ReplayOutcome, ReplayError> {
    let scenario = parse_scenario_file(path)?;
    debug!("Rendering scenario {}", scenario.summary());
    let mut settings = base.clone();
    settings.output = out_dir
        .join(format!("{}.gif", scenario.name))
        .display()
        .to_string();
    scenario.apply(&mut settings);
    run_replay(&settings)
}

/// Render every scenario. Results keep the order of `paths`.
pub fn run_batch(
    base: &RecorderSettings,
    paths: &[PathBuf],
    out_dir: &Path,
    parallel: bool,
) -> Vec<BatchResult> {
    let render = |path: &PathBuf| BatchResult {
        scenario: path.clone(),
        result: render_scenario(base, path, out_dir),
    };
    if parallel {
        paths.par_iter().map(render).collect()
    } else {
        paths.iter().map(render).collect()
    }
}
