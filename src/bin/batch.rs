//! p8-batch - render every scenario in a directory
//!
//! Usage:
//!   p8-batch replays/
//!   p8-batch replays/ --out-dir output/replays --parallel 4

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;
use tracing::info;

use p8replay::simulation::{discover_scenarios, init_parallel, run_batch};
use p8replay::{RecorderSettings, init_logging};

#[derive(Parser, Debug)]
#[command(name = "p8-batch", about = "Render a directory of replay scenarios to GIFs")]
struct Args {
    /// Directory of scenario TOML files
    dir: PathBuf,

    /// Where GIFs go unless a scenario names its own output
    #[arg(long, default_value = "./output")]
    out_dir: PathBuf,

    /// Worker threads (0 = one per core, 1 = sequential)
    #[arg(long, default_value_t = 0)]
    parallel: usize,

    /// Settings JSON applied under every scenario
    #[arg(long)]
    settings: Option<PathBuf>,

    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    #[arg(short, long)]
    quiet: bool,
}

fn run(args: &Args) -> Result<()> {
    let base = RecorderSettings::load(args.settings.as_deref())?;
    let paths = discover_scenarios(&args.dir)
        .with_context(|| format!("failed to read scenario directory {}", args.dir.display()))?;
    if paths.is_empty() {
        return Err(anyhow!("no .toml scenarios in {}", args.dir.display()));
    }

    init_parallel(args.parallel)?;
    let parallel = args.parallel != 1;
    info!(
        "Rendering {} scenarios ({})",
        paths.len(),
        if parallel { "parallel" } else { "sequential" }
    );

    let start = Instant::now();
    let results = run_batch(&base, &paths, &args.out_dir, parallel);

    let mut failed = 0;
    for batch in &results {
        let name = batch.scenario.display();
        match &batch.result {
            Ok(outcome) if outcome.written => {
                println!("  ok    {} -> {} ({} frames)", name, outcome.output.display(), outcome.frames)
            }
            Ok(_) => println!("  skip  {} (output not written)", name),
            Err(e) => {
                failed += 1;
                println!("  FAIL  {}: {}", name, e.report());
            }
        }
    }
    println!(
        "\n{}/{} rendered in {:.2}s",
        results.len() - failed,
        results.len(),
        start.elapsed().as_secs_f64()
    );

    if failed > 0 {
        return Err(anyhow!("{} scenario(s) failed", failed));
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let failed = e.use_stderr();
            let _ = e.print();
            return if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS };
        }
    };

    init_logging(args.verbose, args.quiet);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
