//! p8-replay - render an action script as an animated GIF
//!
//! Usage:
//!   p8-replay [-o out.gif] [-a "xc 120"] [-p "d30"]
//!   p8-replay --scenario replays/dash_up.toml --seed 3

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

use p8replay::{RecorderSettings, UnknownCharPolicy, init_logging, parse_scenario_file, run_replay};

#[derive(Parser, Debug)]
#[command(name = "p8-replay", version, about = "Record a replay of scripted controller input as a GIF")]
struct Cli {
    /// Output GIF path
    #[arg(short, long)]
    output: Option<String>,

    /// Actions to record, e.g. "d10 zd5 x"
    #[arg(short, long)]
    action: Option<String>,

    /// Actions to play before recording starts
    #[arg(short, long)]
    preact: Option<String>,

    /// Settings JSON (default: config/recorder_settings.json, then the template)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Scenario TOML whose scripts and seed override the settings
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Seed passed to the stepper
    #[arg(long)]
    seed: Option<u64>,

    /// Frame delay in hundredths of a second
    #[arg(long)]
    delay: Option<u16>,

    /// Reject characters that are not buttons, digits or whitespace
    #[arg(long, conflicts_with = "warn_unknown")]
    strict_script: bool,

    /// Log a warning for characters that are not buttons, digits or whitespace
    #[arg(long)]
    warn_unknown: bool,

    /// Sprite sheet PNG for the built-in stepper
    #[arg(long)]
    sprites: Option<String>,

    /// Debug logging
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only warnings and errors
    #[arg(short, long)]
    quiet: bool,

    /// Accepted for compatibility and ignored
    #[arg(hide = true)]
    _extra: Option<String>,
}

impl Cli {
    fn settings(&self) -> Result<RecorderSettings> {
        let mut settings = RecorderSettings::load(self.settings.as_deref())?;

        if let Some(path) = &self.scenario {
            let scenario = parse_scenario_file(path)?;
            debug!("Applying scenario {}", scenario.summary());
            scenario.apply(&mut settings);
        }

        if let Some(output) = &self.output {
            settings.output = output.clone();
        }
        if let Some(action) = &self.action {
            settings.action = action.clone();
        }
        if let Some(preact) = &self.preact {
            settings.preact = preact.clone();
        }
        if let Some(seed) = self.seed {
            settings.seed = seed;
        }
        if let Some(delay) = self.delay {
            settings.frame_delay_cs = delay;
        }
        if self.strict_script {
            settings.unknown_chars = UnknownCharPolicy::Strict;
        } else if self.warn_unknown {
            settings.unknown_chars = UnknownCharPolicy::Warn;
        }
        if let Some(sprites) = &self.sprites {
            settings.sprite_sheet = Some(sprites.clone());
        }
        Ok(settings)
    }
}

fn run(cli: &Cli) -> Result<()> {
    let settings = cli.settings()?;
    let outcome = run_replay(&settings)?;
    if outcome.written {
        println!("{} frames -> {}", outcome.frames, outcome.output.display());
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version print to stdout and succeed
            let failed = e.use_stderr();
            let _ = e.print();
            return if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS };
        }
    };

    init_logging(cli.verbose, cli.quiet);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
