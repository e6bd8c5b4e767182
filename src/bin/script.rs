//! p8-script - check an action script without running anything
//!
//! Prints the canonical form of the script, one action per line, and the
//! number of ticks it holds the controller for.
//!
//! Usage:
//!   p8-script "xc 120"
//!   echo "d10 zd5" | p8-script --strict

use anyhow::{Context, Result};
use clap::Parser;
use std::io::Read;
use std::process::ExitCode;

use p8replay::constants::HOLD_DIGIT_LIMIT;
use p8replay::{ScriptParser, UnknownCharPolicy, format_actions, total_ticks};

#[derive(Parser, Debug)]
#[command(name = "p8-script", about = "Parse an action script and print its canonical form")]
struct Args {
    /// Script to check (read from stdin when omitted)
    script: Option<String>,

    /// Reject characters that are not buttons, digits or whitespace
    #[arg(long)]
    strict: bool,

    /// Duration accumulator value at which further digits are rejected
    #[arg(long, default_value_t = HOLD_DIGIT_LIMIT)]
    limit: u32,
}

fn run(args: &Args) -> Result<()> {
    let script = match &args.script {
        Some(script) => script.clone(),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read script from stdin")?;
            buf
        }
    };

    let policy = if args.strict {
        UnknownCharPolicy::Strict
    } else {
        UnknownCharPolicy::Lenient
    };
    let actions = ScriptParser::new()
        .with_digit_limit(args.limit)
        .with_unknown_chars(policy)
        .parse(&script)?;

    for (i, action) in actions.iter().enumerate() {
        println!("{:>4}  {:<6} x{}", i, action.keys().to_string(), action.hold());
    }
    println!();
    println!("canonical: {}", format_actions(&actions));
    println!("actions:   {}", actions.len());
    println!("ticks:     {}", total_ticks(&actions));
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

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
