//! Headless replay runs - settings, scenarios, the runner and batch mode

pub mod config;
pub mod parallel;
pub mod runner;
pub mod scenario;

pub use config::{OutputPolicy, RecorderSettings};
pub use parallel::{BatchResult, discover_scenarios, init_parallel, run_batch};
pub use runner::{ReplayOutcome, ReplayScripts, build_sandbox, parse_scripts, record_with, run_replay};
pub use scenario::{ReplayScenario, parse_scenario_file};
