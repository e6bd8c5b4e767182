//! Recorder settings
//!
//! Every tunable of a replay run lives here. Settings load from JSON with
//! the priority: explicit `--settings` file > local settings > template
//! settings > built-in defaults. Command-line flags are applied on top.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

use crate::constants::{DEFAULT_ACTION, DEFAULT_OUTPUT, DEFAULT_PREACT, DEFAULT_SEED, FRAME_DELAY_CS, HOLD_DIGIT_LIMIT};
use crate::error::ReplayError;
use crate::script::{ScriptParser, UnknownCharPolicy};

/// What happens when the GIF cannot be written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputPolicy {
    /// Fail the run
    #[default]
    Strict,
    /// Log a warning and finish normally
    Lenient,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecorderSettings {
    /// GIF path
    pub output: String,
    /// Recorded action script
    pub action: String,
    /// Pre-roll action script (simulated, not recorded)
    pub preact: String,
    /// Seed passed to the stepper before the first tick
    pub seed: u64,
    /// Display time per recorded frame in GIF units (10ms)
    pub frame_delay_cs: u16,
    /// Duration accumulator value at which further digits are rejected
    pub duration_limit: u32,
    pub unknown_chars: UnknownCharPolicy,
    pub output_errors: OutputPolicy,
    /// Create the output file's parent directories if missing
    pub create_output_dir: bool,
    /// Sprite sheet image for the built-in stepper (None = plain shapes)
    pub sprite_sheet: Option<String>,
}

impl Default for RecorderSettings {
    fn default() -> Self {
        Self {
            output: DEFAULT_OUTPUT.to_string(),
            action: DEFAULT_ACTION.to_string(),
            preact: DEFAULT_PREACT.to_string(),
            seed: DEFAULT_SEED,
            frame_delay_cs: FRAME_DELAY_CS,
            duration_limit: HOLD_DIGIT_LIMIT,
            unknown_chars: UnknownCharPolicy::Lenient,
            output_errors: OutputPolicy::Strict,
            create_output_dir: true,
            sprite_sheet: None,
        }
    }
}

/// Template settings (checked into git)
pub const RECORDER_SETTINGS_TEMPLATE: &str = "config/recorder_settings.template.json";
/// Local settings (gitignored, user's custom settings)
pub const RECORDER_SETTINGS_FILE: &str = "config/recorder_settings.json";

impl RecorderSettings {
    /// Load settings from a JSON file. Missing fields keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ReplayError> {
        let settings_error = |message: String| ReplayError::Settings {
            path: path.display().to_string(),
            message,
        };
        let contents = std::fs::read_to_string(path).map_err(|e| settings_error(e.to_string()))?;
        Self::from_json(&contents).map_err(|e| settings_error(e.to_string()))
    }

    pub fn from_json(contents: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(contents)
    }

    /// Local settings > template settings > built-in defaults
    pub fn from_config_files() -> Self {
        for path in [RECORDER_SETTINGS_FILE, RECORDER_SETTINGS_TEMPLATE] {
            let path = Path::new(path);
            if !path.exists() {
                continue;
            }
            match Self::from_file(path) {
                Ok(settings) => {
                    info!("Loaded settings from {}", path.display());
                    return settings;
                }
                Err(e) => debug!("Skipping settings file: {}", e),
            }
        }
        debug!("No settings file found, using defaults");
        Self::default()
    }

    /// An explicitly requested file must load; otherwise fall back through
    /// the config file chain.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ReplayError> {
        match explicit {
            Some(path) => {
                let settings = Self::from_file(path)?;
                info!("Loaded settings from {}", path.display());
                Ok(settings)
            }
            None => Ok(Self::from_config_files()),
        }
    }

    /// Parser configured with this run's limit and unknown-character policy
    pub fn parser(&self) -> ScriptParser {
        ScriptParser::new()
            .with_digit_limit(self.duration_limit)
            .with_unknown_chars(self.unknown_chars)
    }
}
