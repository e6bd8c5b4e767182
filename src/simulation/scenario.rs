//! TOML replay scenarios
//!
//! A scenario names a replay and carries its scripts, so a set of replays
//! can live in a directory and be re-rendered together.
//!
//! ```toml
//! name = "dash_up"
//! description = "Walk right, then dash straight up"
//! seed = 0
//! preact = "d30"
//! action = "zx 40"
//! ```

use serde::Deserialize;
use std::fs;
use std::path::Path;

use super::config::RecorderSettings;
use crate::error::ReplayError;

#[derive(Debug, Clone, Deserialize)]
pub struct ReplayScenario {
    pub name: String,
    pub description: Option<String>,
    pub seed: Option<u64>,
    pub preact: Option<String>,
    pub action: Option<String>,
    /// GIF path (batch runs default to `<out_dir>/<name>.gif`)
    pub output: Option<String>,
}

impl ReplayScenario {
    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Name, plus the description when there is one
    pub fn summary(&self) -> String {
        match &self.description {
            Some(description) => format!("{} ({})", self.name, description),
            None => self.name.clone(),
        }
    }

    /// Override the settings fields this scenario names
    pub fn apply(&self, settings: &mut RecorderSettings) {
        if let Some(seed) = self.seed {
            settings.seed = seed;
        }
        if let Some(preact) = &self.preact {
            settings.preact = preact.clone();
        }
        if let Some(action) = &self.action {
            settings.action = action.clone();
        }
        if let Some(output) = &self.output {
            settings.output = output.clone();
        }
    }
}

/// Parse a scenario file from path
pub fn parse_scenario_file(path: &Path) -> Result<ReplayScenario, ReplayError> {
    let scenario_error = |message: String| ReplayError::Scenario {
        path: path.display().to_string(),
        message,
    };
    let content = fs::read_to_string(path).map_err(|e| scenario_error(e.to_string()))?;
    ReplayScenario::from_toml(&content).map_err(|e| scenario_error(e.to_string()))
}
