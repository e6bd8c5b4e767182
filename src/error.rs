//! Errors surfaced to the command entry points

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::script::ScriptError;

/// Which action script an error came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptPhase {
    Preroll,
    Recorded,
}

impl fmt::Display for ScriptPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptPhase::Preroll => write!(f, "pre-roll"),
            ScriptPhase::Recorded => write!(f, "recorded"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("failed to parse {phase} actions")]
    Script {
        phase: ScriptPhase,
        #[source]
        source: ScriptError,
    },
    #[error("failed to load settings {path}: {message}")]
    Settings { path: String, message: String },
    #[error("failed to load scenario {path}: {message}")]
    Scenario { path: String, message: String },
    #[error("failed to load sprite sheet {}", path.display())]
    SpriteSheet {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("nothing to record: the recorded actions add up to zero ticks")]
    EmptyRecording,
    #[error("failed to create output directory {}", path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to create {}", path.display())]
    CreateOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write GIF {}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: gif::EncodingError,
    },
}

impl ReplayError {
    pub fn is_output_error(&self) -> bool {
        matches!(
            self,
            ReplayError::OutputDir { .. } | ReplayError::CreateOutput { .. } | ReplayError::Encode { .. }
        )
    }

    /// This error and its causes joined with ": "
    pub fn report(&self) -> String {
        let mut message = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn duration_error() -> ReplayError {
        ReplayError::Script {
            phase: ScriptPhase::Recorded,
            source: ScriptError::DurationTooLong { offset: 6 },
        }
    }

    #[test]
    fn test_cause_appears_once() {
        let cause = ScriptError::DurationTooLong { offset: 6 }.to_string();
        let report = duration_error().report();
        assert_eq!(report, format!("failed to parse recorded actions: {}", cause));
        assert_eq!(report.matches(&cause).count(), 1);

        let chained = format!("{:#}", anyhow::Error::from(duration_error()));
        assert_eq!(chained, report);
    }

    #[test]
    fn test_output_errors() {
        let io_error = || io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err = ReplayError::CreateOutput {
            path: PathBuf::from("out.gif"),
            source: io_error(),
        };
        assert!(err.is_output_error());
        assert_eq!(err.report(), "failed to create out.gif: denied");
        assert!(!duration_error().is_output_error());
        assert!(!ReplayError::EmptyRecording.is_output_error());
    }
}
