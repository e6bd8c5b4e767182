//! Headless replay runner
//!
//! Settings in, GIF out. Both scripts are parsed before the stepper is
//! built, so a bad script never costs a simulation step or a file.

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::config::{OutputPolicy, RecorderSettings};
use crate::canvas::SpriteSheet;
use crate::error::{ReplayError, ScriptPhase};
use crate::input::Controller;
use crate::replay::{Playback, PlaybackStats, write_gif};
use crate::script::{Action, total_ticks};
use crate::stepper::{Sandbox, Stepper};

/// Parsed pre-roll and recorded scripts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayScripts {
    pub preroll: Vec<Action>,
    pub recorded: Vec<Action>,
}

/// What a finished run produced
#[derive(Debug, Clone)]
pub struct ReplayOutcome {
    pub output: PathBuf,
    pub frames: usize,
    pub stats: PlaybackStats,
    /// False when a lenient output policy swallowed a write failure
    pub written: bool,
}

/// Parse both scripts, pre-roll first
pub fn parse_scripts(settings: &RecorderSettings) -> Result<ReplayScripts, ReplayError> {
    let parser = settings.parser();
    let preroll = parser
        .parse(&settings.preact)
        .map_err(|source| ReplayError::Script {
            phase: ScriptPhase::Preroll,
            source,
        })?;
    let recorded = parser
        .parse(&settings.action)
        .map_err(|source| ReplayError::Script {
            phase: ScriptPhase::Recorded,
            source,
        })?;

    info!(
        "Parsed {} pre-roll actions ({} ticks), {} recorded actions ({} ticks)",
        preroll.len(),
        total_ticks(&preroll),
        recorded.len(),
        total_ticks(&recorded)
    );
    Ok(ReplayScripts { preroll, recorded })
}

/// Built-in stepper wired to `controller`, with the configured sprite sheet
pub fn build_sandbox(settings: &RecorderSettings, controller: Controller) -> Result<Sandbox, ReplayError> {
    let sandbox = Sandbox::new(controller);
    match &settings.sprite_sheet {
        Some(path) => {
            let path = Path::new(path);
            let sheet = SpriteSheet::load(path).map_err(|source| ReplayError::SpriteSheet {
                path: path.to_path_buf(),
                source,
            })?;
            info!(
                "Loaded sprite sheet {} ({}x{})",
                path.display(),
                sheet.width(),
                sheet.height()
            );
            Ok(sandbox.with_sprites(sheet))
        }
        None => Ok(sandbox),
    }
}

/// Play `scripts` on `stepper` and write the GIF. `controller` must be the
/// handle `stepper` reads its buttons from.
pub fn record_with<S: Stepper>(
    settings: &RecorderSettings,
    scripts: &ReplayScripts,
    stepper: S,
    controller: Controller,
) -> Result<ReplayOutcome, ReplayError> {
    let mut playback = Playback::new(stepper, controller).with_frame_delay(settings.frame_delay_cs);
    playback.init(settings.seed);
    let recording = playback.render(&scripts.preroll, &scripts.recorded);
    let stats = playback.stats();
    debug!(
        "Playback done: {} pre-roll ticks, {} recorded ticks",
        stats.preroll_ticks, stats.recorded_ticks
    );

    let output = PathBuf::from(&settings.output);
    let written = match write_gif(&recording, &output, settings.create_output_dir) {
        Ok(()) => {
            info!(
                "Wrote {} frames ({} ms) to {}",
                recording.len(),
                recording.duration_ms(),
                output.display()
            );
            true
        }
        Err(e) if e.is_output_error() && settings.output_errors == OutputPolicy::Lenient => {
            warn!("{}", e.report());
            false
        }
        Err(e) => return Err(e),
    };

    Ok(ReplayOutcome {
        output,
        frames: recording.len(),
        stats,
        written,
    })
}

/// Full run with the built-in stepper
pub fn run_replay(settings: &RecorderSettings) -> Result<ReplayOutcome, ReplayError> {
    let scripts = parse_scripts(settings)?;
    let controller = Controller::new();
    let stepper = build_sandbox(settings, controller.clone())?;
    record_with(settings, &scripts, stepper, controller)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::ScriptError;

    #[test]
    fn test_preroll_error_reported_first() {
        let settings = RecorderSettings {
            preact: "1234567".to_string(),
            action: "7654321".to_string(),
            ..Default::default()
        };
        let err = parse_scripts(&settings).unwrap_err();
        assert!(matches!(
            err,
            ReplayError::Script {
                phase: ScriptPhase::Preroll,
                source: ScriptError::DurationTooLong { .. }
            }
        ));
    }

    #[test]
    fn test_default_scripts() {
        let scripts = parse_scripts(&RecorderSettings::default()).unwrap();
        assert!(scripts.preroll.is_empty());
        assert_eq!(total_ticks(&scripts.recorded), 121);
    }

    #[test]
    fn test_bad_script_never_touches_output() {
        let output = std::env::temp_dir().join("p8replay-runner-never-written.gif");
        let _ = std::fs::remove_file(&output);
        let settings = RecorderSettings {
            action: "a123456".to_string(),
            output: output.display().to_string(),
            ..Default::default()
        };
        assert!(run_replay(&settings).is_err());
        assert!(!output.exists());
    }

    #[test]
    fn test_missing_sprite_sheet() {
        let settings = RecorderSettings {
            sprite_sheet: Some("does/not/exist.png".to_string()),
            ..Default::default()
        };
        let err = build_sandbox(&settings, Controller::new()).err().unwrap();
        assert!(matches!(err, ReplayError::SpriteSheet { .. }));
    }

    #[test]
    fn test_lenient_output_policy() {
        let blocker = std::env::temp_dir().join(format!("p8replay-runner-blocker-{}", std::process::id()));
        let _ = std::fs::remove_file(&blocker);
        std::fs::write(&blocker, b"not a directory").unwrap();

        let mut settings = RecorderSettings {
            action: "d3".to_string(),
            output: blocker.join("out.gif").display().to_string(),
            output_errors: OutputPolicy::Lenient,
            ..Default::default()
        };
        let outcome = run_replay(&settings).unwrap();
        assert!(!outcome.written);
        assert_eq!(outcome.frames, 3);

        settings.output_errors = OutputPolicy::Strict;
        let err = run_replay(&settings).unwrap_err();
        assert!(err.is_output_error());
        let _ = std::fs::remove_file(&blocker);
    }
}
