//! Action script parser
//!
//! Single left-to-right pass over the script:
//! - whitespace ends the current action (if anything was accumulated)
//! - ASCII digits accumulate a base-10 hold duration
//! - any other character ends a pending duration, then letters `a d w s z c x`
//!   add their button to the current action
//!
//! Examples:
//! ```text
//! xc120     -> [jump+dash for 120]
//! xc 120    -> [jump+dash for 1] [nothing for 120]
//! a5d5      -> [left for 5] [right for 5]
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use super::action::{Action, Button, ButtonSet};
use crate::constants::HOLD_DIGIT_LIMIT;

/// What to do with characters that are neither whitespace, digits nor button letters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownCharPolicy {
    /// Ignore silently (separators, comments)
    #[default]
    Lenient,
    /// Ignore, but log each one
    Warn,
    /// Reject the script
    Strict,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    #[error("action duration too long at offset {offset}, try a shorter hold")]
    DurationTooLong { offset: usize },
    #[error("unrecognized character {ch:?} at offset {offset}")]
    UnknownCharacter { ch: char, offset: usize },
}

/// Keys and hold gathered for the action currently being read
#[derive(Default)]
struct Pending {
    keys: ButtonSet,
    hold: u32,
}

impl Pending {
    fn is_empty(&self) -> bool {
        self.keys.is_empty() && self.hold == 0
    }

    fn flush(&mut self, actions: &mut Vec<Action>) {
        actions.push(Action::new(self.keys, self.hold));
        *self = Pending::default();
    }
}

#[derive(Debug, Clone)]
pub struct ScriptParser {
    digit_limit: u32,
    unknown_chars: UnknownCharPolicy,
}

impl Default for ScriptParser {
    fn default() -> Self {
        Self {
            digit_limit: HOLD_DIGIT_LIMIT,
            unknown_chars: UnknownCharPolicy::Lenient,
        }
    }
}

impl ScriptParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject a digit once the hold accumulator has reached `limit`
    pub fn with_digit_limit(mut self, limit: u32) -> Self {
        self.digit_limit = limit;
        self
    }

    pub fn with_unknown_chars(mut self, policy: UnknownCharPolicy) -> Self {
        self.unknown_chars = policy;
        self
    }

    pub fn parse(&self, script: &str) -> Result<Vec<Action>, ScriptError> {
        let mut actions = Vec::new();
        let mut pending = Pending::default();

        for (offset, ch) in script.char_indices() {
            if ch.is_whitespace() {
                if !pending.is_empty() {
                    pending.flush(&mut actions);
                }
            } else if let Some(digit) = ch.to_digit(10) {
                if pending.hold >= self.digit_limit {
                    return Err(ScriptError::DurationTooLong { offset });
                }
                pending.hold = pending
                    .hold
                    .checked_mul(10)
                    .and_then(|h| h.checked_add(digit))
                    .ok_or(ScriptError::DurationTooLong { offset })?;
            } else {
                // A letter after a duration starts the next action
                if pending.hold > 0 {
                    pending.flush(&mut actions);
                }
                match Button::from_letter(ch) {
                    Some(button) => pending.keys.insert(button),
                    None => self.unknown(ch, offset)?,
                }
            }
        }

        if !pending.is_empty() {
            pending.flush(&mut actions);
        }

        Ok(actions)
    }

    fn unknown(&self, ch: char, offset: usize) -> Result<(), ScriptError> {
        match self.unknown_chars {
            UnknownCharPolicy::Lenient => Ok(()),
            UnknownCharPolicy::Warn => {
                warn!("Ignoring unrecognized script character {:?} at offset {}", ch, offset);
                Ok(())
            }
            UnknownCharPolicy::Strict => Err(ScriptError::UnknownCharacter { ch, offset }),
        }
    }
}

/// Parse with the default limit and lenient handling of unknown characters
pub fn parse_script(script: &str) -> Result<Vec<Action>, ScriptError> {
    ScriptParser::default().parse(script)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(letters: &str) -> ButtonSet {
        letters.chars().filter_map(Button::from_letter).collect()
    }

    #[test]
    fn test_empty_script() {
        assert_eq!(parse_script("").unwrap(), vec![]);
        assert_eq!(parse_script("   \n\t ").unwrap(), vec![]);
    }

    #[test]
    fn test_keys_with_duration() {
        let actions = parse_script("xc120").unwrap();
        assert_eq!(actions, vec![Action::new(keys("xc"), 120)]);
        assert_eq!(actions[0].keys().bits(), 0x30);
    }

    #[test]
    fn test_space_splits_keys_from_duration() {
        let actions = parse_script("xc 120").unwrap();
        assert_eq!(
            actions,
            vec![Action::new(keys("xc"), 1), Action::new(ButtonSet::EMPTY, 120)]
        );
    }

    #[test]
    fn test_letter_after_duration_starts_new_action() {
        let actions = parse_script("a5d5").unwrap();
        assert_eq!(
            actions,
            vec![Action::new(keys("a"), 5), Action::new(keys("d"), 5)]
        );
    }

    #[test]
    fn test_unknown_letters_produce_nothing() {
        assert_eq!(parse_script("qqq").unwrap(), vec![]);
        assert_eq!(parse_script("q q Q").unwrap(), vec![]);
    }

    #[test]
    fn test_unknown_letter_ends_pending_duration() {
        let actions = parse_script("a5q5").unwrap();
        assert_eq!(
            actions,
            vec![Action::new(keys("a"), 5), Action::new(ButtonSet::EMPTY, 5)]
        );
    }

    #[test]
    fn test_uppercase_is_not_a_button() {
        assert_eq!(parse_script("A").unwrap(), vec![]);
    }

    #[test]
    fn test_keys_without_duration_hold_one_tick() {
        let actions = parse_script("d x a0").unwrap();
        assert_eq!(
            actions,
            vec![
                Action::new(keys("d"), 1),
                Action::new(keys("x"), 1),
                Action::new(keys("a"), 1),
            ]
        );
        assert!(actions.iter().all(|a| a.hold() == 1));
    }

    #[test]
    fn test_bare_zero_is_dropped() {
        assert_eq!(parse_script("0").unwrap(), vec![]);
        assert_eq!(parse_script("000 a").unwrap(), vec![Action::new(keys("a"), 1)]);
    }

    #[test]
    fn test_duplicate_letters_are_harmless() {
        assert_eq!(
            parse_script("zzcc3").unwrap(),
            vec![Action::new(keys("z"), 3)]
        );
    }

    #[test]
    fn test_duration_limit() {
        // Accumulator reaches 9999 then takes one more digit
        assert_eq!(
            parse_script("99999").unwrap(),
            vec![Action::new(ButtonSet::EMPTY, 99999)]
        );
        assert_eq!(
            parse_script("100000"),
            Err(ScriptError::DurationTooLong { offset: 5 })
        );
        assert!(parse_script(&format!("a{}", "9".repeat(10_000))).is_err());
    }

    #[test]
    fn test_error_aborts_even_with_earlier_actions() {
        assert!(parse_script("a5 d 1234567 x").is_err());
    }

    #[test]
    fn test_custom_digit_limit() {
        let parser = ScriptParser::new().with_digit_limit(10);
        assert!(parser.parse("99").is_ok());
        assert_eq!(
            parser.parse("a100"),
            Err(ScriptError::DurationTooLong { offset: 3 })
        );
    }

    #[test]
    fn test_huge_limit_does_not_overflow() {
        let parser = ScriptParser::new().with_digit_limit(u32::MAX);
        assert!(matches!(
            parser.parse("99999999999"),
            Err(ScriptError::DurationTooLong { .. })
        ));
    }

    #[test]
    fn test_strict_rejects_unknown() {
        let parser = ScriptParser::new().with_unknown_chars(UnknownCharPolicy::Strict);
        assert_eq!(
            parser.parse("a5, d5"),
            Err(ScriptError::UnknownCharacter { ch: ',', offset: 2 })
        );
        assert!(parser.parse("a5 d5").is_ok());
    }

    #[test]
    fn test_warn_policy_still_parses() {
        let parser = ScriptParser::new().with_unknown_chars(UnknownCharPolicy::Warn);
        assert_eq!(
            parser.parse("a2|d2").unwrap(),
            vec![Action::new(keys("a"), 2), Action::new(keys("d"), 2)]
        );
    }

    #[test]
    fn test_non_ascii_digits_are_not_durations() {
        // Arabic-Indic three
        assert_eq!(parse_script("a\u{0663}").unwrap(), vec![Action::new(keys("a"), 1)]);
    }
}
