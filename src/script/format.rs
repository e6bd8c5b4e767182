//! Canonical text form of an action sequence
//!
//! One token per action, separated by single spaces. Letters come in
//! button order (`a d w s z x`); the hold is written when it is above one
//! or when no button is held, so every token parses back to its action.

use super::action::Action;

/// Format a single action as a script token
pub fn format_action(action: &Action) -> String {
    let mut token: String = action.keys().iter().map(|b| b.letter()).collect();
    if action.hold() > 1 || action.keys().is_empty() {
        token.push_str(&action.hold().to_string());
    }
    token
}

/// Format a sequence so that parsing the result yields the same sequence
pub fn format_actions(actions: &[Action]) -> String {
    actions
        .iter()
        .map(format_action)
        .collect::<Vec<_>>()
        .join(" ")
}
