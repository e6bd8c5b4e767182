//! Action scripts - the compact notation for timed controller input
//!
//! A script is a run of whitespace-separated tokens such as `xc 120` or
//! `a5d5`; parsing turns it into an ordered list of `Action`s.

pub mod action;
pub mod format;
pub mod parser;

pub use action::{Action, Button, ButtonSet, total_ticks};
pub use format::{format_action, format_actions};
pub use parser::{ScriptError, ScriptParser, UnknownCharPolicy, parse_script};
