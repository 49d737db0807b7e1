//! Engine errors.

use thiserror::Error;

/// Errors raised while configuring an automaton.
///
/// Every builder method validates its state indices before touching any
/// state, so a failed call leaves the configuration exactly as it was.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BuildError {
    /// A caller-supplied index falls outside `0..count`.
    #[error("Unknown state {index}: automaton has {count} states")]
    UnknownState { index: usize, count: usize },
}

/// Errors raised while parsing.
///
/// The engine never retries or recovers: a reject rule firing is fatal to
/// the `parse` call and propagates to the caller untouched.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    /// A reject rule matched the current element. Carries the message the
    /// rule was registered with, verbatim.
    #[error("Input rejected in state {state}: {message}")]
    Rejected { state: usize, message: String },
}

impl ParseError {
    /// The diagnostic message configured on the matching reject rule.
    pub fn message(&self) -> &str {
        match self {
            ParseError::Rejected { message, .. } => message,
        }
    }
}
