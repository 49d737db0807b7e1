//! Core automaton data: rules, state records, and traces.
//!
//! This module holds the data the engine operates on:
//! - Transition and reject rules, composed into per-state condition chains
//! - Per-state records owning the chains and lifecycle hooks
//! - The transition trace appended during parsing
//!
//! Nothing here drives execution; the `machine` module does.

mod rule;
mod state;
mod trace;

pub use rule::{Hook, Predicate};
pub use trace::{Trace, TraceRecord};

pub(crate) use rule::Verdict;
pub(crate) use state::StateRecord;
