//! Turnstile: a fixed-state automaton engine
//!
//! Turnstile drives hand-written lexers and parsers: you fix a state count,
//! wire transitions as plain predicates over your element type, hang
//! lifecycle hooks on states, and feed the machine a sequence. States are
//! plain indices; everything the machine does with them is supplied by the
//! caller as closures.
//!
//! # Core Concepts
//!
//! - **States**: indices `0..N`, fixed at the type level via const generics
//! - **Rules**: transition and reject predicates, composed per state into
//!   one condition chain with last-registered-wins priority
//! - **Hooks**: enter/leave/recurring/directional-leave callbacks with a
//!   strict firing order
//! - **Terminal state**: reaching it halts element consumption early
//!
//! # Example
//!
//! Extract the first double-quoted string from a line:
//!
//! ```rust
//! use std::{cell::RefCell, rc::Rc};
//! use turnstile::text::{append_to, char_is, commit_to, Buffer, CharAutomaton};
//!
//! let buffer = Buffer::shared();
//! let result = Rc::new(RefCell::new(String::new()));
//!
//! let mut fsm = CharAutomaton::<3>::new();
//! let [outside, inside, done] = fsm.state_ids();
//!
//! fsm.transition(outside, inside, char_is('"'))?;
//! fsm.transition(inside, done, char_is('"'))?;
//! fsm.on_recur_with(inside, append_to(&buffer), true, true)?;
//! fsm.on_leave_to(inside, done, commit_to(&buffer, &result))?;
//! fsm.end(done)?;
//!
//! fsm.parse("     \"Hello world !\"   ".chars())?;
//!
//! assert_eq!(result.borrow().as_str(), "\"Hello world !\"");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod core;
pub mod machine;
pub mod snapshot;
pub mod text;

// Re-export commonly used types
pub use crate::core::{Hook, Predicate, Trace, TraceRecord};
pub use machine::{Automaton, BuildError, ParseError};
pub use snapshot::{Snapshot, SnapshotError};
