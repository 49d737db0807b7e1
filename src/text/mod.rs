//! Text parsing on top of the engine.
//!
//! Nothing here reaches into the engine's internals: this module is a
//! client of the public [`Automaton`] API, specialized to `char` input.
//! It provides the character-class predicates, predicate combinators, and
//! the shared accumulation buffer that hand-written lexers keep rebuilding.

mod buffer;
mod classes;

pub use buffer::{append_to, commit_to, Buffer};
pub use classes::{
    and, char_is, closing_bracket, digit, letter, lowercase, not, opening_bracket, or, range,
    uppercase, whitespace,
};

use crate::Automaton;

/// An automaton over characters.
///
/// ```rust
/// use turnstile::text::CharAutomaton;
///
/// let mut fsm = CharAutomaton::<3>::new();
/// let [outside, inside, done] = fsm.state_ids();
/// # let _ = (outside, inside, done);
/// ```
pub type CharAutomaton<const N: usize> = Automaton<char, N>;
