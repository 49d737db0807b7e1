//! Per-state configuration records.
//!
//! A record holds everything the engine knows about one state: its condition
//! chain and its lifecycle hooks. Records are owned exclusively by the
//! automaton and never escape it; a state's public identity is its index.
//!
//! Hooks are `Option<Hook<E>>` with `None` meaning "no effect". The whole
//! record, including every directional-leave slot, is initialized when the
//! automaton is constructed, so hook registration order never interacts with
//! initialization.

use super::rule::{Chain, Hook};

/// Configuration of a single state, indexed `0..N` inside the automaton.
pub(crate) struct StateRecord<E, const N: usize> {
    /// The condition chain; empty means the identity decision.
    pub(crate) chain: Chain<E>,
    /// Fired after the cursor lands on this state.
    pub(crate) enter: Option<Hook<E>>,
    /// Fired when the cursor leaves this state, after the directional hook.
    pub(crate) leave: Option<Hook<E>>,
    /// Fired for every element the state keeps.
    pub(crate) recur: Option<Hook<E>>,
    /// One directional-leave slot per destination state.
    pub(crate) leave_to: [Option<Hook<E>>; N],
    /// Fire `recur` once more right after entering, with the same element.
    pub(crate) recur_on_entry: bool,
    /// Fire `recur` one last time inside a matching transition rule,
    /// before its `on_match` callback and before the cursor moves.
    pub(crate) recur_on_exit: bool,
}

impl<E, const N: usize> StateRecord<E, N> {
    pub(crate) fn new() -> Self {
        StateRecord {
            chain: Chain::new(),
            enter: None,
            leave: None,
            recur: None,
            leave_to: std::array::from_fn(|_| None),
            recur_on_entry: false,
            recur_on_exit: false,
        }
    }
}

impl<E, const N: usize> Default for StateRecord<E, N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Verdict;

    #[test]
    fn fresh_record_has_no_hooks_and_no_rules() {
        let mut record: StateRecord<char, 4> = StateRecord::new();

        assert_eq!(record.chain.evaluate(&'x', &mut None, false), Verdict::Stay);
        assert!(record.enter.is_none());
        assert!(record.leave.is_none());
        assert!(record.recur.is_none());
        assert!(record.leave_to.iter().all(Option::is_none));
        assert!(!record.recur_on_entry);
        assert!(!record.recur_on_exit);
    }

    #[test]
    fn directional_slots_match_state_count() {
        let record: StateRecord<char, 7> = StateRecord::new();

        assert_eq!(record.leave_to.len(), 7);
    }
}
