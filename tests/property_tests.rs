//! Property-based tests for the automaton engine.
//!
//! These tests use proptest to verify the engine's observable contract
//! across many randomly generated inputs and configurations.

use proptest::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use turnstile::text::{append_to, char_is, commit_to, Buffer, CharAutomaton};
use turnstile::{Automaton, BuildError, ParseError};

type Log = Rc<RefCell<Vec<String>>>;

fn log_hook(log: &Log, label: &'static str) -> impl FnMut(&char) {
    let log = Rc::clone(log);
    move |c: &char| log.borrow_mut().push(format!("{label} {c}"))
}

fn counter_hook(count: &Rc<RefCell<usize>>) -> impl FnMut(&char) {
    let count = Rc::clone(count);
    move |_: &char| *count.borrow_mut() += 1
}

proptest! {
    /// A rule-less automaton holds the identity decision: any input leaves
    /// the cursor where it started and fires no transition.
    #[test]
    fn rule_free_automaton_never_moves(input in "[ -~]*") {
        let mut fsm = Automaton::<char, 5>::new();
        fsm.auto_reset(false);

        fsm.parse(input.chars()).unwrap();

        prop_assert_eq!(fsm.current_state(), 0);
        prop_assert!(fsm.trace().is_empty());
    }

    /// When two rules of the same state both match, the one registered
    /// later decides the destination.
    #[test]
    fn later_registration_wins(first in 0usize..4, second in 0usize..4) {
        let mut fsm = Automaton::<char, 4>::new();
        fsm.transition(0, first, |_: &char| true).unwrap();
        fsm.transition(0, second, |_: &char| true).unwrap();
        fsm.auto_reset(false);

        fsm.parse("x".chars()).unwrap();

        prop_assert_eq!(fsm.current_state(), second);
    }

    /// The `on_entry` modifier fires the recurring hook exactly once more,
    /// with the element that triggered entry, before any kept elements.
    #[test]
    fn entry_recurrence_fires_once_with_the_trigger(
        prefix in "[ax]{0,12}",
        suffix in "[by]{0,12}",
    ) {
        let log: Log = Rc::default();

        let mut fsm = Automaton::<char, 2>::new();
        fsm.transition(0, 1, char_is('>')).unwrap();
        fsm.on_recur_with(1, log_hook(&log, "recur"), true, false).unwrap();

        let input = format!("{prefix}>{suffix}");
        fsm.parse(input.chars()).unwrap();

        let mut expected = vec!["recur >".to_string()];
        expected.extend(suffix.chars().map(|c| format!("recur {c}")));
        let logged = log.borrow();
        prop_assert_eq!(&*logged, &expected);
    }

    /// The `on_exit` modifier fires the recurring hook one last time with
    /// the matching element, strictly before the rule's own callback.
    #[test]
    fn exit_recurrence_precedes_the_match_callback(prefix in "[ax]{0,12}") {
        let log: Log = Rc::default();

        let mut fsm = Automaton::<char, 2>::new();
        fsm.transition_with(0, 1, char_is('>'), log_hook(&log, "match")).unwrap();
        fsm.on_recur_with(0, log_hook(&log, "recur"), false, true).unwrap();
        fsm.auto_reset(false);

        let input = format!("{prefix}>");
        fsm.parse(input.chars()).unwrap();

        let mut expected: Vec<String> =
            prefix.chars().map(|c| format!("recur {c}")).collect();
        expected.push("recur >".to_string());
        expected.push("match >".to_string());
        let logged = log.borrow();
        prop_assert_eq!(&*logged, &expected);
        prop_assert_eq!(fsm.current_state(), 1);
    }

    /// Reaching the terminal state stops consumption: elements after the
    /// halt point reach no hook.
    #[test]
    fn terminal_state_seals_the_input(
        pre in "[a-z ]{0,10}",
        mid in "[a-z ]{0,10}",
        post in "[a-z\" ]{0,10}",
    ) {
        let seen = Rc::new(RefCell::new(0usize));

        let mut fsm = CharAutomaton::<3>::new();
        let [outside, inside, done] = fsm.state_ids();
        fsm.transition(outside, inside, char_is('"')).unwrap();
        fsm.transition(inside, done, char_is('"')).unwrap();
        fsm.on_recur(outside, counter_hook(&seen)).unwrap();
        fsm.on_recur(inside, counter_hook(&seen)).unwrap();
        fsm.on_recur(done, counter_hook(&seen)).unwrap();
        fsm.end(done).unwrap();

        let input = format!("{pre}\"{mid}\"{post}");
        fsm.parse(input.chars()).unwrap();

        // Every consumed element either recurred or fired one of the two
        // recorded transitions; nothing past the closing quote counts.
        let consumed = *seen.borrow() + fsm.trace().len();
        prop_assert_eq!(consumed, pre.chars().count() + mid.chars().count() + 2);
        prop_assert_eq!(fsm.trace().len(), 2);
    }

    /// With auto-reset on, the cursor is back on the reset target after
    /// every parse; with it off, the cursor stays wherever input left it.
    #[test]
    fn auto_reset_contract(input in "[ab]{0,20}", auto in any::<bool>()) {
        let mut fsm = Automaton::<char, 2>::new();
        fsm.transition(0, 1, char_is('a')).unwrap();
        fsm.transition(1, 0, char_is('b')).unwrap();
        fsm.auto_reset(auto);

        fsm.parse(input.chars()).unwrap();

        let reached = fsm.trace().records().last().map_or(0, |r| r.to);
        if auto {
            prop_assert_eq!(fsm.current_state(), 0);
        } else {
            prop_assert_eq!(fsm.current_state(), reached);
        }
    }

    /// Any out-of-range index is rejected up front and leaves the machine
    /// behaving exactly as before the failed call.
    #[test]
    fn unknown_indices_never_alter_configuration(bogus in 3usize..100) {
        let mut fsm = CharAutomaton::<3>::new();
        fsm.transition(0, 1, char_is('x')).unwrap();

        let expected = BuildError::UnknownState { index: bogus, count: 3 };
        prop_assert_eq!(fsm.begin(bogus).unwrap_err(), expected.clone());
        prop_assert_eq!(fsm.end(bogus).unwrap_err(), expected.clone());
        prop_assert_eq!(
            fsm.transition(bogus, 0, |_: &char| true).unwrap_err(),
            expected.clone()
        );
        prop_assert_eq!(
            fsm.transition(0, bogus, |_: &char| true).unwrap_err(),
            expected.clone()
        );
        prop_assert_eq!(
            fsm.reject(bogus, |_: &char| true, "m").unwrap_err(),
            expected.clone()
        );
        prop_assert_eq!(fsm.on_enter(bogus, |_| {}).unwrap_err(), expected.clone());
        prop_assert_eq!(fsm.on_recur(bogus, |_| {}).unwrap_err(), expected);

        fsm.auto_reset(false);
        fsm.parse("x".chars()).unwrap();
        prop_assert_eq!(fsm.current_state(), 1);
    }

    /// A matching reject rule aborts with the configured message and stops
    /// consumption at the offending element.
    #[test]
    fn reject_rules_carry_their_message(
        message in "[A-Za-z ]{1,30}",
        clean in "[a-z]{0,10}",
        tail in "[a-z!]{0,10}",
    ) {
        let seen = Rc::new(RefCell::new(0usize));

        let mut fsm = Automaton::<char, 2>::new();
        fsm.reject(0, char_is('!'), message.clone()).unwrap();
        fsm.on_recur(0, counter_hook(&seen)).unwrap();

        let input = format!("{clean}!{tail}");
        let err = fsm.parse(input.chars()).unwrap_err();

        prop_assert_eq!(
            err,
            ParseError::Rejected { state: 0, message: message.clone() }
        );
        prop_assert_eq!(*seen.borrow(), clean.chars().count());
    }

    /// The end-to-end scenario: a 3-state quote extractor finds the first
    /// quoted string whatever surrounds it, and halts on the closing quote.
    #[test]
    fn quote_extraction_end_to_end(
        pre in "[a-z ]{0,10}",
        content in "[a-zA-Z0-9 !,.]{0,20}",
        post in "[a-z ]{0,10}",
    ) {
        let buffer = Buffer::shared();
        let result = Rc::new(RefCell::new(String::new()));

        let mut fsm = CharAutomaton::<3>::new();
        let [outside, inside, done] = fsm.state_ids();
        fsm.transition(outside, inside, char_is('"')).unwrap();
        fsm.transition(inside, done, char_is('"')).unwrap();
        fsm.on_recur_with(inside, append_to(&buffer), true, true).unwrap();
        fsm.on_leave_to(inside, done, commit_to(&buffer, &result)).unwrap();
        fsm.end(done).unwrap();

        let input = format!("{pre}\"{content}\"{post}");
        fsm.parse(input.chars()).unwrap();

        let expected = format!("\"{content}\"");
        let extracted = result.borrow();
        prop_assert_eq!(extracted.as_str(), expected.as_str());
        prop_assert_eq!(fsm.trace().path(), vec![outside, inside, done]);
        // Auto-reset is on by default, so the machine is ready for the
        // next line.
        prop_assert_eq!(fsm.current_state(), outside);
    }
}
