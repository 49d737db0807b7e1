//! Transition rules and the per-state condition chain.
//!
//! Every state owns one [`Chain`]: an ordered list of rules appended at
//! configuration time and evaluated back-to-front, so the most recently
//! registered rule is tested first. This reproduces the priority of nested
//! closure wrapping with a flat list instead of one stack frame per rule.

/// Boxed predicate deciding whether a rule applies to an element.
pub type Predicate<E> = Box<dyn Fn(&E) -> bool>;

/// Boxed callback fired with the element that triggered it.
///
/// Hooks are `FnMut` so they can accumulate into captured state. They are
/// deliberately not `Send`/`Sync`: the automaton is a single-threaded
/// structure, and clients share mutable state between hooks with
/// `Rc<RefCell<_>>`.
pub type Hook<E> = Box<dyn FnMut(&E)>;

/// One registered rule of a state's condition chain.
pub(crate) enum Rule<E> {
    /// Route matching elements to `target`, firing `on_match` first.
    Transition {
        predicate: Predicate<E>,
        target: usize,
        on_match: Option<Hook<E>>,
    },
    /// Fail the parse when a matching element arrives.
    Reject {
        predicate: Predicate<E>,
        message: String,
    },
}

/// What a chain decided for one element.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Verdict {
    /// No rule matched; the state keeps the element.
    Stay,
    /// A transition rule matched; move to the carried index.
    Go(usize),
    /// A reject rule matched; abort with its message.
    Reject(String),
}

/// Ordered rule list for one state.
///
/// An empty chain is the identity decision: every element stays in the
/// state. Registration only ever appends, never replaces.
pub(crate) struct Chain<E>(Vec<Rule<E>>);

impl<E> Chain<E> {
    pub(crate) fn new() -> Self {
        Chain(Vec::new())
    }

    pub(crate) fn push_transition(
        &mut self,
        predicate: Predicate<E>,
        target: usize,
        on_match: Option<Hook<E>>,
    ) {
        self.0.push(Rule::Transition {
            predicate,
            target,
            on_match,
        });
    }

    pub(crate) fn push_reject(&mut self, predicate: Predicate<E>, message: String) {
        self.0.push(Rule::Reject { predicate, message });
    }

    /// Evaluate the chain for one element, newest rule first.
    ///
    /// When a transition rule matches and `recur_on_exit` is set, the
    /// state's recurring hook fires before `on_match`, both with the same
    /// element and both strictly before the caller moves the cursor. Reject
    /// rules fire nothing.
    pub(crate) fn evaluate(
        &mut self,
        element: &E,
        recur: &mut Option<Hook<E>>,
        recur_on_exit: bool,
    ) -> Verdict {
        for rule in self.0.iter_mut().rev() {
            match rule {
                Rule::Transition {
                    predicate,
                    target,
                    on_match,
                } => {
                    if predicate(element) {
                        if recur_on_exit {
                            if let Some(hook) = recur.as_mut() {
                                hook(element);
                            }
                        }
                        if let Some(hook) = on_match.as_mut() {
                            hook(element);
                        }
                        return Verdict::Go(*target);
                    }
                }
                Rule::Reject { predicate, message } => {
                    if predicate(element) {
                        return Verdict::Reject(message.clone());
                    }
                }
            }
        }
        Verdict::Stay
    }
}
