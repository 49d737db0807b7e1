//! The automaton: state table, builder API, and the parse loop.

use crate::core::{StateRecord, Trace, TraceRecord, Verdict};
use crate::machine::error::{BuildError, ParseError};
use crate::snapshot::{Snapshot, SnapshotError, SNAPSHOT_VERSION};
use chrono::Utc;
use uuid::Uuid;

/// A finite-state machine with `N` states over elements of type `E`.
///
/// States are identified by their index in `0..N`; the count is fixed at the
/// type level and never changes. A fresh automaton starts every state with
/// the identity decision (keep every element), no hooks, cursor at state 0,
/// reset target 0, no terminal state, and auto-reset enabled.
///
/// Configuration methods validate indices up front and chain with `?`:
///
/// ```rust
/// use std::{cell::RefCell, rc::Rc};
/// use turnstile::Automaton;
///
/// let seen = Rc::new(RefCell::new(String::new()));
///
/// let mut fsm = Automaton::<char, 2>::new();
/// let [idle, word] = fsm.state_ids();
///
/// fsm.transition(idle, word, |c: &char| c.is_alphabetic())?;
/// fsm.transition(word, idle, |c: &char| !c.is_alphabetic())?;
///
/// let sink = Rc::clone(&seen);
/// fsm.on_recur_with(word, move |c: &char| sink.borrow_mut().push(*c), true, false)?;
///
/// fsm.parse("ab cd".chars())?;
/// assert_eq!(seen.borrow().as_str(), "abcd");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// The automaton is a single-threaded structure: hooks are `FnMut` closures
/// without `Send`/`Sync` bounds, and concurrent use requires external
/// serialization.
pub struct Automaton<E, const N: usize> {
    states: [StateRecord<E, N>; N],
    current: usize,
    begin: usize,
    end: Option<usize>,
    auto_reset: bool,
    trace: Trace,
}

impl<E, const N: usize> Automaton<E, N> {
    /// Create an automaton with `N` states and no rules.
    ///
    /// Every hook slot, including the `N` directional-leave slots of each
    /// state, is initialized here; there is no later initialization step
    /// that could discard configured hooks.
    pub fn new() -> Self {
        const { assert!(N > 0, "an automaton needs at least one state") };
        Automaton {
            states: std::array::from_fn(|_| StateRecord::new()),
            current: 0,
            begin: 0,
            end: None,
            auto_reset: true,
            trace: Trace::new(),
        }
    }

    /// The state indices `0..N`, for array destructuring:
    ///
    /// ```rust
    /// use turnstile::Automaton;
    ///
    /// let fsm = Automaton::<char, 3>::new();
    /// let [outside, inside, done] = fsm.state_ids();
    /// assert_eq!((outside, inside, done), (0, 1, 2));
    /// ```
    ///
    /// This is a plain query; it can be called at any point without
    /// touching configured hooks.
    pub fn state_ids(&self) -> [usize; N] {
        std::array::from_fn(|i| i)
    }

    /// The fixed state count `N`.
    pub fn state_count(&self) -> usize {
        N
    }

    /// Index of the state the cursor is on.
    pub fn current_state(&self) -> usize {
        self.current
    }

    /// Whether the cursor sits on the terminal state.
    pub fn at_end(&self) -> bool {
        self.end == Some(self.current)
    }

    /// Set the reset target.
    ///
    /// The cursor itself does not move: it starts at state 0 and lands on
    /// the reset target through [`reset`](Self::reset) or through auto-reset
    /// at the end of a `parse` call.
    pub fn begin(&mut self, state: usize) -> Result<&mut Self, BuildError> {
        self.begin = self.check(state)?;
        Ok(self)
    }

    /// Set the terminal state. Reaching it stops a `parse` call from
    /// consuming further elements.
    pub fn end(&mut self, state: usize) -> Result<&mut Self, BuildError> {
        self.end = Some(self.check(state)?);
        Ok(self)
    }

    /// Toggle whether the cursor returns to the reset target after each
    /// completed `parse` call. Enabled by default.
    pub fn auto_reset(&mut self, enabled: bool) -> &mut Self {
        self.auto_reset = enabled;
        self
    }

    /// Move the cursor to the reset target now.
    pub fn reset(&mut self) -> &mut Self {
        self.current = self.begin;
        self
    }

    /// Register a transition rule: elements matching `predicate` move the
    /// cursor from `from` to `to`.
    ///
    /// Rules are tested most-recently-registered first, so when several
    /// rules of `from` could match the same element, the last one registered
    /// wins. With no matching rule the state keeps the element.
    pub fn transition<P>(&mut self, from: usize, to: usize, predicate: P) -> Result<&mut Self, BuildError>
    where
        P: Fn(&E) -> bool + 'static,
    {
        self.check(from)?;
        self.check(to)?;
        self.states[from]
            .chain
            .push_transition(Box::new(predicate), to, None);
        Ok(self)
    }

    /// Like [`transition`](Self::transition), with a callback fired when the
    /// rule matches, before the cursor moves.
    pub fn transition_with<P, H>(
        &mut self,
        from: usize,
        to: usize,
        predicate: P,
        on_match: H,
    ) -> Result<&mut Self, BuildError>
    where
        P: Fn(&E) -> bool + 'static,
        H: FnMut(&E) + 'static,
    {
        self.check(from)?;
        self.check(to)?;
        self.states[from]
            .chain
            .push_transition(Box::new(predicate), to, Some(Box::new(on_match)));
        Ok(self)
    }

    /// Register a reject rule: an element matching `predicate` while the
    /// cursor is on `from` fails the parse with `message`.
    ///
    /// Reject rules share one chain with transition rules and obey the same
    /// last-registered-wins priority.
    pub fn reject<P>(
        &mut self,
        from: usize,
        predicate: P,
        message: impl Into<String>,
    ) -> Result<&mut Self, BuildError>
    where
        P: Fn(&E) -> bool + 'static,
    {
        self.check(from)?;
        self.states[from]
            .chain
            .push_reject(Box::new(predicate), message.into());
        Ok(self)
    }

    /// Set the hook fired after the cursor lands on `state`. Overwrites any
    /// previous enter hook.
    pub fn on_enter<H>(&mut self, state: usize, hook: H) -> Result<&mut Self, BuildError>
    where
        H: FnMut(&E) + 'static,
    {
        self.check(state)?;
        self.states[state].enter = Some(Box::new(hook));
        Ok(self)
    }

    /// Set the hook fired when the cursor leaves `state`, after the
    /// directional hook for the taken transition. Overwrites.
    pub fn on_leave<H>(&mut self, state: usize, hook: H) -> Result<&mut Self, BuildError>
    where
        H: FnMut(&E) + 'static,
    {
        self.check(state)?;
        self.states[state].leave = Some(Box::new(hook));
        Ok(self)
    }

    /// Set the hook fired only when the cursor moves exactly from `from` to
    /// `to`, before the generic leave hook. Overwrites that slot.
    pub fn on_leave_to<H>(&mut self, from: usize, to: usize, hook: H) -> Result<&mut Self, BuildError>
    where
        H: FnMut(&E) + 'static,
    {
        self.check(from)?;
        self.check(to)?;
        self.states[from].leave_to[to] = Some(Box::new(hook));
        Ok(self)
    }

    /// Set the recurring hook of `state`: fired for every element the state
    /// keeps. Overwrites the hook and clears both recurrence modifiers.
    pub fn on_recur<H>(&mut self, state: usize, hook: H) -> Result<&mut Self, BuildError>
    where
        H: FnMut(&E) + 'static,
    {
        self.on_recur_with(state, hook, false, false)
    }

    /// Set the recurring hook with its modifiers.
    ///
    /// `on_entry` additionally fires the hook right after the cursor enters
    /// `state`, with the element that triggered entry. `on_exit` fires it
    /// one last time inside a matching transition rule, before that rule's
    /// callback and before the cursor moves.
    pub fn on_recur_with<H>(
        &mut self,
        state: usize,
        hook: H,
        on_entry: bool,
        on_exit: bool,
    ) -> Result<&mut Self, BuildError>
    where
        H: FnMut(&E) + 'static,
    {
        self.check(state)?;
        let record = &mut self.states[state];
        record.recur = Some(Box::new(hook));
        record.recur_on_entry = on_entry;
        record.recur_on_exit = on_exit;
        Ok(self)
    }

    /// The transitions fired so far. Appended by `parse`, never read by it.
    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    /// Empty the transition trace.
    pub fn clear_trace(&mut self) {
        self.trace.clear();
    }

    /// Run the automaton over `input`.
    ///
    /// Per element, in order:
    ///
    /// 1. The current state's condition chain picks a destination (or
    ///    rejects).
    /// 2. On a state change: the directional-leave hook for the taken pair,
    ///    the generic leave hook, the cursor move, the destination's enter
    ///    hook, then its recurring hook iff the `on_entry` modifier is set,
    ///    all with the same element.
    /// 3. Without a change, the recurring hook fires.
    /// 4. Reaching the terminal state stops consumption; later elements
    ///    reach no hook.
    ///
    /// After the input is exhausted or the terminal state halted it, the
    /// cursor returns to the reset target when auto-reset is on. A reject
    /// rule aborts the call immediately: the error propagates, the cursor
    /// stays where the rejection hit, and no reset happens.
    pub fn parse<I>(&mut self, input: I) -> Result<(), ParseError>
    where
        I: IntoIterator<Item = E>,
    {
        for (offset, element) in input.into_iter().enumerate() {
            let next = self.decide(&element)?;
            if next != self.current {
                let from = self.current;
                let record = &mut self.states[from];
                if let Some(hook) = record.leave_to[next].as_mut() {
                    hook(&element);
                }
                if let Some(hook) = record.leave.as_mut() {
                    hook(&element);
                }
                self.current = next;
                self.trace.record(TraceRecord {
                    from,
                    to: next,
                    offset,
                    at: Utc::now(),
                });
                let record = &mut self.states[next];
                if let Some(hook) = record.enter.as_mut() {
                    hook(&element);
                }
                if record.recur_on_entry {
                    if let Some(hook) = record.recur.as_mut() {
                        hook(&element);
                    }
                }
            } else if let Some(hook) = self.states[self.current].recur.as_mut() {
                hook(&element);
            }
            if self.at_end() {
                break;
            }
        }
        if self.auto_reset {
            self.current = self.begin;
        }
        Ok(())
    }

    /// Evaluate the current state's chain for one element.
    fn decide(&mut self, element: &E) -> Result<usize, ParseError> {
        let current = self.current;
        let record = &mut self.states[current];
        match record
            .chain
            .evaluate(element, &mut record.recur, record.recur_on_exit)
        {
            Verdict::Stay => Ok(current),
            Verdict::Go(target) => Ok(target),
            Verdict::Reject(message) => Err(ParseError::Rejected {
                state: current,
                message,
            }),
        }
    }

    fn check(&self, index: usize) -> Result<usize, BuildError> {
        if index < N {
            Ok(index)
        } else {
            Err(BuildError::UnknownState { index, count: N })
        }
    }
}

impl<E, const N: usize> Automaton<E, N> {
    /// Capture the runtime position as a serializable [`Snapshot`].
    ///
    /// Rules and hooks are closures and are not captured; a snapshot covers
    /// the cursor, the begin/end/auto-reset settings, and the trace.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            version: SNAPSHOT_VERSION,
            id: Uuid::new_v4().to_string(),
            taken_at: Utc::now(),
            state_count: N,
            current: self.current,
            begin: self.begin,
            end: self.end,
            auto_reset: self.auto_reset,
            trace: self.trace.clone(),
        }
    }

    /// Adopt the runtime position from a snapshot taken on an automaton
    /// with the same state count.
    ///
    /// The snapshot is validated first; on any error the automaton is left
    /// unmodified. Rules and hooks are untouched: restoring onto a machine
    /// wired differently from the one that took the snapshot is the
    /// caller's responsibility.
    pub fn restore(&mut self, snapshot: &Snapshot) -> Result<(), SnapshotError> {
        snapshot.validate()?;
        if snapshot.state_count != N {
            return Err(SnapshotError::ValidationFailed(format!(
                "snapshot covers {} states, automaton has {}",
                snapshot.state_count, N
            )));
        }
        self.current = snapshot.current;
        self.begin = snapshot.begin;
        self.end = snapshot.end;
        self.auto_reset = snapshot.auto_reset;
        self.trace = snapshot.trace.clone();
        Ok(())
    }
}

impl<E, const N: usize> Default for Automaton<E, N> {
    fn default() -> Self {
        Self::new()
    }
}

// Rules and hooks are opaque closures; Debug shows the runtime position.
impl<E, const N: usize> std::fmt::Debug for Automaton<E, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Automaton")
            .field("state_count", &N)
            .field("current", &self.current)
            .field("begin", &self.begin)
            .field("end", &self.end)
            .field("auto_reset", &self.auto_reset)
            .finish_non_exhaustive()
    }
}
