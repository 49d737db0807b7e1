//! Character accumulation for automaton hooks.
//!
//! Hooks on different states often need to write to the same buffer, so the
//! buffer is shared behind `Rc<RefCell<_>>` and the free functions here
//! build the hooks that capture a handle to it.

use std::cell::RefCell;
use std::rc::Rc;

/// A growable character buffer filled by automaton hooks.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Buffer {
    content: String,
}

impl Buffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Buffer {
            content: String::new(),
        }
    }

    /// Create an empty buffer behind a shareable handle, ready for
    /// [`append_to`] and [`commit_to`].
    pub fn shared() -> Rc<RefCell<Buffer>> {
        Rc::new(RefCell::new(Buffer::new()))
    }

    /// Append one character.
    pub fn push(&mut self, c: char) {
        self.content.push(c);
    }

    /// Drop the accumulated content.
    pub fn clear(&mut self) {
        self.content.clear();
    }

    /// Length of the accumulated content in bytes.
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Whether nothing has been accumulated.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// The accumulated content.
    pub fn as_str(&self) -> &str {
        &self.content
    }

    /// Move the accumulated content out, leaving the buffer empty.
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.content)
    }
}

/// Build a hook that appends every element it sees to `buffer`.
///
/// Typically installed as a recurring hook:
///
/// ```rust
/// use turnstile::text::{append_to, char_is, Buffer, CharAutomaton};
///
/// let buffer = Buffer::shared();
///
/// let mut fsm = CharAutomaton::<2>::new();
/// fsm.transition(0, 1, char_is(';'))?;
/// fsm.on_recur(0, append_to(&buffer))?;
///
/// fsm.parse("ab;cd".chars())?;
/// assert_eq!(buffer.borrow().as_str(), "ab");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn append_to(buffer: &Rc<RefCell<Buffer>>) -> impl FnMut(&char) {
    let buffer = Rc::clone(buffer);
    move |c: &char| buffer.borrow_mut().push(*c)
}

/// Build a hook that copies the buffer's content into `target`, leaving the
/// buffer itself untouched. Typically installed as a directional-leave hook
/// on the transition that completes a token.
pub fn commit_to(buffer: &Rc<RefCell<Buffer>>, target: &Rc<RefCell<String>>) -> impl FnMut(&char) {
    let buffer = Rc::clone(buffer);
    let target = Rc::clone(target);
    move |_: &char| *target.borrow_mut() = buffer.borrow().as_str().to_string()
}
