//! Quote extractor
//!
//! Builds a 3-state automaton that scans a line for the first
//! double-quoted string and prints it, quotes included.
//!
//! Run with: cargo run --example quote_extractor

use std::cell::RefCell;
use std::rc::Rc;

use turnstile::text::{append_to, char_is, commit_to, Buffer, CharAutomaton};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Shared buffer the hooks write into, and the extracted result.
    let buffer = Buffer::shared();
    let result = Rc::new(RefCell::new(String::new()));

    let mut fsm = CharAutomaton::<3>::new();
    let [outside, inside, done] = fsm.state_ids();

    // An opening quote enters the string, a closing quote finishes it.
    fsm.transition(outside, inside, char_is('"'))?;
    fsm.transition(inside, done, char_is('"'))?;

    // Accumulate every character seen inside the string. The recurring hook
    // also fires on entry and right before the closing transition, so both
    // quotes land in the buffer.
    fsm.on_recur_with(inside, append_to(&buffer), true, true)?;

    // Leaving inside for done commits the buffer to the result.
    fsm.on_leave_to(inside, done, commit_to(&buffer, &result))?;

    // Once the string is complete there is nothing left to do.
    fsm.end(done)?;

    fsm.parse("     \"Hello world !\"   ".chars())?;

    println!("Value : {}", result.borrow());
    assert_eq!(result.borrow().as_str(), "\"Hello world !\"");
    Ok(())
}
