//! Character-class predicates and combinators.
//!
//! Small builders for the predicates a text automaton is wired with. Each
//! returns `impl Fn(&char) -> bool`, ready to hand to
//! [`transition`](crate::Automaton::transition) or
//! [`reject`](crate::Automaton::reject).

/// Match one exact character.
pub fn char_is(expected: char) -> impl Fn(&char) -> bool {
    move |c| *c == expected
}

/// Match characters in the inclusive range `low..=high`.
pub fn range(low: char, high: char) -> impl Fn(&char) -> bool {
    move |c| (low..=high).contains(c)
}

/// Match ASCII digits.
pub fn digit() -> impl Fn(&char) -> bool {
    |c| c.is_ascii_digit()
}

/// Match ASCII uppercase letters.
pub fn uppercase() -> impl Fn(&char) -> bool {
    |c| c.is_ascii_uppercase()
}

/// Match ASCII lowercase letters.
pub fn lowercase() -> impl Fn(&char) -> bool {
    |c| c.is_ascii_lowercase()
}

/// Match ASCII letters of either case.
pub fn letter() -> impl Fn(&char) -> bool {
    |c| c.is_ascii_alphabetic()
}

/// Match space, tab, or newline.
pub fn whitespace() -> impl Fn(&char) -> bool {
    |c| matches!(c, ' ' | '\t' | '\n')
}

/// Match `{` or `[`.
pub fn opening_bracket() -> impl Fn(&char) -> bool {
    |c| matches!(c, '{' | '[')
}

/// Match `}` or `]`.
pub fn closing_bracket() -> impl Fn(&char) -> bool {
    |c| matches!(c, '}' | ']')
}

/// Both predicates hold.
pub fn and<A, B>(a: A, b: B) -> impl Fn(&char) -> bool
where
    A: Fn(&char) -> bool,
    B: Fn(&char) -> bool,
{
    move |c| a(c) && b(c)
}

/// Either predicate holds.
pub fn or<A, B>(a: A, b: B) -> impl Fn(&char) -> bool
where
    A: Fn(&char) -> bool,
    B: Fn(&char) -> bool,
{
    move |c| a(c) || b(c)
}

/// The predicate does not hold.
pub fn not<P>(predicate: P) -> impl Fn(&char) -> bool
where
    P: Fn(&char) -> bool,
{
    move |c| !predicate(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn char_is_matches_exactly() {
        let quote = char_is('"');

        assert!(quote(&'"'));
        assert!(!quote(&'\''));
    }

    #[test]
    fn range_is_inclusive() {
        let octal = range('0', '7');

        assert!(octal(&'0'));
        assert!(octal(&'7'));
        assert!(!octal(&'8'));
    }

    #[test]
    fn classes_cover_their_sets() {
        assert!(digit()(&'5'));
        assert!(!digit()(&'a'));
        assert!(uppercase()(&'Q'));
        assert!(lowercase()(&'q'));
        assert!(letter()(&'q'));
        assert!(letter()(&'Q'));
        assert!(!letter()(&'1'));
        assert!(whitespace()(&'\t'));
        assert!(!whitespace()(&'x'));
        assert!(opening_bracket()(&'['));
        assert!(closing_bracket()(&'}'));
    }

    #[test]
    fn combinators_compose() {
        let hex_letter = and(letter(), or(range('a', 'f'), range('A', 'F')));

        assert!(hex_letter(&'b'));
        assert!(hex_letter(&'F'));
        assert!(!hex_letter(&'g'));

        let visible = not(whitespace());
        assert!(visible(&'x'));
        assert!(!visible(&' '));
    }
}
