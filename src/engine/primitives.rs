//! Primitive parsers
//!
//! Single-character and literal-string matchers for text, and [`select`] for item streams.
//! Each one is a single bounded prefix test: on a mismatch it fails with the input
//! unchanged.

use super::input::Input;
use super::outcome::ParseOutcome;
use super::parser::Parser;

/// A set of characters a [`Char`] parser accepts.
#[derive(Debug, Clone)]
pub enum CharClass {
    Exact(char),
    AnyOf(Vec<char>),
    Digit,
    /// ASCII letters.
    Letter,
    Whitespace,
    /// Whitespace other than a line feed.
    InlineWhitespace,
    Predicate(fn(char) -> bool),
}

impl CharClass {
    pub fn matches(&self, c: char) -> bool {
        match self {
            CharClass::Exact(expected) => c == *expected,
            CharClass::AnyOf(set) => set.contains(&c),
            CharClass::Digit => c.is_ascii_digit(),
            CharClass::Letter => c.is_ascii_alphabetic(),
            CharClass::Whitespace => c.is_whitespace(),
            CharClass::InlineWhitespace => c != '\n' && c.is_whitespace(),
            CharClass::Predicate(pred) => pred(c),
        }
    }
}

/// Function pointers have no stable identity, so a predicate class is never equal to
/// anything, itself included.
impl PartialEq for CharClass {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CharClass::Exact(a), CharClass::Exact(b)) => a == b,
            (CharClass::AnyOf(a), CharClass::AnyOf(b)) => a == b,
            (CharClass::Digit, CharClass::Digit)
            | (CharClass::Letter, CharClass::Letter)
            | (CharClass::Whitespace, CharClass::Whitespace)
            | (CharClass::InlineWhitespace, CharClass::InlineWhitespace) => true,
            _ => false,
        }
    }
}

/// Consumes exactly one character from a [`CharClass`], producing it as a string.
#[derive(Debug, Clone)]
pub struct Char {
    class: CharClass,
}

impl Char {
    pub fn new(class: CharClass) -> Self {
        Self { class }
    }
}

impl Parser<String> for Char {
    fn apply<'a>(&self, input: Input<'a>) -> ParseOutcome<'a, String> {
        match input.split_first() {
            Some((c, rest)) if self.class.matches(c) => {
                ParseOutcome::success(vec![c.to_string()], rest)
            }
            _ => ParseOutcome::failure(input),
        }
    }
}

/// Consumes an exact string prefix.
#[derive(Debug, Clone)]
pub struct Literal {
    text: String,
}

impl Literal {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl Parser<String> for Literal {
    fn apply<'a>(&self, input: Input<'a>) -> ParseOutcome<'a, String> {
        match input.strip_prefix(&self.text) {
            Some(rest) => ParseOutcome::success(vec![self.text.clone()], rest),
            None => ParseOutcome::failure(input),
        }
    }
}

pub fn char_of(c: char) -> Char {
    Char::new(CharClass::Exact(c))
}

pub fn one_char_of(set: &str) -> Char {
    Char::new(CharClass::AnyOf(set.chars().collect()))
}

pub fn char_where(pred: fn(char) -> bool) -> Char {
    Char::new(CharClass::Predicate(pred))
}

pub fn digit() -> Char {
    Char::new(CharClass::Digit)
}

pub fn letter() -> Char {
    Char::new(CharClass::Letter)
}

pub fn whitespace() -> Char {
    Char::new(CharClass::Whitespace)
}

pub fn inline_whitespace() -> Char {
    Char::new(CharClass::InlineWhitespace)
}

pub fn literal(text: impl Into<String>) -> Literal {
    Literal::new(text)
}

/// Consumes one item of an item stream when `f` maps it to a value.
pub struct Select<F> {
    f: F,
}

impl<T, O, F> Parser<O, [T]> for Select<F>
where
    F: Fn(&T) -> Option<O>,
{
    fn apply<'a>(&self, input: Input<'a, [T]>) -> ParseOutcome<'a, O, [T]> {
        match input.split_first() {
            Some((item, rest)) => match (self.f)(item) {
                Some(value) => ParseOutcome::success(vec![value], rest),
                None => ParseOutcome::failure(input),
            },
            None => ParseOutcome::failure(input),
        }
    }
}

pub fn select<T, O, F>(f: F) -> Select<F>
where
    F: Fn(&T) -> Option<O>,
{
    Select { f }
}
