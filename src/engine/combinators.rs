//! Parser combinators
//!
//! Every combinator owns the parsers it wraps and is itself a [`Parser`]. Failure is always
//! an ordinary [`ParseOutcome::Failure`]; combinators that recover from it ([`OneOf`],
//! [`Many0`], [`Opt`]) do so by trying an alternative or by treating it as "nothing".
//!
//! Sequences report the remainder where their failing step started. Repetitions stop as
//! soon as an iteration fails or stops consuming input, so they terminate on any input.

use std::marker::PhantomData;
use std::ops::Range;

use super::input::{Input, Stream};
use super::outcome::ParseOutcome;
use super::parser::{BoxedParser, Parser};

/// Build a [`Chain`] from a list of parsers, boxing each one.
#[macro_export]
macro_rules! chain {
    ($($parser:expr),* $(,)?) => {
        $crate::engine::Chain::new(vec![$($crate::engine::ParserExt::boxed($parser)),*])
    };
}

/// Build a [`OneOf`] from a list of alternatives, boxing each one.
#[macro_export]
macro_rules! one_of {
    ($($parser:expr),* $(,)?) => {
        $crate::engine::OneOf::new(vec![$($crate::engine::ParserExt::boxed($parser)),*])
    };
}

/// All parsers in order, each on the previous one's remainder. All must succeed.
pub struct Chain<T, I: ?Sized + Stream = str> {
    parsers: Vec<BoxedParser<T, I>>,
}

impl<T, I: ?Sized + Stream> Chain<T, I> {
    pub fn new(parsers: Vec<BoxedParser<T, I>>) -> Self {
        Self { parsers }
    }
}

impl<T, I: ?Sized + Stream> Parser<T, I> for Chain<T, I> {
    fn apply<'a>(&self, input: Input<'a, I>) -> ParseOutcome<'a, T, I> {
        self.parsers
            .iter()
            .fold(ParseOutcome::empty(input), |outcome, parser| {
                outcome.join_if_both(|rest| parser.apply(rest))
            })
    }
}

/// The first alternative that succeeds on the same input. Listed order is the tie-break.
pub struct OneOf<T, I: ?Sized + Stream = str> {
    alternatives: Vec<BoxedParser<T, I>>,
}

impl<T, I: ?Sized + Stream> OneOf<T, I> {
    pub fn new(alternatives: Vec<BoxedParser<T, I>>) -> Self {
        Self { alternatives }
    }
}

impl<T, I: ?Sized + Stream> Parser<T, I> for OneOf<T, I> {
    fn apply<'a>(&self, input: Input<'a, I>) -> ParseOutcome<'a, T, I> {
        self.alternatives
            .iter()
            .map(|alternative| alternative.apply(input))
            .find(ParseOutcome::is_success)
            .unwrap_or_else(|| ParseOutcome::failure(input))
    }
}

/// One or more repetitions, values concatenated.
pub struct Many<P> {
    inner: P,
}

impl<P> Many<P> {
    pub fn new(inner: P) -> Self {
        Self { inner }
    }
}

impl<T, I: ?Sized + Stream, P: Parser<T, I>> Parser<T, I> for Many<P> {
    fn apply<'a>(&self, input: Input<'a, I>) -> ParseOutcome<'a, T, I> {
        let mut outcome = self.inner.apply(input);
        loop {
            let mut extended = false;
            outcome = outcome.join_if_first(|rest| match self.inner.apply(rest) {
                next if next.is_success() && next.rest().offset() > rest.offset() => {
                    extended = true;
                    next
                }
                _ => ParseOutcome::failure(rest),
            });
            if !extended {
                return outcome;
            }
        }
    }
}

/// Zero or more repetitions. Never fails.
pub struct Many0<P> {
    many: Many<P>,
}

impl<P> Many0<P> {
    pub fn new(inner: P) -> Self {
        Self {
            many: Many::new(inner),
        }
    }
}

impl<T, I: ?Sized + Stream, P: Parser<T, I>> Parser<T, I> for Many0<P> {
    fn apply<'a>(&self, input: Input<'a, I>) -> ParseOutcome<'a, T, I> {
        match self.many.apply(input) {
            ParseOutcome::Failure { .. } => ParseOutcome::empty(input),
            success => success,
        }
    }
}

/// The inner result, or an empty success on the original input. Never fails.
pub struct Opt<P> {
    inner: P,
}

impl<P> Opt<P> {
    pub fn new(inner: P) -> Self {
        Self { inner }
    }
}

impl<T, I: ?Sized + Stream, P: Parser<T, I>> Parser<T, I> for Opt<P> {
    fn apply<'a>(&self, input: Input<'a, I>) -> ParseOutcome<'a, T, I> {
        match self.inner.apply(input) {
            ParseOutcome::Failure { .. } => ParseOutcome::empty(input),
            success => success,
        }
    }
}

/// Consumes what the inner parser matches and produces nothing.
///
/// The produced (empty) list can be of any type, so a dropped delimiter fits into a
/// sequence of any value type.
pub struct Drop<P, A> {
    inner: P,
    _inner_output: PhantomData<fn() -> A>,
}

impl<P, A> Drop<P, A> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            _inner_output: PhantomData,
        }
    }
}

impl<P, A, O, I> Parser<O, I> for Drop<P, A>
where
    P: Parser<A, I>,
    I: ?Sized + Stream,
{
    fn apply<'a>(&self, input: Input<'a, I>) -> ParseOutcome<'a, O, I> {
        self.inner.apply(input).map_values(|_| Vec::new())
    }
}

/// Joins the produced strings into a single string value.
pub struct MapConcat<P> {
    inner: P,
}

impl<P> MapConcat<P> {
    pub fn new(inner: P) -> Self {
        Self { inner }
    }
}

impl<P: Parser<String>> Parser<String> for MapConcat<P> {
    fn apply<'a>(&self, input: Input<'a>) -> ParseOutcome<'a, String> {
        self.inner
            .apply(input)
            .map_values(|values| vec![values.concat()])
    }
}

/// Maps every produced value.
pub struct Map<P, F, A> {
    inner: P,
    f: F,
    _input: PhantomData<fn() -> A>,
}

impl<P, F, A> Map<P, F, A> {
    pub fn new(inner: P, f: F) -> Self {
        Self {
            inner,
            f,
            _input: PhantomData,
        }
    }
}

impl<P, F, A, U, I> Parser<U, I> for Map<P, F, A>
where
    P: Parser<A, I>,
    F: Fn(A) -> U,
    I: ?Sized + Stream,
{
    fn apply<'a>(&self, input: Input<'a, I>) -> ParseOutcome<'a, U, I> {
        self.inner
            .apply(input)
            .map_values(|values| values.into_iter().map(&self.f).collect())
    }
}

/// Folds the whole produced list into a single value.
pub struct MapAll<P, F, A> {
    inner: P,
    f: F,
    _input: PhantomData<fn() -> A>,
}

impl<P, F, A> MapAll<P, F, A> {
    pub fn new(inner: P, f: F) -> Self {
        Self {
            inner,
            f,
            _input: PhantomData,
        }
    }
}

impl<P, F, A, U, I> Parser<U, I> for MapAll<P, F, A>
where
    P: Parser<A, I>,
    F: Fn(Vec<A>) -> U,
    I: ?Sized + Stream,
{
    fn apply<'a>(&self, input: Input<'a, I>) -> ParseOutcome<'a, U, I> {
        self.inner.apply(input).map_values(|values| vec![(self.f)(values)])
    }
}

/// Pairs each produced value with the offset range of the whole match.
pub struct Spanned<P> {
    inner: P,
}

impl<P> Spanned<P> {
    pub fn new(inner: P) -> Self {
        Self { inner }
    }
}

impl<T, I, P> Parser<(T, Range<usize>), I> for Spanned<P>
where
    P: Parser<T, I>,
    I: ?Sized + Stream,
{
    fn apply<'a>(&self, input: Input<'a, I>) -> ParseOutcome<'a, (T, Range<usize>), I> {
        match self.inner.apply(input) {
            ParseOutcome::Success { values, rest } => {
                let span = input.offset()..rest.offset();
                let values = values
                    .into_iter()
                    .map(|value| (value, span.clone()))
                    .collect();
                ParseOutcome::success(values, rest)
            }
            ParseOutcome::Failure { rest } => ParseOutcome::failure(rest),
        }
    }
}

/// Reads characters until the terminator would match.
///
/// One character is consumed before each terminator check, so at least one character is
/// always read. Each consumed character is produced as its own value. By default the
/// terminator is left in the remainder; [`Until::dropping`] consumes and discards it.
/// Running out of input before the terminator matches is a failure.
pub struct Until<P, U> {
    terminator: P,
    consume_terminator: bool,
    _terminator_output: PhantomData<fn() -> U>,
}

impl<P, U> Until<P, U> {
    pub fn new(terminator: P) -> Self {
        Self {
            terminator,
            consume_terminator: false,
            _terminator_output: PhantomData,
        }
    }

    pub fn dropping(terminator: P) -> Self {
        Self {
            consume_terminator: true,
            ..Self::new(terminator)
        }
    }
}

impl<P: Parser<U>, U> Parser<String> for Until<P, U> {
    fn apply<'a>(&self, input: Input<'a>) -> ParseOutcome<'a, String> {
        let mut consumed = Vec::new();
        let mut cursor = input;
        while let Some((c, rest)) = cursor.split_first() {
            consumed.push(c.to_string());
            if let ParseOutcome::Success { rest: after, .. } = self.terminator.apply(rest) {
                let rest = if self.consume_terminator { after } else { rest };
                return ParseOutcome::success(consumed, rest);
            }
            cursor = rest;
        }
        ParseOutcome::failure(input)
    }
}

/// `Value (Sep Value)*`: one or more values; separator output is discarded.
///
/// A separator that is not followed by a value is left unconsumed.
pub struct SeparatedBy<V, S, U> {
    value: V,
    separator: S,
    _separator_output: PhantomData<fn() -> U>,
}

impl<V, S, U> SeparatedBy<V, S, U> {
    pub fn new(value: V, separator: S) -> Self {
        Self {
            value,
            separator,
            _separator_output: PhantomData,
        }
    }
}

impl<T, U, V, S, I> Parser<T, I> for SeparatedBy<V, S, U>
where
    V: Parser<T, I>,
    S: Parser<U, I>,
    I: ?Sized + Stream,
{
    fn apply<'a>(&self, input: Input<'a, I>) -> ParseOutcome<'a, T, I> {
        let mut outcome = self.value.apply(input);
        loop {
            let mut extended = false;
            outcome = outcome.join_if_first(|rest| {
                let pair = match self.separator.apply(rest) {
                    ParseOutcome::Success { rest: after, .. } => self.value.apply(after),
                    ParseOutcome::Failure { rest } => ParseOutcome::failure(rest),
                };
                if pair.is_success() && pair.rest().offset() > rest.offset() {
                    extended = true;
                    pair
                } else {
                    ParseOutcome::failure(rest)
                }
            });
            if !extended {
                return outcome;
            }
        }
    }
}

/// Zero or more separated values. Never fails.
pub struct SeparatedBy0<V, S, U> {
    inner: Opt<SeparatedBy<V, S, U>>,
}

impl<V, S, U> SeparatedBy0<V, S, U> {
    pub fn new(value: V, separator: S) -> Self {
        Self {
            inner: Opt::new(SeparatedBy::new(value, separator)),
        }
    }
}

impl<T, U, V, S, I> Parser<T, I> for SeparatedBy0<V, S, U>
where
    V: Parser<T, I>,
    S: Parser<U, I>,
    I: ?Sized + Stream,
{
    fn apply<'a>(&self, input: Input<'a, I>) -> ParseOutcome<'a, T, I> {
        self.inner.apply(input)
    }
}

/// Succeeds, producing nothing, only when the input is exhausted.
#[derive(Debug, Clone, Copy, Default)]
pub struct End;

impl<T, I: ?Sized + Stream> Parser<T, I> for End {
    fn apply<'a>(&self, input: Input<'a, I>) -> ParseOutcome<'a, T, I> {
        if input.is_empty() {
            ParseOutcome::empty(input)
        } else {
            ParseOutcome::failure(input)
        }
    }
}
