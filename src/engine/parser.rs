//! The parser trait and its fluent construction helpers.

use std::marker::PhantomData;
use std::ops::Range;
use std::sync::Arc;

use super::combinators::{
    Drop, Many, Many0, Map, MapAll, MapConcat, Opt, SeparatedBy, SeparatedBy0, Spanned,
};
use super::input::{Input, Stream};
use super::outcome::ParseOutcome;

/// A pure function from input to [`ParseOutcome`].
///
/// Parsers hold no mutable state: applying the same parser to the same input always gives
/// the same outcome, and a built grammar can be applied any number of times.
///
/// `I` is the kind of source walked. Most parsers read text; a parser over `[Token]`
/// reads the output of an earlier stage.
pub trait Parser<T, I: ?Sized + Stream = str> {
    fn apply<'a>(&self, input: Input<'a, I>) -> ParseOutcome<'a, T, I>;
}

/// A type-erased parser, shareable across threads.
pub type BoxedParser<T, I = str> = Box<dyn Parser<T, I> + Send + Sync>;

impl<T, I: ?Sized + Stream, P: Parser<T, I> + ?Sized> Parser<T, I> for Box<P> {
    fn apply<'a>(&self, input: Input<'a, I>) -> ParseOutcome<'a, T, I> {
        (**self).apply(input)
    }
}

impl<T, I: ?Sized + Stream, P: Parser<T, I> + ?Sized> Parser<T, I> for &P {
    fn apply<'a>(&self, input: Input<'a, I>) -> ParseOutcome<'a, T, I> {
        (**self).apply(input)
    }
}

impl<T, I: ?Sized + Stream, P: Parser<T, I> + ?Sized> Parser<T, I> for Arc<P> {
    fn apply<'a>(&self, input: Input<'a, I>) -> ParseOutcome<'a, T, I> {
        (**self).apply(input)
    }
}

/// Run `grammar` against `source` from its first character.
pub fn parse<'a, T>(source: &'a str, grammar: &impl Parser<T>) -> ParseOutcome<'a, T> {
    grammar.apply(Input::new(source))
}

/// Run `grammar` against a slice of items from its first item.
pub fn parse_items<'a, T, U>(
    items: &'a [U],
    grammar: &impl Parser<T, [U]>,
) -> ParseOutcome<'a, T, [U]> {
    grammar.apply(Input::new(items))
}

/// A parser backed by a plain function.
pub struct FnParser<F, T, I: ?Sized = str> {
    f: F,
    _output: PhantomData<fn(&I) -> T>,
}

/// Lift a function into a [`Parser`].
pub fn from_fn<T, I, F>(f: F) -> FnParser<F, T, I>
where
    I: ?Sized + Stream,
    F: for<'a> Fn(Input<'a, I>) -> ParseOutcome<'a, T, I>,
{
    FnParser {
        f,
        _output: PhantomData,
    }
}

impl<T, I, F> Parser<T, I> for FnParser<F, T, I>
where
    I: ?Sized + Stream,
    F: for<'a> Fn(Input<'a, I>) -> ParseOutcome<'a, T, I>,
{
    fn apply<'a>(&self, input: Input<'a, I>) -> ParseOutcome<'a, T, I> {
        (self.f)(input)
    }
}

/// Method-style access to the combinators.
///
/// `digit().many().concat()` reads the same as `MapConcat::new(Many::new(digit()))`.
pub trait ParserExt<T, I: ?Sized + Stream = str>: Parser<T, I> + Sized {
    fn many(self) -> Many<Self> {
        Many::new(self)
    }

    fn many0(self) -> Many0<Self> {
        Many0::new(self)
    }

    fn opt(self) -> Opt<Self> {
        Opt::new(self)
    }

    /// Consume but produce nothing. The output type is chosen by the surrounding parser.
    fn drop(self) -> Drop<Self, T> {
        Drop::new(self)
    }

    fn map<U, F>(self, f: F) -> Map<Self, F, T>
    where
        F: Fn(T) -> U,
    {
        Map::new(self, f)
    }

    fn map_all<U, F>(self, f: F) -> MapAll<Self, F, T>
    where
        F: Fn(Vec<T>) -> U,
    {
        MapAll::new(self, f)
    }

    fn spanned(self) -> Spanned<Self> {
        Spanned::new(self)
    }

    fn separated_by<S, U>(self, separator: S) -> SeparatedBy<Self, S, U>
    where
        S: Parser<U, I>,
    {
        SeparatedBy::new(self, separator)
    }

    fn separated_by0<S, U>(self, separator: S) -> SeparatedBy0<Self, S, U>
    where
        S: Parser<U, I>,
    {
        SeparatedBy0::new(self, separator)
    }

    fn boxed(self) -> BoxedParser<T, I>
    where
        Self: Send + Sync + 'static,
    {
        Box::new(self)
    }
}

impl<T, I: ?Sized + Stream, P: Parser<T, I>> ParserExt<T, I> for P {}

/// String-producing parsers can be flattened into one token.
pub trait ConcatExt: Parser<String> + Sized {
    fn concat(self) -> MapConcat<Self> {
        MapConcat::new(self)
    }
}

impl<P: Parser<String>> ConcatExt for P {}

/// A value paired with the range of the match that produced it, in bytes for text and in
/// items for other streams.
pub type WithSpan<T> = (T, Range<usize>);
