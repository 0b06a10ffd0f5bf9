//! Parser-combinator engine
//!
//! Parsers are values implementing [`Parser`]: pure functions from an [`Input`] to a
//! [`ParseOutcome`]. Grammars are assembled by composing combinators over primitive
//! character and literal matchers, then run with [`parse`].
//!
//! Sources are text unless stated otherwise. The same combinators also run over a slice of
//! items, which is how a grammar reads the token stream of an earlier stage.
//!
//! Layout:
//!   ├── input         the unconsumed-suffix view over a source
//!   ├── outcome       success/failure results and the two joining rules
//!   ├── parser        the Parser trait, boxing, fluent helpers and the entry point
//!   ├── primitives    character, literal and item matchers
//!   ├── combinators   sequencing, alternation, repetition and mapping
//!   └── recursive     rules that refer to themselves or to each other

pub mod combinators;
pub mod input;
pub mod outcome;
pub mod parser;
pub mod primitives;
pub mod recursive;

pub use combinators::{
    Chain, Drop, End, Many, Many0, Map, MapAll, MapConcat, OneOf, Opt, SeparatedBy, SeparatedBy0,
    Spanned, Until,
};
pub use input::{Input, Stream};
pub use outcome::ParseOutcome;
pub use parser::{
    from_fn, parse, parse_items, BoxedParser, ConcatExt, FnParser, Parser, ParserExt, WithSpan,
};
pub use primitives::{
    char_of, char_where, digit, inline_whitespace, letter, literal, one_char_of, select,
    whitespace, Char, CharClass, Literal, Select,
};
pub use recursive::{recursive, recursive_with_depth_limit, Recursive};
