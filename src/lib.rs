//! # arrowparse
//!
//! A small parser-combinator engine and two grammars written with it:
//!
//! - [`grammars::arrow`]: state-machine transitions in arrow notation (`A --go--> B`)
//! - [`grammars::json`]: a JSON subset, parsed into a tagged tree and unwrapped to
//!   [`serde_json::Value`]
//!
//! Parsers are plain values implementing [`engine::Parser`]. Applying one never panics or
//! errors; it returns a [`engine::ParseOutcome`] holding the produced values and the
//! unconsumed remainder. The convenience entry points turn a failed or partial parse into a
//! [`diagnostics::ParseError`] with a line/column position.
//!
//! ## Configuration
//!
//! Grammar knobs live in [`settings::ArrowparseConfig`]; defaults are embedded from
//! `defaults/arrowparse.default.toml` and can be layered with [`settings::Loader`].

pub mod diagnostics;
pub mod engine;
pub mod grammars;
pub mod settings;

pub use diagnostics::{ParseError, Position};
pub use engine::{parse, Input, ParseOutcome, Parser, ParserExt};
pub use grammars::arrow::{
    parse_statements, parse_table, parse_transitions, Statement, Transition, TransitionTable,
};
pub use grammars::json::{parse_json, parse_native, JsonValue};
pub use settings::ArrowparseConfig;
