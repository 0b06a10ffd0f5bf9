//! Grammars built on the combinator engine.

pub mod arrow;
pub mod json;
