//! JSON subset grammar
//!
//! Natural numbers, strings without escapes, `true`/`false`/`null`, arrays and objects.
//! Parsing yields a tagged [`JsonValue`] tree; [`unwrap_value`] turns it into a plain
//! [`serde_json::Value`].

pub mod grammar;
pub mod unwrap;
pub mod value;

use once_cell::sync::Lazy;
use tracing::debug;

use crate::diagnostics::ParseError;
use crate::engine::{Input, ParseOutcome, Parser};
use crate::settings::ArrowparseConfig;

pub use self::grammar::JsonGrammar;
pub use self::unwrap::unwrap_value;
pub use self::value::JsonValue;

static DEFAULT_GRAMMAR: Lazy<JsonGrammar> = Lazy::new(JsonGrammar::default);

impl JsonGrammar {
    /// The shared grammar built from default settings.
    pub fn shared() -> &'static JsonGrammar {
        &DEFAULT_GRAMMAR
    }
}

/// Parse one JSON document with default settings.
///
/// Whitespace around the value is ignored; anything else after it is an error.
pub fn parse_json(source: &str) -> Result<JsonValue, ParseError> {
    let config = ArrowparseConfig::default();
    run(JsonGrammar::shared(), source, &config)
}

/// Parse one JSON document with explicit settings.
pub fn parse_json_with(source: &str, config: &ArrowparseConfig) -> Result<JsonValue, ParseError> {
    run(&JsonGrammar::new(&config.json), source, config)
}

/// Parse and unwrap in one step.
pub fn parse_native(source: &str) -> Result<serde_json::Value, ParseError> {
    parse_json(source).map(unwrap_value)
}

pub fn parse_native_with(
    source: &str,
    config: &ArrowparseConfig,
) -> Result<serde_json::Value, ParseError> {
    parse_json_with(source, config).map(unwrap_value)
}

fn run(
    grammar: &JsonGrammar,
    source: &str,
    config: &ArrowparseConfig,
) -> Result<JsonValue, ParseError> {
    let width = config.diagnostics.snippet_width;
    let start = skip_whitespace(Input::new(source));
    debug!(grammar = "json", input_len = source.len(), "parsing document");

    let (values, rest) = match grammar.apply(start) {
        ParseOutcome::Success { values, rest } => (values, rest),
        ParseOutcome::Failure { rest } => {
            debug!(grammar = "json", offset = rest.offset(), "no match");
            return Err(ParseError::no_match("json", rest, width));
        }
    };

    let trailing = skip_whitespace(rest);
    if !trailing.is_empty() && !config.json.allow_trailing_input {
        debug!(grammar = "json", offset = trailing.offset(), "trailing input");
        return Err(ParseError::trailing_input("json", trailing, width));
    }

    let value = values
        .into_iter()
        .next()
        .ok_or_else(|| ParseError::no_match("json", start, width))?;
    debug!(grammar = "json", kind = value.kind(), "parsed");
    Ok(value)
}

fn skip_whitespace(input: Input<'_>) -> Input<'_> {
    let text = input.as_str();
    input.at(input.offset() + (text.len() - text.trim_start().len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Position;
    use serde_json::json;

    #[test]
    fn test_parse_json_trims_surrounding_whitespace() {
        assert_eq!(parse_json("  \n 42 \t\n"), Ok(JsonValue::Number("42".into())));
    }

    #[test]
    fn test_trailing_input_is_rejected() {
        let error = parse_json("[1] [2]").unwrap_err();
        assert!(matches!(error, ParseError::TrailingInput { .. }));
        assert_eq!(error.offset(), 4);
        assert_eq!(error.position(), Position::new(0, 4));
    }

    #[test]
    fn test_trailing_input_allowed_by_config() {
        let mut config = ArrowparseConfig::default();
        config.json.allow_trailing_input = true;
        assert_eq!(parse_native_with("[1] [2]", &config), Ok(json!([1])));
    }

    #[test]
    fn test_no_match_position() {
        let error = parse_json("\n  @").unwrap_err();
        assert!(matches!(error, ParseError::NoMatch { .. }));
        assert_eq!(error.position(), Position::new(1, 2));
    }

    #[test]
    fn test_parse_native() {
        assert_eq!(
            parse_native("[1, 2, true, null, {\"key\":\"value\"}, []]"),
            Ok(json!([1, 2, true, null, {"key": "value"}, []]))
        );
    }

    #[test]
    fn test_depth_limit_from_config() {
        let mut config = ArrowparseConfig::default();
        config.json.max_depth = 2;
        assert!(parse_json_with("[1]", &config).is_ok());
        assert!(parse_json_with("[[1]]", &config).is_err());
    }

    #[test]
    fn test_shared_grammar_is_reused() {
        assert!(std::ptr::eq(JsonGrammar::shared(), JsonGrammar::shared()));
    }
}
