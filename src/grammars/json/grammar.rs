//! JSON subset grammar
//!
//! ```text
//! value   := number | array | object | null | boolean | string
//! number  := digit+
//! string  := '"' any+ '"'
//! array   := '[' ws (value (ws ',' ws value)*)? ws ']'
//! object  := '{' ws (pair (ws ',' ws pair)*)? ws '}'
//! pair    := string ws ':' ws value
//! ```
//!
//! Alternatives are tried in the listed order. Whitespace is only allowed at the places the
//! rules name. Strings have no escapes: the body runs to the next `"`.

use crate::engine::{
    char_of, digit, literal, recursive_with_depth_limit, whitespace, Chain, Char, ConcatExt,
    Drop, Input, Many0, ParseOutcome, Parser, ParserExt, Recursive, Until,
};
use crate::settings::JsonConfig;
use crate::{chain, one_of};
use tracing::trace;

use super::value::JsonValue;

/// The JSON grammar as a self-referencing `value` rule.
pub struct JsonGrammar {
    value: Recursive<JsonValue>,
}

impl JsonGrammar {
    pub fn new(config: &JsonConfig) -> Self {
        trace!(max_depth = config.max_depth, "building json grammar");
        let value = recursive_with_depth_limit(config.max_depth, |value| {
            one_of![
                number(),
                array(&value),
                object(&value),
                null(),
                boolean(),
                string(),
            ]
        });
        Self { value }
    }
}

impl Default for JsonGrammar {
    fn default() -> Self {
        Self::new(&JsonConfig::default())
    }
}

impl Parser<JsonValue> for JsonGrammar {
    fn apply<'a>(&self, input: Input<'a>) -> ParseOutcome<'a, JsonValue> {
        self.value.apply(input)
    }
}

fn skip_whitespace() -> Drop<Many0<Char>, String> {
    whitespace().many0().drop()
}

/// `symbol` with optional whitespace on both sides.
fn padded(symbol: char) -> Chain<String> {
    chain![skip_whitespace(), char_of(symbol), skip_whitespace()]
}

fn number() -> impl Parser<JsonValue> + Send + Sync + 'static {
    digit().many().concat().map(JsonValue::Number)
}

fn string() -> impl Parser<JsonValue> + Send + Sync + 'static {
    chain![
        char_of('"').drop(),
        Until::new(char_of('"')).concat(),
        char_of('"').drop(),
    ]
    .map(JsonValue::String)
}

fn boolean() -> impl Parser<JsonValue> + Send + Sync + 'static {
    let keyword = one_of![literal("true"), literal("false")];
    keyword.map(|word: String| JsonValue::Boolean(word == "true"))
}

fn null() -> impl Parser<JsonValue> + Send + Sync + 'static {
    literal("null").map(|_: String| JsonValue::Null)
}

fn array(value: &Recursive<JsonValue>) -> Chain<JsonValue> {
    chain![
        char_of('[').drop(),
        skip_whitespace(),
        value
            .clone()
            .separated_by0(padded(','))
            .map_all(JsonValue::Array),
        skip_whitespace(),
        char_of(']').drop(),
    ]
}

fn object(value: &Recursive<JsonValue>) -> Chain<JsonValue> {
    let pair = chain![string(), padded(':').drop(), value.clone()];
    chain![
        char_of('{').drop(),
        skip_whitespace(),
        pair.separated_by0(padded(',')).map_all(JsonValue::from_pairs),
        skip_whitespace(),
        char_of('}').drop(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::parse;
    use rstest::rstest;

    fn grammar() -> JsonGrammar {
        JsonGrammar::default()
    }

    fn num(n: &str) -> JsonValue {
        JsonValue::Number(n.to_string())
    }

    fn single(source: &str) -> Option<JsonValue> {
        let outcome = parse(source, &grammar());
        if !outcome.rest().is_empty() {
            return None;
        }
        outcome.into_values().and_then(|mut values| values.pop())
    }

    #[test]
    fn test_number() {
        assert_eq!(single("123"), Some(num("123")));
    }

    #[test]
    fn test_string() {
        assert_eq!(single("\"hi\""), Some(JsonValue::String("hi".into())));
        assert_eq!(single("\"a b:c\""), Some(JsonValue::String("a b:c".into())));
    }

    #[test]
    fn test_empty_string_is_rejected() {
        assert!(parse("\"\"", &grammar()).is_failure());
    }

    #[rstest]
    #[case("true", JsonValue::Boolean(true))]
    #[case("false", JsonValue::Boolean(false))]
    #[case("null", JsonValue::Null)]
    fn test_keywords(#[case] source: &str, #[case] expected: JsonValue) {
        assert_eq!(single(source), Some(expected));
    }

    #[test]
    fn test_mixed_array() {
        let mut object = indexmap::IndexMap::new();
        object.insert("key".to_string(), JsonValue::String("value".into()));
        assert_eq!(
            single("[1, 2, true, null, {\"key\":\"value\"}, []]"),
            Some(JsonValue::Array(vec![
                num("1"),
                num("2"),
                JsonValue::Boolean(true),
                JsonValue::Null,
                JsonValue::Object(object),
                JsonValue::Array(vec![]),
            ]))
        );
    }

    #[rstest]
    #[case("[]")]
    #[case("[ ]")]
    #[case("[\n1 ,\t2\n]")]
    #[case("{}")]
    #[case("{ \"a\" : 1 , \"b\":[ ] }")]
    fn test_whitespace_at_padding_points(#[case] source: &str) {
        assert!(single(source).is_some(), "{source:?} should parse");
    }

    #[test]
    fn test_trailing_comma_leaves_array_open() {
        let outcome = parse("[1,]", &grammar());
        assert!(outcome.is_failure());
    }

    #[test]
    fn test_object_keys_keep_order() {
        let value = single("{\"z\": 1, \"a\": 2, \"z\": 3}").unwrap();
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["z", "a"]);
        assert_eq!(value.get("z"), Some(&num("3")));
    }

    #[test]
    fn test_leading_whitespace_is_not_a_value() {
        assert!(parse(" 1", &grammar()).is_failure());
    }

    #[test]
    fn test_remainder_after_value() {
        let outcome = parse("12 34", &grammar());
        assert_eq!(outcome.values(), Some(&[num("12")][..]));
        assert_eq!(outcome.rest().as_str(), " 34");
    }

    #[test]
    fn test_depth_limit() {
        let shallow = JsonGrammar::new(&JsonConfig {
            max_depth: 3,
            allow_trailing_input: false,
        });
        assert!(parse("[[1]]", &shallow).is_success());
        let outcome = parse("[[[1]]]", &shallow);
        assert!(outcome.is_failure());
        assert_eq!(outcome.rest().offset(), 0);
    }

    #[test]
    fn test_deep_nesting_within_default_limit() {
        let source = format!("{}1{}", "[".repeat(100), "]".repeat(100));
        assert!(single(&source).is_some());
    }
}
