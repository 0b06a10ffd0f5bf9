//! JSON grammar, end to end

use arrowparse::grammars::json::{parse_json_with, parse_native_with, unwrap_value, JsonGrammar};
use arrowparse::settings::Loader;
use arrowparse::{parse, parse_json, parse_native, ArrowparseConfig, JsonValue, ParseError};
use rstest::rstest;
use serde_json::json;

#[rstest]
#[case("123", json!(123))]
#[case("\"hi\"", json!("hi"))]
#[case("true", json!(true))]
#[case("null", json!(null))]
#[case("[]", json!([]))]
#[case("{}", json!({}))]
#[case(
    "[1, 2, true, null, {\"key\":\"value\"}, []]",
    json!([1, 2, true, null, {"key": "value"}, []])
)]
#[case("{\"a\": {\"b\": [\"c\", 0]}}", json!({"a": {"b": ["c", 0]}}))]
fn unwraps_documents(#[case] source: &str, #[case] expected: serde_json::Value) {
    assert_eq!(parse_native(source), Ok(expected));
}

#[rstest]
#[case::empty_input("")]
#[case::empty_string("\"\"")]
#[case::negative_number("-1")]
#[case::fraction("1.5")]
#[case::trailing_comma("[1, 2,]")]
#[case::unquoted_key("{a: 1}")]
#[case::missing_colon("{\"a\" 1}")]
#[case::unclosed_array("[1, 2")]
#[case::capitalized_keyword("True")]
fn rejects_documents(#[case] source: &str) {
    assert!(parse_json(source).is_err(), "{source:?} should be rejected");
}

#[test]
fn tagged_tree_keeps_number_text() {
    assert_eq!(parse_json("0042"), Ok(JsonValue::Number("0042".into())));
    assert_eq!(parse_native("0042"), Ok(json!(42)));
}

#[test]
fn object_keys_keep_document_order() {
    let value = parse_native("{\"zeta\": 1, \"alpha\": 2, \"mid\": 3}").unwrap();
    insta::assert_snapshot!(value.to_string(), @r#"{"zeta":1,"alpha":2,"mid":3}"#);
}

#[test]
fn repeated_key_takes_last_value() {
    let value = parse_native("{\"a\": 1, \"b\": 2, \"a\": 3}").unwrap();
    insta::assert_snapshot!(value.to_string(), @r#"{"a":3,"b":2}"#);
}

#[test]
fn string_body_runs_to_next_quote() {
    assert_eq!(
        parse_native("[\"a, b\", \"{not: json}\"]"),
        Ok(json!(["a, b", "{not: json}"]))
    );
}

#[test]
fn trailing_input_error_message() {
    let error = parse_json("{\"a\": 1}\n  oops").unwrap_err();
    assert!(matches!(error, ParseError::TrailingInput { .. }));
    insta::assert_snapshot!(
        error.to_string(),
        @r#"json: unexpected trailing input at 2:3 near "oops""#
    );
}

#[test]
fn engine_reports_remainder_without_trimming() {
    let outcome = parse("[1] tail", JsonGrammar::shared());
    assert!(outcome.is_success());
    assert_eq!(outcome.rest().as_str(), " tail");
    let values = outcome.into_values().unwrap();
    assert_eq!(values.into_iter().map(unwrap_value).collect::<Vec<_>>(), vec![json!([1])]);
}

#[test]
fn nesting_limit_comes_from_config() {
    let config = Loader::new()
        .set_override("json.max_depth", 4)
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(parse_native_with("[[[1]]]", &config), Ok(json!([[[1]]])));
    let error = parse_json_with("[[[[1]]]]", &config).unwrap_err();
    assert_eq!(error.offset(), 0);
}

#[test]
fn default_limit_rejects_runaway_nesting() {
    let source = format!("{}{}", "[".repeat(130), "]".repeat(130));
    assert!(parse_json(&source).is_err());
    let mut config = ArrowparseConfig::default();
    config.json.max_depth = 200;
    assert!(parse_json_with(&source, &config).is_ok());
}
