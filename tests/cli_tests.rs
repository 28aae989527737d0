// tests/cli_tests.rs

use mapq::cli::{
    CheckOptions, CheckResult, CliError, FilterOptions, execute_check, execute_filter,
};
use serde_json::json;

fn check_options(query: &str, input: Option<&str>) -> CheckOptions {
    CheckOptions {
        query: query.to_string(),
        input: input.map(str::to_string),
        ..CheckOptions::default()
    }
}

fn filter_options(query: &str, input: &str) -> FilterOptions {
    FilterOptions {
        query: query.to_string(),
        input: Some(input.to_string()),
        ..FilterOptions::default()
    }
}

// ============================================================================
// check
// ============================================================================

#[test]
fn test_check_object() {
    let options = check_options("a.b == 2", Some(r#"{"a": {"b": 2}}"#));
    assert_eq!(execute_check(&options).unwrap(), CheckResult::Matched(true));

    let options = check_options("a.b == 3", Some(r#"{"a": {"b": 2}}"#));
    assert_eq!(execute_check(&options).unwrap(), CheckResult::Matched(false));
}

#[test]
fn test_check_array_uses_any_match() {
    let input = r#"[{"a": 1}, 7, {"a": 2}]"#;
    let options = check_options("a == 2", Some(input));
    assert_eq!(execute_check(&options).unwrap(), CheckResult::Matched(true));
}

#[test]
fn test_check_syntax_only_needs_no_input() {
    let options = CheckOptions {
        syntax_only: true,
        ..check_options("a == 1 && !b", None)
    };
    assert_eq!(execute_check(&options).unwrap(), CheckResult::SyntaxValid);

    let options = CheckOptions {
        syntax_only: true,
        ..check_options("a ==", None)
    };
    assert!(matches!(execute_check(&options), Err(CliError::Parse(_))));
}

#[test]
fn test_check_without_input() {
    let options = check_options("a == 1", None);
    assert!(matches!(execute_check(&options), Err(CliError::NoInput)));
}

#[test]
fn test_check_errors() {
    let options = check_options("a == 1", Some("not json"));
    assert!(matches!(execute_check(&options), Err(CliError::Json(_))));

    let options = check_options("a == 1", Some("\"text\""));
    assert!(matches!(execute_check(&options), Err(CliError::Decode(_))));

    let options = check_options("a.b == 1", Some(r#"{"a": 1}"#));
    assert!(matches!(execute_check(&options), Err(CliError::Eval(_))));
}

#[test]
fn test_check_respects_max_depth() {
    let options = CheckOptions {
        max_depth: 1,
        syntax_only: true,
        ..check_options("((a == 1))", None)
    };
    let err = execute_check(&options).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Parse error: Expression nesting exceeds the maximum depth of 1"
    );
}

// ============================================================================
// filter
// ============================================================================

#[test]
fn test_filter_keeps_matching_elements_in_order() {
    let input = r#"[
        {"name": "a", "score": 10},
        {"name": "b", "score": 70},
        {"name": "c", "score": 90}
    ]"#;
    let output = execute_filter(&filter_options("score > 50", input)).unwrap();
    assert_eq!(
        output,
        json!([
            {"name": "b", "score": 70},
            {"name": "c", "score": 90}
        ])
    );
}

#[test]
fn test_filter_skips_undecodable_elements() {
    let input = r#"[{"n": 1}, [1, 2], "x", {"n": 2, "list": [3]}, {"n": 3}]"#;
    let output = execute_filter(&filter_options("n >= 1", input)).unwrap();
    assert_eq!(output, json!([{"n": 1}, {"n": 3}]));
}

#[test]
fn test_filter_output_keeps_value_kinds() {
    let input = r#"[{"n": 1.5, "i": -3, "s": "x", "z": null, "o": {"k": true}}]"#;
    let output = execute_filter(&filter_options("o.k", input)).unwrap();
    assert_eq!(
        output,
        json!([{"n": 1.5, "i": -3, "s": "x", "z": null, "o": {"k": true}}])
    );
}

#[test]
fn test_filter_no_matches() {
    let output = execute_filter(&filter_options("n == 9", r#"[{"n": 1}]"#)).unwrap();
    assert_eq!(output, json!([]));
}

#[test]
fn test_filter_requires_array() {
    let err = execute_filter(&filter_options("n == 1", r#"{"n": 1}"#)).unwrap_err();
    assert!(matches!(
        err,
        CliError::Decode(mapq::DecodeError::NotAnArray { found: "object" })
    ));
}

#[test]
fn test_filter_stops_on_eval_error() {
    let input = r#"[{"a": {"b": 1}}, {"a": 2}]"#;
    let err = execute_filter(&filter_options("a.b == 1", input)).unwrap_err();
    assert!(matches!(err, CliError::Eval(_)));
}

#[test]
fn test_filter_without_input() {
    let options = FilterOptions {
        query: "a == 1".to_string(),
        ..FilterOptions::default()
    };
    assert!(matches!(execute_filter(&options), Err(CliError::NoInput)));
}
