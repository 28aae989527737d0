// tests/evaluator_tests.rs

use mapq::{
    Document, EvalError, Evaluator, PathFailure, Value, evaluate, json_to_document, parse, query,
};
use serde_json::json;

fn doc(value: serde_json::Value) -> Document {
    json_to_document(value).unwrap()
}

fn check(document: &Document, expression: &str) -> Result<bool, EvalError> {
    let expr = parse(expression).unwrap();
    evaluate(&expr, document)
}

// ============================================================================
// Numbers
// ============================================================================

#[test]
fn test_numbers_compare_across_widths() {
    let mut document = Document::new();
    document.insert("a".to_string(), Value::from(2_i32));
    document.insert("b".to_string(), Value::from(7_u8));
    document.insert("c".to_string(), Value::from(0.5_f32));

    assert!(check(&document, "a == 2.0").unwrap());
    assert!(check(&document, "a == 2").unwrap());
    assert!(check(&document, "b == 7 && c == 0.5").unwrap());
    assert!(check(&document, "a != 2.5").unwrap());
}

#[test]
fn test_arithmetic_is_floating_point() {
    let document = doc(json!({"a": 3, "b": 2}));
    assert!(check(&document, "a / b == 1.5").unwrap());
    assert!(check(&document, "a - b * 2 == -1").unwrap());

    let expr = parse("a * 2").unwrap();
    assert_eq!(
        Evaluator::new(&document).eval(&expr).unwrap(),
        Value::Float(6.0)
    );
}

#[test]
fn test_division_by_zero_follows_ieee() {
    let document = doc(json!({"a": 1, "b": 0}));
    assert!(check(&document, "a / b == a / b").unwrap());
    assert!(check(&document, "a / b > 1000000").unwrap());

    let document = doc(json!({"a": 0, "b": 0}));
    assert!(!check(&document, "a / b == a / b").unwrap());
    assert!(check(&document, "a / b != a / b").unwrap());
}

#[test]
fn test_unary_signs() {
    let document = doc(json!({"a": 3, "s": "x"}));
    assert!(check(&document, "-a == -3").unwrap());
    assert!(check(&document, "+a == 3").unwrap());
    assert!(check(&document, "-s == 0").unwrap());
}

#[test]
fn test_radix_literals_evaluate() {
    let document = doc(json!({"mask": 255, "flags": 5}));
    assert!(check(&document, "mask == 0xff && flags == 0b101").unwrap());
}

// ============================================================================
// Coercion
// ============================================================================

#[test]
fn test_non_numbers_order_as_zero() {
    let document = doc(json!({"s": "abc", "n": null, "o": {"k": 1}}));
    assert!(check(&document, "s > -1").unwrap());
    assert!(check(&document, "s + 1 == 1").unwrap());
    assert!(check(&document, "n <= 0 && n >= 0").unwrap());
    assert!(check(&document, "o * 5 == 0").unwrap());
}

#[test]
fn test_chained_comparison_uses_boolean_as_zero() {
    // (a < b) is a boolean, which orders as 0
    let document = doc(json!({"a": 1, "b": 2, "c": 3}));
    assert!(check(&document, "a < b < c").unwrap());

    let document = doc(json!({"a": 1, "b": 2, "c": -1}));
    assert!(!check(&document, "a < b < c").unwrap());

    let document = doc(json!({"a": 3, "b": 2, "c": 1}));
    assert!(check(&document, "a < b < c").unwrap());
}

// ============================================================================
// Equality
// ============================================================================

#[test]
fn test_equality_of_other_types() {
    let document = doc(json!({"s": "abc", "flag": true, "n": null}));
    assert!(check(&document, "s == 'abc'").unwrap());
    assert!(!check(&document, "s == 0").unwrap());
    assert!(check(&document, "flag == true").unwrap());
    assert!(!check(&document, "flag == 1").unwrap());
    assert!(check(&document, "n == null").unwrap());
    assert!(check(&document, "n != 0").unwrap());
}

#[test]
fn test_nested_objects_compare_as_stored() {
    let document = doc(json!({"x": {"a": 1}, "y": {"a": 1}}));
    assert!(check(&document, "x == y").unwrap());

    // Integer and float leaves differ once nested
    let document = doc(json!({"x": {"a": 1}, "y": {"a": 1.0}}));
    assert!(!check(&document, "x == y").unwrap());
}

// ============================================================================
// Field paths
// ============================================================================

#[test]
fn test_missing_leaf_is_null() {
    let document = doc(json!({"a": {}}));
    assert!(check(&document, "a.x == null").unwrap());
    assert!(!check(&document, "a.x == 1").unwrap());
    assert!(check(&document, "missing == null").unwrap());
}

#[test]
fn test_missing_intermediate_is_an_error() {
    let document = doc(json!({"a": 1}));
    let err = check(&document, "b.c == 1").unwrap_err();
    assert_eq!(
        err,
        EvalError::PathError {
            path: "b.c".into(),
            reason: PathFailure::Missing {
                segment: "b".into()
            }
        }
    );
    assert_eq!(
        err.to_string(),
        "Path error: cannot resolve 'b.c': 'b' is missing"
    );
}

#[test]
fn test_non_object_intermediate_is_an_error() {
    let document = doc(json!({"a": {"b": "text"}}));
    assert_eq!(
        check(&document, "a.b.c == 1").unwrap_err(),
        EvalError::PathError {
            path: "a.b.c".into(),
            reason: PathFailure::NotAnObject {
                segment: "b".into(),
                found: "string"
            }
        }
    );
}

#[test]
fn test_deep_path() {
    let document = doc(json!({"a": 1, "b": 2, "c": {"d": {"e": 3}}}));
    assert!(check(&document, "a == 1 && b == 2 && c.d.e == 3").unwrap());
}

// ============================================================================
// Logical operators
// ============================================================================

#[test]
fn test_short_circuit_skips_right_operand() {
    let document = doc(json!({"a": 1}));
    assert!(!check(&document, "false && missing.x == 1").unwrap());
    assert!(check(&document, "true || missing.x == 1").unwrap());
    assert!(matches!(
        check(&document, "true && missing.x == 1"),
        Err(EvalError::PathError { .. })
    ));
}

#[test]
fn test_logical_operands_must_be_boolean() {
    let document = doc(json!({"a": 1}));
    assert!(matches!(
        check(&document, "a && true"),
        Err(EvalError::TypeError(_))
    ));
    assert!(matches!(
        check(&document, "true && a"),
        Err(EvalError::TypeError(_))
    ));
    assert!(matches!(
        check(&document, "false || a"),
        Err(EvalError::TypeError(_))
    ));
}

#[test]
fn test_not_requires_boolean() {
    let document = doc(json!({"a": 1, "flag": false}));
    assert!(check(&document, "!flag").unwrap());
    assert!(check(&document, "!(a == 2)").unwrap());
    let err = check(&document, "!a").unwrap_err();
    assert_eq!(
        err,
        EvalError::TypeError("'!' requires a boolean operand, got integer".into())
    );
}

#[test]
fn test_root_must_be_boolean() {
    let document = doc(json!({"a": 1, "flag": true}));
    assert!(matches!(check(&document, "a + 1"), Err(EvalError::TypeError(_))));
    assert!(matches!(check(&document, "'x'"), Err(EvalError::TypeError(_))));
    assert!(check(&document, "flag").unwrap());
}

// ============================================================================
// Reuse
// ============================================================================

#[test]
fn test_one_tree_many_documents() {
    let expr = parse("score >= 50").unwrap();
    let documents: Vec<Document> = (0..100)
        .map(|i| doc(json!({ "score": i })))
        .collect();

    std::thread::scope(|scope| {
        let handles: Vec<_> = documents
            .chunks(25)
            .map(|chunk| {
                let expr = &expr;
                scope.spawn(move || {
                    chunk
                        .iter()
                        .filter(|d| evaluate(expr, d).unwrap())
                        .count()
                })
            })
            .collect();
        let total: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(total, 50);
    });
}

#[test]
fn test_long_chains_evaluate() {
    let sum = format!("{} == 3000", vec!["one"; 3000].join(" + "));
    let alternatives = (0..3000)
        .map(|i| format!("id == {}", i))
        .collect::<Vec<_>>()
        .join(" || ");
    let document = doc(json!({"one": 1, "id": 2999}));

    assert!(check(&document, &sum).unwrap());
    assert!(check(&document, &alternatives).unwrap());
    assert!(!check(&doc(json!({"one": 1, "id": 3000})), &alternatives).unwrap());
}

#[test]
fn test_reparsing_gives_the_same_results() {
    let expressions = [
        "a == 1 && !(b == 2 || b == 3)",
        "(a + b) * b == 10",
        "x.y.z != null",
        "a / b == a / b",
        "s > -1 | flag",
        "b.c == 1",
        "a < b < c",
    ];
    let documents = [
        json!({"a": 1, "b": 2}),
        json!({"a": 3, "b": 2, "c": 1, "x": {"y": {}}}),
        json!({"a": 0, "b": 0, "s": "t", "flag": true}),
        json!({"b": 5, "x": 1}),
        json!({"b": {"c": 1}, "x": {"y": {"z": 4}}}),
    ]
    .map(doc);

    for expression in expressions {
        let first = parse(expression).unwrap();
        let second = parse(expression).unwrap();
        assert_eq!(first, second, "{}", expression);

        for document in &documents {
            assert_eq!(
                evaluate(&first, document),
                evaluate(&second, document),
                "{}",
                expression
            );
        }
    }

    // The set above exercises failures as well as matches
    let b_path = parse("b.c == 1").unwrap();
    assert!(matches!(
        evaluate(&b_path, &documents[3]),
        Err(EvalError::PathError { .. })
    ));
    assert!(evaluate(&b_path, &documents[4]).unwrap());
}

#[test]
fn test_query_accepts_hand_built_documents() {
    let mut address = Document::new();
    address.insert("city".to_string(), Value::from("Oslo"));
    let mut document = Document::new();
    document.insert("address".to_string(), Value::Object(address));
    document.insert("age".to_string(), Value::from(41_u32));

    assert!(query(&document, "address.city == 'Oslo' && age > 40").unwrap());
}
