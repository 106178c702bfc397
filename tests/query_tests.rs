// tests/query_tests.rs

use fieldq::output::{to_json, to_json_pretty};
use fieldq::{
    Engine, EngineOptions, Error, EvalError, MergeStrategy, ParseError, Token, Value, run,
};
use serde_json::json;

fn query(q: &str, doc: serde_json::Value) -> Option<Value> {
    run(q, &Value::from(doc)).unwrap_or_else(|e| panic!("query {:?} failed: {}", q, e))
}

fn query_with(merge: MergeStrategy, q: &str, doc: serde_json::Value) -> Option<Value> {
    Engine::new(EngineOptions { merge })
        .run(q, &Value::from(doc))
        .unwrap_or_else(|e| panic!("query {:?} failed: {}", q, e))
}

fn matches(q: &str, doc: serde_json::Value) -> bool {
    query(q, doc).is_some()
}

fn vincent() -> serde_json::Value {
    json!({"data": {"id": 1, "name": "Vincent"}})
}

// ============================================================================
// Selection
// ============================================================================

#[test]
fn test_simple_query() {
    assert_eq!(query(".data.id", vincent()), Some(Value::Integer(1)));
}

#[test]
fn test_simple_filter() {
    assert_eq!(
        query(".data.name where (.data.id == 1)", vincent()),
        Some(Value::from("Vincent"))
    );
}

#[test]
fn test_root_selector_returns_document() {
    assert_eq!(query(".", vincent()), Some(Value::from(vincent())));
}

#[test]
fn test_internal_node_selection() {
    assert_eq!(
        query(".data", vincent()),
        Some(Value::from(json!({"id": 1, "name": "Vincent"})))
    );
}

#[test]
fn test_no_selectors_yield_empty_object() {
    let empty = Some(Value::Object(Default::default()));

    assert_eq!(query("", vincent()), empty);
    assert_eq!(query("where (.data.id == 1)", vincent()), empty);
}

#[test]
fn test_disjoint_selectors_merge() {
    let doc = json!({"a": {"x": 1}, "b": "two", "c": 3});

    assert_eq!(
        query(".a.x, .b", doc),
        Some(Value::from(json!({"a": {"x": 1}, "b": "two"})))
    );
}

#[test]
fn test_overwrite_merge_drops_siblings() {
    assert_eq!(
        query(".data.id, .data.name", vincent()),
        Some(Value::from(json!({"data": {"name": "Vincent"}})))
    );
}

#[test]
fn test_deep_merge_keeps_siblings() {
    assert_eq!(
        query_with(MergeStrategy::Deep, ".data.id, .data.name", vincent()),
        Some(Value::from(vincent()))
    );
}

#[test]
fn test_deep_merge_with_filter() {
    let doc = json!({"data": {"id": 1, "name": "Vincent", "platform": {"type": "mobile"}}});

    assert_eq!(
        query_with(
            MergeStrategy::Deep,
            r#".data.id, .data.platform.type where (.data.platform.type == "mobile")"#,
            doc
        ),
        Some(Value::from(
            json!({"data": {"id": 1, "platform": {"type": "mobile"}}})
        ))
    );
}

// ============================================================================
// Conditions
// ============================================================================

#[test]
fn test_operators_fold_without_precedence() {
    // Parsed as ((.id == 1) and .age) > 0.3, whose left side is not a field
    assert!(!matches(". where (.id == 1 and .age > 0.3)", json!({"id": 5, "age": 0.3})));
    assert!(!matches(". where (.id == 1 and .age > 0.3)", json!({"id": 1, "age": 0.5})));
}

#[test]
fn test_grouped_and() {
    let doc = json!({"id": 1, "age": 0.5});

    assert!(matches(". where ((.id == 1) and (.age > 0.3))", doc.clone()));
    assert!(!matches(". where ((.id == 2) and (.age > 0.3))", doc));
}

#[test]
fn test_grouped_or() {
    let doc = json!({"id": 1, "name": "foobar"});

    assert!(matches(r#". where ((.id == 2) or (.name == "foobar"))"#, doc.clone()));
    assert!(!matches(r#". where ((.id == 2) or (.name != "foobar"))"#, doc));
}

#[test]
fn test_in_with_literals_never_matches() {
    assert_eq!(query(". where (.id in [1,2,3])", json!({"id": 2})), None);
    assert_eq!(query(". where (.id in [])", json!({"id": 2})), None);
}

#[test]
fn test_contains_never_matches() {
    let doc = json!({"names": ["foobar", "barbaz"]});

    assert_eq!(query(r#". where (.names contains ["foobar"])"#, doc.clone()), None);
    assert_eq!(query(r#". where (.names contains "foobar")"#, doc), None);
}

#[test]
fn test_relational_operators() {
    let doc = json!({"data": {"id": 1}});
    let test_cases = vec![
        ("(.data.id == 1)", true),
        ("(.data.id != 1)", false),
        ("(.data.id <= 100)", true),
        ("(.data.id <= 1)", true),
        ("(.data.id >= -100)", true),
        ("(.data.id >= 1)", true),
        ("(.data.id >= 2)", false),
        ("(.data.id < 1)", false),
        ("(.data.id < 2)", true),
        ("(.data.id > 0)", true),
        ("(.data.id > 1)", false),
    ];

    for (condition, expected) in test_cases {
        let q = format!(". where {}", condition);
        assert_eq!(matches(&q, doc.clone()), expected, "Failed for condition: {}", condition);
    }
}

#[test]
fn test_integer_field_truncates_float_literal() {
    let doc = json!({"n": 2});

    assert!(matches(". where (.n == 2.9)", doc.clone()));
    assert!(!matches(". where (.n < 2.9)", doc));
}

#[test]
fn test_float_field_promotes_integer_literal() {
    let doc = json!({"f": 2.5});

    assert!(matches(". where (.f > 2)", doc.clone()));
    assert!(!matches(". where (.f == 2)", doc.clone()));
    assert!(matches(". where (.f == 2.5)", doc));
}

#[test]
fn test_string_literal_quotes_are_ignored() {
    let doc = json!({"data": {"platform": {"type": "mobile"}}});

    assert!(matches(r#". where (.data.platform.type == "mobile")"#, doc.clone()));
    assert!(matches(". where (.data.platform.type == 'mobile')", doc.clone()));
    assert!(matches(r#". where (.data.platform.type < "web")"#, doc.clone()));
    assert!(!matches(r#". where (.data.platform.type == "desktop")"#, doc));
}

#[test]
fn test_document_strings_keep_single_quotes() {
    let doc = json!({"a": "x", "b": "'x'", "c": "\"x\""});

    assert!(!matches(". where (.a == .b)", doc.clone()));
    assert!(matches(". where (.b == \"'x'\")", doc.clone()));
    // One layer of double quotes is dropped from any right-hand string
    assert!(matches(". where (.a == .c)", doc));
}

#[test]
fn test_char_literal_quotes_are_ignored() {
    let doc = json!({"q": "\"x\"", "x": "x"});

    assert!(matches(". where (.x == 'x')", doc.clone()));
    assert!(!matches(". where (.q == 'x')", doc));
}

#[test]
fn test_field_against_field() {
    let doc = json!({"a": "x", "b": "x", "low": 1, "high": 10});

    assert!(matches(". where (.a == .b)", doc.clone()));
    assert!(matches(". where (.low < .high)", doc.clone()));
    assert!(!matches(". where (.high < .low)", doc));
}

#[test]
fn test_incomparable_values_never_match() {
    let doc = json!({"n": 1, "b": true, "s": "1", "list": [1]});

    assert!(!matches(r#". where (.n == "1")"#, doc.clone()));
    assert!(!matches(r#". where (.n != "1")"#, doc.clone()));
    assert!(!matches(". where (.s == 1)", doc.clone()));
    assert!(!matches(". where (.b == true)", doc.clone()));
    assert!(!matches(". where (.list == 1)", doc));
}

#[test]
fn test_missing_condition_field_is_false() {
    assert_eq!(query(".data.id where (.data.age > 1)", vincent()), None);
    assert_eq!(query(".data.id where (.data.id == .missing)", vincent()), None);
}

#[test]
fn test_literal_on_left_never_matches() {
    assert_eq!(query(". where (1 == .data.id)", vincent()), None);
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_lone_paren_is_a_parse_error() {
    assert!(matches!(
        run("(", &Value::from(vincent())),
        Err(Error::Parse(ParseError::UnexpectedToken {
            token: Token::LParen,
            ..
        }))
    ));
}

#[test]
fn test_deeply_nested_query_is_an_error() {
    let q = format!(". where {}.a == 1{}", "(".repeat(500), ")".repeat(500));

    assert!(matches!(
        run(&q, &Value::from(json!({"a": 1}))),
        Err(Error::Parse(ParseError::TooDeep { .. }))
    ));
}

#[test]
fn test_non_object_document_is_invalid() {
    let test_cases = vec![json!([1, 2, 3]), json!("text"), json!(42)];

    for doc in test_cases {
        assert_eq!(
            run(".", &Value::from(doc.clone())),
            Err(Error::InvalidObject),
            "Failed for document: {}",
            doc
        );
    }
}

#[test]
fn test_missing_selector_is_an_error() {
    assert_eq!(
        run(".data.id, .data.age", &Value::from(vincent())),
        Err(Error::Eval(EvalError::NonExistingFields {
            path: ".data.age".to_string(),
        }))
    );
}

#[test]
fn test_missing_selector_is_checked_before_condition() {
    assert!(matches!(
        run(".nope where (.data.id == 2)", &Value::from(vincent())),
        Err(Error::Eval(EvalError::NonExistingFields { .. }))
    ));
}

#[test]
fn test_error_messages() {
    let err = run(".x", &Value::from(vincent())).unwrap_err();
    assert_eq!(err.to_string(), "some requested fields do not exist: .x");

    let err = run(".", &Value::Array(vec![])).unwrap_err();
    assert!(err.to_string().starts_with("unable to use the provided object"));
}

// ============================================================================
// Engine
// ============================================================================

#[test]
fn test_run_is_idempotent() {
    let engine = Engine::default();
    let doc = Value::from(vincent());
    let q = ".data.id, .data.name where ((.data.id >= 1) or (.data.name == \"x\"))";

    assert_eq!(engine.run(q, &doc), engine.run(q, &doc));
}

#[test]
fn test_run_json() {
    let engine = Engine::new(EngineOptions {
        merge: MergeStrategy::Deep,
    });

    assert_eq!(
        engine.run_json(".data.id, .data.name", &vincent()),
        Ok(Some(vincent()))
    );
    assert_eq!(engine.run_json(". where (.data.id == 2)", &vincent()), Ok(None));
    assert_eq!(engine.options().merge, MergeStrategy::Deep);
}

#[test]
fn test_output_is_sorted() {
    let result = query_with(MergeStrategy::Deep, ".data.name, .data.id", vincent()).unwrap();

    assert_eq!(to_json(&result), r#"{"data":{"id":1,"name":"Vincent"}}"#);
    assert_eq!(
        to_json_pretty(&result),
        "{\n  \"data\": {\n    \"id\": 1,\n    \"name\": \"Vincent\"\n  }\n}"
    );
}

#[test]
fn test_json_conversion() {
    let doc = json!({"big": u64::MAX, "n": -3, "f": 1.5, "list": [null, true, "s"]});
    let value = Value::from(doc.clone());
    let fields = value.as_object().unwrap();

    assert_eq!(fields["big"], Value::Float(u64::MAX as f64));
    assert_eq!(fields["n"], Value::Integer(-3));
    assert_eq!(
        fields["list"],
        Value::Array(vec![Value::Null, Value::Boolean(true), Value::from("s")])
    );
    assert_eq!(serde_json::Value::from(Value::Float(f64::NAN)), serde_json::Value::Null);
    assert_eq!(
        serde_json::Value::from(Value::from(json!({"n": -3, "list": [1]}))),
        json!({"n": -3, "list": [1]})
    );
    assert!(Value::from_json_str("{").is_err());
}

// ============================================================================
// CLI
// ============================================================================

#[cfg(feature = "cli")]
mod cli {
    use super::*;
    use fieldq::cli::{CheckOptions, CheckResult, CliError, execute_ast, execute_check, execute_paths};

    fn check(q: &str, input: Option<&str>) -> Result<CheckResult, CliError> {
        execute_check(&CheckOptions {
            query: q.to_string(),
            input: input.map(str::to_string),
            ..Default::default()
        })
    }

    #[test]
    fn test_check_success() {
        let result = check(".data.name where (.data.id == 1)", Some(&vincent().to_string()));
        assert_eq!(result.unwrap(), CheckResult::Success(Value::from("Vincent")));
    }

    #[test]
    fn test_check_filtered() {
        let result = check(".data.name where (.data.id == 2)", Some(&vincent().to_string()));
        assert_eq!(result.unwrap(), CheckResult::Filtered);
    }

    #[test]
    fn test_check_merge_option() {
        let result = execute_check(&CheckOptions {
            query: ".data.id, .data.name".to_string(),
            input: Some(vincent().to_string()),
            merge: MergeStrategy::Deep,
            ..Default::default()
        });
        assert_eq!(
            result.unwrap(),
            CheckResult::Success(Value::from(vincent()))
        );
    }

    #[test]
    fn test_check_syntax_only() {
        let ok = execute_check(&CheckOptions {
            query: ".a where (.a == 1)".to_string(),
            syntax_only: true,
            ..Default::default()
        });
        assert_eq!(ok.unwrap(), CheckResult::SyntaxValid);

        let err = execute_check(&CheckOptions {
            query: "(".to_string(),
            syntax_only: true,
            ..Default::default()
        });
        assert!(matches!(err, Err(CliError::Parse(_))));
    }

    #[test]
    fn test_check_input_errors() {
        assert!(matches!(check(".a", None), Err(CliError::NoInput)));
        assert!(matches!(check(".a", Some("{not json")), Err(CliError::Json(_))));
        assert!(matches!(
            check(".a", Some("[1]")),
            Err(CliError::Engine(Error::InvalidObject))
        ));
    }

    #[test]
    fn test_ast() {
        assert_eq!(
            execute_ast(".a, .b").unwrap(),
            "Sequence\n Chain(.a)\n Chain(.b)\n"
        );
        assert!(matches!(execute_ast("= 1"), Err(CliError::Parse(_))));
    }

    #[test]
    fn test_paths() {
        let paths = execute_paths(Some(r#"{"b": {"c": 1}, "a": [1]}"#)).unwrap();
        assert_eq!(paths, vec![".", ".a", ".b", ".b.c"]);
    }
}
