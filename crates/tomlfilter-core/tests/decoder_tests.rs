use tomlfilter_core::{from_toml, parse, parse_slice, FilterError, Value};

fn map(entries: Vec<(&str, Value)>) -> Value {
    Value::Map(entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
}

fn decode(text: &str) -> Value {
    from_toml(&Value::from(text)).expect("from_toml failed")
}

// ============================================================================
// Scalars
// ============================================================================

#[test]
fn decode_basic_string() {
    assert_eq!(
        decode(r#"title = "TOML Example""#),
        map(vec![("title", Value::from("TOML Example"))])
    );
}

#[test]
fn decode_literal_string() {
    assert_eq!(
        decode(r"path = 'C:\Users\nodejs'"),
        map(vec![("path", Value::from(r"C:\Users\nodejs"))])
    );
}

#[test]
fn decode_multiline_string() {
    let doc = decode("text = \"\"\"\nline one\nline two\"\"\"");
    assert_eq!(doc.get("text"), Some(&Value::from("line one\nline two")));
}

#[test]
fn decode_integers() {
    let doc = decode("dec = 42\nneg = -17\nhex = 0xff\nsep = 1_000");
    assert_eq!(doc.get("dec"), Some(&Value::Integer(42)));
    assert_eq!(doc.get("neg"), Some(&Value::Integer(-17)));
    assert_eq!(doc.get("hex"), Some(&Value::Integer(255)));
    assert_eq!(doc.get("sep"), Some(&Value::Integer(1000)));
}

#[test]
fn decode_floats() {
    let doc = decode("pi = 3.14\nexp = 5e+22\ninf = inf");
    assert_eq!(doc.get("pi"), Some(&Value::Float(3.14)));
    assert_eq!(doc.get("exp"), Some(&Value::Float(5e22)));
    assert_eq!(doc.get("inf"), Some(&Value::Float(f64::INFINITY)));
}

#[test]
fn decode_nan() {
    let doc = decode("x = nan");
    match doc.get("x") {
        Some(Value::Float(f)) => assert!(f.is_nan()),
        other => panic!("expected NaN float, got {other:?}"),
    }
}

#[test]
fn decode_booleans() {
    let doc = decode("yes = true\nno = false");
    assert_eq!(doc.get("yes"), Some(&Value::Bool(true)));
    assert_eq!(doc.get("no"), Some(&Value::Bool(false)));
}

#[test]
fn decode_offset_datetime() {
    let doc = decode("dob = 1979-05-27T07:32:00Z");
    assert_eq!(
        doc.get("dob"),
        Some(&Value::Datetime("1979-05-27T07:32:00Z".into()))
    );
}

#[test]
fn decode_local_date_and_time() {
    let doc = decode("day = 1979-05-27\nat = 07:32:00");
    assert_eq!(doc.get("day"), Some(&Value::Datetime("1979-05-27".into())));
    assert_eq!(doc.get("at"), Some(&Value::Datetime("07:32:00".into())));
}

// ============================================================================
// Tables and arrays
// ============================================================================

#[test]
fn decode_empty_document() {
    assert_eq!(decode(""), Value::Map(vec![]));
}

#[test]
fn decode_array() {
    assert_eq!(
        decode("ports = [8000, 8001, 8002]"),
        map(vec![(
            "ports",
            Value::Array(vec![8000.into(), 8001.into(), 8002.into()])
        )])
    );
}

#[test]
fn decode_mixed_array() {
    let doc = decode(r#"mixed = [1, "two", 3.0]"#);
    assert_eq!(
        doc.get("mixed"),
        Some(&Value::Array(vec![
            Value::Integer(1),
            Value::from("two"),
            Value::Float(3.0)
        ]))
    );
}

#[test]
fn decode_nested_tables() {
    let doc = decode(
        r#"
[database]
server = "192.168.1.1"
enabled = true

[database.limits]
connections = 5000
"#,
    );
    assert_eq!(
        doc,
        map(vec![(
            "database",
            map(vec![
                ("server", Value::from("192.168.1.1")),
                ("enabled", Value::Bool(true)),
                ("limits", map(vec![("connections", Value::Integer(5000))])),
            ])
        )])
    );
}

#[test]
fn decode_dotted_keys() {
    let doc = decode("site.name = \"x\"\nsite.port = 80");
    assert_eq!(
        doc.get("site"),
        Some(&map(vec![
            ("name", Value::from("x")),
            ("port", Value::Integer(80))
        ]))
    );
}

#[test]
fn decode_inline_table() {
    let doc = decode("point = { x = 1, y = 2 }");
    assert_eq!(
        doc.get("point"),
        Some(&map(vec![("x", 1.into()), ("y", 2.into())]))
    );
}

#[test]
fn decode_array_of_tables() {
    let doc = decode(
        r#"
[[products]]
name = "Hammer"
sku = 738594937

[[products]]
name = "Nail"
sku = 284758393
"#,
    );
    assert_eq!(
        doc.get("products"),
        Some(&Value::Array(vec![
            map(vec![("name", "Hammer".into()), ("sku", 738594937.into())]),
            map(vec![("name", "Nail".into()), ("sku", 284758393.into())]),
        ]))
    );
}

#[test]
fn decode_keeps_document_key_order() {
    let doc = decode("b = 1\na = 2\nc = 3");
    let keys: Vec<&str> = doc.as_map().unwrap().iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(keys, ["b", "a", "c"]);
}

#[test]
fn decode_quoted_and_unicode_keys() {
    let doc = decode("\"key with spaces\" = 1\n\"ʎǝʞ\" = 2");
    assert_eq!(doc.get("key with spaces"), Some(&Value::Integer(1)));
    assert_eq!(doc.get("ʎǝʞ"), Some(&Value::Integer(2)));
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn decode_rejects_non_string_input() {
    let err = from_toml(&Value::Integer(123)).unwrap_err();
    assert!(
        matches!(
            err,
            FilterError::Type {
                filter: "from_toml",
                expected: "string",
                ref actual,
            } if actual == "integer"
        ),
        "unexpected error: {err:?}"
    );
    assert_eq!(err.to_string(), "from_toml requires a string, got integer");
}

#[test]
fn decode_rejects_mapping_input() {
    let err = from_toml(&map(vec![("a", 1.into())])).unwrap_err();
    assert!(matches!(err, FilterError::Type { ref actual, .. } if actual == "mapping"));
}

#[test]
fn decode_missing_value_is_conversion_error() {
    let err = from_toml(&Value::from("key = ")).unwrap_err();
    match &err {
        FilterError::Conversion {
            filter, message, ..
        } => {
            assert_eq!(*filter, "from_toml");
            assert!(message.contains("TOML parse error"), "message: {message}");
        }
        other => panic!("expected conversion error, got {other:?}"),
    }
    assert!(err.to_string().starts_with("from_toml - "));
}

#[test]
fn decode_error_message_carries_parser_diagnostic() {
    let err = from_toml(&Value::from("key = ")).unwrap_err();
    let source = std::error::Error::source(&err).expect("conversion error keeps its cause");
    assert!(
        err.to_string().contains(&source.to_string()),
        "{err} should contain {source}"
    );
}

#[test]
fn decode_duplicate_key_fails() {
    let err = parse("a = 1\na = 2").unwrap_err();
    assert!(matches!(err, FilterError::Conversion { .. }));
}

#[test]
fn decode_unterminated_string_fails() {
    assert!(parse("a = \"open").is_err());
}

// ============================================================================
// Byte input
// ============================================================================

#[test]
fn parse_slice_accepts_utf8() {
    let doc = parse_slice("name = \"café\"".as_bytes()).unwrap();
    assert_eq!(doc.get("name"), Some(&Value::from("café")));
}

#[test]
fn parse_slice_rejects_invalid_utf8() {
    let err = parse_slice(b"name = \"\xff\"").unwrap_err();
    match err {
        FilterError::Conversion { filter, message, .. } => {
            assert_eq!(filter, "from_toml");
            assert!(message.contains("invalid utf-8"), "message: {message}");
        }
        other => panic!("expected conversion error, got {other:?}"),
    }
}
