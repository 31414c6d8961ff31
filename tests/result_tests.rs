use brrtapi::result::{ApiResult, ErrorEntry, Format, Message, Payload, Rendered};
use serde::Serialize;
use serde_json::{json, Map, Value};

fn args(v: Value) -> Option<Map<String, Value>> {
    match v {
        Value::Object(map) => Some(map),
        _ => None,
    }
}

#[test]
fn test_defaults() {
    let result = ApiResult::new();
    assert!(!result.status());
    assert!(result.messages().is_empty());
    assert!(!result.has_errors());
    assert_eq!(result.count(), None);
    assert_eq!(result.data(), &Payload::Empty);
}

#[test]
fn test_set_message_normalizes_whitespace() {
    let mut result = ApiResult::new();
    result.set_message("Order\n\tplaced   for\r\n you", None);
    match result.render_messages(Format::Plain, "", false) {
        Rendered::Messages(messages) => {
            assert_eq!(messages.len(), 1);
            assert_eq!(messages[0].text, "Order placed for you");
        }
        other => panic!("unexpected rendering {other:?}"),
    }
}

#[test]
fn test_empty_message_is_ignored() {
    let mut result = ApiResult::new();
    result.set_message("", None);
    assert!(result.messages().is_empty());
}

#[test]
fn test_set_messages_appends_verbatim() {
    let mut result = ApiResult::new();
    result
        .set_message("first", None)
        .set_messages(["second  raw", "third\nraw"]);
    let texts: Vec<&str> = result.messages().iter().map(|m| m.text.as_str()).collect();
    assert_eq!(texts, vec!["first", "second  raw", "third\nraw"]);
}

#[test]
fn test_set_error_message_fails_result() {
    let mut result = ApiResult::new();
    result.set_status(true).set_error_message("Nope", None);
    assert!(!result.status());
    assert_eq!(result.messages()[0], Message::new("Nope", None));
}

#[test]
fn test_clear_messages_keeps_status_and_errors() {
    let mut result = ApiResult::new();
    result
        .set_status(true)
        .set_message("hello", None)
        .set_error("field", json!("bad"), None)
        .clear_messages();
    assert!(result.messages().is_empty());
    assert!(result.status());
    assert_eq!(result.error_count(), 1);
}

#[test]
fn test_set_error_shapes() {
    let mut result = ApiResult::new();
    result
        .set_error("name", json!("Name  is\nrequired"), None)
        .set_error("single", json!(["only"]), None)
        .set_error("multi", json!(["a", "b"]), None)
        .set_error("nested", json!({"min": "too short", "max": "too long"}), None);

    assert_eq!(result.has_error("name"), Some(json!("Name is required")));
    assert_eq!(result.has_error("single"), Some(json!("only")));
    assert_eq!(result.has_error("multi_0"), Some(json!("a")));
    assert_eq!(result.has_error("multi_1"), Some(json!("b")));
    assert_eq!(result.has_error("nested_min"), Some(json!("too short")));
    assert_eq!(result.has_error("nested_max"), Some(json!("too long")));
    assert_eq!(result.has_error("multi"), None);
    assert_eq!(result.error_count(), 6);
}

#[test]
fn test_set_error_null_removes() {
    let mut result = ApiResult::new();
    result.set_error("a", json!("x"), None).set_error("a", Value::Null, None);
    assert!(!result.has_errors());
    result.set_error("missing", Value::Null, None);
    assert_eq!(result.error_count(), 0);
}

#[test]
fn test_malformed_keys_are_ignored() {
    let mut result = ApiResult::new();
    result.set_error("ok.key_1", json!("x"), None);
    let before = result.errors().clone();
    for key in ["", "has space", "dash-key", "slash/key", "ümlaut", "a[0]"] {
        result.set_error(key, json!("y"), None);
        result.set_error(key, Value::Null, None);
    }
    assert_eq!(result.errors(), &before);
}

#[test]
fn test_set_error_fanout_forces_subkeys() {
    let mut result = ApiResult::new();
    let mut values = Map::new();
    values.insert("only".into(), json!("one"));
    result.set_error_fanout("field", values);
    assert_eq!(result.has_error("field_only"), Some(json!("one")));
    assert_eq!(result.has_error("field"), None);
}

#[test]
fn test_set_errors_bulk_overwrites_by_key() {
    let mut result = ApiResult::new();
    result.set_error("a", json!("old"), None);
    result.set_errors([("a", ErrorEntry::from("new")), ("b", ErrorEntry::from("other"))]);
    assert_eq!(result.has_error("a"), Some(json!("new")));
    assert_eq!(result.error_count(), 2);
}

#[test]
fn test_errors_do_not_sync_status() {
    let mut result = ApiResult::new();
    result.set_status(true).set_error("x", json!("boom"), None);
    assert!(result.status());
    assert!(result.has_errors());
}

#[test]
fn test_add_entry_bounded_keeps_newest() {
    let mut result = ApiResult::new();
    for i in 0..10 {
        result.add_entry(json!(i), 3);
        assert!(result.count().is_some_and(|n| n <= 3));
    }
    assert_eq!(result.data().to_value(), json!([7, 8, 9]));
}

#[test]
fn test_add_entry_coerces_scalar() {
    let mut result = ApiResult::new();
    result.set_values(json!("scalar"), false).add_entry(json!(1), 0);
    assert_eq!(result.data().to_value(), json!([1]));
    assert_eq!(result.count(), Some(1));
}

#[test]
fn test_count_scalar_is_none() {
    let mut result = ApiResult::new();
    result.set_values(json!(12), false);
    assert_eq!(result.count(), None);
    result.set_values(json!({"a": 1, "b": 2}), false);
    assert_eq!(result.count(), Some(2));
}

#[test]
fn test_add_entry_assoc_on_mapping_and_record() {
    let mut result = ApiResult::new();
    result.add_entry_assoc("a", json!(1)).add_entry_assoc("b", json!(2));
    assert_eq!(result.data().to_value(), json!({"a": 1, "b": 2}));

    #[derive(Serialize)]
    struct Pet {
        name: &'static str,
    }
    result.set_values(Payload::record(&Pet { name: "Rex" }), false);
    result.add_entry_assoc("age", json!(4));
    assert!(matches!(result.data(), Payload::Record(_)));
    assert_eq!(result.get_value("name"), Some(&json!("Rex")));
    assert_eq!(result.get_value("age"), Some(&json!(4)));
}

#[test]
fn test_set_values_append() {
    let mut result = ApiResult::new();
    result.set_values(json!([1, 2]), true);
    assert_eq!(result.data().to_value(), json!([1, 2]));
    result.set_values(json!([3]), true);
    assert_eq!(result.data().to_value(), json!([1, 2, 3]));
    result.set_values(json!({"a": 1}), true);
    assert_eq!(result.data().to_value(), json!({"a": 1}));
    result.set_values(json!({"b": 2}), true);
    assert_eq!(result.data().to_value(), json!({"a": 1, "b": 2}));
    result.set_values(json!("x"), false);
    assert_eq!(result.data().to_value(), json!("x"));
}

#[test]
fn test_set_valid_values_always_succeeds() {
    let mut result = ApiResult::new();
    result.set_error_message("failed earlier", None).set_valid_values(json!(1), false);
    assert!(result.status());
    assert_eq!(result.data().to_value(), json!(1));
}

#[test]
fn test_set_valid_values_attach() {
    let mut result = ApiResult::new();
    result.set_valid_values(json!("a"), true);
    assert_eq!(result.data().to_value(), json!(["a"]));
    result.set_valid_values(json!("b"), true);
    assert_eq!(result.data().to_value(), json!(["a", "b"]));

    let mut scalar = ApiResult::new();
    scalar.set_values(json!({"id": 1}), false).set_valid_values(json!({"id": 2}), true);
    assert_eq!(scalar.data().to_value(), json!([{"id": 1}, {"id": 2}]));
}

#[test]
fn test_secondary_values() {
    let mut result = ApiResult::new();
    result.set_secondary_values(json!(502), Some("http_status"));
    assert_eq!(result.get_secondary_value("http_status"), Some(&json!(502)));

    result.set_secondary_values(json!({"trace": "abc"}), None);
    assert_eq!(result.secondary().to_value(), json!({"trace": "abc"}));

    result.set_secondary_values(Value::Null, Some("ignored"));
    assert_eq!(result.secondary(), &Payload::Empty);

    result.set_secondary_value(-1, json!("first")).set_secondary_value(-1, json!("second"));
    assert_eq!(result.secondary().to_value(), json!(["first", "second"]));

    result.set_secondary_value("k", json!(true));
    assert_eq!(result.get_secondary_value("k"), Some(&json!(true)));
    assert_eq!(result.get_secondary_value("0"), Some(&json!("first")));
}

#[test]
fn test_secondary_independent_of_data() {
    let mut result = ApiResult::new();
    result.set_values(json!([1]), false).set_secondary_value("code", json!(200));
    assert_eq!(result.data().to_value(), json!([1]));
    assert_eq!(result.get_value("code"), None);
}

#[test]
fn test_get_values_sorts_records() {
    let mut result = ApiResult::new();
    result.set_values(
        json!([
            {"name": "c", "rank": 3},
            {"name": "a", "rank": 1},
            {"name": "b1", "rank": 2},
            {"name": "b2", "rank": 2},
        ]),
        false,
    );
    let sorted = result.get_values(Some("rank")).to_value();
    let names: Vec<&str> = sorted
        .as_array()
        .map(|a| a.iter().filter_map(|r| r["name"].as_str()).collect())
        .unwrap_or_default();
    assert_eq!(names, vec!["a", "b1", "b2", "c"]);

    let by_name = result.get_values(Some("name")).to_value();
    assert_eq!(by_name[0]["name"], "a");
    assert_eq!(by_name[3]["name"], "c");
}

#[test]
fn test_get_values_without_key_keeps_order() {
    let mut result = ApiResult::new();
    result.set_values(json!([3, 1, 2]), false);
    assert_eq!(result.get_values(None).to_value(), json!([3, 1, 2]));
}

#[test]
fn test_merge_from_partial() {
    let mut parent = ApiResult::new();
    parent
        .set_values(json!({"parent": true}), false)
        .set_secondary_value("p", json!(1))
        .set_message("parent message", None);

    let mut child = ApiResult::new();
    child
        .set_valid_values(json!({"child": true}), false)
        .set_message("child message", None)
        .set_error("child_err", json!("x"), None);

    parent.merge_from(&child, false);
    assert!(parent.status());
    assert_eq!(parent.messages().len(), 2);
    assert_eq!(parent.has_error("child_err"), Some(json!("x")));
    assert_eq!(parent.data().to_value(), json!({"parent": true}));
    assert_eq!(parent.get_secondary_value("p"), Some(&json!(1)));
}

#[test]
fn test_merge_from_full() {
    let mut parent = ApiResult::new();
    parent.set_values(json!([1]), false);

    let mut child = ApiResult::new();
    child
        .set_values(json!({"c": 1}), false)
        .set_secondary_values(json!({"s": 2}), None);

    parent.merge_from(&child, true);
    assert_eq!(parent.data(), child.data());
    assert_eq!(parent.secondary(), child.secondary());
    assert!(!parent.status());
}

#[test]
fn test_serializes_as_plain_structure() {
    let mut result = ApiResult::new();
    result.set_valid_values(json!([1]), false);
    let value = serde_json::to_value(&result).expect("serializable");
    assert_eq!(
        value,
        json!({
            "message": [],
            "status": true,
            "errors": {},
            "errorsCount": 0,
            "values": [1],
            "secondary": null,
        })
    );
}

#[test]
fn test_message_args_are_kept_in_plain() {
    let mut result = ApiResult::new();
    result.set_message("Hello :name", args(json!({":name": "Ada"})));
    let plain = result.render_messages(Format::Plain, "", false).to_value();
    assert_eq!(plain, json!([{"text": "Hello :name", "args": {":name": "Ada"}}]));
}
