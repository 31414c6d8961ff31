use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::cmp::Ordering;
use tracing::warn;

/// Shape-flexible payload carried by [`ApiResult`](super::ApiResult).
///
/// A payload is either absent, a single value, an ordered sequence, a keyed
/// mapping, or a record (a structured object converted from a `Serialize`
/// type). Accumulation operations coerce between shapes through
/// [`Payload::as_sequence`] and [`Payload::as_mapping`].
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Payload {
    #[default]
    Empty,
    Scalar(Value),
    Sequence(Vec<Value>),
    Mapping(Map<String, Value>),
    /// Field set of a structured object; keyed writes set fields directly.
    Record(Map<String, Value>),
}

impl Payload {
    /// Build a payload from an arbitrary JSON value.
    ///
    /// `null` becomes [`Payload::Empty`], arrays become sequences and objects
    /// become mappings.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Null => Payload::Empty,
            Value::Array(items) => Payload::Sequence(items),
            Value::Object(map) => Payload::Mapping(map),
            other => Payload::Scalar(other),
        }
    }

    /// Build a record payload from a serializable struct.
    ///
    /// Serialization failures are logged and yield [`Payload::Empty`].
    pub fn record<T: Serialize>(value: &T) -> Self {
        match serde_json::to_value(value) {
            Ok(Value::Object(fields)) => Payload::Record(fields),
            Ok(other) => Payload::from_value(other),
            Err(err) => {
                warn!(error = %err, "Failed to convert record payload");
                Payload::Empty
            }
        }
    }

    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Payload::Empty => Value::Null,
            Payload::Scalar(v) => v.clone(),
            Payload::Sequence(items) => Value::Array(items.clone()),
            Payload::Mapping(map) | Payload::Record(map) => Value::Object(map.clone()),
        }
    }

    /// Truthiness of the payload: empty containers and falsy scalars are
    /// "empty"; records always count as present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Payload::Empty => true,
            Payload::Scalar(v) => !is_truthy(v),
            Payload::Sequence(items) => items.is_empty(),
            Payload::Mapping(map) => map.is_empty(),
            Payload::Record(_) => false,
        }
    }

    /// Number of entries for sequences and mappings, `None` for anything
    /// without a meaningful length.
    #[must_use]
    pub fn len(&self) -> Option<usize> {
        match self {
            Payload::Sequence(items) => Some(items.len()),
            Payload::Mapping(map) => Some(map.len()),
            _ => None,
        }
    }

    /// Coerce into a sequence, discarding any non-sequence content.
    pub fn as_sequence(&mut self) -> &mut Vec<Value> {
        if !matches!(self, Payload::Sequence(_)) {
            *self = Payload::Sequence(Vec::new());
        }
        match self {
            Payload::Sequence(items) => items,
            _ => unreachable!("payload was coerced to a sequence above"),
        }
    }

    /// Coerce into a keyed container.
    ///
    /// Mappings and records are returned as-is, sequences are re-keyed by
    /// their positions and scalars are discarded.
    pub fn as_mapping(&mut self) -> &mut Map<String, Value> {
        match std::mem::take(self) {
            Payload::Mapping(map) => *self = Payload::Mapping(map),
            Payload::Record(fields) => *self = Payload::Record(fields),
            Payload::Sequence(items) => {
                let map = items
                    .into_iter()
                    .enumerate()
                    .map(|(i, v)| (i.to_string(), v))
                    .collect();
                *self = Payload::Mapping(map);
            }
            Payload::Empty | Payload::Scalar(_) => *self = Payload::Mapping(Map::new()),
        }
        match self {
            Payload::Mapping(map) | Payload::Record(map) => map,
            _ => unreachable!("payload was coerced to a mapping above"),
        }
    }

    /// Keyed lookup tolerant of mapping, record and positional sequence
    /// backing.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Payload::Mapping(map) | Payload::Record(map) => map.get(key),
            Payload::Sequence(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        }
    }

    /// Merge `other` into `self`.
    ///
    /// Sequences concatenate, mapping-like shapes take the union with
    /// `other` winning on conflicts, and every other combination (including
    /// an empty `self`) is a plain replacement.
    pub fn merge(&mut self, other: Payload) {
        *self = match (std::mem::take(self), other) {
            (Payload::Sequence(mut items), Payload::Sequence(more)) if !items.is_empty() => {
                items.extend(more);
                Payload::Sequence(items)
            }
            (Payload::Mapping(mut map), Payload::Mapping(more) | Payload::Record(more))
                if !map.is_empty() =>
            {
                map.extend(more);
                Payload::Mapping(map)
            }
            (Payload::Record(mut fields), Payload::Mapping(more) | Payload::Record(more)) => {
                fields.extend(more);
                Payload::Record(fields)
            }
            (_, other) => other,
        };
    }

    /// Sort sequence payloads ascending by `field` of each element.
    ///
    /// Elements lacking the field compare as `null`. Non-sequence payloads
    /// are left untouched. The sort is stable.
    pub fn sort_by_field(&mut self, field: &str) {
        if let Payload::Sequence(items) = self {
            items.sort_by(|a, b| compare_values(a.get(field), b.get(field)));
        }
    }
}

impl Serialize for Payload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Payload::Empty => serializer.serialize_none(),
            Payload::Scalar(v) => v.serialize(serializer),
            Payload::Sequence(items) => items.serialize(serializer),
            Payload::Mapping(map) | Payload::Record(map) => map.serialize(serializer),
        }
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        Payload::from_value(value)
    }
}

impl From<Vec<Value>> for Payload {
    fn from(items: Vec<Value>) -> Self {
        Payload::Sequence(items)
    }
}

impl From<Map<String, Value>> for Payload {
    fn from(map: Map<String, Value>) -> Self {
        Payload::Mapping(map)
    }
}

impl From<&str> for Payload {
    fn from(s: &str) -> Self {
        Payload::Scalar(Value::String(s.to_string()))
    }
}

/// Loose truthiness used for "is there anything here" checks.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty() && s != "0",
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

/// Ordering used when sorting records by a field: numbers numerically,
/// strings lexically, booleans false-first, mixed types by type rank.
pub(crate) fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let a = a.unwrap_or(&Value::Null);
    let b = b.unwrap_or(&Value::Null);
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sequence_coercion_discards_scalar() {
        let mut p = Payload::Scalar(json!("x"));
        p.as_sequence().push(json!(1));
        assert_eq!(p, Payload::Sequence(vec![json!(1)]));
    }

    #[test]
    fn test_mapping_coercion_rekeys_sequence() {
        let mut p = Payload::Sequence(vec![json!("a"), json!("b")]);
        p.as_mapping().insert("k".into(), json!("c"));
        assert_eq!(p.to_value(), json!({"0": "a", "1": "b", "k": "c"}));
    }

    #[test]
    fn test_record_keeps_record_shape() {
        #[derive(Serialize)]
        struct Pet {
            name: String,
        }
        let mut p = Payload::record(&Pet { name: "Rex".into() });
        p.as_mapping().insert("age".into(), json!(3));
        assert!(matches!(p, Payload::Record(_)));
        assert_eq!(p.get("age"), Some(&json!(3)));
        assert_eq!(p.len(), None);
    }

    #[test]
    fn test_merge_rules() {
        let mut seq = Payload::from(json!([1]));
        seq.merge(Payload::from(json!([2, 3])));
        assert_eq!(seq.to_value(), json!([1, 2, 3]));

        let mut map = Payload::from(json!({"a": 1, "b": 1}));
        map.merge(Payload::from(json!({"b": 2})));
        assert_eq!(map.to_value(), json!({"a": 1, "b": 2}));

        let mut mixed = Payload::from(json!([1]));
        mixed.merge(Payload::from(json!({"a": 1})));
        assert_eq!(mixed.to_value(), json!({"a": 1}));

        let mut empty = Payload::Sequence(Vec::new());
        empty.merge(Payload::from(json!({"a": 1})));
        assert_eq!(empty.to_value(), json!({"a": 1}));
    }

    #[test]
    fn test_truthiness() {
        assert!(Payload::Empty.is_empty());
        assert!(Payload::Scalar(json!("0")).is_empty());
        assert!(Payload::Scalar(json!(0)).is_empty());
        assert!(!Payload::Scalar(json!("a")).is_empty());
        assert!(!Payload::Record(Map::new()).is_empty());
    }
}
