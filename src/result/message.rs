use once_cell::sync::Lazy;
use regex::Regex;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// Placeholder arguments substituted into message text at render time.
///
/// Keys are the literal placeholder tokens; a key of the form
/// `field:formatter` selects a formatter (only `price` is built in).
pub type Args = Map<String, Value>;

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"\s+").expect("valid whitespace regex")
});

/// Collapse every run of whitespace (spaces, tabs, newlines) into one space.
#[must_use]
pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").into_owned()
}

/// A human-readable message with its placeholder arguments.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    pub text: String,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub args: Args,
}

impl Message {
    /// Normalized message: whitespace runs in `text` are collapsed.
    pub fn new(text: impl AsRef<str>, args: Option<Args>) -> Self {
        Self {
            text: normalize_whitespace(text.as_ref()),
            args: args.unwrap_or_default(),
        }
    }

    /// Message stored verbatim, without normalization.
    pub fn raw(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            args: Args::new(),
        }
    }
}

impl From<&str> for Message {
    fn from(text: &str) -> Self {
        Message::raw(text)
    }
}

impl From<String> for Message {
    fn from(text: String) -> Self {
        Message::raw(text)
    }
}

/// Value stored under an error key: a message record or a raw value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ErrorEntry {
    Message(Message),
    Raw(Value),
}

impl ErrorEntry {
    /// The entry as a JSON value, for lookups through `has_error`.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            ErrorEntry::Message(m) => Value::String(m.text.clone()),
            ErrorEntry::Raw(v) => v.clone(),
        }
    }
}

impl From<&str> for ErrorEntry {
    fn from(text: &str) -> Self {
        ErrorEntry::Raw(Value::String(text.to_string()))
    }
}

impl From<Value> for ErrorEntry {
    fn from(value: Value) -> Self {
        ErrorEntry::Raw(value)
    }
}

impl From<Message> for ErrorEntry {
    fn from(message: Message) -> Self {
        ErrorEntry::Message(message)
    }
}

/// Insertion-ordered error buffer with unique keys.
///
/// Overwriting an existing key keeps its original position.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ErrorBag {
    entries: Vec<(String, ErrorEntry)>,
}

impl ErrorBag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, entry: ErrorEntry) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = entry,
            None => self.entries.push((key, entry)),
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<ErrorEntry> {
        let pos = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(pos).1)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ErrorEntry> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, e)| e)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ErrorEntry)> {
        self.entries.iter().map(|(k, e)| (k.as_str(), e))
    }
}

impl Serialize for ErrorBag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, e) in &self.entries {
            map.serialize_entry(k, e)?;
        }
        map.end()
    }
}

impl<K: Into<String>> FromIterator<(K, ErrorEntry)> for ErrorBag {
    fn from_iter<I: IntoIterator<Item = (K, ErrorEntry)>>(iter: I) -> Self {
        let mut bag = ErrorBag::new();
        for (k, e) in iter {
            bag.insert(k, e);
        }
        bag
    }
}

impl IntoIterator for ErrorBag {
    type Item = (String, ErrorEntry);
    type IntoIter = std::vec::IntoIter<(String, ErrorEntry)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
