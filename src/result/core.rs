use super::message::{Args, ErrorBag, ErrorEntry, Message};
use super::payload::Payload;
use super::render::{
    definition_list, html_list, join_text, Format, Rendered, TextRenderer, WRONG_FORMAT,
};
use super::translate::{Passthrough, Translator, DEFAULT_KIND};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;
use tracing::trace;

static ERROR_KEY: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^[0-9A-Za-z_.]+$").expect("valid error key regex")
});

/// Key for [`ApiResult::set_secondary_value`]: a named slot or a positional
/// append (`-1`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecondaryKey {
    Append,
    Named(String),
}

impl From<&str> for SecondaryKey {
    fn from(key: &str) -> Self {
        SecondaryKey::Named(key.to_string())
    }
}

impl From<String> for SecondaryKey {
    fn from(key: String) -> Self {
        SecondaryKey::Named(key)
    }
}

impl From<i64> for SecondaryKey {
    fn from(key: i64) -> Self {
        if key == -1 {
            SecondaryKey::Append
        } else {
            SecondaryKey::Named(key.to_string())
        }
    }
}

impl From<i32> for SecondaryKey {
    fn from(key: i32) -> Self {
        SecondaryKey::from(i64::from(key))
    }
}

/// Structured outcome of one logical operation.
///
/// An `ApiResult` accumulates four independent buffers while a handler runs:
///
/// - a boolean `status` (default `false`)
/// - ordered human-readable messages with placeholder arguments
/// - keyed error entries
/// - a primary [`Payload`] and a secondary side-channel payload
///
/// Mutators return `&mut Self` so calls can be chained. No operation panics
/// or fails on malformed input; bad keys and values are absorbed.
///
/// # Example
///
/// ```rust
/// use brrtapi::result::{ApiResult, Format};
/// use serde_json::json;
///
/// let mut result = ApiResult::new();
/// result
///     .set_valid_values(json!({"id": 42}), false)
///     .set_message("Pet   created", None);
///
/// assert!(result.status());
/// assert_eq!(
///     result.render_messages(Format::List, "", false).as_text(),
///     Some("<ol><li>Pet created</li></ol>")
/// );
/// ```
#[derive(Clone)]
pub struct ApiResult {
    status: bool,
    messages: Vec<Message>,
    errors: ErrorBag,
    data: Payload,
    secondary: Payload,
    translator: Arc<dyn Translator>,
}

impl Default for ApiResult {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ApiResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiResult")
            .field("status", &self.status)
            .field("messages", &self.messages)
            .field("errors", &self.errors)
            .field("data", &self.data)
            .field("secondary", &self.secondary)
            .finish_non_exhaustive()
    }
}

impl ApiResult {
    /// Empty failed result that renders texts untranslated.
    #[must_use]
    pub fn new() -> Self {
        Self::with_translator(Arc::new(Passthrough))
    }

    #[must_use]
    pub fn with_translator(translator: Arc<dyn Translator>) -> Self {
        Self {
            status: false,
            messages: Vec::new(),
            errors: ErrorBag::new(),
            data: Payload::Empty,
            secondary: Payload::Empty,
            translator,
        }
    }

    #[must_use]
    pub fn status(&self) -> bool {
        self.status
    }

    pub fn set_status(&mut self, status: bool) -> &mut Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    #[must_use]
    pub fn errors(&self) -> &ErrorBag {
        &self.errors
    }

    #[must_use]
    pub fn data(&self) -> &Payload {
        &self.data
    }

    #[must_use]
    pub fn secondary(&self) -> &Payload {
        &self.secondary
    }

    // ------------------------------------------------------------------
    // Messages
    // ------------------------------------------------------------------

    /// Append one message; whitespace runs in `text` are collapsed.
    /// Empty text is ignored.
    pub fn set_message(&mut self, text: &str, args: Option<Args>) -> &mut Self {
        if !text.is_empty() {
            self.messages.push(Message::new(text, args));
        }
        self
    }

    /// Append several messages verbatim (no normalization).
    pub fn set_messages<I, M>(&mut self, messages: I) -> &mut Self
    where
        I: IntoIterator<Item = M>,
        M: Into<Message>,
    {
        self.messages.extend(messages.into_iter().map(Into::into));
        self
    }

    /// Mark the result as failed and append a message.
    pub fn set_error_message(&mut self, text: &str, args: Option<Args>) -> &mut Self {
        self.status = false;
        self.set_message(text, args)
    }

    /// Mark the result as failed and append several messages verbatim.
    pub fn set_error_messages<I, M>(&mut self, messages: I) -> &mut Self
    where
        I: IntoIterator<Item = M>,
        M: Into<Message>,
    {
        self.status = false;
        self.set_messages(messages)
    }

    pub fn clear_messages(&mut self) -> &mut Self {
        self.messages.clear();
        self
    }

    // ------------------------------------------------------------------
    // Errors
    // ------------------------------------------------------------------

    /// Set, replace or remove the error stored under `key`.
    ///
    /// - `null` removes the entry.
    /// - A one-element array (or object) collapses to its single value.
    /// - A larger array or object fans out to `key_<index|subkey>` entries.
    /// - Anything else is stored as a normalized message with `args`.
    ///
    /// Keys outside `[0-9A-Za-z_.]+` are ignored.
    pub fn set_error(&mut self, key: &str, value: Value, args: Option<Args>) -> &mut Self {
        if !ERROR_KEY.is_match(key) {
            trace!(key = %key, "Ignoring malformed error key");
            return self;
        }

        match value {
            Value::Null => {
                self.errors.remove(key);
            }
            Value::Array(mut items) if items.len() == 1 => {
                let single = items.remove(0);
                self.errors.insert(key, ErrorEntry::Raw(single));
            }
            Value::Object(map) if map.len() == 1 => {
                if let Some((_, single)) = map.into_iter().next() {
                    self.errors.insert(key, ErrorEntry::Raw(single));
                }
            }
            Value::Array(items) => {
                for (i, item) in items.into_iter().enumerate() {
                    self.errors.insert(format!("{key}_{i}"), ErrorEntry::Raw(item));
                }
            }
            Value::Object(map) => self.fan_out(key, map),
            Value::String(text) => {
                self.errors.insert(key, ErrorEntry::Message(Message::new(text, args)));
            }
            other => {
                self.errors
                    .insert(key, ErrorEntry::Message(Message::new(other.to_string(), args)));
            }
        }
        self
    }

    /// Store every entry of `values` under `key_<subkey>`, regardless of how
    /// many entries there are.
    pub fn set_error_fanout(&mut self, key: &str, values: Map<String, Value>) -> &mut Self {
        if ERROR_KEY.is_match(key) {
            self.fan_out(key, values);
        }
        self
    }

    fn fan_out(&mut self, key: &str, values: Map<String, Value>) {
        for (sub, item) in values {
            self.errors.insert(format!("{key}_{sub}"), ErrorEntry::Raw(item));
        }
    }

    /// Merge keyed error entries, overwriting existing keys.
    pub fn set_errors<I, K>(&mut self, errors: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, ErrorEntry)>,
        K: Into<String>,
    {
        for (k, e) in errors {
            self.errors.insert(k, e);
        }
        self
    }

    #[must_use]
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// The stored error under `key`: message text for message entries, the
    /// raw value otherwise.
    #[must_use]
    pub fn has_error(&self, key: &str) -> Option<Value> {
        self.errors.get(key).map(ErrorEntry::to_value)
    }

    // ------------------------------------------------------------------
    // Primary data
    // ------------------------------------------------------------------

    /// Number of entries in sequence or mapping data; `None` otherwise.
    #[must_use]
    pub fn count(&self) -> Option<usize> {
        self.data.len()
    }

    /// Append to sequence data, evicting the oldest entries beyond
    /// `max_size` (0 = unbounded).
    pub fn add_entry(&mut self, value: Value, max_size: usize) -> &mut Self {
        let items = self.data.as_sequence();
        items.push(value);
        if max_size > 0 && items.len() > max_size {
            let excess = items.len() - max_size;
            items.drain(..excess);
        }
        self
    }

    /// Keyed write into mapping data (or a record's field).
    pub fn add_entry_assoc(&mut self, key: &str, value: Value) -> &mut Self {
        self.data.as_mapping().insert(key.to_string(), value);
        self
    }

    /// Replace the data, or merge into it when `append` is set and the
    /// current data is not empty. See [`Payload::merge`].
    pub fn set_values(&mut self, value: impl Into<Payload>, append: bool) -> &mut Self {
        let value = value.into();
        if append && !self.data.is_empty() {
            self.data.merge(value);
        } else {
            self.data = value;
        }
        self
    }

    /// Mark the result as successful and set (or attach) the data.
    ///
    /// With `attach`, the current data becomes a sequence (kept as-is if it
    /// already is one, wrapped if not, emptied if empty) and `value` is
    /// appended.
    pub fn set_valid_values(&mut self, value: impl Into<Payload>, attach: bool) -> &mut Self {
        self.status = true;
        let value = value.into();
        if attach {
            let current = std::mem::take(&mut self.data);
            let mut items = match current {
                Payload::Sequence(items) => items,
                other if other.is_empty() => Vec::new(),
                other => vec![other.to_value()],
            };
            items.push(value.to_value());
            self.data = Payload::Sequence(items);
        } else {
            self.data = value;
        }
        self
    }

    /// Value under `key` in mapping, record or positional sequence data.
    #[must_use]
    pub fn get_value(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// The data, sorted ascending by `sort_key` first when it is a sequence
    /// of records.
    pub fn get_values(&mut self, sort_key: Option<&str>) -> &Payload {
        if let Some(field) = sort_key {
            self.data.sort_by_field(field);
        }
        &self.data
    }

    // ------------------------------------------------------------------
    // Secondary data
    // ------------------------------------------------------------------

    /// Keyed write when `key` is given and `value` is not null, otherwise
    /// replace the secondary data outright.
    pub fn set_secondary_values(&mut self, value: Value, key: Option<&str>) -> &mut Self {
        match key {
            Some(key) if !value.is_null() => {
                self.secondary.as_mapping().insert(key.to_string(), value);
            }
            _ => self.secondary = Payload::from_value(value),
        }
        self
    }

    pub fn set_secondary_value(&mut self, key: impl Into<SecondaryKey>, value: Value) -> &mut Self {
        match key.into() {
            SecondaryKey::Append => self.secondary.as_sequence().push(value),
            SecondaryKey::Named(key) => {
                self.secondary.as_mapping().insert(key, value);
            }
        }
        self
    }

    #[must_use]
    pub fn get_secondary_value(&self, key: &str) -> Option<&Value> {
        self.secondary.get(key)
    }

    // ------------------------------------------------------------------
    // Composition
    // ------------------------------------------------------------------

    /// Copy status, messages and errors of `other` into `self`; with `full`
    /// also overwrite both payloads.
    pub fn merge_from(&mut self, other: &ApiResult, full: bool) -> &mut Self {
        self.status = other.status;
        self.messages.extend(other.messages.iter().cloned());
        self.set_errors(other.errors.clone());
        if full {
            self.data = other.data.clone();
            self.secondary = other.secondary.clone();
        }
        self
    }

    // ------------------------------------------------------------------
    // Translation and rendering
    // ------------------------------------------------------------------

    /// Translate one text through the injected strategy with the default
    /// `"code"` kind.
    #[must_use]
    pub fn translate(&self, text: &str, lang: &str) -> String {
        self.translate_with(text, lang, DEFAULT_KIND, "")
    }

    #[must_use]
    pub fn translate_with(&self, text: &str, lang: &str, kind: &str, src: &str) -> String {
        self.translator.translate(text, lang, kind, src)
    }

    /// Render the error buffer. Unknown formats fall back to plain.
    #[must_use]
    pub fn render_errors(&self, format: Format, lang: &str) -> Rendered {
        let translate = |text: &str| {
            if lang.is_empty() {
                text.to_string()
            } else {
                self.translate(text, lang)
            }
        };
        let renderer = TextRenderer {
            translate: &translate,
            allow_html: false,
        };
        let texts = || -> Vec<String> { self.errors.iter().map(|(_, e)| renderer.error(e)).collect() };

        match format {
            Format::Plain | Format::Unknown => Rendered::Errors(self.errors.clone()),
            Format::List => Rendered::Text(html_list("ol", &texts())),
            Format::ListUnordered => Rendered::Text(html_list("ul", &texts())),
            Format::Advanced => {
                let pairs: Vec<(&str, String)> =
                    self.errors.iter().map(|(k, e)| (k, renderer.error(e))).collect();
                Rendered::Text(definition_list(&pairs))
            }
            Format::Text => Rendered::Text(join_text(&texts())),
            Format::Indexed => Rendered::Lines(texts()),
            Format::Translated => Rendered::Keyed(
                self.errors
                    .iter()
                    .map(|(k, e)| (k.to_string(), Value::String(renderer.error(e))))
                    .collect(),
            ),
        }
    }

    /// Render the message buffer. Formats messages do not support yield the
    /// literal `"Wrong format requested"`.
    #[must_use]
    pub fn render_messages(&self, format: Format, lang: &str, allow_html: bool) -> Rendered {
        let translate = |text: &str| {
            if lang.is_empty() {
                text.to_string()
            } else {
                self.translate(text, lang)
            }
        };
        let renderer = TextRenderer {
            translate: &translate,
            allow_html,
        };
        let texts = || -> Vec<String> { self.messages.iter().map(|m| renderer.message(m)).collect() };

        match format {
            Format::Plain => Rendered::Messages(self.messages.clone()),
            Format::List | Format::Advanced => Rendered::Text(html_list("ol", &texts())),
            Format::ListUnordered => Rendered::Text(html_list("ul", &texts())),
            Format::Text => Rendered::Text(join_text(&texts())),
            Format::Translated => Rendered::Lines(texts()),
            Format::Indexed | Format::Unknown => Rendered::Text(WRONG_FORMAT.to_string()),
        }
    }

    /// Flatten the result into
    /// `{message, status, errors, errorsCount, values, secondary}`.
    ///
    /// With `drop_empty`, `secondary` and `errors` are omitted when they
    /// would be empty containers.
    #[must_use]
    pub fn to_plain_structure(&self, format: Format, lang: &str, drop_empty: bool) -> Value {
        let errors = self.render_errors(format, lang);
        let mut out = Map::new();
        out.insert(
            "message".into(),
            self.render_messages(format, lang, false).to_value(),
        );
        out.insert("status".into(), Value::Bool(self.status));
        if !(drop_empty && errors.is_empty_container()) {
            out.insert("errors".into(), errors.to_value());
        }
        out.insert("errorsCount".into(), Value::from(self.errors.len()));
        out.insert("values".into(), self.data.to_value());
        let secondary_empty = matches!(self.secondary.len(), Some(0))
            || matches!(self.secondary, Payload::Empty);
        if !(drop_empty && secondary_empty) {
            out.insert("secondary".into(), self.secondary.to_value());
        }
        Value::Object(out)
    }
}

impl Serialize for ApiResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_plain_structure(Format::Plain, "", false)
            .serialize(serializer)
    }
}
