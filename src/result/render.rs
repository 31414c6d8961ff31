//! Output formats and text rendering for result messages and errors.

use super::message::{Args, ErrorBag, ErrorEntry, Message};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

/// Literal returned when messages are rendered in a format they do not support.
pub const WRONG_FORMAT: &str = "Wrong format requested";

/// Named output shape for messages and errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// Raw buffer.
    #[default]
    Plain,
    /// `<ol><li>..</li></ol>`
    List,
    /// `<ul><li>..</li></ul>`
    ListUnordered,
    /// Ordered list of `<dt>key</dt><dd>text</dd>` pairs (errors only).
    Advanced,
    /// Newline-joined text, empty entries skipped.
    Text,
    /// Errors re-keyed as a 0-based sequence.
    Indexed,
    /// Per-entry translation, same container shape as plain.
    Translated,
    /// Any format name this crate does not know.
    Unknown,
}

impl Format {
    /// Parse a format name; unrecognised names map to [`Format::Unknown`].
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "plain" | "" => Format::Plain,
            "list" => Format::List,
            "list-unordered" | "list_unordered" | "ul" => Format::ListUnordered,
            "advanced" => Format::Advanced,
            "text" => Format::Text,
            "indexed" => Format::Indexed,
            "translated" => Format::Translated,
            _ => Format::Unknown,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Format::Plain => "plain",
            Format::List => "list",
            Format::ListUnordered => "list-unordered",
            Format::Advanced => "advanced",
            Format::Text => "text",
            Format::Indexed => "indexed",
            Format::Translated => "translated",
            Format::Unknown => "unknown",
        };
        write!(f, "{s}")
    }
}

/// Rendered form of a message or error buffer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Rendered {
    /// Raw message buffer.
    Messages(Vec<Message>),
    /// Raw error buffer.
    Errors(ErrorBag),
    /// Sequence of rendered texts.
    Lines(Vec<String>),
    /// Keyed rendered texts.
    Keyed(Map<String, Value>),
    /// A single string (HTML, joined text or a diagnostic).
    Text(String),
}

impl Rendered {
    /// `true` for containers with no entries; strings are never "empty
    /// containers".
    #[must_use]
    pub fn is_empty_container(&self) -> bool {
        match self {
            Rendered::Messages(m) => m.is_empty(),
            Rendered::Errors(e) => e.is_empty(),
            Rendered::Lines(l) => l.is_empty(),
            Rendered::Keyed(k) => k.is_empty(),
            Rendered::Text(_) => false,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Rendered::Text(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_lines(&self) -> Option<&[String]> {
        match self {
            Rendered::Lines(l) => Some(l),
            _ => None,
        }
    }

    #[must_use]
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Escape the five HTML-significant characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

/// Interpret a value as a number the way form input is usually treated:
/// JSON numbers, or strings that parse as a finite float after trimming.
fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

/// Format a value as a price: two decimals, `.` thousands separator and
/// `,` decimal separator. Non-numeric input renders as `NaN`.
#[must_use]
pub fn format_price(value: &Value) -> String {
    let Some(amount) = numeric(value) else {
        return "NaN".to_string();
    };
    let fixed = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    let negative = amount < 0.0 && fixed.chars().any(|c| c != '0' && c != '.');
    format!("{}{grouped},{frac_part}", if negative { "-" } else { "" })
}

fn value_to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Replace every placeholder token of `args` in `text`.
///
/// Tokens are matched longest first in a single left-to-right pass, so a
/// substituted value is never substituted again. A token of the form
/// `field:price` renders its value through [`format_price`]. Values are
/// HTML-escaped unless `allow_html` is set.
#[must_use]
pub fn substitute(text: &str, args: &Args, allow_html: bool) -> String {
    if args.is_empty() {
        return text.to_string();
    }

    let mut tokens: Vec<(&str, String)> = args
        .iter()
        .filter(|(token, _)| !token.is_empty())
        .map(|(token, value)| {
            let rendered = match token.split_once(':') {
                Some((_, "price")) => format_price(value),
                _ => value_to_text(value),
            };
            let rendered = if allow_html { rendered } else { escape_html(&rendered) };
            (token.as_str(), rendered)
        })
        .collect();
    tokens.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    'scan: while !rest.is_empty() {
        for (token, replacement) in &tokens {
            if let Some(after) = rest.strip_prefix(token) {
                out.push_str(replacement);
                rest = after;
                continue 'scan;
            }
        }
        let mut chars = rest.chars();
        if let Some(c) = chars.next() {
            out.push(c);
        }
        rest = chars.as_str();
    }
    out
}

/// Renders message and error entries into text, applying translation and
/// argument substitution.
pub(crate) struct TextRenderer<'a> {
    pub translate: &'a dyn Fn(&str) -> String,
    pub allow_html: bool,
}

impl TextRenderer<'_> {
    pub fn message(&self, message: &Message) -> String {
        let text = (self.translate)(&message.text);
        substitute(&text, &message.args, self.allow_html)
    }

    pub fn error(&self, entry: &ErrorEntry) -> String {
        match entry {
            ErrorEntry::Message(m) => self.message(m),
            ErrorEntry::Raw(Value::String(s)) => (self.translate)(s),
            ErrorEntry::Raw(v) => value_to_text(v),
        }
    }
}

pub(crate) fn html_list(tag: &str, items: &[String]) -> String {
    if items.is_empty() {
        return String::new();
    }
    let body: String = items.iter().map(|i| format!("<li>{i}</li>")).collect();
    format!("<{tag}>{body}</{tag}>")
}

pub(crate) fn definition_list(items: &[(&str, String)]) -> String {
    if items.is_empty() {
        return String::new();
    }
    let body: String = items
        .iter()
        .map(|(k, v)| format!("<dt>{}</dt><dd>{v}</dd>", escape_html(k)))
        .collect();
    format!("<ol>{body}</ol>")
}

pub(crate) fn join_text(items: &[String]) -> String {
    items
        .iter()
        .filter(|s| !s.is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join("\n")
}
