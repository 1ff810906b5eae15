//! Frontmatter extraction, parsing and serialization.
//!
//! Entry headers are not YAML. A header is a `---` line at the very start of
//! the document, any number of `key: value` lines, and a closing `---` line:
//!
//! ```text
//! ---
//! id: "2024-06-15__morning"
//! archive: null
//! tags: ["reading", "walks"]
//! ---
//! Body markdown...
//! ```
//!
//! A value is `null`, a bracketed comma-separated list, or a string with one
//! optional layer of `"` or `'` quotes. Lines without a colon, blank lines
//! and `#` comments are skipped; a repeated key keeps its last value.

use std::collections::BTreeMap;

use crate::entry::{EntryFields, Field};

/// Delimiter line that opens and closes the header.
pub const DELIMITER: &str = "---";

/// A raw header value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// The literal `null`
    Null,
    /// A string with its surrounding quotes removed
    Text(String),
    /// A bracketed list
    List(Vec<String>),
}

/// Parsed header block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frontmatter {
    values: BTreeMap<String, Value>,
}

impl Frontmatter {
    /// Look up a key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Check whether the header held no usable lines.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.values.len()
    }
}

/// Split a document into its header and body.
///
/// A document without a well-formed header yields an empty [`Frontmatter`]
/// and the whole text as body.
pub fn parse(source: &str) -> (Frontmatter, &str) {
    let Some((header, body)) = split_header(source) else {
        return (Frontmatter::default(), source);
    };

    let mut fm = Frontmatter::default();
    for line in header.lines() {
        if let Some((key, value)) = parse_line(line) {
            fm.values.insert(key, value);
        }
    }

    (fm, body)
}

/// Locate the header lines and the body that follows the closing delimiter.
fn split_header(source: &str) -> Option<(&str, &str)> {
    let mut lines = source.split_inclusive('\n');

    let open = lines.next()?;
    if !open.ends_with('\n') || !is_delimiter(open) {
        return None;
    }

    let header_start = open.len();
    let mut offset = header_start;
    for line in lines {
        if is_delimiter(line) {
            return Some((&source[header_start..offset], &source[offset + line.len()..]));
        }
        offset += line.len();
    }

    None
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end_matches(|c: char| c == '\n' || c == '\r')
        .strip_prefix(DELIMITER)
        .is_some_and(|rest| rest.chars().all(|c| c == ' ' || c == '\t'))
}

fn parse_line(line: &str) -> Option<(String, Value)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let (key, value) = line.split_once(':')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }

    Some((key.to_string(), parse_value(value.trim())))
}

fn parse_value(raw: &str) -> Value {
    if raw == "null" {
        return Value::Null;
    }

    if let Some(inner) = raw.strip_prefix('[').and_then(|r| r.strip_suffix(']')) {
        let items = inner
            .split(',')
            .map(str::trim)
            .filter(|piece| !piece.is_empty())
            .map(unquote)
            .filter(|item| !item.is_empty())
            .collect();
        return Value::List(items);
    }

    Value::Text(unquote(raw))
}

/// Remove one layer of matching quotes.
///
/// Double-quoted text holding a colon was written as a JSON string and is
/// decoded as one. Other double-quoted text only has `\\`, `\"` and
/// `\u00XX` control escapes undone; any other backslash is kept literally.
fn unquote(raw: &str) -> String {
    let quoted = |q: char| raw.len() >= 2 && raw.starts_with(q) && raw.ends_with(q);

    if quoted('"') {
        let inner = &raw[1..raw.len() - 1];
        if inner.contains(':') {
            if let Ok(decoded) = serde_json::from_str::<String>(raw) {
                return decoded;
            }
            return inner.to_string();
        }
        return unescape(inner);
    }

    if quoted('\'') {
        return raw[1..raw.len() - 1].to_string();
    }

    raw.to_string()
}

fn unescape(inner: &str) -> String {
    let mut out = String::with_capacity(inner.len());
    let mut rest = inner;

    while let Some(pos) = rest.find('\\') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        if let Some(after) = tail.strip_prefix("\\\\") {
            out.push('\\');
            rest = after;
        } else if let Some(after) = tail.strip_prefix("\\\"") {
            out.push('"');
            rest = after;
        } else if let Some(c) = control_escape(tail) {
            out.push(c);
            rest = &tail[6..];
        } else {
            out.push('\\');
            rest = &tail[1..];
        }
    }

    out.push_str(rest);
    out
}

/// Decode a leading `\uXXXX` escape that names a control character.
fn control_escape(tail: &str) -> Option<char> {
    let hex = tail.strip_prefix("\\u")?.get(..4)?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let c = char::from_u32(u32::from_str_radix(hex, 16).ok()?)?;
    c.is_control().then_some(c)
}

/// Render the header block for a set of fields.
///
/// Every key in [`EntryFields::KEYS`] is written, in that order, whatever the
/// caller filled in. No trailing newline follows the closing delimiter.
pub fn serialize(fields: &EntryFields) -> String {
    let mut lines = Vec::with_capacity(EntryFields::KEYS.len() + 2);
    lines.push(DELIMITER.to_string());

    for key in EntryFields::KEYS {
        if key == "tags" {
            let tags: Vec<String> = fields.tags.iter().map(|t| quote(t)).collect();
            lines.push(format!("tags: [{}]", tags.join(", ")));
            continue;
        }

        let value = match fields.get(key) {
            Some(Field::Text(s)) => quote(s),
            Some(Field::Null) => "null".to_string(),
            Some(Field::Absent) | None => "\"\"".to_string(),
        };
        lines.push(format!("{key}: {value}"));
    }

    lines.push(DELIMITER.to_string());
    lines.join("\n")
}

/// Quote a string value.
///
/// Values with a colon are written as JSON strings. Others get `\\` and `"`
/// escaped and control characters written as `\u00XX`, so a value always
/// stays on one line.
fn quote(value: &str) -> String {
    if value.contains(':') {
        return serde_json::Value::String(value.to_string()).to_string();
    }

    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
