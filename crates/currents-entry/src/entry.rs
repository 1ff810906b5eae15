//! Typed view of a currents entry.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::frontmatter::{self, Frontmatter, Value};

/// Status an entry gets when its header does not name one.
pub const DEFAULT_STATUS: &str = "active";

/// A single header field.
///
/// Documents distinguish a field that was never written from one written as
/// `null`, so both states are kept apart from plain text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Field {
    /// Key not present in the header
    #[default]
    Absent,
    /// Key present with the value `null`
    Null,
    /// Key present with a string value
    Text(String),
}

impl Field {
    /// Create a text field.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// The string value, if this is a text field.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The trimmed string value, if it is non-empty.
    pub fn trimmed(&self) -> Option<&str> {
        self.as_str().map(str::trim).filter(|s| !s.is_empty())
    }

    /// Check whether the key was missing from the header.
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    fn from_value(value: Option<&Value>) -> Self {
        match value {
            None => Self::Absent,
            Some(Value::Null) => Self::Null,
            Some(Value::Text(s)) => Self::Text(s.clone()),
            Some(Value::List(items)) => Self::Text(items.join(",")),
        }
    }
}

impl Serialize for Field {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Text(s) => serializer.serialize_str(s),
            Self::Absent | Self::Null => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for Field {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<String>::deserialize(deserializer)? {
            Some(s) => Self::Text(s),
            None => Self::Null,
        })
    }
}

/// The fixed header schema of an entry.
///
/// JSON forms omit absent fields and write null ones as `null`; a missing
/// key deserializes back to [`Field::Absent`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntryFields {
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub id: Field,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub date: Field,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub title: Field,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub status: Field,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub archive: Field,
    #[serde(deserialize_with = "tags_or_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub url_1: Field,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub url_2: Field,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub url_3: Field,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub image_top: Field,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub image_bottom: Field,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub image_alt: Field,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub audio_top: Field,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub audio_bottom: Field,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub audio_caption: Field,
}

fn tags_or_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl EntryFields {
    /// Header keys in the order they are written.
    pub const KEYS: [&'static str; 15] = [
        "id",
        "date",
        "title",
        "status",
        "archive",
        "tags",
        "url_1",
        "url_2",
        "url_3",
        "image_top",
        "image_bottom",
        "image_alt",
        "audio_top",
        "audio_bottom",
        "audio_caption",
    ];

    /// Build the typed fields from a parsed header.
    ///
    /// Unknown keys are dropped. A text field written as a list takes the
    /// items joined with `,`; `tags` written as anything but a list is empty.
    pub fn from_frontmatter(fm: &Frontmatter) -> Self {
        let field = |key: &str| Field::from_value(fm.get(key));

        Self {
            id: field("id"),
            date: field("date"),
            title: field("title"),
            status: field("status"),
            archive: field("archive"),
            tags: match fm.get("tags") {
                Some(Value::List(items)) => items.clone(),
                _ => Vec::new(),
            },
            url_1: field("url_1"),
            url_2: field("url_2"),
            url_3: field("url_3"),
            image_top: field("image_top"),
            image_bottom: field("image_bottom"),
            image_alt: field("image_alt"),
            audio_top: field("audio_top"),
            audio_bottom: field("audio_bottom"),
            audio_caption: field("audio_caption"),
        }
    }

    /// Look up a scalar field by header key. `tags` is not a scalar.
    pub fn get(&self, key: &str) -> Option<&Field> {
        let field = match key {
            "id" => &self.id,
            "date" => &self.date,
            "title" => &self.title,
            "status" => &self.status,
            "archive" => &self.archive,
            "url_1" => &self.url_1,
            "url_2" => &self.url_2,
            "url_3" => &self.url_3,
            "image_top" => &self.image_top,
            "image_bottom" => &self.image_bottom,
            "image_alt" => &self.image_alt,
            "audio_top" => &self.audio_top,
            "audio_bottom" => &self.audio_bottom,
            "audio_caption" => &self.audio_caption,
            _ => return None,
        };
        Some(field)
    }

    /// Status after defaulting; empty or missing means active.
    pub fn effective_status(&self) -> &str {
        self.status.trimmed().unwrap_or(DEFAULT_STATUS)
    }

    /// Check whether the entry belongs on the page.
    pub fn is_active(&self) -> bool {
        self.effective_status() == DEFAULT_STATUS
    }
}

/// A parsed entry document.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    /// File name within the entries directory
    pub file_name: String,

    /// Header fields
    pub fields: EntryFields,

    /// Markdown after the header
    pub body: String,
}

impl Entry {
    /// Parse an entry document read from `file_name`.
    pub fn parse(file_name: impl Into<String>, source: &str) -> Self {
        let (fm, body) = frontmatter::parse(source);

        Self {
            file_name: file_name.into(),
            fields: EntryFields::from_frontmatter(&fm),
            body: body.to_string(),
        }
    }

    /// File name without the `.md` extension.
    pub fn stem(&self) -> &str {
        file_stem(&self.file_name)
    }

    /// The entry id, falling back to the file stem.
    pub fn id(&self) -> &str {
        self.fields.id.trimmed().unwrap_or_else(|| self.stem())
    }

    /// The entry date, falling back to the file name's `YYYY-MM-DD` prefix.
    pub fn date(&self) -> &str {
        self.fields
            .date
            .trimmed()
            .unwrap_or_else(|| date_prefix(&self.file_name))
    }
}

/// Strip a trailing `.md` from a file name.
pub fn file_stem(file_name: &str) -> &str {
    file_name.strip_suffix(".md").unwrap_or(file_name)
}

/// The first ten characters of a file name, where entries keep their date.
pub fn date_prefix(file_name: &str) -> &str {
    match file_name.char_indices().nth(10) {
        Some((idx, _)) => &file_name[..idx],
        None => file_name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_status_defaults_to_active() {
        let entry = Entry::parse("2024-01-01__a.md", "---\ntitle: A\n---\nbody");
        assert_eq!(entry.fields.status, Field::Absent);
        assert!(entry.fields.is_active());

        let draft = Entry::parse("2024-01-02__b.md", "---\nstatus: draft\n---\n");
        assert!(!draft.fields.is_active());

        let blank = Entry::parse("2024-01-03__c.md", "---\nstatus: \"\"\n---\n");
        assert!(blank.fields.is_active());
    }

    #[test]
    fn id_and_date_fall_back_to_file_name() {
        let entry = Entry::parse("2022-03-04__example.md", "no header here");

        assert_eq!(entry.id(), "2022-03-04__example");
        assert_eq!(entry.date(), "2022-03-04");
        assert_eq!(entry.body, "no header here");
    }

    #[test]
    fn list_values_in_text_fields_are_joined() {
        let entry = Entry::parse("x.md", "---\ntitle: [a, b]\ntags: solo\n---\n");

        assert_eq!(entry.fields.title, Field::text("a,b"));
        assert!(entry.fields.tags.is_empty());
    }

    #[test]
    fn date_prefix_handles_short_names() {
        assert_eq!(date_prefix("2024-06-15__long-title.md"), "2024-06-15");
        assert_eq!(date_prefix("a.md"), "a.md");
        assert_eq!(date_prefix(""), "");
    }

    #[test]
    fn json_keeps_three_field_states_apart() {
        let fields = EntryFields {
            title: Field::text("Hello"),
            archive: Field::Null,
            tags: vec!["x".to_string()],
            ..Default::default()
        };

        let json = serde_json::to_value(&fields).unwrap();
        assert_eq!(json["title"], "Hello");
        assert!(json["archive"].is_null());
        assert!(json.get("url_1").is_none());

        let back: EntryFields = serde_json::from_value(json).unwrap();
        assert_eq!(back, fields);
    }

    #[test]
    fn deserializes_null_tags_as_empty() {
        let fields: EntryFields = serde_json::from_str(r#"{"tags": null, "url_1": null}"#).unwrap();

        assert!(fields.tags.is_empty());
        assert_eq!(fields.url_1, Field::Null);
        assert_eq!(fields.url_2, Field::Absent);
    }
}
