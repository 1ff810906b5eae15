//! Whole-document assembly for entries written to disk.

use crate::entry::EntryFields;
use crate::frontmatter;

/// Rule line that closes every entry document.
pub const CLOSING_RULE: &str =
    "-----------------------------------------------------------------------------------------";

/// Build the full text of an entry document.
///
/// The body loses trailing whitespace and gets a single [`CLOSING_RULE`]; a
/// body that already ends in the rule is not given a second one.
pub fn build_document(fields: &EntryFields, body: &str) -> String {
    let header = frontmatter::serialize(fields);
    let body = strip_closing_rule(body.trim_end());

    format!("{header}\n{body}\n\n{CLOSING_RULE}\n")
}

fn strip_closing_rule(body: &str) -> &str {
    let last_line = body.rsplit('\n').next().unwrap_or(body);
    if last_line.trim() == CLOSING_RULE {
        body[..body.len() - last_line.len()].trim_end()
    } else {
        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::{Entry, Field};
    use pretty_assertions::assert_eq;

    #[test]
    fn appends_closing_rule() {
        let fields = EntryFields {
            title: Field::text("Hello"),
            ..Default::default()
        };

        let doc = build_document(&fields, "Some *body*\n\n\n");

        assert!(doc.starts_with("---\nid: \"\"\n"));
        assert!(doc.ends_with(&format!("---\nSome *body*\n\n{CLOSING_RULE}\n")));
    }

    #[test]
    fn does_not_stack_rules_on_resave() {
        let fields = EntryFields::default();

        let first = build_document(&fields, "text");
        let loaded = Entry::parse("a.md", &first);
        let second = build_document(&loaded.fields, &loaded.body);

        assert_eq!(second.matches(CLOSING_RULE).count(), 1);
        assert!(second.ends_with(&format!("\ntext\n\n{CLOSING_RULE}\n")));
    }

    #[test]
    fn keeps_shorter_dash_lines_in_body() {
        let doc = build_document(&EntryFields::default(), "above\n\n---");
        assert!(doc.ends_with(&format!("above\n\n---\n\n{CLOSING_RULE}\n")));
    }

    #[test]
    fn rule_is_89_dashes() {
        assert_eq!(CLOSING_RULE.len(), 89);
        assert!(CLOSING_RULE.chars().all(|c| c == '-'));
    }
}
