//! File naming rules for entries.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

/// Longest slug kept in a file name.
const MAX_SLUG_LEN: usize = 80;

fn iso_date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date regex"))
}

fn file_name_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-zA-Z0-9._-]+$").expect("valid file name regex"))
}

/// Check for a `YYYY-MM-DD` date.
pub fn is_iso_date(s: &str) -> bool {
    iso_date_re().is_match(s)
}

/// Reduce a client-supplied name to a plain `.md` file name.
///
/// Directory components are dropped; anything outside `[a-zA-Z0-9._-]` is
/// rejected.
pub fn safe_file_name(name: &str) -> Option<String> {
    let base = Path::new(name).file_name()?.to_str()?;

    if !file_name_re().is_match(base) || !base.ends_with(".md") {
        return None;
    }

    Some(base.to_string())
}

/// Convert a title to a file-name slug.
pub fn slugify(title: &str) -> String {
    let mut slug = String::new();
    let mut pending_dash = false;

    for c in title.trim().to_lowercase().chars() {
        if c == '\'' || c == '"' {
            continue;
        }
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }

    slug.truncate(MAX_SLUG_LEN);

    if slug.is_empty() {
        "entry".to_string()
    } else {
        slug
    }
}

/// File name for a new entry: `{date}__{slug}.md`.
pub fn entry_file_name(date: &str, title: &str) -> String {
    format!("{}__{}.md", date, slugify(title))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_works() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("  Multiple   Spaces  "), "multiple-spaces");
        assert_eq!(slugify("Don't \"quote\" me"), "dont-quote-me");
        assert_eq!(slugify("Café & Crème!"), "caf-cr-me");
        assert_eq!(slugify("!!!"), "entry");
        assert_eq!(slugify(""), "entry");
    }

    #[test]
    fn slugify_truncates_long_titles() {
        let slug = slugify(&"word ".repeat(40));

        assert_eq!(slug.len(), MAX_SLUG_LEN);
        assert_eq!(slug, "word-".repeat(16));
        assert_eq!(slugify(&format!("{}!!", "a".repeat(85))), "a".repeat(80));
    }

    #[test]
    fn validates_dates() {
        assert!(is_iso_date("2024-06-15"));
        assert!(!is_iso_date("2024-6-15"));
        assert!(!is_iso_date("2024-06-15 "));
        assert!(!is_iso_date(""));
    }

    #[test]
    fn rejects_unsafe_file_names() {
        assert_eq!(
            safe_file_name("2024-01-01__a.md"),
            Some("2024-01-01__a.md".to_string())
        );
        assert_eq!(
            safe_file_name("../../etc/2024-01-01__a.md"),
            Some("2024-01-01__a.md".to_string())
        );
        assert_eq!(safe_file_name("has space.md"), None);
        assert_eq!(safe_file_name("notes.txt"), None);
        assert_eq!(safe_file_name(""), None);
        assert_eq!(safe_file_name(".."), None);
    }

    #[test]
    fn builds_entry_file_names() {
        assert_eq!(
            entry_file_name("2024-06-15", "Morning Walk"),
            "2024-06-15__morning-walk.md"
        );
    }
}
