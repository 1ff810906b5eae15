//! Entry to HTML fragment rendering.

use pulldown_cmark::{html, Options, Parser};

use currents_entry::entry::date_prefix;
use currents_entry::{Entry, EntryFields, Field};

/// Separator closing every entry. The class name matches the site stylesheet.
pub const SEPARATOR: &str = r#"<hr class="currents-seperator">"#;

/// Which link slot a URL renders in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LinkSlot {
    Top,
    Bottom,
}

impl LinkSlot {
    fn class(self) -> &'static str {
        match self {
            Self::Top => "currents-links-top",
            Self::Bottom => "currents-links-bottom",
        }
    }
}

/// Render a parsed entry.
pub fn render(entry: &Entry) -> String {
    render_entry(&entry.fields, &entry.body, &entry.file_name)
}

/// Render one entry as an `<article>` fragment.
///
/// Blocks appear in a fixed order: date, title, top audio, top image, top
/// link, body, bottom link, bottom image, bottom audio, separator. Each
/// optional block is left out when its field is empty.
pub fn render_entry(fields: &EntryFields, body: &str, file_name: &str) -> String {
    let mut parts = Vec::new();

    let date = fields
        .date
        .trimmed()
        .unwrap_or_else(|| date_prefix(file_name));
    if !date.is_empty() {
        parts.push(format!(
            r#"<div class="currents-date">{}</div>"#,
            html_escape(date)
        ));
    }

    if let Some(title) = fields.title.trimmed() {
        parts.push(format!(
            r#"<div class="currents-title">{}</div>"#,
            html_escape(title)
        ));
    }

    if let Some(src) = fields.audio_top.trimmed() {
        parts.push(audio(src));
    }

    if let Some(src) = fields.image_top.trimmed() {
        parts.push(image(src, &fields.image_alt));
    }

    if let Some(url) = fields.url_1.trimmed() {
        parts.push(link_block(url, LinkSlot::Top));
    }

    parts.push(render_markdown(body));

    if let Some(url) = fields.url_2.trimmed() {
        parts.push(link_block(url, LinkSlot::Bottom));
    }

    if let Some(src) = fields.image_bottom.trimmed() {
        parts.push(image(src, &fields.image_alt));
    }

    if let Some(src) = fields.audio_bottom.trimmed() {
        parts.push(audio(src));
    }

    parts.push(SEPARATOR.to_string());

    format!(
        "\n<article class=\"currents-entry\">\n  {}\n</article>\n",
        parts.join("\n")
    )
}

fn audio(src: &str) -> String {
    format!(r#"<audio controls src="{}"></audio>"#, html_escape(src))
}

fn image(src: &str, alt: &Field) -> String {
    format!(
        r#"<img src="{}" alt="{}">"#,
        html_escape(src),
        html_escape(alt.as_str().unwrap_or_default())
    )
}

fn link_block(url: &str, slot: LinkSlot) -> String {
    let url = html_escape(url);
    format!(
        r#"<div class="currents-links {}">
      <a href="{url}" target="_blank" rel="noopener noreferrer">
        {url}
      </a>
    </div>"#,
        slot.class()
    )
}

/// Markdown to HTML.
pub fn render_markdown(content: &str) -> String {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS;

    let parser = Parser::new_ext(content, options);

    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);

    html_output
}

/// Escape HTML special characters for text and attribute positions.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn positions(html: &str, needles: &[&str]) -> Vec<usize> {
        needles
            .iter()
            .map(|n| html.find(n).unwrap_or_else(|| panic!("missing {n}")))
            .collect()
    }

    #[test]
    fn renders_markdown() {
        let html = render_markdown("# Hello\n\nWorld");

        assert!(html.contains("<h1>Hello</h1>"));
        assert!(html.contains("<p>World</p>"));
        assert_eq!(render_markdown(""), "");
    }

    #[test]
    fn renders_minimal_entry() {
        let fields = EntryFields {
            date: Field::text("2024-06-15"),
            title: Field::text("Walk"),
            ..Default::default()
        };

        let html = render_entry(&fields, "Hello", "2024-06-15__walk.md");

        let expected = "\n<article class=\"currents-entry\">\n  \
<div class=\"currents-date\">2024-06-15</div>\n\
<div class=\"currents-title\">Walk</div>\n\
<p>Hello</p>\n\n\
<hr class=\"currents-seperator\">\n\
</article>\n";
        assert_eq!(html, expected);
    }

    #[test]
    fn falls_back_to_file_name_date() {
        let html = render_entry(&EntryFields::default(), "", "2022-03-04__example.md");
        assert!(html.contains(r#"<div class="currents-date">2022-03-04</div>"#));

        let blank = EntryFields {
            date: Field::text("   "),
            ..Default::default()
        };
        let html = render_entry(&blank, "", "2022-03-04__example.md");
        assert!(html.contains(r#"<div class="currents-date">2022-03-04</div>"#));
    }

    #[test]
    fn omits_date_when_nothing_to_show() {
        let html = render_entry(&EntryFields::default(), "", "");
        assert!(!html.contains("currents-date"));
    }

    #[test]
    fn omits_empty_optional_blocks() {
        let fields = EntryFields {
            date: Field::text("2024-01-01"),
            title: Field::text("Plain"),
            url_1: Field::text("  "),
            url_2: Field::Null,
            image_top: Field::text(""),
            image_alt: Field::text("unused"),
            ..Default::default()
        };

        let html = render_entry(&fields, "text", "2024-01-01__plain.md");

        assert!(!html.contains("<a "));
        assert!(!html.contains("<img"));
        assert!(!html.contains("<audio"));
        assert!(!html.contains("currents-links"));
        assert!(!html.contains("undefined"));
        assert!(html.contains(SEPARATOR));
    }

    #[test]
    fn orders_blocks_top_to_bottom() {
        let fields = EntryFields {
            date: Field::text("2024-01-01"),
            title: Field::text("Full"),
            audio_top: Field::text("/a/top.mp3"),
            image_top: Field::text("/i/top.jpg"),
            image_alt: Field::text("alt text"),
            url_1: Field::text("https://one.example"),
            url_2: Field::text("https://two.example"),
            url_3: Field::text("https://three.example"),
            image_bottom: Field::text("/i/bottom.jpg"),
            audio_bottom: Field::text("/a/bottom.mp3"),
            audio_caption: Field::text("reserved"),
            ..Default::default()
        };

        let html = render_entry(&fields, "BODY", "x.md");

        let order = positions(
            &html,
            &[
                "currents-date",
                "currents-title",
                r#"<audio controls src="/a/top.mp3">"#,
                r#"<img src="/i/top.jpg" alt="alt text">"#,
                "currents-links-top",
                "<p>BODY</p>",
                "currents-links-bottom",
                r#"<img src="/i/bottom.jpg" alt="alt text">"#,
                r#"<audio controls src="/a/bottom.mp3">"#,
                SEPARATOR,
            ],
        );
        assert!(order.windows(2).all(|w| w[0] < w[1]), "{order:?}");
        assert!(html.contains(r#"<a href="https://one.example" target="_blank" rel="noopener noreferrer">"#));
        assert!(!html.contains("three.example"));
        assert!(!html.contains("reserved"));
    }

    #[test]
    fn escapes_interpolated_fields() {
        let fields = EntryFields {
            title: Field::text("Fish & <Chips>"),
            image_top: Field::text("/i.jpg"),
            image_alt: Field::text("say \"cheese\""),
            ..Default::default()
        };

        let html = render_entry(&fields, "", "2024-01-01__x.md");

        assert!(html.contains("Fish &amp; &lt;Chips&gt;"));
        assert!(html.contains(r#"alt="say &quot;cheese&quot;""#));
    }
}
