//! Initialize currents in a project.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use currents_entry::{build_document, EntryFields, Field};

use crate::config::ConfigFile;

/// Date of the sample entry written by init.
const SAMPLE_DATE: &str = "2025-01-01";

/// Run the init command.
pub async fn run(config_path: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing currents...");

    // Create default config
    if !config_path.exists() || yes {
        fs::write(config_path, DEFAULT_CONFIG)
            .with_context(|| format!("Failed to write {}", config_path.display()))?;
        tracing::info!("Created {}", config_path.display());
    } else {
        tracing::warn!(
            "{} already exists. Use --yes to overwrite.",
            config_path.display()
        );
    }

    let config = ConfigFile::load(config_path)?;
    let page = config.page_config();

    // Create entries directory with a sample entry
    fs::create_dir_all(&page.entries_dir).with_context(|| {
        format!(
            "Failed to create entries directory {}",
            page.entries_dir.display()
        )
    })?;

    let sample_path = page
        .entries_dir
        .join(format!("{SAMPLE_DATE}__hello-currents.md"));
    if !sample_path.exists() || yes {
        fs::write(&sample_path, sample_entry())
            .with_context(|| format!("Failed to write {}", sample_path.display()))?;
        tracing::info!("Created {}", sample_path.display());
    }

    // Create the page, or check the existing one has markers
    if !page.page_path.exists() {
        if let Some(parent) = page.page_path.parent() {
            fs::create_dir_all(parent).context("Failed to create page directory")?;
        }
        fs::write(&page.page_path, default_page(&page.markers.start, &page.markers.end))
            .with_context(|| format!("Failed to write {}", page.page_path.display()))?;
        tracing::info!("Created {}", page.page_path.display());
    } else {
        let existing = fs::read_to_string(&page.page_path)
            .with_context(|| format!("Failed to read {}", page.page_path.display()))?;
        if !existing.contains(&page.markers.start) || !existing.contains(&page.markers.end) {
            tracing::warn!(
                "{} has no {} / {} markers; add them where entries should go.",
                page.page_path.display(),
                page.markers.start,
                page.markers.end
            );
        }
    }

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'currents build' to render the page, or 'currents dev' to edit entries.");

    Ok(())
}

fn sample_entry() -> String {
    let fields = EntryFields {
        id: Field::text(format!("{SAMPLE_DATE}__hello-currents")),
        date: Field::text(SAMPLE_DATE),
        title: Field::text("Hello, currents"),
        status: Field::text("active"),
        archive: Field::Null,
        tags: vec!["meta".to_string()],
        ..Default::default()
    };

    build_document(
        &fields,
        "This is a sample entry. Edit it in `currents dev` or in any text editor.",
    )
}

fn default_page(start: &str, end: &str) -> String {
    format!(
        r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Currents</title>
</head>
<body>
  <main>
    <h1>Currents</h1>
    {start}
    {end}
  </main>
</body>
</html>
"#
    )
}

const DEFAULT_CONFIG: &str = r#"# Currents Configuration

[entries]
# Directory holding the markdown entries
dir = "src/currents/entries"

[page]
# Page the rendered entries are spliced into
path = "currents.html"
start_marker = "<!-- CURRENTS:START -->"
end_marker = "<!-- CURRENTS:END -->"

[server]
# Development editing server
host = "127.0.0.1"
port = 5174
# Directory served alongside the editor
site_root = "."
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use currents_entry::Entry;
    use currents_static::{splice, Markers};

    #[test]
    fn default_config_parses() {
        let config: ConfigFile = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.page.path, "currents.html");
        assert_eq!(config.server.port, 5174);
    }

    #[test]
    fn sample_entry_is_active() {
        let entry = Entry::parse("2025-01-01__hello-currents.md", &sample_entry());

        assert!(entry.fields.is_active());
        assert_eq!(entry.id(), "2025-01-01__hello-currents");
        assert_eq!(entry.fields.tags, vec!["meta".to_string()]);
    }

    #[test]
    fn default_page_has_markers() {
        let markers = Markers::default();
        let page = default_page(&markers.start, &markers.end);

        assert!(splice(&page, &markers, &[]).is_ok());
    }
}
