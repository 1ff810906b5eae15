//! Create a new entry from the command line.

use anyhow::{Context, Result};
use currents_entry::{EntryFields, EntryStore, Field};

use crate::config::ConfigFile;

/// Run the new command.
pub async fn run(config: &ConfigFile, title: String, date: String, status: String) -> Result<()> {
    let store = EntryStore::new(&config.entries.dir);

    let fields = EntryFields {
        date: Field::text(date),
        title: Field::text(title),
        status: Field::text(status),
        ..Default::default()
    };

    let created = store
        .create(fields, "")
        .context("Failed to create entry")?;

    tracing::info!(
        "Created {}",
        store.dir().join(&created.file).display()
    );

    Ok(())
}
