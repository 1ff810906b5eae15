//! Page build command.

use anyhow::Result;
use currents_static::PageBuilder;

use crate::config::ConfigFile;

/// Run the build command.
pub async fn run(config: &ConfigFile) -> Result<()> {
    let page = config.page_config();
    tracing::info!(
        "Building {} from {}...",
        page.page_path.display(),
        page.entries_dir.display()
    );

    let result = PageBuilder::new(page).build()?;

    tracing::info!(
        "Rendered {} entries ({} skipped) in {}ms",
        result.rendered,
        result.skipped,
        result.duration_ms
    );

    tracing::info!("Output: {}", result.page_path.display());

    Ok(())
}
