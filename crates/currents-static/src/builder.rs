//! Page build pipeline.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use currents_entry::{EntryStore, StoreError};

use crate::render::render;
use crate::splice::{splice, Markers, SpliceError};

/// Configuration for building the page.
#[derive(Debug, Clone)]
pub struct PageConfig {
    /// Directory holding the entry documents
    pub entries_dir: PathBuf,

    /// HTML page holding the markers; rewritten in place
    pub page_path: PathBuf,

    /// Markers delimiting the generated region
    pub markers: Markers,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            entries_dir: PathBuf::from("src/currents/entries"),
            page_path: PathBuf::from("currents.html"),
            markers: Markers::default(),
        }
    }
}

/// Result of a build.
#[derive(Debug)]
pub struct BuildResult {
    /// Entries rendered onto the page
    pub rendered: usize,

    /// Entries left out because they are not active
    pub skipped: usize,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Page that was written
    pub page_path: PathBuf,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error(transparent)]
    Entries(#[from] StoreError),

    #[error("Failed to read page: {0}")]
    ReadError(String),

    #[error("{path}: {source}")]
    Splice {
        path: String,
        #[source]
        source: SpliceError,
    },

    #[error("Failed to write page: {0}")]
    WriteError(String),
}

/// Builds the currents page from the entries directory.
pub struct PageBuilder {
    config: PageConfig,
    store: EntryStore,
}

impl PageBuilder {
    /// Create a new page builder.
    pub fn new(config: PageConfig) -> Self {
        let store = EntryStore::new(&config.entries_dir);
        Self { config, store }
    }

    /// Render every active entry, newest file first.
    pub fn render_entries(&self) -> Result<(Vec<String>, usize), BuildError> {
        let mut files = self.store.file_names()?;
        files.reverse();

        let mut fragments = Vec::with_capacity(files.len());
        let mut skipped = 0;

        for file in files {
            let entry = self.store.load(file.as_str())?;

            if !entry.fields.is_active() {
                tracing::debug!(
                    "Skipping {} (status {})",
                    file,
                    entry.fields.effective_status()
                );
                skipped += 1;
                continue;
            }

            tracing::debug!("Rendering {}", file);
            fragments.push(render(&entry));
        }

        Ok((fragments, skipped))
    }

    /// Rebuild the page.
    ///
    /// The page is read whole, the new region computed, and the file written
    /// once at the end; any earlier failure leaves it untouched.
    pub fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();
        let page_path = &self.config.page_path;

        let (fragments, skipped) = self.render_entries()?;

        let page = fs::read_to_string(page_path)
            .map_err(|e| BuildError::ReadError(format!("{}: {}", page_path.display(), e)))?;

        let output =
            splice(&page, &self.config.markers, &fragments).map_err(|source| BuildError::Splice {
                path: page_path.display().to_string(),
                source,
            })?;

        fs::write(page_path, output)
            .map_err(|e| BuildError::WriteError(format!("{}: {}", page_path.display(), e)))?;

        Ok(BuildResult {
            rendered: fragments.len(),
            skipped,
            duration_ms: start.elapsed().as_millis() as u64,
            page_path: page_path.clone(),
        })
    }
}
