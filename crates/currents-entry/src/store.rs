//! On-disk entry storage.
//!
//! The store owns one flat directory of `*.md` documents. It lists, reads,
//! creates and rewrites whole documents; it never deletes.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use walkdir::WalkDir;

use crate::document::build_document;
use crate::entry::{file_stem, Entry, EntryFields, Field, DEFAULT_STATUS};
use crate::naming::{entry_file_name, is_iso_date, safe_file_name};

/// Errors that can occur when working with stored entries.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Bad file name: {0:?}")]
    BadFileName(String),

    #[error("Date must be YYYY-MM-DD, got {0:?}")]
    InvalidDate(String),

    #[error("Title required")]
    MissingTitle,

    #[error("File already exists: {0}")]
    AlreadyExists(String),

    #[error("Entry not found: {0}")]
    NotFound(String),

    #[error("Failed to read entries: {0}")]
    ReadError(String),

    #[error("Failed to write entry: {0}")]
    WriteError(String),
}

/// Listing row for one entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntrySummary {
    pub file: String,
    pub id: String,
    pub date: String,
    pub title: String,
    pub status: String,
}

/// Name and id of a freshly created entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatedEntry {
    pub file: String,
    pub id: String,
}

/// A directory of entry documents.
#[derive(Debug, Clone)]
pub struct EntryStore {
    dir: PathBuf,
}

impl EntryStore {
    /// Create a store over `dir`. The directory need not exist yet.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The entries directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Names of the `*.md` files directly inside the directory, ascending.
    ///
    /// A missing directory has no entries.
    pub fn file_names(&self) -> Result<Vec<String>, StoreError> {
        if !self.dir.is_dir() {
            tracing::warn!("Entries directory not found: {}", self.dir.display());
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in WalkDir::new(&self.dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry in {}: {}", self.dir.display(), e);
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            if let Some(name) = entry.file_name().to_str() {
                if name.ends_with(".md") {
                    names.push(name.to_string());
                }
            }
        }

        names.sort();
        Ok(names)
    }

    /// Read and parse one entry named by a client.
    ///
    /// The name must pass [`safe_file_name`].
    pub fn read(&self, file: &str) -> Result<Entry, StoreError> {
        let file = safe_file_name(file).ok_or_else(|| StoreError::BadFileName(file.to_string()))?;
        self.load(file)
    }

    /// Read and parse an entry returned by [`EntryStore::file_names`].
    ///
    /// Any name found in the directory is accepted as-is.
    pub fn load(&self, file: impl Into<String>) -> Result<Entry, StoreError> {
        let file = file.into();
        let path = self.dir.join(&file);

        let source = fs::read_to_string(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => StoreError::NotFound(file.clone()),
            _ => StoreError::ReadError(format!("{}: {}", path.display(), e)),
        })?;

        Ok(Entry::parse(file, &source))
    }

    /// Summaries of every entry, newest date first.
    pub fn list(&self) -> Result<Vec<EntrySummary>, StoreError> {
        let mut items = Vec::new();

        for file in self.file_names()? {
            let entry = self.load(file.as_str())?;
            let fields = &entry.fields;

            items.push(EntrySummary {
                id: entry.id().to_string(),
                date: fields.date.trimmed().unwrap_or_default().to_string(),
                title: fields.title.trimmed().unwrap_or_else(|| entry.stem()).to_string(),
                status: fields.effective_status().to_string(),
                file,
            });
        }

        items.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.file.cmp(&a.file)));
        Ok(items)
    }

    /// Write a new entry named after its date and title.
    ///
    /// The id and file name are derived here; `archive` starts out null.
    /// An existing file is never overwritten.
    pub fn create(&self, mut fields: EntryFields, body: &str) -> Result<CreatedEntry, StoreError> {
        let date = fields.date.as_str().unwrap_or_default().trim().to_string();
        if !is_iso_date(&date) {
            return Err(StoreError::InvalidDate(date));
        }

        let title = fields.title.trimmed().ok_or(StoreError::MissingTitle)?.to_string();

        let file = entry_file_name(&date, &title);
        let id = file_stem(&file).to_string();
        let status = fields.status.trimmed().unwrap_or(DEFAULT_STATUS).to_string();

        fields.id = Field::text(&id);
        fields.date = Field::text(date);
        fields.title = Field::text(title);
        fields.status = Field::text(status);
        fields.archive = Field::Null;

        fs::create_dir_all(&self.dir)
            .map_err(|e| StoreError::WriteError(format!("{}: {}", self.dir.display(), e)))?;

        let path = self.dir.join(&file);
        let handle = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => StoreError::AlreadyExists(file.clone()),
                _ => StoreError::WriteError(format!("{}: {}", path.display(), e)),
            })?;

        write_or_remove(handle, &path, &build_document(&fields, body))?;

        tracing::info!("Created entry {}", file);

        Ok(CreatedEntry { file, id })
    }

    /// Rewrite an existing entry.
    ///
    /// The stored `id`, `date` and `archive` win over whatever the caller
    /// sent, so an edit cannot move an entry's identity.
    pub fn save(&self, file: &str, mut fields: EntryFields, body: &str) -> Result<String, StoreError> {
        let existing = self.read(file)?;
        let file = existing.file_name.clone();
        let old = &existing.fields;

        let id = old
            .id
            .trimmed()
            .or_else(|| fields.id.trimmed())
            .unwrap_or_else(|| existing.stem())
            .to_string();
        fields.id = Field::text(id);

        fields.archive = match &old.archive {
            Field::Text(s) => Field::text(s.clone()),
            Field::Null | Field::Absent => Field::Null,
        };

        if let Some(date) = old.date.trimmed() {
            if fields.date.trimmed() != Some(date) {
                tracing::warn!("Keeping stored date {} for {}", date, file);
            }
            fields.date = Field::text(date);
        }

        let path = self.dir.join(&file);
        fs::write(&path, build_document(&fields, body))
            .map_err(|e| StoreError::WriteError(format!("{}: {}", path.display(), e)))?;

        tracing::info!("Saved entry {}", file);

        Ok(file)
    }
}

/// Write a freshly created file, deleting it again if the write fails so a
/// retry is not refused as a duplicate.
fn write_or_remove(mut handle: impl Write, path: &Path, contents: &str) -> Result<(), StoreError> {
    let Err(e) = handle.write_all(contents.as_bytes()) else {
        return Ok(());
    };

    drop(handle);
    if let Err(cleanup) = fs::remove_file(path) {
        tracing::warn!("Failed to remove partial entry {}: {}", path.display(), cleanup);
    }
    Err(StoreError::WriteError(format!("{}: {}", path.display(), e)))
}
