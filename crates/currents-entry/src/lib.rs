//! Entry documents for the currents page.
//!
//! This crate parses and writes the small `key: value` frontmatter used by
//! currents entries, models the fixed entry schema, and manages the
//! directory the entries live in.

pub mod document;
pub mod entry;
pub mod frontmatter;
pub mod naming;
pub mod store;

pub use document::{build_document, CLOSING_RULE};
pub use entry::{Entry, EntryFields, Field, DEFAULT_STATUS};
pub use frontmatter::{Frontmatter, Value};
pub use store::{CreatedEntry, EntryStore, EntrySummary, StoreError};
