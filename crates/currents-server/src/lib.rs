//! Development-only editing server for currents entries.
//!
//! Serves a small browser editor plus a JSON API to list, read, create and
//! save entries, falls back to the site's static files for everything else,
//! and rebuilds the page whenever an entry changes on disk.

pub mod gui;
pub mod server;
pub mod watcher;

pub use server::{router, ApiError, DevServer, DevServerConfig, ServerError, ServerState};
pub use watcher::{FileWatcher, WatchEvent};
