//! Static page generation for currents.
//!
//! Renders active entries to HTML fragments, newest first, and splices them
//! into the marker-delimited region of an existing page.

pub mod builder;
pub mod render;
pub mod splice;

pub use builder::{BuildError, BuildResult, PageBuilder, PageConfig};
pub use render::{render, render_entry, render_markdown};
pub use splice::{splice, Markers, SpliceError};
