//! Marker-delimited page region replacement.

/// Default marker opening the managed region.
pub const DEFAULT_START_MARKER: &str = "<!-- CURRENTS:START -->";

/// Default marker closing the managed region.
pub const DEFAULT_END_MARKER: &str = "<!-- CURRENTS:END -->";

/// The pair of literal strings delimiting the generated region of a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markers {
    pub start: String,
    pub end: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            start: DEFAULT_START_MARKER.to_string(),
            end: DEFAULT_END_MARKER.to_string(),
        }
    }
}

/// Errors that can occur when splicing a page.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SpliceError {
    #[error("Start marker not found: {0}")]
    MissingStart(String),

    #[error("End marker not found: {0}")]
    MissingEnd(String),

    #[error("End marker {end} appears before start marker {start}")]
    OutOfOrder { start: String, end: String },
}

/// Replace the region between the markers with the given fragments.
///
/// Both markers are kept. Everything before the start marker and from the
/// end marker onward comes through byte for byte; the page is never parsed
/// as HTML.
pub fn splice(page: &str, markers: &Markers, fragments: &[String]) -> Result<String, SpliceError> {
    let start_idx = page
        .find(&markers.start)
        .ok_or_else(|| SpliceError::MissingStart(markers.start.clone()))?;
    let end_idx = page
        .find(&markers.end)
        .ok_or_else(|| SpliceError::MissingEnd(markers.end.clone()))?;

    let region_start = start_idx + markers.start.len();
    if end_idx < region_start {
        return Err(SpliceError::OutOfOrder {
            start: markers.start.clone(),
            end: markers.end.clone(),
        });
    }

    let entries = format!(
        "<div class=\"currents-entries\">\n{}\n</div>",
        fragments.join("\n")
    );

    Ok(format!(
        "{}\n{}\n{}",
        &page[..region_start],
        entries.trim(),
        &page[end_idx..]
    ))
}
