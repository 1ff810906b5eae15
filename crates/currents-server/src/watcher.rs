//! Entry directory watching for page rebuilds.

use std::path::{Path, PathBuf};
use std::sync::mpsc;

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc as async_mpsc;

/// Events emitted by the entry watcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchEvent {
    /// Entry file was created or modified
    EntryChanged(PathBuf),

    /// Entry file was removed
    EntryRemoved(PathBuf),
}

impl WatchEvent {
    /// Path of the affected entry.
    pub fn path(&self) -> &Path {
        match self {
            Self::EntryChanged(p) | Self::EntryRemoved(p) => p,
        }
    }
}

/// Watches an entries directory for markdown changes.
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
}

impl FileWatcher {
    /// Create a new watcher for `dir`.
    ///
    /// Returns the watcher and a channel to receive events. Only `*.md`
    /// files produce events. Dropping the watcher stops the events.
    pub fn new(dir: &Path) -> Result<(Self, async_mpsc::Receiver<WatchEvent>), std::io::Error> {
        let (sync_tx, sync_rx) = mpsc::channel();
        let (async_tx, async_rx) = async_mpsc::channel(100);

        let mut watcher = notify::recommended_watcher(move |res: Result<notify::Event, _>| {
            if let Ok(event) = res {
                let _ = sync_tx.send(event);
            }
        })
        .map_err(std::io::Error::other)?;

        watcher
            .watch(dir, RecursiveMode::NonRecursive)
            .map_err(std::io::Error::other)?;

        std::thread::spawn(move || {
            while let Ok(event) = sync_rx.recv() {
                for path in event.paths {
                    if let Some(e) = classify_event(&path, &event.kind) {
                        if async_tx.blocking_send(e).is_err() {
                            return;
                        }
                    }
                }
            }
        });

        Ok((Self { _watcher: watcher }, async_rx))
    }
}

/// Classify a notify event into a WatchEvent.
fn classify_event(path: &Path, kind: &notify::EventKind) -> Option<WatchEvent> {
    use notify::EventKind;

    if path.extension().and_then(|e| e.to_str()) != Some("md") {
        return None;
    }

    match kind {
        EventKind::Create(_) | EventKind::Modify(_) => {
            Some(WatchEvent::EntryChanged(path.to_path_buf()))
        }
        EventKind::Remove(_) => Some(WatchEvent::EntryRemoved(path.to_path_buf())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{CreateKind, RemoveKind};
    use notify::EventKind;
    use std::fs;
    use std::time::Duration;
    use tempfile::tempdir;

    #[test]
    fn classifies_only_markdown() {
        let md = Path::new("/e/2024-01-01__a.md");

        assert_eq!(
            classify_event(md, &EventKind::Create(CreateKind::File)),
            Some(WatchEvent::EntryChanged(md.to_path_buf()))
        );
        assert_eq!(
            classify_event(md, &EventKind::Remove(RemoveKind::File)),
            Some(WatchEvent::EntryRemoved(md.to_path_buf()))
        );
        assert_eq!(
            classify_event(Path::new("/e/page.html"), &EventKind::Create(CreateKind::File)),
            None
        );
    }

    #[tokio::test]
    async fn watches_entry_changes() {
        let temp = tempdir().unwrap();
        let entry = temp.path().join("2024-01-01__a.md");

        let (watcher, mut rx) = FileWatcher::new(temp.path()).unwrap();

        // Give inotify time to set up
        tokio::time::sleep(Duration::from_millis(100)).await;

        fs::write(&entry, "# Created").unwrap();

        let event = tokio::time::timeout(Duration::from_secs(3), rx.recv()).await;

        drop(watcher);

        assert!(event.is_ok(), "timeout waiting for file watch event");
        let event = event.unwrap().expect("channel should not be closed");
        assert_eq!(event.path().file_name(), entry.file_name());
    }
}
