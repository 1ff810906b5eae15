//! Configuration file (currents.toml).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use currents_static::{Markers, PageConfig};

/// Configuration file structure.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub entries: EntriesConfig,
    #[serde(default)]
    pub page: PageSettings,
    #[serde(default)]
    pub server: ServerSettings,
}

#[derive(Debug, Deserialize)]
pub struct EntriesConfig {
    #[serde(default = "default_entries_dir")]
    pub dir: String,
}

#[derive(Debug, Deserialize)]
pub struct PageSettings {
    #[serde(default = "default_page_path")]
    pub path: String,
    #[serde(default = "default_start_marker")]
    pub start_marker: String,
    #[serde(default = "default_end_marker")]
    pub end_marker: String,
}

#[derive(Debug, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_site_root")]
    pub site_root: String,
}

impl Default for EntriesConfig {
    fn default() -> Self {
        Self {
            dir: default_entries_dir(),
        }
    }
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            path: default_page_path(),
            start_marker: default_start_marker(),
            end_marker: default_end_marker(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            site_root: default_site_root(),
        }
    }
}

fn default_entries_dir() -> String {
    "src/currents/entries".to_string()
}
fn default_page_path() -> String {
    "currents.html".to_string()
}
fn default_start_marker() -> String {
    Markers::default().start
}
fn default_end_marker() -> String {
    Markers::default().end
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    5174
}
fn default_site_root() -> String {
    ".".to_string()
}

impl ConfigFile {
    /// Load configuration from `path` if it exists.
    /// Returns an error if the config file exists but is malformed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: ConfigFile = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Page pipeline settings.
    pub fn page_config(&self) -> PageConfig {
        PageConfig {
            entries_dir: PathBuf::from(&self.entries.dir),
            page_path: PathBuf::from(&self.page.path),
            markers: Markers {
                start: self.page.start_marker.clone(),
                end: self.page.end_marker.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_uses_defaults() {
        let temp = tempdir().unwrap();

        let config = ConfigFile::load(&temp.path().join("currents.toml")).unwrap();

        assert_eq!(config.entries.dir, "src/currents/entries");
        assert_eq!(config.page.start_marker, "<!-- CURRENTS:START -->");
        assert_eq!(config.server.port, 5174);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("currents.toml");
        fs::write(&path, "[page]\npath = \"public/now.html\"\n\n[server]\nport = 9000\n").unwrap();

        let config = ConfigFile::load(&path).unwrap();
        let page = config.page_config();

        assert_eq!(page.page_path, PathBuf::from("public/now.html"));
        assert_eq!(page.entries_dir, PathBuf::from("src/currents/entries"));
        assert_eq!(page.markers, Markers::default());
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("currents.toml");
        fs::write(&path, "[page\npath = ").unwrap();

        assert!(ConfigFile::load(&path).is_err());
    }
}
