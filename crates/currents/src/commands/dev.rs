//! Development server command.

use std::path::PathBuf;

use anyhow::Result;
use currents_server::{DevServer, DevServerConfig};

use crate::config::ConfigFile;

/// Run the dev server.
pub async fn run(config: &ConfigFile, port: Option<u16>, open: bool, watch: bool) -> Result<()> {
    let port = port.unwrap_or(config.server.port);
    tracing::info!("Starting development server on port {}", port);

    let server_config = DevServerConfig {
        page: config.page_config(),
        site_root: PathBuf::from(&config.server.site_root),
        host: config.server.host.clone(),
        port,
        open,
        watch,
    };

    DevServer::new(server_config).start().await?;

    Ok(())
}
