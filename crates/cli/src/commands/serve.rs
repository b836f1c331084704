//! Serve CLI command.
//!
//! Runs the web API over the master script, optionally reloading the index
//! whenever the file changes.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use dhan_agent_core::AppConfig;
use dhan_agent_instruments::{DatasetWatcher, IndexHandle};
use dhan_agent_web_api::ApiServer;

use super::{dataset_path, load_index};

/// Arguments for the serve command.
#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Server address (overrides server.host/server.port from config)
    #[arg(short, long)]
    pub addr: Option<String>,

    /// Master script CSV (overrides dataset.path from config)
    #[arg(long)]
    pub dataset: Option<PathBuf>,

    /// Reload the master script when it changes (overrides dataset.watch)
    #[arg(long)]
    pub watch: bool,
}

/// Runs the serve command.
///
/// # Errors
/// Returns an error if the master script cannot be loaded or the server fails.
pub async fn run_serve(args: ServeArgs, config: AppConfig) -> Result<()> {
    let path = dataset_path(args.dataset.as_ref(), &config).to_path_buf();
    let index = load_index(&path)?;
    let addr = args.addr.unwrap_or_else(|| config.server.addr());

    let handle = if args.watch || config.dataset.watch {
        let (watcher, handle) = DatasetWatcher::new(path, index);
        tokio::spawn(async move {
            if let Err(e) = watcher.watch().await {
                tracing::error!("Master script watcher stopped: {}", e);
            }
        });
        handle
    } else {
        IndexHandle::fixed(index)
    };

    ApiServer::new(handle).serve(&addr).await
}
