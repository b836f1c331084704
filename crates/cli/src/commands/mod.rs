//! CLI commands for instrument resolution.

pub mod inspect;
pub mod resolve;
pub mod serve;
pub mod validate;

pub use inspect::{run_inspect, InspectArgs};
pub use resolve::{run_resolve, ResolveArgs};
pub use serve::{run_serve, ServeArgs};
pub use validate::{run_validate, ValidateArgs};

use anyhow::{Context, Result};
use dhan_agent_core::AppConfig;
use dhan_agent_instruments::InstrumentIndex;
use std::path::{Path, PathBuf};

/// Dataset path from the command line, falling back to configuration.
pub(crate) fn dataset_path<'a>(flag: Option<&'a PathBuf>, config: &'a AppConfig) -> &'a Path {
    flag.map_or(config.dataset.path.as_path(), PathBuf::as_path)
}

pub(crate) fn load_index(path: &Path) -> Result<InstrumentIndex> {
    InstrumentIndex::from_csv(path)
        .with_context(|| format!("Failed to load master script: {}", path.display()))
}
