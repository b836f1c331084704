pub mod config;
pub mod config_loader;

pub use config::{AppConfig, DatasetConfig, ServerConfig};
pub use config_loader::ConfigLoader;
