use crate::config::AppConfig;
use anyhow::Result;
use figment::{
    providers::{Env, Format, Json, Toml},
    Figment,
};
use std::path::Path;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads application configuration by merging TOML, environment variables, and JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration files cannot be read or parsed.
    pub fn load() -> Result<AppConfig> {
        Self::load_from("config/Config.toml")
    }

    /// Loads application configuration with `path` as the TOML layer.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration files cannot be read or parsed.
    pub fn load_from(path: impl AsRef<Path>) -> Result<AppConfig> {
        let config: AppConfig = Self::layered(Figment::new().merge(Toml::file(path.as_ref())))
            .extract()?;

        Ok(config)
    }

    /// Loads application configuration with a specific profile.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration files cannot be read or parsed.
    pub fn load_with_profile(profile: &str) -> Result<AppConfig> {
        let config: AppConfig = Self::layered(
            Figment::new()
                .merge(Toml::file("config/Config.toml"))
                .merge(Toml::file(format!("config/Config.{profile}.toml"))),
        )
        .extract()?;

        Ok(config)
    }

    /// `APP_DATASET__PATH` style variables, then the bare `MASTER_CSV`
    /// variable older deployments set, then the JSON file.
    fn layered(figment: Figment) -> Figment {
        figment
            .merge(Env::prefixed("APP_").split("__"))
            .merge(Env::raw().only(&["MASTER_CSV"]).map(|_| "dataset.path".into()))
            .join(Json::file("config/Config.json"))
    }
}
