use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, FileFormat};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::RwLock;

use super::error::Result;

// CONFIG static variable. It's actually an AppConfig
// inside an RwLock.
lazy_static! {
    pub static ref BUILDER: RwLock<ConfigBuilder<DefaultState>> = RwLock::new(Config::builder());
}

/// Prefix of environment variables that override configuration keys,
/// e.g. `DIRSYNC_SYNC__SIZE_LIMIT_GB=10`.
const ENV_PREFIX: &str = "DIRSYNC";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    pub level: String,
    /// Log file path; empty disables the file drain.
    #[serde(default)]
    pub file: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Directories larger than this many gigabytes (1e9 bytes) need confirmation.
    pub size_limit_gb: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub log: LogConfig,
    pub sync: SyncConfig,
}

impl AppConfig {
    /// Initialize AppConfig.
    pub fn init(default_config: Option<&str>) -> Result<()> {
        let mut builder = Config::builder();

        // Embed file into executable
        // This macro will embed the configuration file into the
        // executable. Check include_str! for more info.
        if let Some(config_contents) = default_config {
            builder =
                builder.add_source(config::File::from_str(config_contents, FileFormat::Toml));
        }

        // Merge settings with env variables
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        // Save Config to RwLock
        {
            let mut w = BUILDER.write()?;
            *w = builder;
        }

        Ok(())
    }

    /// Merge a configuration file over the current settings.
    pub fn merge_config(config_file: Option<&Path>) -> Result<()> {
        // Merge settings with config file if there is one
        if let Some(config_file_path) = config_file {
            let mut w = BUILDER.write()?;
            *w = w.clone().add_source(config::File::from(config_file_path));
        }
        Ok(())
    }

    /// Set CONFIG
    pub fn set(key: &str, value: &str) -> Result<()> {
        {
            // Set Property
            let mut w = BUILDER.write()?;
            *w = w.clone().set_override(key, value)?;
        }

        Ok(())
    }

    /// Get a single value
    pub fn get<'de, T>(key: &'de str) -> Result<T>
    where
        T: serde::Deserialize<'de>,
    {
        Ok(BUILDER.read()?.build_cloned()?.get::<T>(key)?)
    }

    /// Get CONFIG
    /// This clones Config (from RwLock<Config>) into a new AppConfig object.
    /// This means you have to fetch this again if you changed the configuration.
    pub fn fetch() -> Result<AppConfig> {
        // Get a Read Lock from RwLock
        let r = BUILDER.read()?;

        // Clone the Config object
        let config_clone = r.build_cloned()?;

        // Coerce Config into AppConfig
        let app_config: AppConfig = config_clone.try_deserialize()?;
        Ok(app_config)
    }
}
