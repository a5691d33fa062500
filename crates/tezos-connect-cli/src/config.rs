use std::path::PathBuf;

use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};
use tezos_connect::ConnectorConfig;

/// Directory under the home directory holding the default config file
pub const DEFAULT_WORK_DIR: &str = ".tezos-connect";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub connector: ConnectorConfig,
}

impl Settings {
    #[must_use]
    pub fn new<P>(config_file_name: Option<P>) -> Self
    where
        P: Into<PathBuf>,
    {
        let default_settings = Self::default();
        // attempt to construct settings with file
        let from_file = Self::new_from_default(&default_settings, config_file_name);
        match from_file {
            Ok(f) => f,
            Err(e) => {
                tracing::error!(
                    "Error reading config file, falling back to defaults. Error: {e:?}"
                );
                default_settings
            }
        }
    }

    fn new_from_default<P>(
        default: &Settings,
        config_file_name: Option<P>,
    ) -> Result<Self, ConfigError>
    where
        P: Into<PathBuf>,
    {
        let config: String = match config_file_name {
            Some(value) => value.into().to_string_lossy().to_string(),
            None => home::home_dir()
                .ok_or(ConfigError::NotFound("Config Path".to_string()))?
                .join(DEFAULT_WORK_DIR)
                .join("config.toml")
                .to_string_lossy()
                .to_string(),
        };

        let builder = Config::builder();
        let config: Config = builder
            // use defaults
            .add_source(Config::try_from(default)?)
            // override with file contents
            .add_source(File::with_name(&config))
            .build()?;

        config.try_deserialize()
    }
}
