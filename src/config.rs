//! Runtime configuration: `~/.folio/config.yaml` layered under `FOLIO_*` environment variables

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::{CONFIG_DIR_NAME, DEFAULT_API_URL, DEFAULT_LOG_FILE};

const CONFIG_FILE: &str = "config.yaml";

/// Prefix of the environment overrides: `FOLIO_API_URL`, `FOLIO_CV_PATH`, `FOLIO_LOG_FILE`
pub const ENV_PREFIX: &str = "FOLIO";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the contact API
    pub api_url: String,
    /// CV copied on download; the resume bundled into the binary when unset
    pub cv_path: Option<PathBuf>,
    pub log_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: String::from(DEFAULT_API_URL),
            cv_path: None,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl Config {
    /// Directory holding config and content overrides
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CONFIG_DIR_NAME)
    }

    /// Load from the user config dir and the process environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(&Self::config_dir(), None)
    }

    /// Layer `dir/config.yaml` (optional) under the environment.
    ///
    /// `env` replaces the process environment when given.
    pub fn load_with(
        dir: &Path,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        let builder = config::Config::builder()
            .add_source(
                config::File::from(dir.join(CONFIG_FILE))
                    .format(config::FileFormat::Yaml)
                    .required(false),
            )
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .ignore_empty(true)
                    .source(env),
            );

        let mut cfg: Self = builder.build()?.try_deserialize()?;
        cfg.api_url = cfg.api_url.trim().to_string();
        Ok(cfg)
    }
}
