//! Configuration - defaults, overlaid by `~/.wtf-cosmos/config.yaml`,
//! overlaid by the `WTF_API_BASE` environment variable.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::{
    API_BASE_ENV, BLOCKS_POLL_INTERVAL, CONFIG_DIR_NAME, DEFAULT_API_BASE, DEFAULT_BLOCK_LIMIT,
    DEFAULT_LOG_FILE, MINING_POLL_INTERVAL, REQUEST_TIMEOUT, STATS_POLL_INTERVAL,
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_base: String,
    pub stats_interval_secs: u64,
    pub blocks_interval_secs: u64,
    pub mining_interval_secs: u64,
    pub block_limit: usize,
    pub request_timeout_secs: u64,
    pub log_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base: DEFAULT_API_BASE.to_string(),
            stats_interval_secs: STATS_POLL_INTERVAL.as_secs(),
            blocks_interval_secs: BLOCKS_POLL_INTERVAL.as_secs(),
            mining_interval_secs: MINING_POLL_INTERVAL.as_secs(),
            block_limit: DEFAULT_BLOCK_LIMIT,
            request_timeout_secs: REQUEST_TIMEOUT.as_secs(),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl Config {
    /// Load from the default config file location and the environment
    pub fn load() -> Result<Self> {
        let path = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CONFIG_DIR_NAME)
            .join("config.yaml");
        let env_base = std::env::var(API_BASE_ENV).ok();
        Self::load_from(&path, env_base.as_deref())
    }

    /// A missing file is not an error; a malformed one is.
    pub fn load_from(path: &Path, env_base: Option<&str>) -> Result<Self> {
        let mut config = if path.exists() {
            let content = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_yaml::from_str::<Config>(&content)
                .with_context(|| format!("parsing {}", path.display()))?
        } else {
            Config::default()
        };

        if let Some(base) = env_base.filter(|b| !b.trim().is_empty()) {
            config.api_base = base.trim().to_string();
        }
        config.api_base = config.api_base.trim_end_matches('/').to_string();
        Ok(config)
    }

    pub fn stats_interval(&self) -> Duration {
        Duration::from_secs(self.stats_interval_secs.max(1))
    }

    pub fn blocks_interval(&self) -> Duration {
        Duration::from_secs(self.blocks_interval_secs.max(1))
    }

    pub fn mining_interval(&self) -> Duration {
        Duration::from_secs(self.mining_interval_secs.max(1))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}
