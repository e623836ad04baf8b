//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

use std::time::Duration;

/// Default API origin when `WTF_API_BASE` is not set
pub const DEFAULT_API_BASE: &str = "http://localhost:3000";

/// Environment variable selecting the API origin
pub const API_BASE_ENV: &str = "WTF_API_BASE";

/// Directory (under the home directory) holding `config.yaml`
pub const CONFIG_DIR_NAME: &str = ".wtf-cosmos";

/// Default log file, written next to the working directory
pub const DEFAULT_LOG_FILE: &str = "wtf-cosmos.log";

/// Polling periods per feed
pub const STATS_POLL_INTERVAL: Duration = Duration::from_secs(5);
pub const BLOCKS_POLL_INTERVAL: Duration = Duration::from_secs(15);
pub const MINING_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Number of blocks requested by the explorer feed
pub const DEFAULT_BLOCK_LIMIT: usize = 10;

/// Per-request timeout for the HTTP client
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Required address prefix and minimum total length
pub const ADDRESS_PREFIX: &str = "wtf1";
pub const ADDRESS_MIN_LEN: usize = 10;

/// Token symbol used when formatting amounts
pub const TOKEN_SYMBOL: &str = "WTF";

/// Error shown by a feed whose fetch failed
pub const FETCH_FAILED_MESSAGE: &str = "Failed to load data";

/// Sample miner addresses cycled by the "fill sample" key
pub const SAMPLE_MINER_ADDRESSES: [&str; 3] = [
    "wtf1miner123456789abcdefghijklmnop",
    "wtf1hashpower987654321fedcbazyx",
    "wtf1digger555666777888999aaabbb",
];

/// Block reward shown on the mining panel
pub const BLOCK_REWARD: u64 = 50;

/// Application name
pub const APP_NAME: &str = "WTF Cosmos";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
