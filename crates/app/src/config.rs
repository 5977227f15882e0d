//! CLI configuration groups.

use std::{path::PathBuf, time::Duration};

use clap::{Args, ValueEnum};

use platter_app::api::ApiConfig;

/// Log output format.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub(crate) enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub(crate) struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, global = true, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Local storage settings.
#[derive(Debug, Args)]
pub(crate) struct StorageConfig {
    /// Directory holding the cart's JSON files
    #[arg(long, global = true, env = "PLATTER_STORAGE_DIR", default_value = ".platter")]
    pub storage_dir: PathBuf,
}

/// Remote API settings.
#[derive(Debug, Args)]
pub(crate) struct ApiArgs {
    /// Catering API base URL
    #[arg(long, env = "PLATTER_API_URL")]
    pub api_url: String,

    /// Bearer token of the signed-in user
    #[arg(long, env = "PLATTER_API_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, env = "PLATTER_API_TIMEOUT_SECONDS", default_value_t = 10_u64)]
    pub timeout_seconds: u64,
}

impl From<ApiArgs> for ApiConfig {
    fn from(args: ApiArgs) -> Self {
        Self {
            base_url: args.api_url,
            token: args.api_token.filter(|token| !token.trim().is_empty()),
            timeout: Duration::from_secs(args.timeout_seconds),
        }
    }
}
