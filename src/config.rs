// Runtime configuration.
// Command-line arguments for each subcommand and the config structs they resolve to.

use std::path::PathBuf;
use std::time::Duration;

use clap::Args;

use crate::client::{DEFAULT_BASE_URL, RetryPolicy};
use crate::model::DEFAULT_PAGE_SIZE;
use crate::store::{paths, watcher::DEFAULT_POLL_INTERVAL};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3000";

/// Backend settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub data_path: PathBuf,
    pub host: String,
    pub port: u16,
    pub watch_interval: Duration,
    /// Origins allowed by CORS.
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            data_path: paths::default_data_path(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            watch_interval: DEFAULT_POLL_INTERVAL,
            allowed_origins: vec![DEFAULT_ALLOWED_ORIGIN.to_string()],
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Front-end settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub base_url: String,
    pub page_size: u32,
    pub retry: RetryPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            retry: RetryPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct ServeArgs {
    /// JSON file holding the items
    #[arg(long, env = "CATALOG_DATA")]
    pub data: Option<PathBuf>,

    #[arg(long, env = "CATALOG_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    #[arg(long, env = "CATALOG_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// How often the data file is checked for changes
    #[arg(long, default_value_t = 500)]
    pub watch_interval_ms: u64,

    /// Origin allowed to call the API (repeatable)
    #[arg(long = "allow-origin", default_values_t = [DEFAULT_ALLOWED_ORIGIN.to_string()])]
    pub allow_origins: Vec<String>,
}

impl ServeArgs {
    pub fn into_config(self) -> ServerConfig {
        ServerConfig {
            data_path: self.data.unwrap_or_else(paths::default_data_path),
            host: self.host,
            port: self.port,
            watch_interval: Duration::from_millis(self.watch_interval_ms),
            allowed_origins: self.allow_origins,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct BrowseArgs {
    /// Base URL of the catalog backend
    #[arg(long, env = "CATALOG_URL", default_value = DEFAULT_BASE_URL)]
    pub url: String,

    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE, value_parser = clap::value_parser!(u32).range(1..))]
    pub page_size: u32,

    /// Attempts per fetch before giving up
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u32).range(1..))]
    pub retries: u32,

    #[arg(long, default_value_t = 1000)]
    pub retry_delay_ms: u64,
}

impl BrowseArgs {
    pub fn into_config(self) -> ClientConfig {
        ClientConfig {
            base_url: self.url,
            page_size: self.page_size,
            retry: RetryPolicy::new(self.retries, Duration::from_millis(self.retry_delay_ms)),
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct AddArgs {
    /// Base URL of the catalog backend
    #[arg(long, env = "CATALOG_URL", default_value = DEFAULT_BASE_URL)]
    pub url: String,

    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub category: String,

    #[arg(long, allow_negative_numbers = true)]
    pub price: f64,
}
