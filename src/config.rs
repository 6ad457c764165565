// src/config.rs
use crate::errors::ConfigError;
use crate::podcast_repository::DEFAULT_CATALOG_URL;
use clap::Parser;
use log::LevelFilter;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Browse a remote podcast catalog in the terminal
#[derive(Parser, Debug)]
#[command(name = "podcasts")]
#[command(about = "Browse a remote podcast catalog in the terminal")]
#[command(version)]
pub struct Cli {
    /// Catalog endpoint returning the podcast list as JSON
    #[arg(long, env = "PODCASTS_CATALOG_URL", default_value = DEFAULT_CATALOG_URL)]
    pub catalog_url: String,

    /// Fetch timeout in seconds
    #[arg(short, long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,

    /// Minimum gap between two accepted taps on the list, in milliseconds
    #[arg(long, default_value_t = 1000)]
    pub debounce_ms: u64,

    /// File the log is written to (the terminal belongs to the UI)
    #[arg(long, default_value = "podcasts.log")]
    pub log_file: PathBuf,

    /// Log level: off, error, warn, info, debug, trace
    #[arg(long, default_value = "info")]
    pub log_level: LevelFilter,

    /// Use the built-in sample catalog instead of the network
    #[arg(long)]
    pub offline: bool,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub catalog_url: Url,
    pub fetch_timeout: Duration,
    pub debounce_interval: Duration,
    pub log_file: PathBuf,
    pub log_level: LevelFilter,
    pub offline: bool,
}

impl TryFrom<Cli> for AppConfig {
    type Error = ConfigError;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        let catalog_url = Url::parse(&cli.catalog_url)
            .map_err(|source| ConfigError::InvalidUrl { url: cli.catalog_url.clone(), source })?;
        if catalog_url.scheme() != "http" && catalog_url.scheme() != "https" {
            return Err(ConfigError::UnsupportedScheme(catalog_url.scheme().to_string()));
        }

        Ok(Self {
            catalog_url,
            fetch_timeout: Duration::from_secs(cli.timeout),
            debounce_interval: Duration::from_millis(cli.debounce_ms),
            log_file: cli.log_file,
            log_level: cli.log_level,
            offline: cli.offline,
        })
    }
}
