// errors.rs
use std::time::Duration;
use thiserror::Error;

/// Everything that can go wrong while loading the catalog. The UI treats all of
/// them as a single "fetch failed" kind and only shows the message.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP error {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Catalog parsing error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Request timed out after {}ms", .0.as_millis())]
    Timeout(Duration),
}

#[derive(Error, Debug)]
pub enum NavigationError {
    #[error("Unknown route: {0}")]
    UnknownRoute(String),

    #[error("Route '{route}' is missing argument '{argument}'")]
    MissingArgument { route: String, argument: String },

    #[error("Failed to decode navigation argument: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid catalog URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Unsupported catalog URL scheme: {0}. Only http/https supported")]
    UnsupportedScheme(String),
}
