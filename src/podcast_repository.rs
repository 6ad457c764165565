// src/podcast_repository.rs
use crate::errors::FetchError;
use crate::podcast::{Podcast, PodcastId};
use async_trait::async_trait;
use log::{debug, info};
use reqwest::{Client, Response};
use serde::Deserialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub const DEFAULT_CATALOG_URL: &str = "https://listen-api-test.listennotes.com/api/v2/best_podcasts";

// ===== repository
#[async_trait]
pub trait PodcastRepository: Send + Sync {
    /// Loads the whole catalog in server order. No pagination, no filtering.
    async fn get_podcasts(&self) -> Result<Vec<Podcast>, FetchError>;
}

/// Catalogs either wrap the list (`{"podcasts": [...]}`) or serve it bare.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CatalogResponse {
    Wrapped { podcasts: Vec<Podcast> },
    Bare(Vec<Podcast>),
}

pub fn parse_catalog(body: &[u8]) -> Result<Vec<Podcast>, FetchError> {
    let response: CatalogResponse = serde_json::from_slice(body)?;
    Ok(match response {
        CatalogResponse::Wrapped { podcasts } => podcasts,
        CatalogResponse::Bare(podcasts) => podcasts,
    })
}

// ===== Live http repository
pub struct HttpPodcastRepository {
    client: Client,
    catalog_url: String,
}

impl HttpPodcastRepository {
    pub fn new(catalog_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

        let client: Client =
            reqwest::Client::builder().user_agent(APP_USER_AGENT).timeout(timeout).build()?;

        Ok(Self { client, catalog_url: catalog_url.to_string() })
    }

    pub fn catalog_url(&self) -> &str {
        &self.catalog_url
    }
}

#[async_trait]
impl PodcastRepository for HttpPodcastRepository {
    async fn get_podcasts(&self) -> Result<Vec<Podcast>, FetchError> {
        info!("HttpPodcastRepository: fetching {}", self.catalog_url);
        let response: Response = self.client.get(&self.catalog_url).send().await?;

        if !response.status().is_success() {
            return Err(FetchError::HttpStatus {
                url: self.catalog_url.clone(),
                status: response.status().as_u16(),
            });
        }

        let body = response.bytes().await?;
        debug!("HttpPodcastRepository: body fetched, length: {}", body.len());
        parse_catalog(&body)
    }
}

// ===== Fake repository for testing and offline mode
#[derive(Debug, Clone)]
pub enum FakeResponse {
    Podcasts(Vec<Podcast>),
    HttpStatus(u16),
    Body(String),
}

/// Serves its responses in order, repeating the last one once they run out.
pub struct FakeRepository {
    responses: Vec<FakeResponse>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl FakeRepository {
    pub fn new(response: FakeResponse) -> Self {
        Self::with_responses(vec![response])
    }

    pub fn with_responses(responses: Vec<FakeResponse>) -> Self {
        Self { responses, delay: None, calls: AtomicUsize::new(0) }
    }

    pub fn with_podcasts(podcasts: Vec<Podcast>) -> Self {
        Self::new(FakeResponse::Podcasts(podcasts))
    }

    pub fn failing(status: u16) -> Self {
        Self::new(FakeResponse::HttpStatus(status))
    }

    // Builder methods
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of times `get_podcasts` has been entered.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PodcastRepository for FakeRepository {
    async fn get_podcasts(&self) -> Result<Vec<Podcast>, FetchError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let Some(response) = self.responses.get(call).or(self.responses.last()) else {
            return Ok(Vec::new());
        };
        match response {
            FakeResponse::Podcasts(podcasts) => Ok(podcasts.clone()),
            FakeResponse::HttpStatus(status) => {
                Err(FetchError::HttpStatus { url: "fake://catalog".to_string(), status: *status })
            }
            FakeResponse::Body(body) => parse_catalog(body.as_bytes()),
        }
    }
}

/// Built-in catalog used by `--offline`.
pub fn sample_catalog() -> Vec<Podcast> {
    vec![
        Podcast::new(
            PodcastId::new("1"),
            "Sample Podcast".to_string(),
            "Sample Publisher".to_string(),
            String::new(),
            "This is a sample podcast description.".to_string(),
        ),
        Podcast::new(
            PodcastId::new("2"),
            "Developer Voices".to_string(),
            "Kris Jenkins".to_string(),
            "https://example.com/developer-voices.jpg".to_string(),
            "<p>Deep-dive conversations with the people building <b>software</b>.</p>\
             <p>New episodes every week.</p>"
                .to_string(),
        ),
        Podcast::new(
            PodcastId::new("3"),
            "Rust in Production".to_string(),
            "corrode".to_string(),
            "https://example.com/rust-in-production.jpg".to_string(),
            "<p>Stories from companies running <i>Rust</i> in production.</p>".to_string(),
        ),
    ]
}
