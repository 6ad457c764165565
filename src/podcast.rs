// src/podcast.rs
use serde::{Deserialize, Serialize};

// === PODCAST ID ===
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PodcastId(String);

impl std::fmt::Display for PodcastId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl PodcastId {
    pub fn new(s: &str) -> Self {
        PodcastId(s.to_string())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

// === PODCAST RECORD ===
/// One entry of the remote catalog. Immutable once constructed; identity is the `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Podcast {
    #[serde(rename = "id")]
    id: PodcastId,
    #[serde(rename = "title")]
    title: String,
    #[serde(rename = "publisher")]
    publisher: String,
    #[serde(rename = "image", default)]
    image: String,
    #[serde(rename = "description", default)]
    description: String,
}

impl Podcast {
    pub fn new(
        id: PodcastId,
        title: String,
        publisher: String,
        image: String,
        description: String,
    ) -> Self {
        Self { id, title, publisher, image, description }
    }

    // Accessor methods

    pub fn id(&self) -> &PodcastId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn publisher(&self) -> &str {
        &self.publisher
    }

    /// Artwork URL. Empty when the catalog has none.
    pub fn image(&self) -> &str {
        &self.image
    }

    /// Raw description as served by the catalog, possibly containing HTML.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Field-by-field equality, unlike `==` which only compares ids.
    pub fn same_fields(&self, other: &Podcast) -> bool {
        self.id == other.id
            && self.title == other.title
            && self.publisher == other.publisher
            && self.image == other.image
            && self.description == other.description
    }
}

impl PartialEq for Podcast {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Podcast {}
