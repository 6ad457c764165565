// src/navigation.rs
//! Two-destination navigation. Routes travel through the back stack in their
//! path form, so a podcast handed to the details screen is always a decoded copy.

use crate::errors::NavigationError;
use crate::podcast::Podcast;
use log::debug;
use url::form_urlencoded;

pub const PODCAST_LIST_ROUTE: &str = "podcast_list";
pub const PODCAST_DETAILS_ROUTE: &str = "podcast_details";
const PODCAST_ARG: &str = "podcast";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    PodcastList,
    PodcastDetails { podcast: Podcast },
}

impl Route {
    pub fn to_path(&self) -> Result<String, NavigationError> {
        match self {
            Route::PodcastList => Ok(PODCAST_LIST_ROUTE.to_string()),
            Route::PodcastDetails { podcast } => Ok(format!(
                "{}?{}={}",
                PODCAST_DETAILS_ROUTE,
                PODCAST_ARG,
                PodcastNavType::serialize_as_value(podcast)?
            )),
        }
    }

    pub fn from_path(path: &str) -> Result<Route, NavigationError> {
        let (name, query) = path.split_once('?').unwrap_or((path, ""));
        match name {
            PODCAST_LIST_ROUTE => Ok(Route::PodcastList),
            PODCAST_DETAILS_ROUTE => {
                let value = query
                    .split('&')
                    .filter_map(|pair| pair.split_once('='))
                    .find(|(key, _)| *key == PODCAST_ARG)
                    .map(|(_, value)| value)
                    .ok_or_else(|| NavigationError::MissingArgument {
                        route: PODCAST_DETAILS_ROUTE.to_string(),
                        argument: PODCAST_ARG.to_string(),
                    })?;
                Ok(Route::PodcastDetails { podcast: PodcastNavType::parse_value(value)? })
            }
            other => Err(NavigationError::UnknownRoute(other.to_string())),
        }
    }
}

/// Encodes a [`Podcast`] as a route argument: JSON, then form-urlencoded.
pub struct PodcastNavType;

impl PodcastNavType {
    pub fn serialize_as_value(podcast: &Podcast) -> Result<String, NavigationError> {
        let json = serde_json::to_string(podcast)?;
        Ok(form_urlencoded::byte_serialize(json.as_bytes()).collect())
    }

    pub fn parse_value(value: &str) -> Result<Podcast, NavigationError> {
        // byte_serialize escapes '=' and '&', so the whole value parses back as one key.
        let json: String = form_urlencoded::parse(value.as_bytes())
            .next()
            .map(|(key, _)| key.into_owned())
            .unwrap_or_default();
        Ok(serde_json::from_str(&json)?)
    }
}

/// Back stack of route paths. The start destination is never popped.
#[derive(Debug, Clone)]
pub struct NavHost {
    back_stack: Vec<String>,
}

impl Default for NavHost {
    fn default() -> Self {
        Self { back_stack: vec![PODCAST_LIST_ROUTE.to_string()] }
    }
}

impl NavHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn navigate(&mut self, route: &Route) -> Result<(), NavigationError> {
        let path = route.to_path()?;
        debug!("navigate -> {}", path.split_once('?').map_or(path.as_str(), |(name, _)| name));
        self.back_stack.push(path);
        Ok(())
    }

    pub fn pop_back_stack(&mut self) -> bool {
        if self.back_stack.len() <= 1 {
            return false;
        }
        self.back_stack.pop();
        true
    }

    pub fn current_route(&self) -> Result<Route, NavigationError> {
        match self.back_stack.last() {
            Some(path) => Route::from_path(path),
            None => Ok(Route::PodcastList),
        }
    }

    pub fn depth(&self) -> usize {
        self.back_stack.len()
    }
}
