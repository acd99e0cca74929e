//! HTTP access to the vibe backend.

use super::model::{parse_location_names, parse_locations, Location, VibeResult};
use crate::core::config::Config;
use crate::core::error::{Error, Result};
use reqwest::{Client, Url};
use serde_json::Value;
use tracing::{debug, instrument};

/// One of the three calls the client can make
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// `GET /api/locations`
    Locations,
    /// `GET /api/vibe/{name}`
    Vibe(String),
    /// `GET /api/locations_by_vibe/{tag}`
    LocationsByVibe(String),
}

/// Result of executing a [`Request`], tagged by which call produced it
#[derive(Debug)]
pub enum Outcome {
    Locations(Result<Vec<Location>>),
    Vibe(Result<VibeResult>),
    LocationsByVibe(Result<Vec<String>>),
}

/// Client for the vibe backend. Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct VibeClient {
    client: Client,
    base_url: Url,
}

impl VibeClient {
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: config.api_url.clone(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build `{base}/api/{segments...}`, percent-encoding each segment
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::Config(format!("API URL cannot be a base: {}", self.base_url)))?
            .pop_if_empty()
            .push("api")
            .extend(segments);
        Ok(url)
    }

    /// Run a request and wrap its result in the matching [`Outcome`]
    pub async fn execute(&self, request: &Request) -> Outcome {
        match request {
            Request::Locations => Outcome::Locations(self.fetch_locations().await),
            Request::Vibe(name) => Outcome::Vibe(self.fetch_vibe(name).await),
            Request::LocationsByVibe(tag) => {
                Outcome::LocationsByVibe(self.fetch_locations_by_vibe(tag).await)
            }
        }
    }

    pub async fn fetch_locations(&self) -> Result<Vec<Location>> {
        let body = self.get_json(self.endpoint(&["locations"])?).await?;
        parse_locations(body)
    }

    pub async fn fetch_vibe(&self, name: &str) -> Result<VibeResult> {
        let body = self.get_json(self.endpoint(&["vibe", name])?).await?;
        VibeResult::from_value(body)
    }

    pub async fn fetch_locations_by_vibe(&self, tag: &str) -> Result<Vec<String>> {
        let body = self
            .get_json(self.endpoint(&["locations_by_vibe", tag])?)
            .await?;
        parse_location_names(body)
    }

    /// GET and decode a JSON body. The status code is not checked: the
    /// backend reports domain errors inside the body.
    #[instrument(skip_all, fields(url = %url))]
    async fn get_json(&self, url: Url) -> Result<Value> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        debug!(%status, len = bytes.len(), "Backend responded");
        Ok(serde_json::from_slice(&bytes)?)
    }
}
