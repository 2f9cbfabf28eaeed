use crate::models::{Event, Parking, Station};
use crate::services::records::{parse_events, parse_parkings, parse_stations};
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while loading a feed
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Request to {url} returned {status}")]
    Status { url: String, status: u16 },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Malformed XML: {0}")]
    Malformed(String),
}

/// Open data client
///
/// A source is fetched over HTTP when it looks like an `http(s)://` URL and
/// read from disk otherwise, so feeds can be replayed from saved files.
#[derive(Debug, Clone)]
pub struct FeedClient {
    client: Client,
}

impl FeedClient {
    pub fn new(timeout: Duration) -> Result<Self, FeedError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Fetch the raw body of a feed
    pub async fn fetch(&self, source: &str) -> Result<String, FeedError> {
        if !is_url(source) {
            tracing::debug!("Reading feed from file: {}", source);
            return tokio::fs::read_to_string(source)
                .await
                .map_err(|source_err| FeedError::Io {
                    path: source.to_string(),
                    source: source_err,
                });
        }

        tracing::debug!("Fetching feed from: {}", source);

        let response = self.client.get(source).send().await?;

        // Only a plain 200 is accepted
        if response.status() != reqwest::StatusCode::OK {
            return Err(FeedError::Status {
                url: response.url().to_string(),
                status: response.status().as_u16(),
            });
        }

        Ok(response.text().await?)
    }

    pub async fn events(&self, source: &str) -> Result<Vec<Event>, FeedError> {
        parse_events(&self.fetch(source).await?)
    }

    pub async fn stations(&self, source: &str) -> Result<Vec<Station>, FeedError> {
        parse_stations(&self.fetch(source).await?)
    }

    pub async fn parkings(&self, source: &str) -> Result<Vec<Parking>, FeedError> {
        parse_parkings(&self.fetch(source).await?)
    }
}

fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}
