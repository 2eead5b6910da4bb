use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::catalog::MovieCatalog;
use crate::config::CatalogConfig;
use crate::providers::http_client;
use crate::MoodflixError;

/// Body of `GET /search/movie`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<MovieResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MovieResult {
    pub poster_path: Option<String>,
    #[serde(default)]
    pub title: String,
}

/// Client for The Movie Database search API
pub struct TmdbClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl TmdbClient {
    /// Create a new TMDB client from configuration
    pub fn new(config: &CatalogConfig, timeout: Option<Duration>) -> Result<Self, MoodflixError> {
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("TMDB_API_KEY").ok())
            .ok_or_else(|| {
                MoodflixError::MissingApiKey(
                    "TMDB_API_KEY not found in config or environment".to_string(),
                )
            })?;

        Ok(TmdbClient {
            client: http_client(timeout)?,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        TmdbClient {
            client: Client::new(),
            api_key,
            base_url,
        }
    }

    /// Search movies by title
    pub async fn search_movie(&self, query: &str) -> Result<SearchResponse, MoodflixError> {
        let response = self
            .client
            .get(format!("{}/search/movie", self.base_url))
            .query(&[("api_key", self.api_key.as_str()), ("query", query)])
            .send()
            .await
            .map_err(|e| MoodflixError::PosterLookup(format!("'{}': {}", query, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(MoodflixError::PosterLookup(format!(
                "'{}': TMDB returned {}",
                query, status
            )));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| MoodflixError::PosterLookup(format!("'{}': {}", query, e)))?;
        debug!("TMDB search '{}' returned {} results", query, body.results.len());
        Ok(body)
    }
}

#[async_trait]
impl MovieCatalog for TmdbClient {
    fn catalog_name(&self) -> &str {
        "tmdb"
    }

    async fn poster_path(&self, title: &str) -> Result<Option<String>, MoodflixError> {
        let response = self.search_movie(title).await?;
        Ok(response
            .results
            .into_iter()
            .next()
            .and_then(|movie| movie.poster_path))
    }
}
