use std::sync::Arc;
use std::time::Duration;

use crate::catalog::{PosterResolver, TmdbClient};
use crate::config::AppConfig;
use crate::pipeline::Pipeline;
use crate::providers::ProviderFactory;
use crate::MoodflixError;

/// Generative model provider to interpret moods and pictures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiProvider {
    Google,
    OpenAI,
    Anthropic,
}

impl AiProvider {
    /// Convert to provider name string used by the factory
    pub fn as_str(&self) -> &'static str {
        match self {
            AiProvider::Google => "google",
            AiProvider::OpenAI => "openai",
            AiProvider::Anthropic => "anthropic",
        }
    }
}

/// Builder for configuring a recommendation [`Pipeline`]
#[derive(Debug, Default)]
pub struct RecommenderBuilder {
    config: Option<AppConfig>,
    provider: Option<AiProvider>,
    api_key: Option<String>,
    model: Option<String>,
    tmdb_api_key: Option<String>,
    timeout: Option<Duration>,
    language: Option<String>,
}

impl RecommenderBuilder {
    /// Use an explicit configuration instead of loading `moodflix.toml` and
    /// `MOODFLIX__*` environment variables
    pub fn config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the generative model provider
    ///
    /// # Example
    /// ```
    /// use moodflix::{AiProvider, Recommender};
    ///
    /// let builder = Recommender::builder().provider(AiProvider::OpenAI);
    /// ```
    pub fn provider(mut self, provider: AiProvider) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Set the API key for the generative model provider
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the model name, e.g. "gemini-2.5-flash"
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the TMDB API key used for poster lookups
    pub fn tmdb_api_key(mut self, key: impl Into<String>) -> Self {
        self.tmdb_api_key = Some(key.into());
        self
    }

    /// Set a timeout for every HTTP request
    ///
    /// # Example
    /// ```
    /// use moodflix::Recommender;
    /// use std::time::Duration;
    ///
    /// let builder = Recommender::builder().timeout(Duration::from_secs(20));
    /// ```
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Language the analysis and recommendation should be written in
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Build the pipeline
    ///
    /// # Errors
    /// Returns an error if:
    /// - The configuration cannot be loaded
    /// - The provider is unknown, disabled, or has no API key
    /// - No TMDB API key is available
    pub fn build(self) -> Result<Pipeline, MoodflixError> {
        let mut config = match self.config {
            Some(config) => config,
            None => AppConfig::load()?,
        };

        let provider_name = self
            .provider
            .map(|p| p.as_str().to_string())
            .unwrap_or_else(|| config.default_provider.clone());
        let mut provider_config = config.provider_or_default(&provider_name).ok_or_else(|| {
            MoodflixError::Builder(format!(
                "Provider '{}' not found in configuration (available: {})",
                provider_name,
                ProviderFactory::available_providers().join(", ")
            ))
        })?;

        // Explicit values override configuration
        if let Some(api_key) = self.api_key {
            provider_config.api_key = Some(api_key);
        }
        if let Some(model) = self.model {
            provider_config.model = model;
        }
        if let Some(tmdb_api_key) = self.tmdb_api_key {
            config.catalog.api_key = Some(tmdb_api_key);
        }

        let timeout = self
            .timeout
            .unwrap_or_else(|| Duration::from_secs(config.timeout));

        let provider = ProviderFactory::create(&provider_name, &provider_config, Some(timeout))?;
        let catalog = TmdbClient::new(&config.catalog, Some(timeout))?;
        let resolver = PosterResolver::new(Arc::new(catalog), &config.catalog);

        let pipeline = Pipeline::new(Arc::from(provider), resolver);
        Ok(match self.language {
            Some(language) => pipeline.with_language(language),
            None => pipeline,
        })
    }
}

/// Main entry point for the builder API
pub struct Recommender;

impl Recommender {
    /// Creates a new builder for a recommendation pipeline
    ///
    /// # Example
    /// ```
    /// use moodflix::Recommender;
    ///
    /// let builder = Recommender::builder();
    /// ```
    pub fn builder() -> RecommenderBuilder {
        RecommenderBuilder::default()
    }
}
