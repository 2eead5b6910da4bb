//! UniFFI bindings for moodflix
//!
//! This module provides FFI-compatible types and functions for use with iOS and Android.
//! It wraps the async Rust API with synchronous functions that manage their own tokio runtime,
//! so apps should call them off the UI thread.

use std::fmt;
use std::time::Duration;

use crate::catalog::poster_url as compose_poster_url;
use crate::config::CatalogConfig;
use crate::{
    AiProvider, AnalysisResult, ImageData, MoodflixError, MovieDisplayItem, PipelineInput,
    Recommendation, Recommender,
};

// Re-export UniFFI macro
#[cfg(feature = "uniffi")]
uniffi::setup_scaffolding!();

/// FFI-compatible analysis of a mood or picture
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiAnalysis {
    pub analysis: String,
    pub recommendation: String,
    pub titles: Vec<String>,
}

impl From<AnalysisResult> for FfiAnalysis {
    fn from(result: AnalysisResult) -> Self {
        FfiAnalysis {
            analysis: result.analysis,
            recommendation: result.recommendation,
            titles: result.titles,
        }
    }
}

/// FFI-compatible movie card
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiMovie {
    pub title: String,
    pub poster_url: Option<String>,
    pub trailer_search_url: Option<String>,
}

impl From<MovieDisplayItem> for FfiMovie {
    fn from(item: MovieDisplayItem) -> Self {
        FfiMovie {
            trailer_search_url: item.trailer_search_url(),
            title: item.title,
            poster_url: item.poster_url,
        }
    }
}

/// FFI-compatible recommendation
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiRecommendation {
    pub analysis: FfiAnalysis,
    pub movies: Vec<FfiMovie>,
}

impl From<Recommendation> for FfiRecommendation {
    fn from(recommendation: Recommendation) -> Self {
        FfiRecommendation {
            analysis: recommendation.result.into(),
            movies: recommendation.movies.into_iter().map(Into::into).collect(),
        }
    }
}

/// FFI-compatible provider enum
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Enum))]
pub enum FfiAiProvider {
    Google,
    OpenAI,
    Anthropic,
}

impl From<FfiAiProvider> for AiProvider {
    fn from(provider: FfiAiProvider) -> Self {
        match provider {
            FfiAiProvider::Google => AiProvider::Google,
            FfiAiProvider::OpenAI => AiProvider::OpenAI,
            FfiAiProvider::Anthropic => AiProvider::Anthropic,
        }
    }
}

/// FFI-compatible error type
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Error))]
pub enum FfiMoodflixError {
    /// The generative model could not be reached or failed
    AiCallError { message: String },
    /// The model answer could not be parsed
    ParseError { message: String },
    /// Invalid input provided
    InvalidInput { message: String },
    /// Configuration or builder error
    ConfigError { message: String },
    /// Runtime error (tokio)
    RuntimeError { message: String },
}

impl fmt::Display for FfiMoodflixError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FfiMoodflixError::AiCallError { message } => write!(f, "AI call error: {}", message),
            FfiMoodflixError::ParseError { message } => write!(f, "Parse error: {}", message),
            FfiMoodflixError::InvalidInput { message } => write!(f, "Invalid input: {}", message),
            FfiMoodflixError::ConfigError { message } => write!(f, "Config error: {}", message),
            FfiMoodflixError::RuntimeError { message } => write!(f, "Runtime error: {}", message),
        }
    }
}

impl std::error::Error for FfiMoodflixError {}

impl From<MoodflixError> for FfiMoodflixError {
    fn from(err: MoodflixError) -> Self {
        let message = err.to_string();
        match err {
            MoodflixError::AiCall(_) | MoodflixError::Http(_) | MoodflixError::PosterLookup(_) => {
                FfiMoodflixError::AiCallError { message }
            }
            MoodflixError::Parse(_) => FfiMoodflixError::ParseError { message },
            MoodflixError::InvalidInput(_) | MoodflixError::Io(_) => {
                FfiMoodflixError::InvalidInput { message }
            }
            MoodflixError::MissingApiKey(_)
            | MoodflixError::Builder(_)
            | MoodflixError::Config(_) => FfiMoodflixError::ConfigError { message },
        }
    }
}

/// Configuration for a recommendation call
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiConfig {
    /// Optional provider (uses default if not specified)
    pub provider: Option<FfiAiProvider>,
    /// Optional API key (uses environment variable if not specified)
    pub api_key: Option<String>,
    /// Optional model name (uses provider default if not specified)
    pub model: Option<String>,
    /// Optional TMDB API key (uses environment variable if not specified)
    pub tmdb_api_key: Option<String>,
    /// Optional timeout in seconds (uses default if not specified)
    pub timeout_seconds: Option<u64>,
    /// Optional answer language, e.g. "Turkish"
    pub language: Option<String>,
}

/// Create a new tokio runtime for FFI calls
fn create_runtime() -> Result<tokio::runtime::Runtime, FfiMoodflixError> {
    tokio::runtime::Runtime::new().map_err(|e| FfiMoodflixError::RuntimeError {
        message: format!("Failed to create async runtime: {}", e),
    })
}

async fn recommend_async(
    input: PipelineInput,
    config: Option<FfiConfig>,
) -> Result<Option<FfiRecommendation>, FfiMoodflixError> {
    let config = config.unwrap_or_default();

    let mut builder = Recommender::builder();

    if let Some(provider) = config.provider {
        builder = builder.provider(provider.into());
    }

    if let Some(api_key) = config.api_key {
        builder = builder.api_key(api_key);
    }

    if let Some(model) = config.model {
        builder = builder.model(model);
    }

    if let Some(tmdb_api_key) = config.tmdb_api_key {
        builder = builder.tmdb_api_key(tmdb_api_key);
    }

    if let Some(timeout_secs) = config.timeout_seconds {
        builder = builder.timeout(Duration::from_secs(timeout_secs));
    }

    if let Some(language) = config.language {
        builder = builder.language(language);
    }

    let pipeline = builder.build()?;
    let recommendation = pipeline.run(input).await?;
    Ok(recommendation.map(Into::into))
}

/// Recommend films for a mood description
///
/// # Returns
/// `None` when the text is blank
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn recommend_for_mood(
    text: String,
    config: Option<FfiConfig>,
) -> Result<Option<FfiRecommendation>, FfiMoodflixError> {
    let rt = create_runtime()?;
    rt.block_on(async { recommend_async(PipelineInput::Mood(text), config).await })
}

/// Recommend films matching the style of an encoded image (PNG, JPEG, ...)
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn recommend_for_style(
    image: Vec<u8>,
    config: Option<FfiConfig>,
) -> Result<Option<FfiRecommendation>, FfiMoodflixError> {
    let image = ImageData::from_bytes(image)?;
    let rt = create_runtime()?;
    rt.block_on(async { recommend_async(PipelineInput::Style(image), config).await })
}

/// Full display URL for a TMDB poster path, using the default image host and size
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn poster_url(poster_path: String) -> Option<String> {
    let catalog = CatalogConfig::default();
    compose_poster_url(&catalog.image_base_url, &catalog.poster_size, &poster_path)
}

/// Video search link for a film's trailer
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn trailer_search_url(title: String) -> Option<String> {
    crate::model::trailer_search_url(&title)
}

/// Get the library version
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Check if a provider is available (has required environment variables)
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn is_provider_available(provider: FfiAiProvider) -> bool {
    match provider {
        FfiAiProvider::Google => {
            std::env::var("GOOGLE_API_KEY").is_ok() || std::env::var("GEMINI_API_KEY").is_ok()
        }
        FfiAiProvider::OpenAI => std::env::var("OPENAI_API_KEY").is_ok(),
        FfiAiProvider::Anthropic => std::env::var("ANTHROPIC_API_KEY").is_ok(),
    }
}
