use thiserror::Error;

/// Errors that can occur while turning a mood or an image into recommendations
#[derive(Error, Debug)]
pub enum MoodflixError {
    /// The generative model could not be reached or answered with an error
    #[error("AI call failed: {0}")]
    AiCall(String),

    /// The model answer was absent or not the expected JSON object
    #[error("Failed to parse model response: {0}")]
    Parse(String),

    /// A single poster lookup failed. Absorbed by the poster resolver.
    #[error("Poster lookup failed: {0}")]
    PosterLookup(String),

    /// Input rejected before any request was made
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No API key in configuration or environment
    #[error("Missing API key: {0}")]
    MissingApiKey(String),

    /// Builder configuration error
    #[error("Builder error: {0}")]
    Builder(String),

    /// Transport-level HTTP failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Failed to read an image from disk
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}
