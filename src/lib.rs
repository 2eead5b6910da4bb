//! Turn a mood or a picture into film recommendations.
//!
//! A generative model interprets the input and names three films, then every
//! film is looked up on TMDB for its poster.
//!
//! ```no_run
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! if let Some(recommendation) = moodflix::recommend_for_mood("Rainy day, hot coffee").await? {
//!     for movie in recommendation.movies {
//!         println!("{} {:?}", movie.title, movie.poster_url);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod catalog;
pub mod config;
pub mod error;
pub mod images;
pub mod model;
pub mod normalizer;
pub mod pipeline;
pub mod providers;
pub mod uniffi_bindings;

pub use builder::{AiProvider, Recommender, RecommenderBuilder};
pub use error::MoodflixError;
pub use images::{ImageData, ImageSource};
pub use model::{AnalysisResult, MovieDisplayItem, PipelineState, Recommendation};
pub use pipeline::{Pipeline, PipelineInput, RunOutcome};

/// Recommend films for a mood description using the default configuration.
///
/// Returns `Ok(None)` for a blank mood.
pub async fn recommend_for_mood(text: &str) -> Result<Option<Recommendation>, MoodflixError> {
    let pipeline = Recommender::builder().build()?;
    pipeline.run(PipelineInput::Mood(text.to_string())).await
}

/// Recommend films matching the style of an image using the default
/// configuration.
pub async fn recommend_for_style(
    source: &ImageSource,
) -> Result<Option<Recommendation>, MoodflixError> {
    let image = images::load(source).await?;
    let pipeline = Recommender::builder().build()?;
    pipeline.run(PipelineInput::Style(image)).await
}
