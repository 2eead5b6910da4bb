mod posters;
mod tmdb;

pub use posters::{poster_url, PosterResolver};
pub use tmdb::{MovieResult, SearchResponse, TmdbClient};

use async_trait::async_trait;

use crate::MoodflixError;

/// A searchable movie catalog that knows poster artwork
#[async_trait]
pub trait MovieCatalog: Send + Sync {
    /// Get the catalog name (e.g., "tmdb")
    fn catalog_name(&self) -> &str;

    /// Poster path of the best match for `title`, `None` when nothing matched
    /// or the match has no poster
    async fn poster_path(&self, title: &str) -> Result<Option<String>, MoodflixError>;
}
