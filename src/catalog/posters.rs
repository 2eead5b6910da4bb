use futures::future::join_all;
use log::{debug, warn};
use std::sync::Arc;

use crate::catalog::MovieCatalog;
use crate::config::CatalogConfig;
use crate::model::MovieDisplayItem;

/// Compose a display URL from an image host, a size segment and a poster path.
///
/// Returns `None` for a blank poster path.
pub fn poster_url(image_base_url: &str, size: &str, poster_path: &str) -> Option<String> {
    let path = poster_path.trim().trim_start_matches('/');
    if path.is_empty() {
        return None;
    }

    Some(format!(
        "{}/{}/{}",
        image_base_url.trim_end_matches('/'),
        size.trim_matches('/'),
        path
    ))
}

/// Resolves poster URLs for recommended titles.
///
/// Every title is looked up concurrently and independently: a failed lookup
/// becomes an item without a poster, it never fails the batch.
#[derive(Clone)]
pub struct PosterResolver {
    catalog: Arc<dyn MovieCatalog>,
    image_base_url: String,
    poster_size: String,
}

impl PosterResolver {
    pub fn new(catalog: Arc<dyn MovieCatalog>, config: &CatalogConfig) -> Self {
        Self {
            catalog,
            image_base_url: config.image_base_url.clone(),
            poster_size: config.poster_size.clone(),
        }
    }

    /// One item per title, in the same order as `titles`.
    pub async fn resolve(&self, titles: &[String]) -> Vec<MovieDisplayItem> {
        let lookups = titles.iter().map(|title| self.resolve_one(title));
        join_all(lookups).await
    }

    async fn resolve_one(&self, title: &str) -> MovieDisplayItem {
        let poster_path = match self.catalog.poster_path(title).await {
            Ok(path) => path,
            Err(e) => {
                warn!(
                    "{} lookup for '{}' failed: {}",
                    self.catalog.catalog_name(),
                    title,
                    e
                );
                None
            }
        };

        let url = poster_path
            .as_deref()
            .and_then(|path| poster_url(&self.image_base_url, &self.poster_size, path));
        if url.is_none() {
            debug!("No poster for '{}'", title);
        }

        MovieDisplayItem::new(title, url)
    }
}
