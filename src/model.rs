use reqwest::Url;
use serde::{Deserialize, Serialize};

const TRAILER_SEARCH_URL: &str = "https://www.youtube.com/results";

/// Structured interpretation returned by the model.
///
/// Every field is optional on the wire: a missing key yields an empty value,
/// unknown keys are ignored. Only a present field of the wrong type is
/// rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisResult {
    /// What the model read into the mood or the picture
    pub analysis: String,
    /// Short advice addressed to the user
    pub recommendation: String,
    /// Recommended film titles, in the order the model gave them
    #[serde(rename = "films")]
    pub titles: Vec<String>,
}

/// A recommended film ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MovieDisplayItem {
    pub title: String,
    /// Absent when the catalog lookup failed or found no poster
    pub poster_url: Option<String>,
}

impl MovieDisplayItem {
    pub fn new(title: impl Into<String>, poster_url: Option<String>) -> Self {
        Self {
            title: title.into(),
            poster_url,
        }
    }

    /// Video search link for the film's trailer
    pub fn trailer_search_url(&self) -> Option<String> {
        trailer_search_url(&self.title)
    }
}

pub fn trailer_search_url(title: &str) -> Option<String> {
    let query = format!("{} trailer", title.trim());
    Url::parse_with_params(TRAILER_SEARCH_URL, &[("search_query", query)])
        .ok()
        .map(String::from)
}

/// Observable state of a recommendation pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineState {
    pub result: Option<AnalysisResult>,
    pub posters: Vec<MovieDisplayItem>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Outcome of one successful run, detached from any pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub result: AnalysisResult,
    pub movies: Vec<MovieDisplayItem>,
}
