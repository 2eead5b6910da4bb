//! Mood/style to recommendation pipeline.
//!
//! A run goes prompt -> model -> normalize -> posters. The analysis is
//! published as soon as it is parsed so it can be shown while posters are
//! still being looked up. The pipeline does not serialize runs: callers must
//! not start a new run while `loading` is set.

use log::{info, warn};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::catalog::PosterResolver;
use crate::images::ImageData;
use crate::model::{AnalysisResult, PipelineState, Recommendation};
use crate::normalizer::normalize;
use crate::providers::{build_mood_prompt, build_style_prompt, LlmProvider, PromptRequest};
use crate::MoodflixError;

/// What the user submitted
#[derive(Debug, Clone)]
pub enum PipelineInput {
    /// Free text describing a mood
    Mood(String),
    /// A picture whose style should be matched
    Style(ImageData),
}

/// How a call to [`Pipeline::start`] ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Blank input, nothing happened
    Ignored,
    Succeeded(Recommendation),
    /// The message that was stored in the error slot
    Failed(String),
}

pub struct Pipeline {
    provider: Arc<dyn LlmProvider>,
    posters: PosterResolver,
    language: Option<String>,
    state: Arc<RwLock<PipelineState>>,
}

impl Pipeline {
    pub fn new(provider: Arc<dyn LlmProvider>, posters: PosterResolver) -> Self {
        Self {
            provider,
            posters,
            language: None,
            state: Arc::new(RwLock::new(PipelineState::default())),
        }
    }

    /// Language the model should answer in
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn provider_name(&self) -> &str {
        self.provider.provider_name()
    }

    /// Snapshot of the current state
    pub async fn state(&self) -> PipelineState {
        self.state.read().await.clone()
    }

    /// Shared handle for observers that poll the state from elsewhere
    pub fn observe(&self) -> Arc<RwLock<PipelineState>> {
        Arc::clone(&self.state)
    }

    pub async fn analyze_mood(&self, text: &str) -> RunOutcome {
        self.start(PipelineInput::Mood(text.to_string())).await
    }

    pub async fn analyze_style(&self, image: ImageData) -> RunOutcome {
        self.start(PipelineInput::Style(image)).await
    }

    /// Run the pipeline once for `input`, reporting the outcome as the
    /// presentation layer sees it.
    pub async fn start(&self, input: PipelineInput) -> RunOutcome {
        match self.run(input).await {
            Ok(None) => RunOutcome::Ignored,
            Ok(Some(recommendation)) => RunOutcome::Succeeded(recommendation),
            Err(e) => RunOutcome::Failed(error_message(&e)),
        }
    }

    /// Run the pipeline once for `input`.
    ///
    /// Blank moods are ignored (`Ok(None)`) without touching the state. An
    /// empty image fails with `InvalidInput`. On failure the previous result
    /// and posters stay in place and only the error slot changes. `loading`
    /// is cleared on every path.
    pub async fn run(&self, input: PipelineInput) -> Result<Option<Recommendation>, MoodflixError> {
        let request = match input {
            PipelineInput::Mood(text) => match build_mood_prompt(&text) {
                Some(request) => request,
                None => return Ok(None),
            },
            PipelineInput::Style(image) => build_style_prompt(image),
        };
        let request = request.with_language(self.language.as_deref());

        {
            let mut state = self.state.write().await;
            state.loading = true;
            state.error = None;
        }

        let result = self.execute(&request).await;
        let mut state = self.state.write().await;
        match &result {
            Ok(recommendation) => info!(
                "Recommended {} films via {}",
                recommendation.movies.len(),
                self.provider.provider_name()
            ),
            Err(e) => {
                warn!("Recommendation run failed: {}", e);
                state.error = Some(error_message(e));
            }
        }
        state.loading = false;

        result.map(Some)
    }

    async fn execute(&self, request: &PromptRequest) -> Result<Recommendation, MoodflixError> {
        if matches!(&request.image, Some(image) if image.bytes.is_empty()) {
            return Err(MoodflixError::InvalidInput("image is empty".to_string()));
        }

        let raw = self.provider.generate(request).await?;
        let result = normalize(raw.as_deref())?;
        self.publish_result(&result).await;

        let movies = self.posters.resolve(&result.titles).await;
        self.state.write().await.posters = movies.clone();

        Ok(Recommendation { result, movies })
    }

    async fn publish_result(&self, result: &AnalysisResult) {
        let mut state = self.state.write().await;
        state.result = Some(result.clone());
        // Posters from an earlier run belong to other titles
        state.posters.clear();
    }
}

fn error_message(error: &MoodflixError) -> String {
    format!("Error: {}", error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MovieCatalog;
    use crate::config::CatalogConfig;
    use crate::model::MovieDisplayItem;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Mutex, OnceLock};

    /// Provider replaying canned answers in order
    struct CannedProvider {
        answers: Mutex<Vec<Result<Option<String>, String>>>,
        requests: Mutex<Vec<PromptRequest>>,
    }

    impl CannedProvider {
        fn new(answers: Vec<Result<Option<&str>, &str>>) -> Self {
            let answers = answers
                .into_iter()
                .rev()
                .map(|a| a.map(|t| t.map(String::from)).map_err(String::from))
                .collect();
            Self {
                answers: Mutex::new(answers),
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl LlmProvider for CannedProvider {
        fn provider_name(&self) -> &str {
            "canned"
        }

        async fn generate(
            &self,
            request: &PromptRequest,
        ) -> Result<Option<String>, MoodflixError> {
            self.requests.lock().unwrap().push(request.clone());
            self.answers
                .lock()
                .unwrap()
                .pop()
                .unwrap_or(Ok(None))
                .map_err(MoodflixError::AiCall)
        }
    }

    /// Catalog that records the pipeline state it sees while posters resolve
    #[derive(Default)]
    struct ObservingCatalog {
        state: OnceLock<Arc<RwLock<PipelineState>>>,
        seen: Mutex<Vec<PipelineState>>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl MovieCatalog for ObservingCatalog {
        fn catalog_name(&self) -> &str {
            "observing"
        }

        async fn poster_path(&self, title: &str) -> Result<Option<String>, MoodflixError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(state) = self.state.get() {
                let snapshot = state.read().await.clone();
                self.seen.lock().unwrap().push(snapshot);
            }
            if title == "Unknown" {
                return Err(MoodflixError::PosterLookup("not found".to_string()));
            }
            Ok(Some(format!("/{}.jpg", title.to_lowercase())))
        }
    }

    const ANSWER: &str = "```json\n{\"analysis\": \"Heavy heart\", \"recommendation\": \"Be gentle\", \"films\": [\"Up\", \"Unknown\", \"Coco\"]}\n```";

    fn pipeline(
        answers: Vec<Result<Option<&str>, &str>>,
    ) -> (Pipeline, Arc<CannedProvider>, Arc<ObservingCatalog>) {
        let provider = Arc::new(CannedProvider::new(answers));
        let catalog = Arc::new(ObservingCatalog::default());
        let resolver = PosterResolver::new(catalog.clone(), &CatalogConfig::default());
        let pipeline = Pipeline::new(provider.clone(), resolver);
        let _ = catalog.state.set(pipeline.observe());
        (pipeline, provider, catalog)
    }

    #[tokio::test]
    async fn test_successful_mood_run() {
        let (pipeline, provider, _) = pipeline(vec![Ok(Some(ANSWER))]);

        let recommendation = match pipeline.analyze_mood("İçim kötü").await {
            RunOutcome::Succeeded(recommendation) => recommendation,
            other => panic!("expected success, got {:?}", other),
        };

        assert_eq!(recommendation.result.titles, vec!["Up", "Unknown", "Coco"]);
        assert_eq!(
            recommendation.movies,
            vec![
                MovieDisplayItem::new(
                    "Up",
                    Some("https://image.tmdb.org/t/p/w500/up.jpg".to_string())
                ),
                MovieDisplayItem::new("Unknown", None),
                MovieDisplayItem::new(
                    "Coco",
                    Some("https://image.tmdb.org/t/p/w500/coco.jpg".to_string())
                ),
            ]
        );

        let state = pipeline.state().await;
        assert_eq!(state.result, Some(recommendation.result));
        assert_eq!(state.posters, recommendation.movies);
        assert!(!state.loading);
        assert!(state.error.is_none());

        let requests = provider.requests.lock().unwrap();
        assert!(requests[0].text.contains("İçim kötü"));
        assert!(requests[0].image.is_none());
    }

    #[tokio::test]
    async fn test_result_published_before_posters() {
        let (pipeline, _, catalog) = pipeline(vec![Ok(Some(ANSWER))]);
        pipeline.analyze_mood("tired").await;

        let seen = catalog.seen.lock().unwrap();
        assert_eq!(seen.len(), 3);
        for snapshot in seen.iter() {
            assert!(snapshot.loading);
            assert_eq!(
                snapshot.result.as_ref().map(|r| r.analysis.as_str()),
                Some("Heavy heart")
            );
            assert!(snapshot.posters.is_empty());
        }
    }

    #[tokio::test]
    async fn test_blank_mood_is_noop() {
        let (pipeline, provider, _) = pipeline(vec![Ok(Some(ANSWER))]);

        assert_eq!(pipeline.analyze_mood("").await, RunOutcome::Ignored);
        assert_eq!(pipeline.analyze_mood("  \n").await, RunOutcome::Ignored);

        assert_eq!(pipeline.state().await, PipelineState::default());
        assert!(provider.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_image_is_invalid_input() {
        let (pipeline, provider, _) = pipeline(vec![Ok(Some(ANSWER)), Ok(Some(ANSWER))]);
        pipeline.analyze_mood("calm").await;
        let before = pipeline.state().await;

        let image = ImageData {
            mime_type: "image/png".to_string(),
            bytes: Vec::new(),
        };
        let result = pipeline.run(PipelineInput::Style(image)).await;
        assert!(matches!(result, Err(MoodflixError::InvalidInput(_))));

        let state = pipeline.state().await;
        assert_eq!(state.result, before.result);
        assert_eq!(state.posters, before.posters);
        assert!(state.error.as_deref().unwrap().contains("image is empty"));
        assert!(!state.loading);
        assert_eq!(provider.requests.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_style_run_sends_image() {
        let (pipeline, provider, _) = pipeline(vec![Ok(Some(ANSWER))]);
        let image = ImageData::from_bytes(vec![0xFF, 0xD8, 0xFF]).unwrap();

        let outcome = pipeline.analyze_style(image.clone()).await;
        assert!(matches!(outcome, RunOutcome::Succeeded(_)));
        assert_eq!(provider.requests.lock().unwrap()[0].image, Some(image));
    }

    #[tokio::test]
    async fn test_ai_failure_on_first_run() {
        let (pipeline, _, catalog) = pipeline(vec![Err("connection refused")]);

        let message = match pipeline.analyze_mood("anxious").await {
            RunOutcome::Failed(message) => message,
            other => panic!("expected failure, got {:?}", other),
        };
        assert!(message.contains("connection refused"));

        let state = pipeline.state().await;
        assert_eq!(state.error, Some(message));
        assert!(!state.loading);
        assert!(state.result.is_none());
        assert!(state.posters.is_empty());
        assert_eq!(catalog.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_failure_keeps_previous_result() {
        let (pipeline, _, catalog) = pipeline(vec![
            Ok(Some(ANSWER)),
            Ok(Some("Sorry, I cannot help with that.")),
            Ok(None),
        ]);

        pipeline.analyze_mood("sad").await;
        let before = pipeline.state().await;

        let outcome = pipeline.analyze_mood("sadder").await;
        assert!(matches!(outcome, RunOutcome::Failed(_)));
        let after = pipeline.state().await;
        assert_eq!(after.result, before.result);
        assert_eq!(after.posters, before.posters);
        assert!(after.error.as_deref().unwrap().starts_with("Error: "));
        assert!(!after.loading);

        // Missing text fails the same way
        let outcome = pipeline.analyze_mood("saddest").await;
        assert!(matches!(outcome, RunOutcome::Failed(_)));
        assert_eq!(catalog.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_array_answer_keeps_previous_result() {
        let (pipeline, _, catalog) =
            pipeline(vec![Ok(Some(ANSWER)), Ok(Some("```json\n[]\n```"))]);

        pipeline.analyze_mood("sad").await;
        let before = pipeline.state().await;
        assert!(before.result.is_some());

        let outcome = pipeline.analyze_mood("still sad").await;
        assert!(matches!(outcome, RunOutcome::Failed(_)));

        let after = pipeline.state().await;
        assert_eq!(after.result, before.result);
        assert_eq!(after.posters, before.posters);
        assert!(after
            .error
            .as_deref()
            .unwrap()
            .contains("expected a JSON object"));
        assert_eq!(catalog.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_new_run_clears_previous_error() {
        let (pipeline, _, _) = pipeline(vec![Err("timeout"), Ok(Some(ANSWER))]);

        pipeline.analyze_mood("first").await;
        assert!(pipeline.state().await.error.is_some());

        pipeline.analyze_mood("second").await;
        let state = pipeline.state().await;
        assert!(state.error.is_none());
        assert!(state.result.is_some());
    }

    #[tokio::test]
    async fn test_language_is_requested() {
        let (pipeline, provider, _) = pipeline(vec![Ok(Some(ANSWER))]);
        let pipeline = pipeline.with_language("Turkish");

        pipeline.analyze_mood("yorgunum").await;
        assert!(provider.requests.lock().unwrap()[0]
            .text
            .contains("in Turkish"));
    }
}
