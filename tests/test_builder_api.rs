use moodflix::config::{AppConfig, CatalogConfig, ProviderConfig};
use moodflix::{recommend_for_mood, AiProvider, MoodflixError, Recommender, RunOutcome};

fn config_with_keys() -> AppConfig {
    AppConfig {
        catalog: CatalogConfig {
            api_key: Some("tmdb_key".to_string()),
            ..CatalogConfig::default()
        },
        ..AppConfig::default()
    }
}

#[test]
fn test_builder_defaults_to_google() {
    let pipeline = Recommender::builder()
        .config(config_with_keys())
        .api_key("gemini_key")
        .build()
        .unwrap();

    assert_eq!(pipeline.provider_name(), "google");
}

#[test]
fn test_builder_selects_provider() {
    for provider in [AiProvider::OpenAI, AiProvider::Anthropic, AiProvider::Google] {
        let pipeline = Recommender::builder()
            .config(config_with_keys())
            .provider(provider)
            .api_key("key")
            .model("some-model")
            .build()
            .unwrap();

        assert_eq!(pipeline.provider_name(), provider.as_str());
    }
}

#[test]
fn test_builder_uses_configured_default_provider() {
    let mut config = config_with_keys();
    config.default_provider = "anthropic".to_string();
    let mut anthropic = ProviderConfig::new("claude-sonnet-4-5");
    anthropic.api_key = Some("key".to_string());
    config.providers.insert("anthropic".to_string(), anthropic);

    let pipeline = Recommender::builder().config(config).build().unwrap();
    assert_eq!(pipeline.provider_name(), "anthropic");
}

#[test]
fn test_builder_rejects_disabled_provider() {
    let mut config = config_with_keys();
    let mut google = ProviderConfig::new("gemini-2.5-flash");
    google.enabled = false;
    google.api_key = Some("key".to_string());
    config.providers.insert("google".to_string(), google);

    let result = Recommender::builder().config(config).build();
    assert!(matches!(result, Err(MoodflixError::Builder(_))));
}

#[test]
fn test_builder_rejects_unknown_default_provider() {
    let mut config = config_with_keys();
    config.default_provider = "mistral".to_string();

    let result = Recommender::builder().config(config).api_key("key").build();
    match result {
        Err(e) => {
            let message = e.to_string();
            assert!(message.contains("mistral"));
            assert!(message.contains("available: google, openai, anthropic"));
        }
        Ok(_) => panic!("expected an error for an unknown provider"),
    }
}

#[test]
fn test_builder_tmdb_key_override() {
    let config = AppConfig {
        catalog: CatalogConfig {
            api_key: None,
            ..CatalogConfig::default()
        },
        ..AppConfig::default()
    };

    let pipeline = Recommender::builder()
        .config(config)
        .api_key("gemini_key")
        .tmdb_api_key("tmdb_key")
        .build();
    assert!(pipeline.is_ok());
}

#[test]
fn test_builder_requires_tmdb_key() {
    // The environment fallback would supply a key
    if std::env::var("TMDB_API_KEY").is_ok() {
        return;
    }

    let config = AppConfig {
        catalog: CatalogConfig {
            api_key: None,
            ..CatalogConfig::default()
        },
        ..AppConfig::default()
    };

    let result = Recommender::builder()
        .config(config)
        .api_key("gemini_key")
        .build();
    assert!(matches!(result, Err(MoodflixError::MissingApiKey(_))));
}

#[tokio::test]
async fn test_blank_mood_needs_no_network() {
    let pipeline = Recommender::builder()
        .config(config_with_keys())
        .api_key("gemini_key")
        .build()
        .unwrap();

    assert_eq!(pipeline.analyze_mood("   ").await, RunOutcome::Ignored);
    assert!(!pipeline.state().await.loading);
}

/// Requires GOOGLE_API_KEY and TMDB_API_KEY
#[tokio::test]
#[ignore]
async fn test_recommend_for_mood_live() {
    let recommendation = recommend_for_mood("Rainy Sunday, a bit lonely")
        .await
        .unwrap()
        .unwrap();

    assert!(!recommendation.result.analysis.is_empty());
    assert_eq!(
        recommendation.movies.len(),
        recommendation.result.titles.len()
    );
}
