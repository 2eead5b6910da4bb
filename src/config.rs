use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Provider used when none is specified
    #[serde(default = "default_provider")]
    pub default_provider: String,
    /// Map of provider name to provider configuration
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
    /// Movie catalog used for poster lookups
    #[serde(default)]
    pub catalog: CatalogConfig,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_provider: default_provider(),
            providers: HashMap::new(),
            catalog: CatalogConfig::default(),
            timeout: default_timeout(),
        }
    }
}

/// Configuration for a specific AI provider
#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    /// Whether this provider is enabled
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Model identifier (e.g., "gemini-2.5-flash", "gpt-4o-mini"). Empty
    /// means the provider's default model.
    #[serde(default)]
    pub model: String,
    /// Temperature for generation (0.0-1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// API key for authentication (can also be set via environment variable)
    pub api_key: Option<String>,
    /// Base URL for API endpoint (for custom or proxy endpoints)
    pub base_url: Option<String>,
}

impl ProviderConfig {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            enabled: true,
            model: model.into(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            api_key: None,
            base_url: None,
        }
    }
}

/// Configuration for the movie catalog (TMDB)
#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    /// API key (falls back to TMDB_API_KEY)
    pub api_key: Option<String>,
    #[serde(default = "default_catalog_base_url")]
    pub base_url: String,
    /// Image host prefix that poster paths are appended to
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,
    #[serde(default = "default_poster_size")]
    pub poster_size: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_catalog_base_url(),
            image_base_url: default_image_base_url(),
            poster_size: default_poster_size(),
        }
    }
}

// Default value functions
fn default_provider() -> String {
    "google".to_string()
}

fn default_enabled() -> bool {
    true
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    2000
}

fn default_timeout() -> u64 {
    30
}

fn default_catalog_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_image_base_url() -> String {
    "https://image.tmdb.org/t/p".to_string()
}

fn default_poster_size() -> String {
    "w500".to_string()
}

/// Model used for a provider that has no explicit configuration
pub fn default_model(provider_name: &str) -> Option<&'static str> {
    match provider_name {
        "google" => Some("gemini-2.5-flash"),
        "openai" => Some("gpt-4o-mini"),
        "anthropic" => Some("claude-sonnet-4-5"),
        _ => None,
    }
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with MOODFLIX__ prefix
    /// 2. moodflix.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: MOODFLIX__PROVIDERS__GOOGLE__API_KEY
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    /// Configuration for `provider_name`, or a default one if the provider is
    /// known but not listed
    pub fn provider_or_default(&self, provider_name: &str) -> Option<ProviderConfig> {
        match self.providers.get(provider_name) {
            Some(config) if config.model.is_empty() => {
                let mut config = config.clone();
                config.model = default_model(provider_name)?.to_string();
                Some(config)
            }
            Some(config) => Some(config.clone()),
            None => default_model(provider_name).map(ProviderConfig::new),
        }
    }
}

/// Load configuration from file and environment variables
///
/// See [`AppConfig::load`] for the precedence rules.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("moodflix").required(false))
        // Use double underscore for nested: MOODFLIX__CATALOG__API_KEY
        .add_source(
            Environment::with_prefix("MOODFLIX")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
