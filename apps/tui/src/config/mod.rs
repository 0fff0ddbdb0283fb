use dotenv::dotenv;
use heatmap_core::DATASET_URL;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub dataset_url: String,
    pub log_file: Option<PathBuf>,
    pub debug: bool,
}

impl AppConfig {
    /// Builds the configuration from a variable lookup, falling back to
    /// defaults for anything unset or blank.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Self {
            dataset_url: non_blank("HEATMAP_URL").unwrap_or_else(|| DATASET_URL.to_string()),
            log_file: non_blank("HEATMAP_LOG_FILE").map(PathBuf::from),
            debug: non_blank("DEBUG").is_some_and(|value| value != "0"),
        }
    }
}

/// Initializes the application configuration from `.env` and the process
/// environment.
pub fn init_app_config() -> AppConfig {
    // Load environment variables from .env file
    dotenv().ok();

    AppConfig::from_lookup(|key| env::var(key).ok())
}
