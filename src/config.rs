use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::language::Language;

/// Environment variable overriding [`AppConfig::api_base_url`].
pub const BASE_URL_ENV: &str = "WIKISEARCH_API_BASE_URL";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default)]
    pub default_language: Language,
    #[serde(default = "default_tick_rate")]
    pub tick_rate_fps: f64,
    #[serde(default = "default_toast_duration_ms")]
    pub toast_duration_ms: u64,
    /// Unset means the HTTP client's own defaults apply.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    #[serde(default = "default_thumbnails")]
    pub thumbnails: bool,
}

fn default_api_base_url() -> String {
    "https://api.hy-tech.my.id".to_string()
}

fn default_tick_rate() -> f64 {
    30.0
}

fn default_toast_duration_ms() -> u64 {
    2000
}

fn default_thumbnails() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            default_language: Language::default(),
            tick_rate_fps: default_tick_rate(),
            toast_duration_ms: default_toast_duration_ms(),
            request_timeout_secs: None,
            thumbnails: default_thumbnails(),
        }
    }
}

fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config/wikisearch"))
}

/// Load `.env` files. Variables already present in the environment win,
/// and earlier files win over later ones.
pub fn load_env_files() {
    let mut paths = Vec::new();
    if let Some(dir) = config_dir() {
        paths.push(dir.join(".env"));
    }
    paths.push(PathBuf::from(".env"));

    for path in paths {
        if path.exists() {
            let _ = dotenvy::from_path(&path);
        }
    }
}

pub fn load_config() -> AppConfig {
    load_env_files();

    let mut config = config_dir()
        .map(|dir| dir.join("config.toml"))
        .and_then(|path| fs::read_to_string(path).ok())
        .map(|contents| parse_config(&contents))
        .unwrap_or_default();

    if let Some(base) = std::env::var(BASE_URL_ENV).ok().filter(|v| !v.is_empty()) {
        config.api_base_url = base;
    }
    config
}

fn parse_config(contents: &str) -> AppConfig {
    toml::from_str(contents).unwrap_or_else(|e| {
        tracing::warn!("ignoring malformed config file: {e}");
        AppConfig::default()
    })
}
