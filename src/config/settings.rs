use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use crate::problems::store::LoadPolicy;

const APP_DIR: &str = "drillbook";
const CONFIG_FILE: &str = "config.toml";
pub const CONFIG_ENV: &str = "DRILLBOOK_CONFIG";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Name of the environment variable holding the API key
    pub api_key_env: String,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
    /// Language the generated problem statement is written in
    pub language: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            api_key_env: "OPENAI_API_KEY".to_string(),
            model: "gpt-4.1-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            timeout_secs: 60,
            language: "Korean".to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Reads the credential from the configured env var; an empty value counts as unset.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub problems_dir: PathBuf,
    pub progress_path: PathBuf,
    pub solutions_dir: PathBuf,
    pub load_policy: LoadPolicy,
    /// Countdown length when a problem has no estimate of its own
    pub default_minutes: u32,
    /// Problems mentioning any of these are highlighted in listings
    pub focus_keywords: Vec<String>,
    pub log_format: LogFormat,
    pub generator: GeneratorConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            problems_dir: PathBuf::from("problems"),
            progress_path: PathBuf::from("progress.json"),
            solutions_dir: PathBuf::from("solutions"),
            load_policy: LoadPolicy::Strict,
            default_minutes: 30,
            focus_keywords: [
                "seed", "xenium", "metastasis", "ln", "lymph node", "postn", "cxcr4", "hif1a",
            ]
            .iter()
            .map(|k| k.to_string())
            .collect(),
            log_format: LogFormat::Pretty,
            generator: GeneratorConfig::default(),
        }
    }
}

fn platform_config_path() -> Option<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let mut dir = PathBuf::from(home);
            dir.push("Library/Application Support");
            dir.push(APP_DIR);
            dir.push(CONFIG_FILE);
            return Some(dir);
        }
    }

    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            let mut dir = PathBuf::from(appdata);
            dir.push(APP_DIR);
            dir.push(CONFIG_FILE);
            return Some(dir);
        }
    }

    #[cfg(target_os = "linux")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let mut dir = PathBuf::from(home);
            dir.push(".local/share");
            dir.push(APP_DIR);
            dir.push(CONFIG_FILE);
            return Some(dir);
        }
    }

    None
}

/// Resolve which config file to read: explicit flag, then `DRILLBOOK_CONFIG`,
/// then the platform data directory if a file exists there, then `./config.toml`.
pub fn resolve_config_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return PathBuf::from(path);
    }
    match platform_config_path() {
        Some(path) if path.exists() => path,
        _ => PathBuf::from(CONFIG_FILE),
    }
}

impl AppConfig {
    /// Load settings from `path`. A missing or unparsable file yields defaults.
    pub fn load_from(path: &Path) -> AppConfig {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!(path = ?path, error = %e, "No config file, using defaults");
                return AppConfig::default();
            }
        };

        match toml::from_str::<AppConfig>(&content) {
            Ok(config) => {
                tracing::debug!(path = ?path, "Loaded config");
                config
            }
            Err(e) => {
                tracing::warn!(path = ?path, error = %e, "Failed to parse config, using defaults");
                AppConfig::default()
            }
        }
    }

    pub fn load(explicit: Option<&Path>) -> AppConfig {
        AppConfig::load_from(&resolve_config_path(explicit))
    }
}
