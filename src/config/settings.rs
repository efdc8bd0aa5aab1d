use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Serialize, Default, Clone)]
pub struct Config {
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub data: DataConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LlmConfig {
    pub api_key: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DataConfig {
    #[serde(default = "default_csv_path")]
    pub csv_path: PathBuf,
    #[serde(default = "default_reports_dir")]
    pub reports_dir: PathBuf,
}

fn default_model() -> String {
    "models/gemini-pro-latest".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_csv_path() -> PathBuf {
    PathBuf::from("promises.csv")
}

fn default_reports_dir() -> PathBuf {
    PathBuf::from("reports")
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            base_url: default_base_url(),
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            csv_path: default_csv_path(),
            reports_dir: default_reports_dir(),
        }
    }
}

impl LlmConfig {
    /// Resolve the Gemini API key from config or environment.
    /// A missing key or the stock placeholder is a startup-fatal condition.
    pub fn require_api_key(&self) -> Result<String> {
        let key = self
            .api_key
            .clone()
            .or_else(|| std::env::var("GEMINI_API_KEY").ok());

        match key {
            Some(k) if !k.is_empty() && k != "YOUR_GEMINI_API_KEY" => Ok(k),
            _ => bail!(
                "GEMINI_API_KEY not found or not set. Either:\n  \
                 - Set GEMINI_API_KEY in ~/.promises/env or the environment\n  \
                 - Or set llm.api_key in ~/.promises/config.toml"
            ),
        }
    }
}

pub fn tracker_dir() -> PathBuf {
    dirs::home_dir()
        .expect("Could not find home directory")
        .join(".promises")
}

pub fn config_path() -> PathBuf {
    tracker_dir().join("config.toml")
}

pub fn env_file() -> PathBuf {
    tracker_dir().join("env")
}

/// Load `~/.promises/env` into the process environment, then read the
/// optional config file. Absent files fall back to defaults.
pub fn load_config() -> Result<Config> {
    apply_env_file(&env_file());

    let path = config_path();
    if !path.exists() {
        return Ok(Config::default());
    }
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;
    toml::from_str(&content).with_context(|| "Failed to parse config.toml")
}

/// Apply KEY=VALUE lines from an env file. Variables already set in the
/// environment win; comment lines and lines without `=` are skipped.
fn apply_env_file(path: &Path) {
    let Ok(content) = std::fs::read_to_string(path) else {
        return;
    };
    for line in content.lines() {
        let Some((key, value)) = line.trim().split_once('=') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() || key.starts_with('#') {
            continue;
        }
        let value = value.trim().trim_matches('"').trim_matches('\'');
        if std::env::var_os(key).is_none() {
            std::env::set_var(key, value);
        }
    }
}
