use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Calendar date of day 1. Days 2..=25 unlock on the following days.
    pub start_date: NaiveDate,
    pub appearance: AppearanceConfig,
    pub gift: GiftConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppearanceConfig {
    /// Theme preset name: "dark" or "light"
    pub theme: String,
    /// Seconds a locked-day notice stays on screen
    pub notice_secs: u64,
}

/// Settings for the gift message service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GiftConfig {
    /// Model used for gift generation
    pub model: String,
    /// System instruction establishing the gift-giver persona
    pub persona: String,
    /// Per-day prompt; `{day}` is replaced with the day number
    pub prompt: String,
    /// Cap on generated output length
    pub max_output_tokens: u32,
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            start_date: NaiveDate::from_ymd_opt(2025, 12, 1).expect("valid default start date"),
            appearance: AppearanceConfig::default(),
            gift: GiftConfig::default(),
        }
    }
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            notice_secs: 4,
        }
    }
}

impl Default for GiftConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash".to_string(),
            persona: "You are Santa, and each day you are offering a gift to a teenager \
                      who loves learning to code!"
                .to_string(),
            prompt: "What is the coding gift for day {day} of 25 days".to_string(),
            max_output_tokens: 1500,
            api_key_env: "GEMINI_API_KEY".to_string(),
            timeout_secs: 30,
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let expanded = shellexpand::tilde(path);
        let path = Path::new(expanded.as_ref());

        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            tracing::info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }
}
