//! Gift message service client.
//!
//! # Architecture
//!
//! The app context only knows the `GiftSource` trait: one request per panel
//! open, resolving to a message string or a `GiftError`. The production
//! implementation talks to the Gemini `generateContent` endpoint over HTTPS.
//!
//! # Graceful degradation
//!
//! A missing API key is not a startup failure. The client is constructed
//! either way and reports `GiftError::MissingCredential` when a request is
//! made, so the error lands in the reveal panel like any other service
//! failure.

use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use thiserror::Error;

use crate::config::GiftConfig;

/// Failure modes of a gift request. All of them are soft: they render as
/// panel text and never terminate the process.
#[derive(Debug, Error)]
pub enum GiftError {
    #[error("no API key set (expected in ${0})")]
    MissingCredential(String),
    #[error("{0}")]
    Http(#[from] reqwest::Error),
    #[error("service returned HTTP {status}: {detail}")]
    Service { status: u16, detail: String },
}

/// Boxed future so `GiftSource` stays object-safe behind `Arc<dyn GiftSource>`.
pub type GiftFuture = Pin<Box<dyn Future<Output = Result<String, GiftError>> + Send>>;

/// External text-generation collaborator. Implementations must not block;
/// the UI loop stays responsive while the returned future is in flight.
pub trait GiftSource: Send + Sync {
    fn request(&self, day: u8) -> GiftFuture;
}

/// Reply routed back to the UI loop. `generation` ties the reply to the panel
/// instance that spawned it; replies for dismissed or superseded panels are
/// discarded at the apply site.
#[derive(Debug)]
pub struct GiftReply {
    pub generation: u64,
    pub day: u8,
    pub outcome: Result<String, GiftError>,
}

/// Gemini-backed gift source.
#[derive(Clone)]
pub struct GeminiGifts {
    http: reqwest::Client,
    api_key: Option<String>,
    config: GiftConfig,
}

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

impl GeminiGifts {
    /// Build a client from config, reading the API key from the configured
    /// environment variable. Key absence is reported per-request, not here.
    pub fn from_env(config: GiftConfig) -> Self {
        let api_key = std::env::var(&config.api_key_env).ok().filter(|k| !k.is_empty());
        if api_key.is_none() {
            tracing::warn!(
                "No API key in ${}; gift requests will fail until it is set",
                config.api_key_env
            );
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("reqwest client with static configuration");

        Self {
            http,
            api_key,
            config,
        }
    }

    fn prompt_for(&self, day: u8) -> String {
        self.config.prompt.replace("{day}", &day.to_string())
    }

    async fn fetch(&self, day: u8) -> Result<String, GiftError> {
        let Some(ref key) = self.api_key else {
            return Err(GiftError::MissingCredential(
                self.config.api_key_env.clone(),
            ));
        };

        let url = format!("{}/{}:generateContent", API_BASE, self.config.model);
        let prompt = self.prompt_for(day);
        let body = GenerateRequest {
            system_instruction: Content::text(&self.config.persona),
            contents: vec![Content::text(&prompt)],
            generation_config: GenerationConfig {
                max_output_tokens: self.config.max_output_tokens,
            },
        };

        tracing::debug!("Requesting gift for day {day} from {}", self.config.model);

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(GiftError::Service {
                status: status.as_u16(),
                detail: truncate_detail(&detail),
            });
        }

        let parsed: GenerateResponse = response.json().await?;
        Ok(parsed.text())
    }
}

impl GiftSource for GeminiGifts {
    fn request(&self, day: u8) -> GiftFuture {
        let client = self.clone();
        Box::pin(async move { client.fetch(day).await })
    }
}

/// Error payloads can carry whole HTML pages; keep panel text readable.
fn truncate_detail(detail: &str) -> String {
    const MAX: usize = 200;
    let trimmed = detail.trim();
    if trimmed.chars().count() <= MAX {
        trimmed.to_string()
    } else {
        let mut s: String = trimmed.chars().take(MAX).collect();
        s.push('…');
        s
    }
}

// Wire format for generateContent.

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

impl<'a> Content<'a> {
    fn text(text: &'a str) -> Self {
        Self {
            parts: vec![Part { text }],
        }
    }
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: CandidateContent,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate. A response without usable
    /// text yields an empty string, which the reveal panel treats as a
    /// degraded success, not an error.
    fn text(&self) -> String {
        let Some(candidate) = self.candidates.first() else {
            return String::new();
        };
        candidate
            .content
            .parts
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_response_text() {
        let json = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "A mechanical keyboard"}], "role": "model"}}
            ]
        }"#;
        let resp: GenerateResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.text(), "A mechanical keyboard");
    }

    #[test]
    fn test_parse_response_joins_parts() {
        let json = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "Half a "}, {"text": "rubber duck"}]}}
            ]
        }"#;
        let resp: GenerateResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.text(), "Half a rubber duck");
    }

    #[test]
    fn test_parse_response_without_candidates() {
        let resp: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(resp.text(), "");
    }

    #[test]
    fn test_prompt_substitution() {
        let gifts = GeminiGifts {
            http: reqwest::Client::new(),
            api_key: None,
            config: GiftConfig::default(),
        };
        assert_eq!(
            gifts.prompt_for(9),
            "What is the coding gift for day 9 of 25 days"
        );
    }

    #[tokio::test]
    async fn test_missing_credential_fails_at_request_time() {
        let mut config = GiftConfig::default();
        config.api_key_env = "ADVENT_TEST_KEY_THAT_IS_NOT_SET".to_string();
        let gifts = GeminiGifts {
            http: reqwest::Client::new(),
            api_key: None,
            config,
        };

        let err = gifts.request(1).await.unwrap_err();
        assert!(matches!(err, GiftError::MissingCredential(_)));
        assert!(err.to_string().contains("ADVENT_TEST_KEY_THAT_IS_NOT_SET"));
    }

    #[test]
    fn test_truncate_detail() {
        assert_eq!(truncate_detail("  quota exceeded  "), "quota exceeded");
        let long = "x".repeat(500);
        let shortened = truncate_detail(&long);
        assert!(shortened.chars().count() <= 201);
        assert!(shortened.ends_with('…'));
    }
}
