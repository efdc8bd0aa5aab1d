use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::settings::LlmConfig;

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiCandidateContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    text: Option<String>,
}

/// One-shot text generation against the Gemini API. No retries, no caching:
/// a single round trip per invocation.
pub async fn generate_text(config: &LlmConfig, prompt: &str) -> Result<String> {
    let api_key = config.require_api_key()?;

    let client = reqwest::Client::new();
    let url = format!(
        "{}/v1beta/{}:generateContent",
        config.base_url, config.model
    );

    let request = GeminiRequest {
        contents: vec![GeminiContent {
            parts: vec![GeminiPart {
                text: prompt.to_string(),
            }],
        }],
    };

    let response = client
        .post(&url)
        .header("x-goog-api-key", &api_key)
        .header("content-type", "application/json")
        .json(&request)
        .send()
        .await
        .context("Failed to call Gemini API")?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        bail!("Gemini API error ({}): {}", status, body);
    }

    let msg: GeminiResponse = response
        .json()
        .await
        .context("Failed to parse Gemini API response")?;

    let text = msg
        .candidates
        .into_iter()
        .filter_map(|c| c.content)
        .flat_map(|c| c.parts)
        .filter_map(|p| p.text)
        .collect::<Vec<_>>()
        .join("");

    if text.is_empty() {
        bail!("Empty response from Gemini");
    }

    Ok(text)
}
