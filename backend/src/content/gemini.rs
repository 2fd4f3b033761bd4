use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use super::ContentProvider;
use crate::{config::ContentConfig, models::WordTheme};

const WORD_SEARCH_PROMPT: &str = "Select a topic relevant to Uzbek Gen Z (e.g. 'Car Tuning', \
'Tashkent Metro', 'Universities', 'Uzbek Brands'). Provide 8 words (max 8 letters). Return JSON.";

/// Used when the model answers but leaves out the topic or the words
const DEFAULT_TOPIC: &str = "Auto Tuning";
const DEFAULT_WORDS: [&str; 8] = [
    "GENTRA", "MAGICAR", "TONIROVKA", "DISKALAR", "TURBO", "CHIP", "SABVUFER", "POLIK",
];

/// Fetches word themes from the Gemini `generateContent` endpoint
pub struct GeminiProvider {
    http_client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

/// Theme as the model returns it; either field may be missing
#[derive(Debug, Deserialize)]
struct RawTheme {
    topic: Option<String>,
    words: Option<Vec<String>>,
}

impl GeminiProvider {
    pub fn new(http_client: reqwest::Client, config: &ContentConfig, api_key: String) -> Self {
        Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    fn request_body() -> Value {
        json!({
            "contents": [{ "parts": [{ "text": WORD_SEARCH_PROMPT }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "OBJECT",
                    "properties": {
                        "topic": { "type": "STRING" },
                        "words": { "type": "ARRAY", "items": { "type": "STRING" } }
                    },
                    "required": ["topic", "words"]
                }
            }
        })
    }
}

#[async_trait]
impl ContentProvider for GeminiProvider {
    async fn fetch_word_theme(&self) -> anyhow::Result<WordTheme> {
        tracing::debug!("Requesting word theme from {}", self.model);

        let response = self
            .http_client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&Self::request_body())
            .send()
            .await
            .context("content API request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Content API returned {} - {}", status, error_text);
            anyhow::bail!("content API returned status {}", status);
        }

        let body = response.text().await?;
        parse_generate_response(&body)
    }
}

/// Pull the JSON theme out of the first candidate of a `generateContent` response
fn parse_generate_response(body: &str) -> anyhow::Result<WordTheme> {
    let response: GenerateResponse =
        serde_json::from_str(body).context("malformed generateContent response")?;

    let text = response
        .candidates
        .into_iter()
        .flat_map(|candidate| candidate.content.parts)
        .find_map(|part| part.text)
        .context("generateContent response has no text part")?;

    let raw: RawTheme = serde_json::from_str(&text).context("model output is not a theme")?;

    let topic = raw
        .topic
        .filter(|topic| !topic.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_TOPIC.to_string());
    let words = raw
        .words
        .unwrap_or_else(|| DEFAULT_WORDS.iter().map(|w| w.to_string()).collect())
        .into_iter()
        .map(|word| word.to_uppercase())
        .collect();

    Ok(WordTheme { topic, words })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wrap(text: &str) -> String {
        json!({
            "candidates": [{ "content": { "parts": [{ "text": text }] } }]
        })
        .to_string()
    }

    #[test]
    fn test_parse_theme() {
        let body = wrap(r#"{"topic":"Tashkent Metro","words":["chilonzor","Olmazor","bodomzor"]}"#);
        let theme = parse_generate_response(&body).unwrap();

        assert_eq!(theme.topic, "Tashkent Metro");
        assert_eq!(theme.words, vec!["CHILONZOR", "OLMAZOR", "BODOMZOR"]);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let theme = parse_generate_response(&wrap("{}")).unwrap();

        assert_eq!(theme.topic, DEFAULT_TOPIC);
        assert_eq!(theme.words.len(), DEFAULT_WORDS.len());
        assert_eq!(theme.words[0], "GENTRA");
    }

    #[test]
    fn test_malformed_responses_are_errors() {
        assert!(parse_generate_response("not json").is_err());
        assert!(parse_generate_response(r#"{"candidates":[]}"#).is_err());
        assert!(parse_generate_response(&wrap("plain text, no json")).is_err());
    }

    #[test]
    fn test_endpoint_uses_model() {
        let config = ContentConfig {
            api_key: None,
            model: "gemini-3-flash-preview".to_string(),
            base_url: "https://example.test/".to_string(),
            timeout_secs: 5,
        };
        let provider = GeminiProvider::new(reqwest::Client::new(), &config, "key".to_string());

        assert_eq!(
            provider.endpoint(),
            "https://example.test/v1beta/models/gemini-3-flash-preview:generateContent"
        );
        assert_eq!(
            GeminiProvider::request_body()["generationConfig"]["responseMimeType"],
            "application/json"
        );
    }
}
