//! Remote text-generation provider and response parsing.
//!
//! # Responsibility
//! - Define the provider seam used by `SuggestionResolver`.
//! - Implement an OpenAI-compatible chat-completions client.
//! - Turn raw completion text into at most three suggestions.
//!
//! # Invariants
//! - Every provider request carries a bounded timeout.
//! - The API key is never logged.

use super::{Suggestion, SUGGESTION_COUNT};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_json::json;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const MAX_COMPLETION_TOKENS: u32 = 200;
const MAX_ERROR_BODY_CHARS: usize = 200;

static CODE_FENCE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^\s*```[A-Za-z0-9_-]*\s*\n(.*?)\n?\s*```\s*$").expect("valid fence regex")
});

/// Failure talking to a remote provider.
#[derive(Debug)]
pub enum ProviderError {
    Http(reqwest::Error),
    Status { status: u16, body: String },
    EmptyResponse,
}

impl Display for ProviderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http(err) => write!(f, "request failed: {err}"),
            Self::Status { status, body } => write!(f, "provider returned {status}: {body}"),
            Self::EmptyResponse => write!(f, "provider returned no usable content"),
        }
    }
}

impl Error for ProviderError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Http(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(value: reqwest::Error) -> Self {
        Self::Http(value)
    }
}

/// Text-generation collaborator asked for habit suggestions.
#[async_trait]
pub trait SuggestionProvider: Send + Sync {
    /// Short provider name for logs.
    fn name(&self) -> &str;

    /// Returns the raw completion text for `goal`.
    async fn complete(&self, goal: &str) -> Result<String, ProviderError>;
}

/// Connection settings for `OpenAiProvider`.
#[derive(Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
}

impl OpenAiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            model: DEFAULT_OPENAI_MODEL.to_string(),
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl std::fmt::Debug for OpenAiConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// One entry of a JSON reply: a full object or a bare habit name.
#[derive(Deserialize)]
#[serde(untagged)]
enum RemoteItem {
    Full(Suggestion),
    Name(String),
}

impl From<RemoteItem> for Suggestion {
    fn from(value: RemoteItem) -> Self {
        match value {
            RemoteItem::Full(item) => Suggestion::new(item.name.trim(), item.reason.trim()),
            RemoteItem::Name(name) => Suggestion::new(name.trim(), ""),
        }
    }
}

/// OpenAI-compatible chat-completions client.
#[derive(Debug, Clone)]
pub struct OpenAiProvider {
    client: reqwest::Client,
    config: OpenAiConfig,
}

impl OpenAiProvider {
    pub fn new(config: OpenAiConfig) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl SuggestionProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, goal: &str) -> Result<String, ProviderError> {
        let payload = json!({
            "model": self.config.model,
            "messages": [
                {"role": "user", "content": suggestion_prompt(goal)}
            ],
            "max_tokens": MAX_COMPLETION_TOKENS,
        });

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        let body: serde_json::Value = response.json().await?;
        let choice = body.get("choices").and_then(|choices| choices.get(0));
        choice
            .and_then(|choice| choice.get("message"))
            .and_then(|message| message.get("content"))
            .or_else(|| choice.and_then(|choice| choice.get("text")))
            .and_then(|content| content.as_str())
            .filter(|content| !content.trim().is_empty())
            .map(ToString::to_string)
            .ok_or(ProviderError::EmptyResponse)
    }
}

/// Builds the instruction sent to the provider.
pub fn suggestion_prompt(goal: &str) -> String {
    format!(
        "You are a helpful assistant. Given the user goal: \"{goal}\", suggest {SUGGESTION_COUNT} \
         concise daily habits (each 2-6 words) that will help achieve that goal. \
         Return JSON array of objects with {{name, reason}}."
    )
}

/// Parses provider text into at most three suggestions.
///
/// A JSON array of `{name, reason}` objects or bare name strings is preferred
/// (optionally wrapped in a markdown code fence). Anything else is read line by line, one
/// suggestion per non-empty line with an empty reason.
pub fn parse_remote_suggestions(text: &str) -> Vec<Suggestion> {
    let body = CODE_FENCE_RE
        .captures(text)
        .and_then(|captures| captures.get(1))
        .map_or(text, |inner| inner.as_str());

    if let Ok(parsed) = serde_json::from_str::<Vec<RemoteItem>>(body) {
        return parsed
            .into_iter()
            .map(Suggestion::from)
            .filter(|item| !item.name.is_empty())
            .take(SUGGESTION_COUNT)
            .collect();
    }

    body.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(SUGGESTION_COUNT)
        .map(|line| Suggestion::new(line, ""))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{parse_remote_suggestions, suggestion_prompt, OpenAiConfig};

    #[test]
    fn parses_json_array() {
        let text = r#"[
            {"name": "Walk daily", "reason": "Cardio"},
            {"name": "Drink water", "reason": "Hydration"},
            {"name": "Sleep early", "reason": "Recovery"},
            {"name": "Extra", "reason": "Ignored"}
        ]"#;
        let suggestions = parse_remote_suggestions(text);
        assert_eq!(suggestions.len(), 3);
        assert_eq!(suggestions[0].name, "Walk daily");
        assert_eq!(suggestions[2].reason, "Recovery");
    }

    #[test]
    fn parses_fenced_json_and_defaults_missing_reason() {
        let text = "```json\n[{\"name\": \"Meditate\"}]\n```";
        let suggestions = parse_remote_suggestions(text);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].name, "Meditate");
        assert_eq!(suggestions[0].reason, "");
    }

    #[test]
    fn falls_back_to_non_empty_lines() {
        let text = "1. Walk daily\n\n  2. Drink water  \n3. Sleep early\n4. Stretch\n";
        let suggestions = parse_remote_suggestions(text);
        assert_eq!(suggestions.len(), 3);
        assert_eq!(suggestions[1].name, "2. Drink water");
        assert!(suggestions.iter().all(|item| item.reason.is_empty()));
    }

    #[test]
    fn parses_array_of_plain_names() {
        let suggestions = parse_remote_suggestions(r#"["Walk", " Read ", "Sleep", "Extra"]"#);
        let names: Vec<_> = suggestions.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Walk", "Read", "Sleep"]);
        assert!(suggestions.iter().all(|s| s.reason.is_empty()));
    }

    #[test]
    fn parses_mixed_objects_and_names() {
        let suggestions =
            parse_remote_suggestions(r#"[{"name": "Walk", "reason": "Cardio"}, "Read"]"#);
        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[0].reason, "Cardio");
        assert_eq!(suggestions[1].name, "Read");
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let rendered = format!("{:?}", OpenAiConfig::new("sk-secret-value"));
        assert!(!rendered.contains("sk-secret-value"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn prompt_embeds_goal() {
        let prompt = suggestion_prompt("run a marathon");
        assert!(prompt.contains("\"run a marathon\""));
        assert!(prompt.contains("{name, reason}"));
    }
}
