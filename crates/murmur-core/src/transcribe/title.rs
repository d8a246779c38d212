//! LLM title generation.
//!
//! A fixed prompt template embeds the transcript; the completion is capped
//! at a handful of tokens and truncated to a fixed character budget before
//! persistence.

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::TitleProvider;
use crate::error::PipelineError;
use crate::http::get_http_client;

/// Persisted titles never exceed this many characters.
pub const TITLE_MAX_CHARS: usize = 80;

/// Hard cap on generated tokens; a title needs no more.
const TITLE_MAX_TOKENS: u32 = 10;

const TITLE_PROMPT: &str = "Generate a short descriptive title for this voice note transcript. \
Respond with the title only, no quotes, no punctuation at the end.";

#[async_trait]
pub trait TitleGenerator: Send + Sync {
    async fn generate_title(&self, transcript: &str) -> Result<String, PipelineError>;
}

/// Truncate to [`TITLE_MAX_CHARS`] characters, safe on multi-byte text.
pub fn truncate_title(title: &str) -> String {
    let trimmed = title.trim();
    match trimmed.char_indices().nth(TITLE_MAX_CHARS) {
        Some((byte_index, _)) => trimmed[..byte_index].to_string(),
        None => trimmed.to_string(),
    }
}

/// Chat-completions backend (OpenAI or Mistral).
pub struct ChatTitleGenerator {
    provider: TitleProvider,
    api_key: String,
    model: Option<String>,
}

impl ChatTitleGenerator {
    pub fn new(provider: TitleProvider, api_key: String, model: Option<String>) -> Self {
        Self {
            provider,
            api_key,
            model,
        }
    }
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Deserialize)]
struct Message {
    content: String,
}

#[async_trait]
impl TitleGenerator for ChatTitleGenerator {
    async fn generate_title(&self, transcript: &str) -> Result<String, PipelineError> {
        let model = self
            .model
            .as_deref()
            .unwrap_or_else(|| self.provider.default_model());

        let client =
            get_http_client().map_err(|e| PipelineError::TitleGenerationFailed(e.to_string()))?;
        let response = client
            .post(self.provider.chat_url())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&serde_json::json!({
                "model": model,
                "max_tokens": TITLE_MAX_TOKENS,
                "messages": [
                    {"role": "system", "content": TITLE_PROMPT},
                    {"role": "user", "content": transcript}
                ]
            }))
            .send()
            .await
            .map_err(|e| PipelineError::TitleGenerationFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(PipelineError::TitleGenerationFailed(format!(
                "{} {status}: {body}",
                self.provider.display_name()
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| PipelineError::TitleGenerationFailed(e.to_string()))?;

        parsed
            .choices
            .first()
            .map(|c| c.message.content.trim().to_string())
            .ok_or_else(|| {
                PipelineError::TitleGenerationFailed(format!(
                    "no completion from {}",
                    self.provider.display_name()
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_titles_pass_through_trimmed() {
        assert_eq!(truncate_title("  Morning standup notes "), "Morning standup notes");
    }

    #[test]
    fn long_titles_are_cut_to_the_character_budget() {
        let long = "a".repeat(200);
        let truncated = truncate_title(&long);
        assert_eq!(truncated.chars().count(), TITLE_MAX_CHARS);
    }

    #[test]
    fn truncation_never_splits_multibyte_characters() {
        // 100 three-byte characters; a byte-index cut would panic.
        let title = "語".repeat(100);
        let truncated = truncate_title(&title);
        assert_eq!(truncated.chars().count(), TITLE_MAX_CHARS);
        assert!(truncated.chars().all(|c| c == '語'));
    }

    #[test]
    fn exactly_eighty_chars_is_untouched() {
        let title = "b".repeat(TITLE_MAX_CHARS);
        assert_eq!(truncate_title(&title), title);
    }

    #[test]
    fn chat_response_extracts_first_choice() {
        let json = r#"{
            "choices": [
                { "message": { "content": " Weekly Sync Recap " } }
            ]
        }"#;
        let parsed: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.choices[0].message.content.trim(), "Weekly Sync Recap");
    }
}
