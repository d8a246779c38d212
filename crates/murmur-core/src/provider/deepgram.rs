//! Deepgram pre-recorded transcription.
//!
//! The pre-recorded API accepts a JSON body `{"url": ...}` referencing the
//! stored audio, which fits the stored-reference flow with no second upload.

use async_trait::async_trait;
use serde::Deserialize;

use super::SpeechToText;
use crate::error::PipelineError;
use crate::http::get_http_client;
use crate::storage::StoredAudioReference;

const DEEPGRAM_LISTEN_URL: &str = "https://api.deepgram.com/v1/listen";
const DEEPGRAM_MODEL: &str = "nova-2";

pub struct DeepgramStt {
    api_key: String,
}

impl DeepgramStt {
    pub fn new(api_key: String) -> Self {
        Self { api_key }
    }
}

#[derive(Deserialize)]
struct ListenResponse {
    results: ListenResults,
}

#[derive(Deserialize)]
struct ListenResults {
    channels: Vec<ListenChannel>,
}

#[derive(Deserialize)]
struct ListenChannel {
    alternatives: Vec<ListenAlternative>,
}

#[derive(Deserialize)]
struct ListenAlternative {
    transcript: String,
}

#[async_trait]
impl SpeechToText for DeepgramStt {
    async fn transcribe_url(
        &self,
        reference: &StoredAudioReference,
        language: &str,
    ) -> Result<String, PipelineError> {
        let client =
            get_http_client().map_err(|e| PipelineError::TranscriptionFailed(e.to_string()))?;

        let response = client
            .post(DEEPGRAM_LISTEN_URL)
            .query(&[("model", DEEPGRAM_MODEL), ("language", language)])
            .header("Authorization", format!("Token {}", self.api_key))
            .json(&serde_json::json!({ "url": reference.url }))
            .send()
            .await
            .map_err(|e| PipelineError::TranscriptionFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(PipelineError::TranscriptionFailed(format!(
                "Deepgram {status}: {body}"
            )));
        }

        let parsed: ListenResponse = response
            .json()
            .await
            .map_err(|e| PipelineError::TranscriptionFailed(format!("Deepgram response: {e}")))?;

        parsed
            .results
            .channels
            .first()
            .and_then(|c| c.alternatives.first())
            .map(|a| a.transcript.clone())
            .ok_or_else(|| {
                PipelineError::TranscriptionFailed("Deepgram returned no transcript".to_string())
            })
    }
}
