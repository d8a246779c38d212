//! OpenAI Whisper transcription.
//!
//! The Whisper endpoint takes multipart file bodies only, so this backend
//! fetches the stored bytes first and re-uploads them with the fixed model
//! id. `file://` references (local library mode) are read from disk.

use async_trait::async_trait;
use serde::Deserialize;

use super::SpeechToText;
use crate::error::PipelineError;
use crate::http::get_http_client;
use crate::storage::StoredAudioReference;

const OPENAI_TRANSCRIPTION_URL: &str = "https://api.openai.com/v1/audio/transcriptions";
const OPENAI_STT_MODEL: &str = "whisper-1";

pub struct OpenAiStt {
    api_key: String,
}

impl OpenAiStt {
    pub fn new(api_key: String) -> Self {
        Self { api_key }
    }
}

#[derive(Deserialize)]
struct TranscriptionResponse {
    text: String,
}

async fn fetch_stored_bytes(reference: &StoredAudioReference) -> Result<Vec<u8>, PipelineError> {
    if let Some(path) = reference.url.strip_prefix("file://") {
        return std::fs::read(path)
            .map_err(|e| PipelineError::TranscriptionFailed(format!("read {path}: {e}")));
    }

    let client =
        get_http_client().map_err(|e| PipelineError::TranscriptionFailed(e.to_string()))?;
    let response = client
        .get(&reference.url)
        .send()
        .await
        .map_err(|e| PipelineError::TranscriptionFailed(e.to_string()))?;

    if !response.status().is_success() {
        return Err(PipelineError::TranscriptionFailed(format!(
            "fetching stored audio: {}",
            response.status()
        )));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| PipelineError::TranscriptionFailed(e.to_string()))?;
    Ok(bytes.to_vec())
}

#[async_trait]
impl SpeechToText for OpenAiStt {
    async fn transcribe_url(
        &self,
        reference: &StoredAudioReference,
        language: &str,
    ) -> Result<String, PipelineError> {
        let audio = fetch_stored_bytes(reference).await?;

        let filename = reference
            .url
            .rsplit('/')
            .next()
            .unwrap_or("audio.wav")
            .to_string();

        let form = reqwest::multipart::Form::new()
            .text("model", OPENAI_STT_MODEL)
            .text("language", language.to_string())
            .part(
                "file",
                reqwest::multipart::Part::bytes(audio).file_name(filename),
            );

        let client =
            get_http_client().map_err(|e| PipelineError::TranscriptionFailed(e.to_string()))?;
        let response = client
            .post(OPENAI_TRANSCRIPTION_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .multipart(form)
            .send()
            .await
            .map_err(|e| PipelineError::TranscriptionFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(PipelineError::TranscriptionFailed(format!(
                "OpenAI {status}: {body}"
            )));
        }

        let parsed: TranscriptionResponse = response
            .json()
            .await
            .map_err(|e| PipelineError::TranscriptionFailed(format!("OpenAI response: {e}")))?;

        Ok(parsed.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn file_reference_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("x.wav");
        std::fs::write(&path, b"RIFFdata").unwrap();

        let reference = StoredAudioReference {
            url: format!("file://{}", path.display()),
        };
        let bytes = fetch_stored_bytes(&reference).await.unwrap();
        assert_eq!(bytes, b"RIFFdata");
    }

    #[tokio::test]
    async fn missing_file_reference_fails_as_transcription_error() {
        let reference = StoredAudioReference {
            url: "file:///nonexistent/x.wav".to_string(),
        };
        assert!(matches!(
            fetch_stored_bytes(&reference).await,
            Err(PipelineError::TranscriptionFailed(_))
        ));
    }
}
