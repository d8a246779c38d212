//! Transcription request client.
//!
//! Validates the request, then runs two dependent remote calls: speech-to-
//! text on the stored audio URL, and title generation seeded from that
//! transcript. The title call never starts before the transcript exists; if
//! either call fails the whole operation fails and nothing is persisted.

mod title;

use serde::{Deserialize, Serialize};

pub use title::{ChatTitleGenerator, TITLE_MAX_CHARS, TitleGenerator, truncate_title};

use crate::error::PipelineError;
use crate::provider::SpeechToText;
use crate::storage::StoredAudioReference;

fn default_language() -> String {
    "en".to_string()
}

/// The request boundary: stored audio URL, optional language (default "en"),
/// and duration in seconds (must be at least one).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscribeRequest {
    pub audio_url: String,

    #[serde(default = "default_language")]
    pub language: String,

    pub duration_seconds: f64,
}

impl TranscribeRequest {
    pub fn new(reference: &StoredAudioReference, language: Option<&str>, duration_seconds: f64) -> Self {
        Self {
            audio_url: reference.url.clone(),
            language: language.map(|l| l.to_string()).unwrap_or_else(default_language),
            duration_seconds,
        }
    }

    /// Checked before any remote call is made.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.audio_url.trim().is_empty() {
            return Err(PipelineError::TranscriptionFailed(
                "audio URL is empty".to_string(),
            ));
        }
        if !(self.duration_seconds >= 1.0) {
            return Err(PipelineError::TranscriptionFailed(format!(
                "duration must be at least 1 second, got {}",
                self.duration_seconds
            )));
        }
        Ok(())
    }
}

/// Result of the two remote calls, ready for the persistence writer.
#[derive(Debug, Clone)]
pub struct TranscriptionOutcome {
    pub transcript: String,
    /// Already truncated to [`TITLE_MAX_CHARS`].
    pub title: String,
    pub audio_url: String,
    pub language: String,
}

/// Sequences the speech-to-text call and the dependent title call.
pub struct Transcriber {
    stt: Box<dyn SpeechToText>,
    titler: Box<dyn TitleGenerator>,
}

impl Transcriber {
    pub fn new(stt: Box<dyn SpeechToText>, titler: Box<dyn TitleGenerator>) -> Self {
        Self { stt, titler }
    }

    pub async fn transcribe(
        &self,
        request: &TranscribeRequest,
    ) -> Result<TranscriptionOutcome, PipelineError> {
        request.validate()?;

        let reference = StoredAudioReference {
            url: request.audio_url.clone(),
        };

        let transcript = self
            .stt
            .transcribe_url(&reference, &request.language)
            .await?;
        crate::vlog!("transcript received ({} chars)", transcript.len());

        // Title depends on the transcript; it must not start earlier, and a
        // failure here fails the whole operation.
        let title = self.titler.generate_title(&transcript).await?;
        let title = truncate_title(&title);

        Ok(TranscriptionOutcome {
            transcript,
            title,
            audio_url: request.audio_url.clone(),
            language: request.language.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeStt {
        calls: Arc<AtomicUsize>,
        result: Result<String, String>,
    }

    #[async_trait]
    impl SpeechToText for FakeStt {
        async fn transcribe_url(
            &self,
            _reference: &StoredAudioReference,
            _language: &str,
        ) -> Result<String, PipelineError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result
                .clone()
                .map_err(PipelineError::TranscriptionFailed)
        }
    }

    struct FakeTitler {
        calls: Arc<AtomicUsize>,
        result: Result<String, String>,
    }

    #[async_trait]
    impl TitleGenerator for FakeTitler {
        async fn generate_title(&self, _transcript: &str) -> Result<String, PipelineError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result
                .clone()
                .map_err(PipelineError::TitleGenerationFailed)
        }
    }

    fn transcriber(
        stt: Result<String, String>,
        title: Result<String, String>,
    ) -> (Transcriber, Arc<AtomicUsize>, Arc<AtomicUsize>) {
        let stt_calls = Arc::new(AtomicUsize::new(0));
        let title_calls = Arc::new(AtomicUsize::new(0));
        let transcriber = Transcriber::new(
            Box::new(FakeStt {
                calls: stt_calls.clone(),
                result: stt,
            }),
            Box::new(FakeTitler {
                calls: title_calls.clone(),
                result: title,
            }),
        );
        (transcriber, stt_calls, title_calls)
    }

    fn request(duration: f64) -> TranscribeRequest {
        TranscribeRequest {
            audio_url: "https://s3/x.webm".to_string(),
            language: "en".to_string(),
            duration_seconds: duration,
        }
    }

    #[tokio::test]
    async fn zero_duration_fails_before_any_remote_call() {
        let (transcriber, stt_calls, title_calls) =
            transcriber(Ok("hi".into()), Ok("Hi".into()));

        for duration in [0.0, -3.0] {
            let err = transcriber.transcribe(&request(duration)).await.unwrap_err();
            assert!(matches!(err, PipelineError::TranscriptionFailed(_)));
        }
        assert_eq!(stt_calls.load(Ordering::SeqCst), 0);
        assert_eq!(title_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn title_call_never_runs_when_transcription_fails() {
        let (transcriber, stt_calls, title_calls) =
            transcriber(Err("remote 500".into()), Ok("Title".into()));

        let err = transcriber.transcribe(&request(12.0)).await.unwrap_err();
        assert!(matches!(err, PipelineError::TranscriptionFailed(_)));
        assert_eq!(stt_calls.load(Ordering::SeqCst), 1);
        assert_eq!(title_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn title_failure_fails_the_whole_operation() {
        let (transcriber, _, _) =
            transcriber(Ok("hello world".into()), Err("llm down".into()));

        let err = transcriber.transcribe(&request(12.0)).await.unwrap_err();
        assert!(matches!(err, PipelineError::TitleGenerationFailed(_)));
    }

    #[tokio::test]
    async fn successful_outcome_carries_truncated_title() {
        let long_title = "t".repeat(200);
        let (transcriber, _, _) = transcriber(Ok("hello world".into()), Ok(long_title));

        let outcome = transcriber.transcribe(&request(12.0)).await.unwrap();
        assert_eq!(outcome.transcript, "hello world");
        assert_eq!(outcome.title.chars().count(), TITLE_MAX_CHARS);
        assert_eq!(outcome.audio_url, "https://s3/x.webm");
        assert_eq!(outcome.language, "en");
    }

    #[test]
    fn language_defaults_to_en_when_absent() {
        let json = r#"{"audioUrl": "https://s3/x.webm", "durationSeconds": 12}"#;
        let parsed: TranscribeRequest = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.language, "en");
        assert!(parsed.validate().is_ok());
    }
}
