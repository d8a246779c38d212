//! Hosted speech-to-text backends.
//!
//! Each backend takes a stored audio URL plus a language hint and returns
//! the transcript text. Deepgram consumes the URL directly; the OpenAI
//! Whisper endpoint only takes file bodies, so that backend fetches the
//! stored bytes and re-uploads them as a multipart form.

mod deepgram;
mod openai;

use async_trait::async_trait;

pub use deepgram::DeepgramStt;
pub use openai::OpenAiStt;

use crate::config::SpeechProvider;
use crate::error::PipelineError;
use crate::storage::StoredAudioReference;

/// Timeout for remote calls, shared by the pooled HTTP client.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

#[async_trait]
pub trait SpeechToText: Send + Sync {
    async fn transcribe_url(
        &self,
        reference: &StoredAudioReference,
        language: &str,
    ) -> Result<String, PipelineError>;
}

/// Build the backend for the configured provider.
pub fn speech_backend(provider: &SpeechProvider, api_key: String) -> Box<dyn SpeechToText> {
    match provider {
        SpeechProvider::Deepgram => Box::new(DeepgramStt::new(api_key)),
        SpeechProvider::OpenAI => Box::new(OpenAiStt::new(api_key)),
    }
}
