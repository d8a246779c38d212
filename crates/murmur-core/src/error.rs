//! Failure taxonomy for the capture-to-persist pipeline.
//!
//! Every step maps its failures onto one of these variants. The CLI shows the
//! user a single generic notice and keeps the detailed cause for verbose
//! output; no step performs automatic retries.

use thiserror::Error;

/// The one notification users see when any step of the pipeline fails.
pub const GENERIC_FAILURE_NOTICE: &str = "Failed to transcribe audio. Please try again.";

#[derive(Debug, Error)]
pub enum PipelineError {
    /// Microphone access was refused by the user or environment.
    #[error("microphone permission denied")]
    PermissionDenied,

    /// No usable input device, or the device went away mid-session.
    #[error("audio device unavailable: {0}")]
    DeviceUnavailable(String),

    /// Upload to blob storage failed. The stored object is never partially
    /// visible; a failed upload leaves nothing behind.
    #[error("upload failed: {0}")]
    UploadFailed(String),

    /// The speech-to-text call failed, or the request was invalid
    /// (for example a duration below one second).
    #[error("transcription failed: {0}")]
    TranscriptionFailed(String),

    /// Title generation failed after transcription succeeded.
    #[error("title generation failed: {0}")]
    TitleGenerationFailed(String),

    /// The record could not be written.
    #[error("persistence failed: {0}")]
    PersistenceFailed(String),

    /// A dropped/selected file was rejected before upload (only .mp3, .wav
    /// and .m4a are accepted).
    #[error("unsupported media: {0}")]
    UnsupportedMedia(String),
}

impl PipelineError {
    /// The generic user-facing notice. All variants collapse to the same
    /// message; granular recovery UI is deliberately not offered.
    pub fn user_notice(&self) -> &'static str {
        GENERIC_FAILURE_NOTICE
    }
}

impl From<serde_json::Error> for PipelineError {
    fn from(err: serde_json::Error) -> Self {
        PipelineError::PersistenceFailed(err.to_string())
    }
}
