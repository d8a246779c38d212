//! End-to-end pipeline: artifact → upload → transcribe → persist.
//!
//! Sequencing is explicit: capture or intake hands an artifact in, upload
//! and duration measurement run concurrently over the same immutable bytes,
//! and the transcription call starts only after both complete. Nothing is
//! reactive; the only trigger is this function being called. Cancellation is
//! dropping the returned future — in-flight HTTP calls abort, a completed
//! save is never undone.

use std::path::Path;

use crate::audio::{self, AudioArtifact};
use crate::error::PipelineError;
use crate::record::{RecordId, RecordStore};
use crate::storage::BlobStore;
use crate::transcribe::{TranscribeRequest, Transcriber};

pub struct TranscriptionPipeline {
    blobs: Box<dyn BlobStore>,
    transcriber: Transcriber,
    records: RecordStore,
}

impl TranscriptionPipeline {
    pub fn new(blobs: Box<dyn BlobStore>, transcriber: Transcriber, records: RecordStore) -> Self {
        Self {
            blobs,
            transcriber,
            records,
        }
    }

    /// Run the full chain for a finished artifact. `duration_override` is
    /// for containers we cannot probe (m4a); when None the artifact's own
    /// duration or a probe of its bytes is used.
    pub async fn run_artifact(
        &self,
        user_id: &str,
        artifact: AudioArtifact,
        language: Option<&str>,
        duration_override: Option<f64>,
    ) -> Result<RecordId, PipelineError> {
        // Upload and duration measurement fan out over the same immutable
        // bytes and join before the transcription call.
        let upload = self.blobs.upload(&artifact);
        let measure = async {
            match (duration_override, artifact.duration_secs) {
                (Some(given), _) => Some(given),
                (None, Some(known)) => Some(known),
                (None, None) => {
                    let bytes = artifact.bytes.clone();
                    let mime = artifact.mime_type.clone();
                    tokio::task::spawn_blocking(move || {
                        audio::estimate_duration_secs(&bytes, &mime)
                    })
                    .await
                    .ok()
                    .flatten()
                }
            }
        };

        let (reference, duration) = tokio::join!(upload, measure);
        let reference = reference?;
        let duration = duration.unwrap_or(0.0);

        let request = TranscribeRequest::new(&reference, language, duration);
        let outcome = self.transcriber.transcribe(&request).await?;

        let id = self.records.save(user_id, &outcome)?;
        Ok(id)
    }

    /// Intake a dropped/selected file and run the chain. Rejected types
    /// (`.pdf` and friends) fail here, before any upload.
    pub async fn run_file(
        &self,
        user_id: &str,
        path: &Path,
        language: Option<&str>,
        duration_override: Option<f64>,
    ) -> Result<RecordId, PipelineError> {
        let artifact = audio::load_dropped_file(path)?;
        self.run_artifact(user_id, artifact, language, duration_override)
            .await
    }

    pub fn records(&self) -> &RecordStore {
        &self.records
    }
}
