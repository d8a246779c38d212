//! Record persistence: one JSON file per record, written atomically.

use std::io::Write;
use std::path::{Path, PathBuf};

use super::{AudioTrack, RecordId, TranscriptRecord};
use crate::error::PipelineError;
use crate::transcribe::TranscriptionOutcome;

pub struct RecordStore {
    root: PathBuf,
}

impl RecordStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn record_path(&self, id: &RecordId) -> PathBuf {
        self.root.join(format!("{id}.json"))
    }

    /// Persist an outcome as a new record for `user_id`.
    ///
    /// Every call mints a fresh UUID, so saving the same transcript twice
    /// produces two records; dedup is a caller concern. The record is
    /// serialized in full and renamed into place, so readers never observe
    /// a half-written record.
    pub fn save(
        &self,
        user_id: &str,
        outcome: &TranscriptionOutcome,
    ) -> Result<RecordId, PipelineError> {
        let id = RecordId(uuid::Uuid::new_v4().to_string());
        let record = TranscriptRecord {
            id: id.clone(),
            title: outcome.title.clone(),
            user_id: user_id.to_string(),
            full_transcription: outcome.transcript.clone(),
            created_at: chrono::Utc::now(),
            audio_tracks: vec![AudioTrack {
                file_url: outcome.audio_url.clone(),
                partial_transcription: outcome.transcript.clone(),
                language: outcome.language.clone(),
            }],
        };

        std::fs::create_dir_all(&self.root)
            .map_err(|e| PipelineError::PersistenceFailed(format!("{}: {e}", self.root.display())))?;

        let content = serde_json::to_string_pretty(&record)?;
        let mut temp = tempfile::NamedTempFile::new_in(&self.root)
            .map_err(|e| PipelineError::PersistenceFailed(e.to_string()))?;
        temp.write_all(content.as_bytes())
            .map_err(|e| PipelineError::PersistenceFailed(e.to_string()))?;
        temp.persist(self.record_path(&id))
            .map_err(|e| PipelineError::PersistenceFailed(e.to_string()))?;

        crate::vlog!("saved record {id} for user {user_id}");
        Ok(id)
    }

    pub fn load(&self, id: &RecordId) -> Result<TranscriptRecord, PipelineError> {
        let path = self.record_path(id);
        let content = std::fs::read_to_string(&path)
            .map_err(|e| PipelineError::PersistenceFailed(format!("{}: {e}", path.display())))?;
        Ok(serde_json::from_str(&content)?)
    }

    /// All records in the store, newest first.
    pub fn list(&self) -> Result<Vec<TranscriptRecord>, PipelineError> {
        let mut records = Vec::new();
        let entries = match std::fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(records),
            Err(e) => {
                return Err(PipelineError::PersistenceFailed(format!(
                    "{}: {e}",
                    self.root.display()
                )));
            }
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Ok(content) = std::fs::read_to_string(&path)
                && let Ok(record) = serde_json::from_str::<TranscriptRecord>(&content)
            {
                records.push(record);
            }
        }

        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }
}

impl RecordStore {
    /// Store rooted under the local library directory.
    pub fn in_library(library: &Path) -> Self {
        Self::new(library.join("records"))
    }
}
