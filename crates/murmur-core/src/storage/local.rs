//! Filesystem blob store for the local library and tests.

use async_trait::async_trait;
use std::io::Write;
use std::path::PathBuf;

use super::{BlobStore, StoredAudioReference};
use crate::audio::AudioArtifact;
use crate::error::PipelineError;

/// Stores artifacts under a root directory, one file per artifact. The write
/// goes to a temp file first and is renamed into place, so readers never see
/// a partially written object.
pub struct LocalBlobStore {
    root: PathBuf,
}

impl LocalBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn upload(&self, artifact: &AudioArtifact) -> Result<StoredAudioReference, PipelineError> {
        let root = self.root.clone();
        let filename = artifact.filename.clone();
        let bytes = artifact.bytes.clone();

        let path = tokio::task::spawn_blocking(move || -> Result<PathBuf, PipelineError> {
            std::fs::create_dir_all(&root)
                .map_err(|e| PipelineError::UploadFailed(format!("{}: {e}", root.display())))?;

            let mut temp = tempfile::NamedTempFile::new_in(&root)
                .map_err(|e| PipelineError::UploadFailed(e.to_string()))?;
            temp.write_all(&bytes)
                .map_err(|e| PipelineError::UploadFailed(e.to_string()))?;

            let target = root.join(&filename);
            temp.persist(&target)
                .map_err(|e| PipelineError::UploadFailed(e.to_string()))?;
            Ok(target)
        })
        .await
        .map_err(|e| PipelineError::UploadFailed(format!("upload task: {e}")))??;

        Ok(StoredAudioReference {
            url: format!("file://{}", path.display()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact() -> AudioArtifact {
        AudioArtifact {
            bytes: vec![1, 2, 3, 4],
            mime_type: "audio/wav".to_string(),
            filename: "recording-42.wav".to_string(),
            duration_secs: Some(2.0),
        }
    }

    #[tokio::test]
    async fn upload_writes_full_bytes_and_returns_file_url() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path());

        let reference = store.upload(&artifact()).await.unwrap();
        assert!(reference.url.starts_with("file://"));
        assert!(reference.url.ends_with("recording-42.wav"));

        let written = std::fs::read(dir.path().join("recording-42.wav")).unwrap();
        assert_eq!(written, vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn no_partial_object_left_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the target filename should go makes the rename fail.
        std::fs::create_dir_all(dir.path().join("recording-42.wav")).unwrap();
        let store = LocalBlobStore::new(dir.path());

        assert!(store.upload(&artifact()).await.is_err());

        // Only the blocking directory and no stray temp content with the
        // object's name remain.
        let target = dir.path().join("recording-42.wav");
        assert!(target.is_dir());
    }
}
