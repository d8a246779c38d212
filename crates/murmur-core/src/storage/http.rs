//! HTTP blob store: one PUT of the whole body per artifact.

use async_trait::async_trait;

use super::{BlobStore, StoredAudioReference};
use crate::audio::AudioArtifact;
use crate::error::PipelineError;
use crate::http::get_http_client;

/// Uploads to `<base>/<filename>` with a single PUT. A stored object only
/// becomes visible when the server accepts the full body, so a transport
/// failure leaves no partial object behind.
pub struct HttpBlobStore {
    base_url: String,
}

impl HttpBlobStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    fn object_url(&self, filename: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), filename)
    }
}

#[async_trait]
impl BlobStore for HttpBlobStore {
    async fn upload(&self, artifact: &AudioArtifact) -> Result<StoredAudioReference, PipelineError> {
        let url = self.object_url(&artifact.filename);
        crate::vlog!(
            "uploading {} ({} bytes) to {url}",
            artifact.filename,
            artifact.bytes.len()
        );

        let client = get_http_client().map_err(|e| PipelineError::UploadFailed(e.to_string()))?;
        let response = client
            .put(&url)
            .header("Content-Type", artifact.mime_type.clone())
            .body(artifact.bytes.clone())
            .send()
            .await
            .map_err(|e| PipelineError::UploadFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(PipelineError::UploadFailed(format!("{status}: {body}")));
        }

        Ok(StoredAudioReference { url })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_url_joins_without_double_slash() {
        let store = HttpBlobStore::new("https://blobs.example.com/audio/");
        assert_eq!(
            store.object_url("recording-1.wav"),
            "https://blobs.example.com/audio/recording-1.wav"
        );
    }
}
