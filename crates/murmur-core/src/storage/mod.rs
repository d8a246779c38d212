//! Blob storage for finished audio artifacts.
//!
//! `upload` is atomic from the consumer's point of view: either the full
//! object is durable at the returned URL, or nothing is visible. Retrying a
//! failed upload is a caller decision.

mod http;
mod local;

use async_trait::async_trait;

pub use http::HttpBlobStore;
pub use local::LocalBlobStore;

use crate::audio::AudioArtifact;
use crate::error::PipelineError;

/// A durable URL for previously uploaded bytes. Immutable once issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredAudioReference {
    pub url: String,
}

#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn upload(&self, artifact: &AudioArtifact) -> Result<StoredAudioReference, PipelineError>;
}
