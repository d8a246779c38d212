//! Shared HTTP client.
//!
//! One pooled client for every remote call (upload, speech-to-text, title
//! generation) so connections are reused across pipeline steps.

use once_cell::sync::OnceCell;
use reqwest::Client;

use crate::error::PipelineError;
use crate::provider::DEFAULT_TIMEOUT_SECS;

static CLIENT: OnceCell<Client> = OnceCell::new();

/// Get the process-wide HTTP client, building it on first use.
pub fn get_http_client() -> Result<&'static Client, PipelineError> {
    CLIENT.get_or_try_init(|| {
        Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| PipelineError::TranscriptionFailed(format!("HTTP client: {e}")))
    })
}
