//! Pipeline wiring and shared CLI output helpers.

use anyhow::{Result, anyhow};
use console::style;
use murmur_core::{
    HttpBlobStore, LocalBlobStore, PipelineError, RecordStore, Settings, Transcriber,
    TranscriptionPipeline, speech_backend, storage::BlobStore, transcribe::ChatTitleGenerator,
};

/// Build the full pipeline from settings, with actionable errors for
/// anything unconfigured.
pub fn build_pipeline(settings: &Settings) -> Result<TranscriptionPipeline> {
    let speech_key = settings.speech_api_key().ok_or_else(|| {
        let provider = &settings.transcription.provider;
        anyhow!(
            "No {} API key configured.\nSet it with: murmur config --{}-api-key YOUR_KEY\nOr set the {} environment variable.",
            provider.display_name(),
            provider.as_str(),
            provider.api_key_env_var(),
        )
    })?;

    let title_key = settings.title_api_key().ok_or_else(|| {
        let provider = &settings.title.provider;
        anyhow!(
            "No {} API key configured for title generation.\nSet it with: murmur config --{}-api-key YOUR_KEY\nOr set the {} environment variable.",
            provider.display_name(),
            provider.as_str(),
            provider.api_key_env_var(),
        )
    })?;

    let blobs: Box<dyn BlobStore> = match &settings.storage.endpoint {
        Some(endpoint) => Box::new(HttpBlobStore::new(endpoint.clone())),
        None => Box::new(LocalBlobStore::new(Settings::library_dir().join("audio"))),
    };

    let transcriber = Transcriber::new(
        speech_backend(&settings.transcription.provider, speech_key),
        Box::new(ChatTitleGenerator::new(
            settings.title.provider.clone(),
            title_key,
            settings.title.model.clone(),
        )),
    );

    let records = RecordStore::in_library(&Settings::library_dir());

    Ok(TranscriptionPipeline::new(blobs, transcriber, records))
}

pub fn record_store() -> RecordStore {
    RecordStore::in_library(&Settings::library_dir())
}

/// The language to request: flag wins, then settings, then the "en" default
/// applied by the request itself.
pub fn resolve_language<'a>(flag: Option<&'a str>, settings: &'a Settings) -> Option<&'a str> {
    flag.or(settings.transcription.language.as_deref())
}

/// One generic notice for the user; the real cause goes to verbose stderr.
pub fn report_failure(err: &PipelineError) {
    murmur_core::vlog!("pipeline failed: {err}");
    eprintln!("{} {}", style("✗").red().bold(), err.user_notice());
}

pub fn success(text: &str) {
    println!("{} {}", style("✓").green().bold(), text);
}
