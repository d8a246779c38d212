//! `murmur config`: show or change configuration with flags.

use anyhow::Result;
use clap::Args;
use console::style;
use murmur_core::{Settings, SpeechProvider, TitleProvider};

#[derive(Args)]
pub struct ConfigArgs {
    /// Speech-to-text provider (deepgram, openai)
    #[arg(long)]
    speech_provider: Option<SpeechProviderArg>,

    /// Title generation provider (openai, mistral)
    #[arg(long)]
    title_provider: Option<TitleProviderArg>,

    /// Title model override (empty provider default otherwise)
    #[arg(long)]
    title_model: Option<String>,

    #[arg(long)]
    deepgram_api_key: Option<String>,

    #[arg(long)]
    openai_api_key: Option<String>,

    #[arg(long)]
    mistral_api_key: Option<String>,

    /// Default language hint
    #[arg(long)]
    language: Option<String>,

    /// Blob storage base URL; pass an empty string to go back to the
    /// local library
    #[arg(long)]
    endpoint: Option<String>,
}

// clap needs FromStr through a newtype to keep the core enums clap-free.
#[derive(Clone)]
struct SpeechProviderArg(SpeechProvider);

impl std::str::FromStr for SpeechProviderArg {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(SpeechProviderArg)
    }
}

#[derive(Clone)]
struct TitleProviderArg(TitleProvider);

impl std::str::FromStr for TitleProviderArg {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(TitleProviderArg)
    }
}

pub fn run(args: ConfigArgs) -> Result<()> {
    let mut settings = Settings::load();
    let mut changed = false;

    if let Some(SpeechProviderArg(provider)) = args.speech_provider {
        settings.transcription.provider = provider;
        changed = true;
    }
    if let Some(TitleProviderArg(provider)) = args.title_provider {
        settings.title.provider = provider;
        changed = true;
    }
    if let Some(model) = args.title_model {
        settings.title.model = if model.is_empty() { None } else { Some(model) };
        changed = true;
    }
    for (name, key) in [
        ("deepgram", args.deepgram_api_key),
        ("openai", args.openai_api_key),
        ("mistral", args.mistral_api_key),
    ] {
        if let Some(key) = key {
            settings
                .transcription
                .api_keys
                .insert(name.to_string(), key);
            changed = true;
        }
    }
    if let Some(language) = args.language {
        settings.transcription.language = Some(language);
        changed = true;
    }
    if let Some(endpoint) = args.endpoint {
        settings.storage.endpoint = if endpoint.trim().is_empty() {
            None
        } else {
            Some(endpoint.trim().to_string())
        };
        changed = true;
    }

    if changed {
        settings.save()?;
        println!("{} Settings updated", style("✓").green().bold());
        return Ok(());
    }

    // No flags: show the current configuration with keys masked.
    println!("speech provider: {}", settings.transcription.provider);
    println!("title provider:  {}", settings.title.provider);
    println!(
        "title model:     {}",
        settings
            .title
            .model
            .as_deref()
            .unwrap_or(settings.title.provider.default_model())
    );
    println!(
        "language:        {}",
        settings.transcription.language.as_deref().unwrap_or("en")
    );
    println!(
        "storage:         {}",
        settings
            .storage
            .endpoint
            .as_deref()
            .unwrap_or("local library")
    );
    for (provider, key) in &settings.transcription.api_keys {
        let masked = if key.chars().count() > 8 {
            format!("{}…", key.chars().take(8).collect::<String>())
        } else {
            "set".to_string()
        };
        println!("api key ({provider}): {masked}");
    }
    Ok(())
}
