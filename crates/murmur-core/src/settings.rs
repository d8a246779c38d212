//! Persistent settings.
//!
//! Stored as JSON under the platform config directory
//! (`~/.config/murmur/settings.json` on Linux). API keys configured here win
//! over environment variables; the environment is the fallback so CI and
//! one-off runs work without a settings file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::config::{SpeechProvider, TitleProvider};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub transcription: TranscriptionSettings,

    #[serde(default)]
    pub title: TitleSettings,

    #[serde(default)]
    pub storage: StorageSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TranscriptionSettings {
    /// Speech-to-text provider for the transcription call.
    #[serde(default)]
    pub provider: SpeechProvider,

    /// Default language hint when the caller supplies none.
    #[serde(default)]
    pub language: Option<String>,

    /// API keys by provider id ("deepgram", "openai", "mistral").
    #[serde(default)]
    pub api_keys: HashMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TitleSettings {
    /// LLM provider for title generation.
    #[serde(default)]
    pub provider: TitleProvider,

    /// Model override; provider default when None.
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StorageSettings {
    /// Base URL of the blob store uploads go to. When None, audio and
    /// records live in the local library under the platform data directory.
    #[serde(default)]
    pub endpoint: Option<String>,
}

impl Settings {
    pub fn settings_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("murmur")
            .join("settings.json")
    }

    /// Directory for the local library (records and audio when no remote
    /// endpoint is configured).
    pub fn library_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("murmur")
    }

    /// Load settings, falling back to defaults when the file is missing or
    /// unreadable.
    pub fn load() -> Settings {
        let path = Self::settings_path();
        match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                crate::vlog!("Ignoring malformed settings at {}: {e}", path.display());
                Settings::default()
            }),
            Err(_) => Settings::default(),
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::settings_path();
        let dir = path
            .parent()
            .context("Settings path has no parent directory")?;
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    /// API key for the configured speech provider: settings first, then the
    /// provider's environment variable.
    pub fn speech_api_key(&self) -> Option<String> {
        let provider = &self.transcription.provider;
        self.transcription
            .api_keys
            .get(provider.as_str())
            .cloned()
            .or_else(|| std::env::var(provider.api_key_env_var()).ok())
    }

    /// API key for the configured title provider, same fallback chain.
    pub fn title_api_key(&self) -> Option<String> {
        let provider = &self.title.provider;
        self.transcription
            .api_keys
            .get(provider.as_str())
            .cloned()
            .or_else(|| std::env::var(provider.api_key_env_var()).ok())
    }
}
