use serde::{Deserialize, Serialize};
use std::fmt;

/// Hosted speech-to-text providers.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum SpeechProvider {
    /// Deepgram pre-recorded API; takes the stored audio URL directly.
    #[default]
    Deepgram,
    /// OpenAI Whisper API; the stored bytes are fetched and re-uploaded as
    /// a multipart form.
    OpenAI,
}

impl SpeechProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpeechProvider::Deepgram => "deepgram",
            SpeechProvider::OpenAI => "openai",
        }
    }

    /// Environment variable consulted when no API key is configured.
    pub fn api_key_env_var(&self) -> &'static str {
        match self {
            SpeechProvider::Deepgram => "DEEPGRAM_API_KEY",
            SpeechProvider::OpenAI => "OPENAI_API_KEY",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SpeechProvider::Deepgram => "Deepgram",
            SpeechProvider::OpenAI => "OpenAI",
        }
    }

    pub fn all() -> &'static [SpeechProvider] {
        &[SpeechProvider::Deepgram, SpeechProvider::OpenAI]
    }
}

impl fmt::Display for SpeechProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SpeechProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "deepgram" => Ok(SpeechProvider::Deepgram),
            "openai" => Ok(SpeechProvider::OpenAI),
            _ => Err(format!(
                "Unknown speech provider: {s}. Available: deepgram, openai"
            )),
        }
    }
}

/// LLM providers for title generation.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum TitleProvider {
    #[default]
    OpenAI,
    Mistral,
}

impl TitleProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            TitleProvider::OpenAI => "openai",
            TitleProvider::Mistral => "mistral",
        }
    }

    pub fn api_key_env_var(&self) -> &'static str {
        match self {
            TitleProvider::OpenAI => "OPENAI_API_KEY",
            TitleProvider::Mistral => "MISTRAL_API_KEY",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TitleProvider::OpenAI => "OpenAI",
            TitleProvider::Mistral => "Mistral",
        }
    }

    /// Chat-completions endpoint for this provider.
    pub fn chat_url(&self) -> &'static str {
        match self {
            TitleProvider::OpenAI => "https://api.openai.com/v1/chat/completions",
            TitleProvider::Mistral => "https://api.mistral.ai/v1/chat/completions",
        }
    }

    /// Default model when none is configured.
    pub fn default_model(&self) -> &'static str {
        match self {
            TitleProvider::OpenAI => "gpt-4o-mini",
            TitleProvider::Mistral => "mistral-small-latest",
        }
    }

    pub fn all() -> &'static [TitleProvider] {
        &[TitleProvider::OpenAI, TitleProvider::Mistral]
    }
}

impl fmt::Display for TitleProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TitleProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(TitleProvider::OpenAI),
            "mistral" => Ok(TitleProvider::Mistral),
            _ => Err(format!(
                "Unknown title provider: {s}. Available: openai, mistral"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speech_provider_round_trips_through_str() {
        for provider in SpeechProvider::all() {
            let parsed: SpeechProvider = provider.as_str().parse().unwrap();
            assert_eq!(&parsed, provider);
        }
        assert!("whisperx".parse::<SpeechProvider>().is_err());
    }

    #[test]
    fn title_provider_round_trips_through_str() {
        for provider in TitleProvider::all() {
            let parsed: TitleProvider = provider.as_str().parse().unwrap();
            assert_eq!(&parsed, provider);
        }
    }
}
