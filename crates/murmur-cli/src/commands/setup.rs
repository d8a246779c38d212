//! `murmur setup`: interactive configuration wizard.

use anyhow::Result;
use console::style;
use dialoguer::{Input, Password, Select, theme::ColorfulTheme};
use murmur_core::{Settings, SpeechProvider, TitleProvider};

pub fn run() -> Result<()> {
    let theme = ColorfulTheme::default();
    let mut settings = Settings::load();

    println!();
    println!("{}", style("murmur setup").bold().cyan());
    println!();

    let speech_names: Vec<&str> = SpeechProvider::all()
        .iter()
        .map(|p| p.display_name())
        .collect();
    let speech_idx = Select::with_theme(&theme)
        .with_prompt("Speech-to-text provider")
        .items(&speech_names)
        .default(0)
        .interact()?;
    let speech = SpeechProvider::all()[speech_idx].clone();

    let speech_key: String = Password::with_theme(&theme)
        .with_prompt(format!("{} API key", speech.display_name()))
        .interact()?;
    settings
        .transcription
        .api_keys
        .insert(speech.as_str().to_string(), speech_key);
    settings.transcription.provider = speech;

    let title_names: Vec<&str> = TitleProvider::all()
        .iter()
        .map(|p| p.display_name())
        .collect();
    let title_idx = Select::with_theme(&theme)
        .with_prompt("Title generation provider")
        .items(&title_names)
        .default(0)
        .interact()?;
    let title = TitleProvider::all()[title_idx].clone();

    if !settings
        .transcription
        .api_keys
        .contains_key(title.as_str())
    {
        let title_key: String = Password::with_theme(&theme)
            .with_prompt(format!("{} API key", title.display_name()))
            .interact()?;
        settings
            .transcription
            .api_keys
            .insert(title.as_str().to_string(), title_key);
    }
    settings.title.provider = title;

    let endpoint: String = Input::with_theme(&theme)
        .with_prompt("Blob storage base URL (empty for local library)")
        .allow_empty(true)
        .interact_text()?;
    settings.storage.endpoint = if endpoint.trim().is_empty() {
        None
    } else {
        Some(endpoint.trim().to_string())
    };

    let language: String = Input::with_theme(&theme)
        .with_prompt("Default language")
        .default("en".to_string())
        .interact_text()?;
    settings.transcription.language = Some(language);

    settings.save()?;
    println!();
    println!(
        "{} Settings saved to {}",
        style("✓").green().bold(),
        Settings::settings_path().display()
    );
    Ok(())
}
