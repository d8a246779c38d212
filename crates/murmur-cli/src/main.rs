mod app;
mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "murmur", version, about = "Record or drop audio, transcribe it, keep titled records")]
struct Cli {
    /// Print verbose progress to stderr
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Record from the microphone, then transcribe and save
    Record {
        /// Language hint for transcription (default from settings, else "en")
        #[arg(long)]
        language: Option<String>,

        /// Input device name (default: system default; see `murmur devices`)
        #[arg(long)]
        device: Option<String>,

        /// Owner recorded on the saved record
        #[arg(long, default_value = "local")]
        user: String,
    },

    /// Transcribe an existing audio file (.mp3, .wav or .m4a)
    Transcribe {
        file: PathBuf,

        #[arg(long)]
        language: Option<String>,

        /// Duration in seconds, required for .m4a files
        #[arg(long)]
        duration: Option<f64>,

        #[arg(long, default_value = "local")]
        user: String,
    },

    /// List audio input devices
    Devices,

    /// Show a saved record
    Show { id: String },

    /// List saved records, newest first
    List,

    /// Interactive configuration wizard
    Setup,

    /// Show or change configuration
    Config(commands::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    murmur_core::set_verbose(cli.verbose);

    match cli.command {
        Command::Record {
            language,
            device,
            user,
        } => commands::record::run(language.as_deref(), device.as_deref(), &user).await,
        Command::Transcribe {
            file,
            language,
            duration,
            user,
        } => commands::transcribe::run(&file, language.as_deref(), duration, &user).await,
        Command::Devices => commands::devices::run(),
        Command::Show { id } => commands::show::run(&id),
        Command::List => commands::show::list(),
        Command::Setup => commands::setup::run(),
        Command::Config(args) => commands::config::run(args),
    }
}
