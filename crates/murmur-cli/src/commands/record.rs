//! `murmur record`: capture from the microphone, then run the pipeline.

use anyhow::{Context, Result};
use console::style;
use murmur_core::{CaptureController, Settings};

use crate::app;

pub async fn run(language: Option<&str>, device: Option<&str>, user: &str) -> Result<()> {
    let settings = Settings::load();
    let pipeline = app::build_pipeline(&settings)?;

    let mut controller = CaptureController::new();
    controller
        .start(device)
        .context("Could not start recording")?;

    println!(
        "{} Recording... press {} to stop.",
        style("●").red().bold(),
        style("Enter").bold()
    );
    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .context("Failed to read stdin")?;

    let artifact = match controller.stop() {
        Ok(Some(artifact)) => artifact,
        Ok(None) => anyhow::bail!("Nothing was recorded"),
        Err(err) => {
            app::report_failure(&err);
            anyhow::bail!(err.user_notice());
        }
    };

    if let Some(duration) = artifact.duration_secs {
        println!("  captured {duration:.1}s of audio");
    }

    let language = app::resolve_language(language, &settings);
    match pipeline.run_artifact(user, artifact, language, None).await {
        Ok(id) => {
            let record = pipeline.records().load(&id)?;
            app::success(&format!("Saved \"{}\"", record.title));
            println!("  view it with: murmur show {id}");
            Ok(())
        }
        Err(err) => {
            app::report_failure(&err);
            anyhow::bail!(err.user_notice())
        }
    }
}
