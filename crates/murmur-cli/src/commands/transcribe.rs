//! `murmur transcribe <file>`: intake an existing audio file.

use std::path::Path;

use anyhow::Result;
use murmur_core::Settings;

use crate::app;

pub async fn run(
    file: &Path,
    language: Option<&str>,
    duration: Option<f64>,
    user: &str,
) -> Result<()> {
    let settings = Settings::load();
    let pipeline = app::build_pipeline(&settings)?;
    let language = app::resolve_language(language, &settings);

    match pipeline.run_file(user, file, language, duration).await {
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
