//! `murmur show <id>` and `murmur list`.

use anyhow::{Context, Result};
use console::style;
use murmur_core::RecordId;

use crate::app;

pub fn run(id: &str) -> Result<()> {
    let store = app::record_store();
    let record = store
        .load(&RecordId(id.to_string()))
        .with_context(|| format!("No record with id {id}"))?;

    println!("{}", style(&record.title).bold());
    println!(
        "{}",
        style(format!(
            "{} · {} · {}",
            record.id,
            record.user_id,
            record.created_at.format("%Y-%m-%d %H:%M UTC")
        ))
        .dim()
    );
    println!();
    println!("{}", record.full_transcription);
    for track in &record.audio_tracks {
        println!();
        println!(
            "{}",
            style(format!("audio: {} ({})", track.file_url, track.language)).dim()
        );
    }
    Ok(())
}

pub fn list() -> Result<()> {
    let store = app::record_store();
    let records = store.list().context("Could not read the record library")?;

    if records.is_empty() {
        println!("No records yet. Try: murmur record");
        return Ok(());
    }

    for record in records {
        println!(
            "{}  {}  {}",
            style(&record.id).dim(),
            record.created_at.format("%Y-%m-%d %H:%M"),
            record.title
        );
    }
    Ok(())
}
