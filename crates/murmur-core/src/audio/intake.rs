//! Dropped/selected file intake.
//!
//! Only `.mp3`, `.wav` and `.m4a` pass the gate; everything else is rejected
//! before any bytes move toward the upload client. Duration is probed here
//! so the pipeline can measure it in parallel with the upload.

use std::io::Cursor;
use std::path::Path;

use super::artifact::AudioArtifact;
use crate::error::PipelineError;

/// Average bitrate assumed for MP3 duration estimates. Matches the 128 kbps
/// rate the recording encoder uses, so round-tripped files estimate close
/// to their true length.
const MP3_ESTIMATE_BITRATE: f64 = 128_000.0;

/// Map an accepted extension to its upload MIME type, rejecting anything
/// else before upload.
pub fn accepted_mime(path: &Path) -> Result<&'static str, PipelineError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "mp3" => Ok("audio/mpeg3"),
        "wav" => Ok("audio/wav"),
        "m4a" => Ok("audio/mp4"),
        _ => Err(PipelineError::UnsupportedMedia(format!(
            "'{extension}' is not an accepted upload type (mp3, wav, m4a)"
        ))),
    }
}

/// Approximate duration of encoded audio in seconds.
///
/// WAV is exact (header math via hound). MP3 is estimated from byte length
/// at the assumed bitrate. M4A returns None: the container would need real
/// demuxing, so the caller supplies the duration instead.
pub fn estimate_duration_secs(bytes: &[u8], mime_type: &str) -> Option<f64> {
    match mime_type {
        "audio/wav" => {
            let reader = hound::WavReader::new(Cursor::new(bytes)).ok()?;
            let spec = reader.spec();
            if spec.sample_rate == 0 {
                return None;
            }
            Some(reader.duration() as f64 / spec.sample_rate as f64)
        }
        "audio/mpeg3" => Some(bytes.len() as f64 * 8.0 / MP3_ESTIMATE_BITRATE),
        _ => None,
    }
}

/// Read a dropped file into an artifact, gating on extension first.
pub fn load_dropped_file(path: &Path) -> Result<AudioArtifact, PipelineError> {
    let mime_type = accepted_mime(path)?;

    let bytes = std::fs::read(path)
        .map_err(|e| PipelineError::UnsupportedMedia(format!("{}: {e}", path.display())))?;

    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.to_string())
        .unwrap_or_else(|| super::artifact::recording_filename(mime_type.rsplit('/').next().unwrap_or("bin")));

    let duration_secs = estimate_duration_secs(&bytes, mime_type);

    Ok(AudioArtifact {
        bytes,
        mime_type: mime_type.to_string(),
        filename,
        duration_secs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn only_the_three_audio_extensions_pass() {
        assert_eq!(accepted_mime(Path::new("take.mp3")).unwrap(), "audio/mpeg3");
        assert_eq!(accepted_mime(Path::new("take.WAV")).unwrap(), "audio/wav");
        assert_eq!(accepted_mime(Path::new("take.m4a")).unwrap(), "audio/mp4");

        for rejected in ["notes.pdf", "clip.ogg", "clip.webm", "noext"] {
            assert!(matches!(
                accepted_mime(Path::new(rejected)),
                Err(PipelineError::UnsupportedMedia(_))
            ));
        }
    }

    #[test]
    fn wav_duration_is_exact() {
        let artifact = AudioArtifact::from_samples(&vec![0.0f32; 48_000], 16_000, 1).unwrap();
        let duration = estimate_duration_secs(&artifact.bytes, "audio/wav").unwrap();
        assert!((duration - 3.0).abs() < 1e-6);
    }

    #[test]
    fn mp3_duration_is_a_bitrate_estimate() {
        // 16 KB at 128 kbps is one second.
        let bytes = vec![0u8; 16_000];
        let duration = estimate_duration_secs(&bytes, "audio/mpeg3").unwrap();
        assert!((duration - 1.0).abs() < 1e-9);
    }

    #[test]
    fn m4a_duration_is_unknown() {
        assert!(estimate_duration_secs(&[0u8; 1024], "audio/mp4").is_none());
    }

    #[test]
    fn dropped_wav_loads_with_duration() {
        let artifact = AudioArtifact::from_samples(&vec![0.0f32; 16_000], 16_000, 1).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path: PathBuf = dir.path().join("meeting.wav");
        std::fs::write(&path, &artifact.bytes).unwrap();

        let loaded = load_dropped_file(&path).unwrap();
        assert_eq!(loaded.mime_type, "audio/wav");
        assert_eq!(loaded.filename, "meeting.wav");
        assert!((loaded.duration_secs.unwrap() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn dropped_pdf_is_rejected_before_reading() {
        let err = load_dropped_file(Path::new("/nonexistent/report.pdf")).unwrap_err();
        // Rejection comes from the extension gate, not a read failure.
        assert!(matches!(err, PipelineError::UnsupportedMedia(msg) if msg.contains("pdf")));
    }
}
