//! The finished audio payload handed to the upload client.

use std::io::Cursor;

use crate::error::PipelineError;

/// Encoded audio ready for upload. Owned by one session, immutable once
/// built, discarded after a successful upload.
#[derive(Debug, Clone)]
pub struct AudioArtifact {
    pub bytes: Vec<u8>,
    pub mime_type: String,
    /// Upload name, `recording-<timestamp>.wav` for captures or the original
    /// file name for dropped files.
    pub filename: String,
    /// Approximate length in seconds. None when the container gives us no
    /// cheap way to know (m4a); the caller must then supply one.
    pub duration_secs: Option<f64>,
}

impl AudioArtifact {
    /// Build a WAV artifact from captured samples.
    pub fn from_samples(
        samples: &[f32],
        sample_rate: u32,
        channels: u16,
    ) -> Result<AudioArtifact, PipelineError> {
        let spec = hound::WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 32,
            sample_format: hound::SampleFormat::Float,
        };

        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = hound::WavWriter::new(&mut cursor, spec)
                .map_err(|e| PipelineError::DeviceUnavailable(format!("WAV encode: {e}")))?;
            for &sample in samples {
                writer
                    .write_sample(sample)
                    .map_err(|e| PipelineError::DeviceUnavailable(format!("WAV encode: {e}")))?;
            }
            writer
                .finalize()
                .map_err(|e| PipelineError::DeviceUnavailable(format!("WAV encode: {e}")))?;
        }

        let duration = samples.len() as f64 / (sample_rate as f64 * channels.max(1) as f64);

        Ok(AudioArtifact {
            bytes: cursor.into_inner(),
            mime_type: "audio/wav".to_string(),
            filename: recording_filename("wav"),
            duration_secs: Some(duration),
        })
    }
}

/// `recording-<unix seconds>.<ext>`, the upload naming convention.
pub(crate) fn recording_filename(ext: &str) -> String {
    let timestamp = chrono::Utc::now().timestamp();
    format!("recording-{timestamp}.{ext}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wav_artifact_has_expected_duration_and_name() {
        // One second of mono audio at 16kHz.
        let samples = vec![0.0f32; 16_000];
        let artifact = AudioArtifact::from_samples(&samples, 16_000, 1).unwrap();

        assert_eq!(artifact.mime_type, "audio/wav");
        assert!(artifact.filename.starts_with("recording-"));
        assert!(artifact.filename.ends_with(".wav"));
        let duration = artifact.duration_secs.unwrap();
        assert!((duration - 1.0).abs() < 1e-9);

        // The bytes must parse back as a WAV with the same sample count.
        let reader = hound::WavReader::new(Cursor::new(artifact.bytes)).unwrap();
        assert_eq!(reader.len(), 16_000);
        assert_eq!(reader.spec().sample_rate, 16_000);
    }

    #[test]
    fn stereo_duration_counts_frames_not_samples() {
        // Two channels interleaved: 32k samples is one second at 16kHz stereo.
        let samples = vec![0.0f32; 32_000];
        let artifact = AudioArtifact::from_samples(&samples, 16_000, 2).unwrap();
        let duration = artifact.duration_secs.unwrap();
        assert!((duration - 1.0).abs() < 1e-9);
    }
}
