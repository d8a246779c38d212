//! Microphone capture controller.
//!
//! Lifecycle is a small state machine: Idle → Recording → Stopping → Idle,
//! with the finished artifact delivered exactly once on the Stopping → Idle
//! edge. Device acquisition and release are strictly paired: the live cpal
//! stream is owned by the active session and dropped on `stop()`, on a
//! failed assembly, and on controller drop — an early return never leaks an
//! open microphone stream.
//!
//! The device boundary is the [`SessionOpener`] trait; production code uses
//! the cpal opener, tests substitute a counting fake.

use std::sync::{Arc, Mutex};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

use super::artifact::AudioArtifact;
use super::chunks::ChunkBuffer;
use crate::error::PipelineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    Idle,
    Recording,
    Stopping,
}

/// Raw capture output before WAV encoding.
pub struct RecordedAudio {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
    pub channels: u16,
}

/// An open microphone session. Dropping it releases the device; `finish`
/// consumes it and yields the accumulated audio.
pub trait CaptureSession {
    fn finish(self: Box<Self>) -> Result<RecordedAudio, PipelineError>;
}

/// Acquires the microphone and starts a session.
pub trait SessionOpener {
    fn open(&self, device_name: Option<&str>) -> Result<Box<dyn CaptureSession>, PipelineError>;
}

pub struct CaptureController {
    opener: Box<dyn SessionOpener>,
    state: CaptureState,
    session: Option<Box<dyn CaptureSession>>,
}

impl CaptureController {
    pub fn new() -> Self {
        Self::with_opener(Box::new(CpalOpener))
    }

    /// Controller over a custom device seam. Tests use this to verify
    /// acquire/release pairing without hardware.
    pub fn with_opener(opener: Box<dyn SessionOpener>) -> Self {
        Self {
            opener,
            state: CaptureState::Idle,
            session: None,
        }
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    /// Acquire the microphone and begin accumulating chunks. A second call
    /// while recording is a no-op: the device is never double-acquired.
    pub fn start(&mut self, device_name: Option<&str>) -> Result<(), PipelineError> {
        if self.state == CaptureState::Recording {
            crate::vlog!("start() while already recording, ignoring");
            return Ok(());
        }

        let session = self.opener.open(device_name)?;
        self.session = Some(session);
        self.state = CaptureState::Recording;
        Ok(())
    }

    /// Finalize the recording: assemble the artifact from chunks in arrival
    /// order, release the device, return to Idle. While Idle this is a
    /// no-op returning `None`; the artifact is therefore delivered at most
    /// once per start/stop cycle.
    pub fn stop(&mut self) -> Result<Option<AudioArtifact>, PipelineError> {
        let Some(session) = self.session.take() else {
            return Ok(None);
        };

        self.state = CaptureState::Stopping;
        // Session ownership moved out: whatever happens below, the device
        // handle is released when `session` goes out of scope.
        let result = session.finish().and_then(|recorded| {
            AudioArtifact::from_samples(
                &recorded.samples,
                recorded.sample_rate,
                recorded.channels,
            )
        });
        self.state = CaptureState::Idle;

        result.map(Some)
    }
}

impl Default for CaptureController {
    fn default() -> Self {
        Self::new()
    }
}

/// Production opener backed by cpal.
struct CpalOpener;

struct CpalSession {
    // Held only for its Drop: dropping the stream releases the device.
    _stream: cpal::Stream,
    buffer: Arc<Mutex<ChunkBuffer>>,
    sample_rate: u32,
    channels: u16,
}

impl SessionOpener for CpalOpener {
    fn open(&self, device_name: Option<&str>) -> Result<Box<dyn CaptureSession>, PipelineError> {
        let host = cpal::default_host();

        let device = match device_name {
            Some(name) => host
                .input_devices()
                .map_err(map_device_error)?
                .find(|d| d.name().map(|n| n == name).unwrap_or(false))
                .ok_or_else(|| {
                    PipelineError::DeviceUnavailable(format!("no input device named '{name}'"))
                })?,
            None => host.default_input_device().ok_or_else(|| {
                PipelineError::DeviceUnavailable("no default input device".to_string())
            })?,
        };

        let supported = device
            .default_input_config()
            .map_err(|e| classify_access_error(&e.to_string()))?;
        let sample_rate = supported.sample_rate().0;
        let channels = supported.channels();
        let config: cpal::StreamConfig = supported.config();

        let buffer = Arc::new(Mutex::new(ChunkBuffer::new()));

        let stream = match supported.sample_format() {
            cpal::SampleFormat::F32 => build_stream::<f32>(&device, &config, buffer.clone()),
            cpal::SampleFormat::I16 => build_stream::<i16>(&device, &config, buffer.clone()),
            cpal::SampleFormat::U16 => build_stream::<u16>(&device, &config, buffer.clone()),
            other => Err(PipelineError::DeviceUnavailable(format!(
                "unsupported sample format: {other:?}"
            ))),
        }?;

        stream
            .play()
            .map_err(|e| classify_access_error(&e.to_string()))?;

        Ok(Box::new(CpalSession {
            _stream: stream,
            buffer,
            sample_rate,
            channels,
        }))
    }
}

impl CaptureSession for CpalSession {
    fn finish(self: Box<Self>) -> Result<RecordedAudio, PipelineError> {
        // Drop the stream first so no callback runs while the buffer is
        // drained; the device is released here even if the lock is poisoned.
        drop(self._stream);

        let buffer = Arc::try_unwrap(self.buffer)
            .map(|m| m.into_inner().unwrap_or_else(|e| e.into_inner()))
            .unwrap_or_else(|arc| {
                let mut guard = arc.lock().unwrap_or_else(|e| e.into_inner());
                std::mem::take(&mut *guard)
            });

        crate::vlog!(
            "capture finished: {} chunks, {} samples at {} Hz",
            buffer.chunk_count(),
            buffer.len(),
            self.sample_rate
        );

        Ok(RecordedAudio {
            samples: buffer.into_samples(),
            sample_rate: self.sample_rate,
            channels: self.channels,
        })
    }
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    buffer: Arc<Mutex<ChunkBuffer>>,
) -> Result<cpal::Stream, PipelineError>
where
    T: cpal::Sample + cpal::SizedSample,
    f32: cpal::FromSample<T>,
{
    let err_fn = |err| {
        crate::vlog!("audio stream error (non-fatal): {err}");
    };

    device
        .build_input_stream(
            config,
            move |data: &[T], _: &cpal::InputCallbackInfo| {
                let chunk: Vec<f32> = data.iter().map(|&s| cpal::Sample::from_sample(s)).collect();
                buffer
                    .lock()
                    .unwrap_or_else(|e| e.into_inner())
                    .push(&chunk);
            },
            err_fn,
            None,
        )
        .map_err(|e| classify_access_error(&e.to_string()))
}

fn map_device_error(err: cpal::DevicesError) -> PipelineError {
    classify_access_error(&err.to_string())
}

/// Backends report permission refusal as backend-specific strings; anything
/// else about a missing or busy device maps to DeviceUnavailable.
fn classify_access_error(message: &str) -> PipelineError {
    let lower = message.to_lowercase();
    if lower.contains("permission") || lower.contains("denied") || lower.contains("not allowed") {
        PipelineError::PermissionDenied
    } else {
        PipelineError::DeviceUnavailable(message.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts open sessions so tests can assert acquire/release pairing.
    struct CountingOpener {
        open_sessions: Arc<AtomicUsize>,
        chunks: Vec<Vec<f32>>,
        fail_finish: bool,
    }

    struct CountingSession {
        open_sessions: Arc<AtomicUsize>,
        chunks: Vec<Vec<f32>>,
        fail_finish: bool,
    }

    impl SessionOpener for CountingOpener {
        fn open(
            &self,
            _device_name: Option<&str>,
        ) -> Result<Box<dyn CaptureSession>, PipelineError> {
            self.open_sessions.fetch_add(1, Ordering::SeqCst);
            Ok(Box::new(CountingSession {
                open_sessions: self.open_sessions.clone(),
                chunks: self.chunks.clone(),
                fail_finish: self.fail_finish,
            }))
        }
    }

    impl CaptureSession for CountingSession {
        fn finish(self: Box<Self>) -> Result<RecordedAudio, PipelineError> {
            if self.fail_finish {
                return Err(PipelineError::DeviceUnavailable("device vanished".into()));
            }
            let mut buffer = ChunkBuffer::new();
            for chunk in &self.chunks {
                buffer.push(chunk);
            }
            Ok(RecordedAudio {
                samples: buffer.into_samples(),
                sample_rate: 16_000,
                channels: 1,
            })
        }
    }

    impl Drop for CountingSession {
        fn drop(&mut self) {
            self.open_sessions.fetch_sub(1, Ordering::SeqCst);
        }
    }

    fn controller(
        chunks: Vec<Vec<f32>>,
        fail_finish: bool,
    ) -> (CaptureController, Arc<AtomicUsize>) {
        let count = Arc::new(AtomicUsize::new(0));
        let opener = CountingOpener {
            open_sessions: count.clone(),
            chunks,
            fail_finish,
        };
        (CaptureController::with_opener(Box::new(opener)), count)
    }

    #[test]
    fn artifact_is_chunks_in_arrival_order() {
        let chunks = vec![vec![0.25f32; 4], vec![-0.5f32; 2], vec![0.75f32; 3]];
        let (mut controller, _) = controller(chunks.clone(), false);

        controller.start(None).unwrap();
        let artifact = controller.stop().unwrap().expect("artifact on stop");

        let reader = hound::WavReader::new(std::io::Cursor::new(artifact.bytes)).unwrap();
        let decoded: Vec<f32> = reader.into_samples::<f32>().map(|s| s.unwrap()).collect();
        let expected: Vec<f32> = chunks.into_iter().flatten().collect();
        assert_eq!(decoded, expected);
    }

    #[test]
    fn device_released_after_normal_stop() {
        let (mut controller, count) = controller(vec![vec![0.0f32; 8]], false);

        controller.start(None).unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 1);
        controller.stop().unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert_eq!(controller.state(), CaptureState::Idle);
    }

    #[test]
    fn device_released_when_finish_fails() {
        let (mut controller, count) = controller(vec![], true);

        controller.start(None).unwrap();
        assert!(controller.stop().is_err());
        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert_eq!(controller.state(), CaptureState::Idle);
    }

    #[test]
    fn device_released_on_controller_drop() {
        let (mut controller, count) = controller(vec![], false);
        controller.start(None).unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 1);
        drop(controller);
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn start_while_recording_does_not_double_acquire() {
        let (mut controller, count) = controller(vec![], false);

        controller.start(None).unwrap();
        controller.start(None).unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(controller.state(), CaptureState::Recording);
    }

    #[test]
    fn stop_while_idle_is_a_noop() {
        let (mut controller, count) = controller(vec![], false);
        assert!(controller.stop().unwrap().is_none());
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn artifact_delivered_exactly_once() {
        let (mut controller, _) = controller(vec![vec![0.1f32; 4]], false);

        controller.start(None).unwrap();
        assert!(controller.stop().unwrap().is_some());
        assert!(controller.stop().unwrap().is_none());
    }
}
