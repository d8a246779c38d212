//! Audio capture and intake.
//!
//! Two ways audio enters the pipeline: the microphone capture controller
//! (`capture`) and dropped/selected files (`intake`). Both produce an
//! [`AudioArtifact`] — immutable encoded bytes plus MIME type and an
//! approximate duration — which is what the upload client consumes.

mod artifact;
mod capture;
mod chunks;
mod devices;
mod intake;

pub use artifact::AudioArtifact;
pub use capture::{
    CaptureController, CaptureSession, CaptureState, RecordedAudio, SessionOpener,
};
pub use chunks::ChunkBuffer;
pub use devices::{AudioDeviceInfo, list_input_devices};
pub use intake::{accepted_mime, estimate_duration_secs, load_dropped_file};
