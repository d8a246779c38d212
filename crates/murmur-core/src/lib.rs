pub mod audio;
pub mod config;
pub mod error;
pub mod http;
pub mod pipeline;
pub mod provider;
pub mod record;
pub mod settings;
pub mod storage;
pub mod transcribe;
pub mod verbose;

pub use audio::{AudioArtifact, CaptureController, CaptureState, list_input_devices};
pub use config::{SpeechProvider, TitleProvider};
pub use error::{GENERIC_FAILURE_NOTICE, PipelineError};
pub use pipeline::TranscriptionPipeline;
pub use provider::{DEFAULT_TIMEOUT_SECS, SpeechToText, speech_backend};
pub use record::{AudioTrack, RecordId, RecordStore, TranscriptRecord};
pub use settings::Settings;
pub use storage::{BlobStore, HttpBlobStore, LocalBlobStore, StoredAudioReference};
pub use transcribe::{
    ChatTitleGenerator, TITLE_MAX_CHARS, TitleGenerator, TranscribeRequest, Transcriber,
    TranscriptionOutcome,
};
pub use verbose::set_verbose;
