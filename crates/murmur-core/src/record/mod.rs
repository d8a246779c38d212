//! Persisted transcription records.

mod store;

use serde::{Deserialize, Serialize};

pub use store::RecordStore;

/// Identifier of a persisted record. Fresh UUID v4 per save; never reused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub String);

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One source track of a record: where the audio lives and what was heard
/// in it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioTrack {
    pub file_url: String,
    pub partial_transcription: String,
    pub language: String,
}

/// The durable record. Immutable once written in this flow; edits are a
/// different feature.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptRecord {
    pub id: RecordId,
    /// At most 80 characters; the transcriber truncates before save.
    pub title: String,
    pub user_id: String,
    pub full_transcription: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub audio_tracks: Vec<AudioTrack>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_serializes_with_camel_case_keys() {
        let record = TranscriptRecord {
            id: RecordId("abc".to_string()),
            title: "Hello World Greeting".to_string(),
            user_id: "user-1".to_string(),
            full_transcription: "hello world".to_string(),
            created_at: chrono::Utc::now(),
            audio_tracks: vec![AudioTrack {
                file_url: "https://s3/x.webm".to_string(),
                partial_transcription: "hello world".to_string(),
                language: "en".to_string(),
            }],
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["id"], "abc");
        assert_eq!(json["userId"], "user-1");
        assert_eq!(json["fullTranscription"], "hello world");
        assert_eq!(json["audioTracks"][0]["fileUrl"], "https://s3/x.webm");
        assert_eq!(json["audioTracks"][0]["partialTranscription"], "hello world");
        assert_eq!(json["audioTracks"][0]["language"], "en");
    }
}
