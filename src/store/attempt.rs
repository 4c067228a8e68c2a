use crate::transcribe::TranscriptionOutcome;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One recorded transcription attempt
///
/// Created when a recognition call completes (success or failure alike),
/// immutable thereafter. Retention is an operator concern; the store
/// never deletes these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptionAttempt {
    /// Unique attempt identifier
    pub id: Uuid,

    /// Originating device (e.g. "ESP32_001")
    pub device_id: String,

    /// Opaque path/URI of the audio input; the audio is not owned by us
    pub audio_ref: String,

    /// Recognition language that was in effect for the call
    pub language_hint: String,

    /// What the recognition call produced
    pub outcome: TranscriptionOutcome,

    /// When the attempt completed
    pub created_at: DateTime<Utc>,
}

impl TranscriptionAttempt {
    pub fn new(
        device_id: impl Into<String>,
        audio_ref: impl Into<String>,
        language_hint: impl Into<String>,
        outcome: TranscriptionOutcome,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            device_id: device_id.into(),
            audio_ref: audio_ref.into(),
            language_hint: language_hint.into(),
            outcome,
            created_at: Utc::now(),
        }
    }
}
