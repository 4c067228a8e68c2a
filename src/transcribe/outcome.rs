use serde::{Deserialize, Serialize};

/// Failure kind for attempts that never produced a service verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureKind {
    /// The service rejected our credentials (401/403).
    /// Not retryable: an operator has to fix the key.
    AuthError,

    /// The service could not be reached, or the call timed out
    NetworkError,

    /// The service answered, but not usefully (5xx, malformed body)
    ServiceError,

    /// The referenced audio could not be read locally; no request was sent
    InvalidAudio,
}

impl FailureKind {
    /// Whether an external retry policy may reasonably retry this failure.
    /// The gateway itself never retries.
    pub fn is_retryable(self) -> bool {
        matches!(self, FailureKind::NetworkError | FailureKind::ServiceError)
    }
}

/// Result of a single recognition call
///
/// Closed set: every caller has to handle all four kinds explicitly.
/// `NoMatch` and `Canceled` are expected, non-fatal outcomes; `Failed`
/// means the call never got a verdict from the service at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum TranscriptionOutcome {
    /// Speech was recognized
    Recognized { text: String },

    /// The service found no speech in the audio
    NoMatch,

    /// The service started a recognition but aborted it
    Canceled { reason: String },

    /// The call itself failed before any verdict
    Failed { error_kind: FailureKind },
}

impl TranscriptionOutcome {
    pub fn is_recognized(&self) -> bool {
        matches!(self, TranscriptionOutcome::Recognized { .. })
    }
}
