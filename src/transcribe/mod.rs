//! Cloud speech recognition client
//!
//! One recognition call per invocation: read the referenced audio,
//! POST it to the configured recognize-once endpoint, and normalize the
//! service's verdict into a closed outcome set. No retries, no state
//! between calls.

mod client;
mod outcome;

pub use client::{SpeechClient, SpeechConfig, SpeechRecognizer};
pub use outcome::{FailureKind, TranscriptionOutcome};
