pub mod config;
pub mod http;
pub mod store;
pub mod transcribe;

pub use config::Config;
pub use http::{create_router, AppState};
pub use store::{AttemptStore, OutcomeStats, StoreError, TranscriptionAttempt};
pub use transcribe::{
    FailureKind, SpeechClient, SpeechConfig, SpeechRecognizer, TranscriptionOutcome,
};
