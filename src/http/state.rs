use crate::store::AttemptStore;
use crate::transcribe::SpeechRecognizer;
use std::sync::Arc;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Attempt persistence
    pub store: Arc<AttemptStore>,

    /// Recognition backend (real client, or a stub in tests)
    pub recognizer: Arc<dyn SpeechRecognizer>,

    /// Language used when a request carries no hint
    pub default_language: String,
}

impl AppState {
    pub fn new(
        store: Arc<AttemptStore>,
        recognizer: Arc<dyn SpeechRecognizer>,
        default_language: String,
    ) -> Self {
        Self {
            store,
            recognizer,
            default_language,
        }
    }
}
