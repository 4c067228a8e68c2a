use crate::transcribe::TranscriptionOutcome;
use serde::{Deserialize, Serialize};

/// Per-outcome attempt counts for one device over a trailing window
///
/// Derived on demand from recorded attempts; never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeStats {
    pub recognized: u64,
    pub no_match: u64,
    pub canceled: u64,
    pub failed: u64,
}

impl OutcomeStats {
    pub fn total(&self) -> u64 {
        self.recognized + self.no_match + self.canceled + self.failed
    }

    pub(crate) fn bump(&mut self, outcome: &TranscriptionOutcome) {
        match outcome {
            TranscriptionOutcome::Recognized { .. } => self.recognized += 1,
            TranscriptionOutcome::NoMatch => self.no_match += 1,
            TranscriptionOutcome::Canceled { .. } => self.canceled += 1,
            TranscriptionOutcome::Failed { .. } => self.failed += 1,
        }
    }
}
