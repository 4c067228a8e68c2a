use thiserror::Error;
use uuid::Uuid;

/// Errors surfaced by the attempt store
///
/// A failed write is never swallowed; callers see exactly what happened
/// and can match on the variant.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An attempt with this id is already recorded; the first row stays
    #[error("attempt {id} is already recorded")]
    Duplicate { id: Uuid },

    /// The backing file could not be read or written
    #[error("attempt store I/O failed: {0}")]
    Persistence(#[from] std::io::Error),

    /// An attempt row could not be encoded or decoded
    #[error("attempt row encoding failed: {0}")]
    Encoding(#[from] serde_json::Error),
}
