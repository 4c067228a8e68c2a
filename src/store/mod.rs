//! Durable record of transcription attempts
//!
//! This module provides the append-only `AttemptStore`:
//! - Every attempt (success or failure) is persisted exactly once
//! - Duplicate ids are rejected, never overwritten
//! - Time-windowed per-device statistics are computed on demand

mod attempt;
mod error;
mod stats;
mod store;

pub use attempt::TranscriptionAttempt;
pub use error::StoreError;
pub use stats::OutcomeStats;
pub use store::AttemptStore;
