//! HTTP ingest API for device callers (ESP32 firmware, batch jobs)
//!
//! This module provides the REST surface of the gateway:
//! - POST /transcriptions - Recognize one audio ref and record the attempt
//! - GET /devices/:device_id/statistics - Windowed outcome counts
//! - GET /health - Health check

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
