use super::outcome::{FailureKind, TranscriptionOutcome};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use tracing::{info, warn};

/// Connection settings for the cloud speech service
///
/// Built from the config file and passed in at construction; the client
/// never reads process-wide environment state, so tests can point it at
/// a local stub with fake credentials.
#[derive(Debug, Clone)]
pub struct SpeechConfig {
    /// Recognize-once REST endpoint URL
    pub endpoint: String,

    /// Subscription key sent with every request
    pub api_key: String,

    /// Default recognition language (BCP-47), used when no hint is given
    pub language: String,

    /// Per-call timeout; expiry surfaces as `Failed(NetworkError)`
    pub timeout: Duration,
}

/// One-shot speech recognition
///
/// The HTTP layer and tests depend on this trait rather than the
/// concrete client, so recognition can be stubbed out entirely.
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    /// Run a single recognition call and normalize its result.
    ///
    /// Never retries and never errors: every completed call, success or
    /// failure alike, yields a recordable outcome.
    async fn recognize(&self, audio_ref: &str, language_hint: &str) -> TranscriptionOutcome;
}

/// Service response for a short-audio recognition request
#[derive(Debug, Deserialize)]
struct RecognizeResponse {
    #[serde(rename = "RecognitionStatus")]
    status: String,

    #[serde(rename = "DisplayText", default)]
    display_text: String,

    /// Optional cancellation detail, when the service reports one
    #[serde(rename = "Reason", default)]
    reason: Option<String>,
}

/// HTTP client for a recognize-once speech endpoint
pub struct SpeechClient {
    config: SpeechConfig,
    http: reqwest::Client,
}

impl SpeechClient {
    pub fn new(config: SpeechConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { config, http })
    }

    /// Like [`SpeechRecognizer::recognize`], with a per-call timeout
    /// overriding the configured one.
    pub async fn recognize_with_timeout(
        &self,
        audio_ref: &str,
        language_hint: &str,
        timeout: Duration,
    ) -> TranscriptionOutcome {
        self.recognize_inner(audio_ref, language_hint, Some(timeout))
            .await
    }

    async fn recognize_inner(
        &self,
        audio_ref: &str,
        language_hint: &str,
        timeout: Option<Duration>,
    ) -> TranscriptionOutcome {
        // The audio content is opaque to us; we only need its bytes.
        let audio = match tokio::fs::read(audio_ref).await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Cannot read audio ref {}: {}", audio_ref, e);
                return TranscriptionOutcome::Failed {
                    error_kind: FailureKind::InvalidAudio,
                };
            }
        };

        let language = if language_hint.is_empty() {
            self.config.language.as_str()
        } else {
            language_hint
        };

        let mut request = self
            .http
            .post(&self.config.endpoint)
            .query(&[("language", language)])
            .header("Ocp-Apim-Subscription-Key", &self.config.api_key)
            .header("Content-Type", "audio/wav")
            .body(audio);

        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                // Connect failures, caller timeout expiry, broken transport
                warn!("Speech request failed: {}", e);
                return TranscriptionOutcome::Failed {
                    error_kind: FailureKind::NetworkError,
                };
            }
        };

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            warn!("Speech service rejected credentials");
            return TranscriptionOutcome::Failed {
                error_kind: FailureKind::AuthError,
            };
        }
        if !status.is_success() {
            warn!("Speech service error status: {}", status);
            return TranscriptionOutcome::Failed {
                error_kind: FailureKind::ServiceError,
            };
        }

        match response.json::<RecognizeResponse>().await {
            Ok(verdict) => {
                info!("Recognition verdict: {}", verdict.status);
                map_verdict(verdict)
            }
            Err(e) => {
                warn!("Unparseable speech response: {}", e);
                TranscriptionOutcome::Failed {
                    error_kind: FailureKind::ServiceError,
                }
            }
        }
    }
}

#[async_trait]
impl SpeechRecognizer for SpeechClient {
    async fn recognize(&self, audio_ref: &str, language_hint: &str) -> TranscriptionOutcome {
        self.recognize_inner(audio_ref, language_hint, None).await
    }
}

/// Map the service's recognition status onto the closed outcome set
fn map_verdict(verdict: RecognizeResponse) -> TranscriptionOutcome {
    match verdict.status.as_str() {
        "Success" => TranscriptionOutcome::Recognized {
            text: verdict.display_text,
        },
        "NoMatch" | "InitialSilenceTimeout" | "BabbleTimeout" => TranscriptionOutcome::NoMatch,
        "Canceled" | "Error" => TranscriptionOutcome::Canceled {
            reason: verdict.reason.unwrap_or(verdict.status),
        },
        other => {
            warn!("Unknown recognition status: {}", other);
            TranscriptionOutcome::Failed {
                error_kind: FailureKind::ServiceError,
            }
        }
    }
}
