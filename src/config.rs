use crate::transcribe::SpeechConfig;
use anyhow::Result;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub speech: SpeechSettings,
    pub store: StoreConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct SpeechSettings {
    /// Recognize-once REST endpoint URL
    pub endpoint: String,
    /// Subscription key for the speech service
    pub api_key: String,
    /// Default recognition language (BCP-47)
    pub language: String,
    /// Per-call timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize)]
pub struct StoreConfig {
    /// Attempt store file (JSON lines)
    pub path: String,
}

impl SpeechSettings {
    pub fn to_speech_config(&self) -> SpeechConfig {
        SpeechConfig {
            endpoint: self.endpoint.clone(),
            api_key: self.api_key.clone(),
            language: self.language.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
