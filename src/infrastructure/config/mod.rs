use crate::domain::generation::GenerationSettings;
use serde::Deserialize;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub log_format: LogFormat,
    // Audio backend
    /// Base URL including the backend's `/api` prefix, e.g. `http://localhost:5001/api`
    pub audio_backend_url: String,
    pub backend_timeout_secs: u64,
    // Generation pacing
    pub generation_batch_size: usize,
    pub generation_batch_delay_ms: u64,
    pub status_poll_interval_ms: u64,
    pub status_poll_max_attempts: u32,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let config = Config {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()?,
            environment: match env::var("ENVIRONMENT").as_deref() {
                Ok("production") => Environment::Production,
                _ => Environment::Development,
            },
            log_format: match env::var("LOG_FORMAT").as_deref() {
                Ok("json") => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            audio_backend_url: env::var("AUDIO_BACKEND_URL")?,
            backend_timeout_secs: env::var("BACKEND_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()?,
            generation_batch_size: env::var("GENERATION_BATCH_SIZE")
                .unwrap_or_else(|_| "5".to_string())
                .parse()?,
            generation_batch_delay_ms: env::var("GENERATION_BATCH_DELAY_MS")
                .unwrap_or_else(|_| "1000".to_string())
                .parse()?,
            status_poll_interval_ms: env::var("STATUS_POLL_INTERVAL_MS")
                .unwrap_or_else(|_| "1000".to_string())
                .parse()?,
            status_poll_max_attempts: env::var("STATUS_POLL_MAX_ATTEMPTS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()?,
        };

        if config.generation_batch_size == 0 {
            return Err("GENERATION_BATCH_SIZE must be at least 1".into());
        }
        if config.status_poll_max_attempts == 0 {
            return Err("STATUS_POLL_MAX_ATTEMPTS must be at least 1".into());
        }

        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }

    pub fn backend_timeout(&self) -> Duration {
        Duration::from_secs(self.backend_timeout_secs)
    }

    pub fn generation_settings(&self) -> GenerationSettings {
        GenerationSettings {
            batch_size: self.generation_batch_size,
            batch_delay: Duration::from_millis(self.generation_batch_delay_ms),
            poll_interval: Duration::from_millis(self.status_poll_interval_ms),
            poll_max_attempts: self.status_poll_max_attempts,
        }
    }
}
