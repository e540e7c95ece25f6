use crate::domain::audio::{AudioRepositoryError, CreateAudioRequest};
use crate::infrastructure::repositories::AudioRepository;
use std::collections::BTreeMap;
use std::sync::Arc;

/// How the backend answered a generation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Generation queued on the backend; audio is not ready yet
    Accepted { id: i64 },
    /// Backend already holds audio for this text (HTTP 409)
    Duplicate(String),
    /// Any other failure, with the backend's message verbatim
    Failed(String),
}

/// Starts background audio generation on the backend
pub struct AudioJobSubmitter {
    audio_repo: Arc<dyn AudioRepository>,
}

impl AudioJobSubmitter {
    pub fn new(audio_repo: Arc<dyn AudioRepository>) -> Self {
        Self { audio_repo }
    }

    pub async fn submit(
        &self,
        text: &str,
        translations: Option<BTreeMap<String, String>>,
    ) -> SubmitOutcome {
        let text = text.trim();
        if text.is_empty() {
            return SubmitOutcome::Failed("English text is required".to_string());
        }

        let request = CreateAudioRequest {
            english_text: text.to_string(),
            translations,
        };

        match self.audio_repo.create_audio(&request).await {
            Ok(record) => {
                tracing::info!(
                    audio_id = record.id,
                    text_length = text.len(),
                    "Audio generation accepted"
                );
                SubmitOutcome::Accepted { id: record.id }
            }
            Err(AudioRepositoryError::Conflict(message)) => {
                tracing::info!(text_length = text.len(), "Audio already exists on backend");
                SubmitOutcome::Duplicate(message)
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    text_length = text.len(),
                    "Audio generation request failed"
                );
                SubmitOutcome::Failed(e.to_string())
            }
        }
    }
}
