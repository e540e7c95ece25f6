use crate::infrastructure::repositories::AudioRepository;
use std::sync::Arc;

/// Asks the audio backend whether audio already exists for a text
pub struct DuplicateChecker {
    audio_repo: Arc<dyn AudioRepository>,
}

impl DuplicateChecker {
    pub fn new(audio_repo: Arc<dyn AudioRepository>) -> Self {
        Self { audio_repo }
    }

    /// Backend failures answer false. Submission still hits the backend's
    /// conflict check, so a missed duplicate ends up skipped anyway.
    pub async fn exists(&self, text: &str) -> bool {
        match self.audio_repo.check_duplicate(text).await {
            Ok(exists) => exists,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    text_length = text.len(),
                    "Duplicate check failed, assuming no duplicate"
                );
                false
            }
        }
    }
}
