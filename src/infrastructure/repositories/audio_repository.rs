use crate::domain::audio::{AudioJobStatus, AudioRecord, AudioRepositoryError, CreateAudioRequest};
use async_trait::async_trait;

/// Repository for the audio-generation backend.
///
/// The backend synthesizes audio out-of-band: `create_audio` only queues the
/// work, completion is observed through `get_status`.
#[async_trait]
pub trait AudioRepository: Send + Sync {
    /// Whether audio already exists for the given (trimmed) English text
    async fn check_duplicate(&self, text: &str) -> Result<bool, AudioRepositoryError>;

    /// Create an audio-file record and start background generation
    ///
    /// # Errors
    /// `Conflict` when the backend already holds audio for this text,
    /// `Rejected` with the backend's message for any other non-success status
    async fn create_audio(
        &self,
        request: &CreateAudioRequest,
    ) -> Result<AudioRecord, AudioRepositoryError>;

    async fn get_status(&self, id: i64) -> Result<AudioJobStatus, AudioRepositoryError>;

    async fn get_record(&self, id: i64) -> Result<AudioRecord, AudioRepositoryError>;
}
