use crate::domain::audio::AudioRepositoryError;
use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("no entities to generate audio for")]
    EmptyQueue,
    #[error("a bulk generation run is already in progress")]
    AlreadyRunning,
    #[error("no bulk generation run is in progress")]
    NotRunning,
    #[error("no paused run to resume")]
    NothingToResume,
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("dependency error: {0}")]
    Dependency(String),
}

impl From<GenerationError> for AppError {
    fn from(err: GenerationError) -> Self {
        match err {
            GenerationError::EmptyQueue => AppError::BadRequest(err.to_string()),
            GenerationError::Invalid(msg) => AppError::BadRequest(msg),
            GenerationError::AlreadyRunning | GenerationError::NotRunning => {
                AppError::Conflict(err.to_string())
            }
            GenerationError::NothingToResume => AppError::NotFound(err.to_string()),
            GenerationError::Dependency(msg) => AppError::ExternalService(msg),
        }
    }
}

impl From<AudioRepositoryError> for GenerationError {
    fn from(err: AudioRepositoryError) -> Self {
        GenerationError::Dependency(err.to_string())
    }
}
