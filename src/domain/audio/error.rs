/// Failures talking to the audio backend
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AudioRepositoryError {
    /// Audio for this text already exists (HTTP 409)
    #[error("conflict: {0}")]
    Conflict(String),
    /// Any other non-success response; message is the backend's, verbatim
    #[error("{message}")]
    Rejected { status: u16, message: String },
    #[error("transport error: {0}")]
    Transport(String),
    #[error("invalid response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for AudioRepositoryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AudioRepositoryError::Decode(err.to_string())
        } else {
            AudioRepositoryError::Transport(err.to_string())
        }
    }
}
