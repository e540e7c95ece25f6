use super::audio_repository::AudioRepository;
use super::entity_repository::EntityRepository;
use crate::domain::audio::{
    AudioJobStatus, AudioRecord, AudioRepositoryError, CreateAudioRequest, DuplicateCheckRequest,
    DuplicateCheckResponse, TemplateRecord,
};
use crate::domain::entity::Entity;
use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use std::time::Duration;

const AUDIO_FILES_PATH: &str = "/audio-files";
const TEMPLATES_PATH: &str = "/templates";

/// reqwest client for the audio backend's REST API.
/// `base_url` carries the backend's `/api` mount point; paths are appended to it.
pub struct HttpAudioRepository {
    base_url: String,
    http_client: reqwest::Client,
}

impl HttpAudioRepository {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Turn a non-success response into a classified error,
    /// keeping the backend's own message when it sent one
    async fn error_from_response(response: Response) -> AudioRepositoryError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = extract_error_message(status, &body);

        if status == StatusCode::CONFLICT {
            AudioRepositoryError::Conflict(message)
        } else {
            AudioRepositoryError::Rejected {
                status: status.as_u16(),
                message,
            }
        }
    }
}

/// FastAPI reports errors as `{"detail": ...}`; fall back to the raw body
fn extract_error_message(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        match value.get("detail") {
            Some(serde_json::Value::String(detail)) => return detail.clone(),
            Some(detail) => return detail.to_string(),
            None => {}
        }
    }

    let body = body.trim();
    if body.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string()
    } else {
        body.to_string()
    }
}

#[async_trait]
impl AudioRepository for HttpAudioRepository {
    async fn check_duplicate(&self, text: &str) -> Result<bool, AudioRepositoryError> {
        let request = DuplicateCheckRequest {
            english_text: text.to_string(),
        };

        let response = self
            .http_client
            .post(self.url(&format!("{}/check-duplicate", AUDIO_FILES_PATH)))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let summary = response.json::<DuplicateCheckResponse>().await?;
        tracing::debug!(
            text_length = text.len(),
            has_duplicates = summary.has_duplicates,
            "Duplicate check answered"
        );

        Ok(summary.has_duplicates)
    }

    async fn create_audio(
        &self,
        request: &CreateAudioRequest,
    ) -> Result<AudioRecord, AudioRepositoryError> {
        let response = self
            .http_client
            .post(self.url(&format!("{}/", AUDIO_FILES_PATH)))
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        Ok(response.json::<AudioRecord>().await?)
    }

    async fn get_status(&self, id: i64) -> Result<AudioJobStatus, AudioRepositoryError> {
        let response = self
            .http_client
            .get(self.url(&format!("{}/{}/status", AUDIO_FILES_PATH, id)))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        Ok(response.json::<AudioJobStatus>().await?)
    }

    async fn get_record(&self, id: i64) -> Result<AudioRecord, AudioRepositoryError> {
        let response = self
            .http_client
            .get(self.url(&format!("{}/{}", AUDIO_FILES_PATH, id)))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        Ok(response.json::<AudioRecord>().await?)
    }
}

#[async_trait]
impl EntityRepository for HttpAudioRepository {
    async fn list_templates(&self) -> Result<Vec<Entity>, AudioRepositoryError> {
        let response = self
            .http_client
            .get(self.url(TEMPLATES_PATH))
            .query(&[("is_active", "true")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let templates = response.json::<Vec<TemplateRecord>>().await?;
        tracing::info!(template_count = templates.len(), "Templates fetched");

        Ok(templates
            .into_iter()
            .filter(|t| t.is_active)
            .map(Entity::from)
            .collect())
    }
}
