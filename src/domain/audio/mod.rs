pub mod error;
pub mod language;

pub use error::AudioRepositoryError;
pub use language::{resolve_translations, LanguageCode};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Request for POST /audio-files/check-duplicate
#[derive(Debug, Serialize, Deserialize)]
pub struct DuplicateCheckRequest {
    pub english_text: String,
}

/// Response for POST /audio-files/check-duplicate
#[derive(Debug, Serialize, Deserialize)]
pub struct DuplicateCheckResponse {
    #[serde(default)]
    pub text: Option<String>,
    pub has_duplicates: bool,
    #[serde(default)]
    pub duplicates: serde_json::Value,
}

/// Request for POST /audio-files/
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAudioRequest {
    pub english_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translations: Option<BTreeMap<String, String>>,
}

/// Audio-file record as stored by the backend.
/// Audio paths stay empty until background generation has written them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioRecord {
    pub id: i64,
    pub english_text: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub english_audio_path: Option<String>,
    #[serde(default)]
    pub marathi_audio_path: Option<String>,
    #[serde(default)]
    pub hindi_audio_path: Option<String>,
    #[serde(default)]
    pub gujarati_audio_path: Option<String>,
    #[serde(default)]
    pub english_translation: Option<String>,
    #[serde(default)]
    pub marathi_translation: Option<String>,
    #[serde(default)]
    pub hindi_translation: Option<String>,
    #[serde(default)]
    pub gujarati_translation: Option<String>,
}

/// Response for GET /audio-files/{id}/status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioJobStatus {
    pub id: i64,
    pub completed: bool,
    #[serde(default)]
    pub in_progress: bool,
}

/// Announcement template as listed by GET /templates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateRecord {
    pub id: i64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub title: String,
    pub english_text: String,
    #[serde(default)]
    pub marathi_text: Option<String>,
    #[serde(default)]
    pub hindi_text: Option<String>,
    #[serde(default)]
    pub gujarati_text: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}
