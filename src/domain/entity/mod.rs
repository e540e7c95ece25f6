use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Something that can have announcement audio generated for it.
///
/// Entities are owned by the CRUD backend; this service only reads the id,
/// the canonical text and any per-language overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub id: i64,
    pub text: String,
    /// Language code -> text override (e.g. "mr" -> Marathi station name)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub translations: BTreeMap<String, String>,
}

impl Entity {
    pub fn new(id: i64, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            translations: BTreeMap::new(),
        }
    }

    pub fn with_translation(mut self, language: &str, text: impl Into<String>) -> Self {
        self.translations.insert(language.to_string(), text.into());
        self
    }

    /// Text used for duplicate detection and submission.
    /// The audio backend strips surrounding whitespace before comparing.
    pub fn canonical_text(&self) -> &str {
        self.text.trim()
    }

    /// Translation override for a language, ignoring blank entries
    pub fn translation(&self, language: &str) -> Option<&str> {
        self.translations
            .get(language)
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
    }

    pub fn has_translations(&self) -> bool {
        self.translations.values().any(|t| !t.trim().is_empty())
    }
}

/// Kind of entity a bulk run is started for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Station,
    Train,
    Template,
    Text,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Station => "station",
            EntityKind::Train => "train",
            EntityKind::Template => "template",
            EntityKind::Text => "text",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
