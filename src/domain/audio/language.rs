use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::entity::Entity;

/// Languages every announcement is voiced in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LanguageCode {
    #[serde(rename = "en")]
    English,
    #[serde(rename = "mr")]
    Marathi,
    #[serde(rename = "hi")]
    Hindi,
    #[serde(rename = "gu")]
    Gujarati,
}

impl LanguageCode {
    /// Languages the backend translates the English text into
    pub const TARGETS: [LanguageCode; 3] = [
        LanguageCode::Marathi,
        LanguageCode::Hindi,
        LanguageCode::Gujarati,
    ];

    /// Get the ISO 639-1 code as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageCode::English => "en",
            LanguageCode::Marathi => "mr",
            LanguageCode::Hindi => "hi",
            LanguageCode::Gujarati => "gu",
        }
    }
}

/// Build the translations map sent along with a generation request.
///
/// Returns None when the entity carries no overrides, leaving translation to
/// the backend. Otherwise every target language is present, missing ones
/// falling back to the primary text.
pub fn resolve_translations(entity: &Entity) -> Option<BTreeMap<String, String>> {
    if !entity.has_translations() {
        return None;
    }

    let primary = entity.canonical_text();
    let resolved = LanguageCode::TARGETS
        .iter()
        .map(|language| {
            let text = entity.translation(language.as_str()).unwrap_or(primary);
            (language.as_str().to_string(), text.to_string())
        })
        .collect();

    Some(resolved)
}
