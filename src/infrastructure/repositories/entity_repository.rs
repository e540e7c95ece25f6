use crate::domain::audio::{AudioRepositoryError, TemplateRecord};
use crate::domain::entity::Entity;
use async_trait::async_trait;

/// Source of entities that live on the audio backend itself
#[async_trait]
pub trait EntityRepository: Send + Sync {
    /// All active announcement templates, as generation entities
    async fn list_templates(&self) -> Result<Vec<Entity>, AudioRepositoryError>;
}

impl From<TemplateRecord> for Entity {
    fn from(template: TemplateRecord) -> Self {
        let mut entity = Entity::new(template.id, template.english_text);
        let overrides = [
            ("mr", template.marathi_text),
            ("hi", template.hindi_text),
            ("gu", template.gujarati_text),
        ];
        for (language, text) in overrides {
            if let Some(text) = text.filter(|t| !t.trim().is_empty()) {
                entity = entity.with_translation(language, text);
            }
        }
        entity
    }
}
