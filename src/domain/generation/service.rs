use super::duplicate_checker::DuplicateChecker;
use super::error::GenerationError;
use super::model::SingleOutcome;
use super::poller::{PollState, StatusPoller};
use super::processor::BatchQueueProcessor;
use super::progress::ProgressState;
use super::settings::GenerationSettings;
use super::submitter::{AudioJobSubmitter, SubmitOutcome};
use super::ProgressResponse;
use crate::domain::audio::resolve_translations;
use crate::domain::entity::{Entity, EntityKind};
use crate::infrastructure::repositories::{AudioRepository, EntityRepository};
use async_trait::async_trait;
use std::sync::Arc;

const TIMED_OUT_MESSAGE: &str =
    "Audio generation is taking longer than expected. It may still complete in the background.";

pub struct GenerationService {
    processor: BatchQueueProcessor,
    checker: DuplicateChecker,
    submitter: AudioJobSubmitter,
    poller: StatusPoller,
    entity_repo: Arc<dyn EntityRepository>,
}

impl GenerationService {
    pub fn new(
        audio_repo: Arc<dyn AudioRepository>,
        entity_repo: Arc<dyn EntityRepository>,
        settings: GenerationSettings,
    ) -> Self {
        let poller = StatusPoller::new(
            audio_repo.clone(),
            settings.poll_interval,
            settings.poll_max_attempts,
        );
        let processor = BatchQueueProcessor::new(
            DuplicateChecker::new(audio_repo.clone()),
            AudioJobSubmitter::new(audio_repo.clone()),
            settings,
        );

        Self {
            processor,
            checker: DuplicateChecker::new(audio_repo.clone()),
            submitter: AudioJobSubmitter::new(audio_repo),
            poller,
            entity_repo,
        }
    }

    pub fn processor(&self) -> &BatchQueueProcessor {
        &self.processor
    }

    async fn load_entities(
        &self,
        kind: EntityKind,
        entities: Option<Vec<Entity>>,
    ) -> Result<Vec<Entity>, GenerationError> {
        match (kind, entities) {
            (_, Some(entities)) => Ok(entities),
            (EntityKind::Template, None) => {
                let templates = self.entity_repo.list_templates().await?;
                tracing::debug!(count = templates.len(), "Loaded active templates");
                Ok(templates)
            }
            (kind, None) => Err(GenerationError::Invalid(format!(
                "entities are required for kind '{}'",
                kind
            ))),
        }
    }
}

#[async_trait]
pub trait GenerationServiceApi: Send + Sync {
    /// Start a bulk run in the background and return the number of queued entities
    async fn start_run(
        &self,
        kind: EntityKind,
        entities: Option<Vec<Entity>>,
    ) -> Result<usize, GenerationError>;

    async fn pause(&self) -> Result<(), GenerationError>;

    async fn resume(&self) -> Result<ProgressState, GenerationError>;

    async fn abandon(&self) -> Result<(), GenerationError>;

    async fn progress(&self) -> ProgressResponse;

    /// Generate audio for one entity and wait for it to finish
    async fn generate_one(&self, entity: Entity) -> Result<SingleOutcome, GenerationError>;
}

#[async_trait]
impl GenerationServiceApi for GenerationService {
    async fn start_run(
        &self,
        kind: EntityKind,
        entities: Option<Vec<Entity>>,
    ) -> Result<usize, GenerationError> {
        if self.processor.is_processing() {
            return Err(GenerationError::AlreadyRunning);
        }

        let entities = self.load_entities(kind, entities).await?;
        let run = self.processor.start(entities)?;
        let total = run.total();

        tracing::info!(kind = %kind, total, "Bulk generation run accepted");
        tokio::spawn(run.execute());
        Ok(total)
    }

    async fn pause(&self) -> Result<(), GenerationError> {
        if self.processor.pause() {
            Ok(())
        } else {
            Err(GenerationError::NotRunning)
        }
    }

    async fn resume(&self) -> Result<ProgressState, GenerationError> {
        let run = self.processor.resume()?;
        let progress = self.processor.progress();
        tokio::spawn(run.execute());
        Ok(progress)
    }

    async fn abandon(&self) -> Result<(), GenerationError> {
        if self.processor.abandon() {
            Ok(())
        } else if self.processor.is_processing() {
            Err(GenerationError::AlreadyRunning)
        } else {
            Err(GenerationError::NothingToResume)
        }
    }

    async fn progress(&self) -> ProgressResponse {
        ProgressResponse {
            state: self.processor.progress(),
            last_summary: self.processor.last_summary(),
        }
    }

    async fn generate_one(&self, entity: Entity) -> Result<SingleOutcome, GenerationError> {
        let text = entity.canonical_text();
        if text.is_empty() {
            return Err(GenerationError::Invalid(
                "English text is required".to_string(),
            ));
        }

        if self.checker.exists(text).await {
            return Ok(SingleOutcome::Duplicate);
        }

        let job_id = match self
            .submitter
            .submit(text, resolve_translations(&entity))
            .await
        {
            SubmitOutcome::Accepted { id } => id,
            SubmitOutcome::Duplicate(_) => return Ok(SingleOutcome::Duplicate),
            SubmitOutcome::Failed(message) => return Ok(SingleOutcome::Failed { message }),
        };

        match self.poller.wait_for_completion(job_id).await {
            PollState::Completed(record) => Ok(SingleOutcome::Completed { record }),
            PollState::TimedOut { .. } | PollState::Pending { .. } => {
                Ok(SingleOutcome::TimedOut {
                    job_id,
                    message: TIMED_OUT_MESSAGE.to_string(),
                })
            }
        }
    }
}
