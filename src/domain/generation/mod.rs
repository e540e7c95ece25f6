pub mod duplicate_checker;
pub mod error;
pub mod model;
pub mod poller;
pub mod processor;
pub mod progress;
pub mod service;
pub mod settings;
pub mod submitter;


pub use duplicate_checker::DuplicateChecker;
pub use error::GenerationError;
pub use model::{
    GenerationEvent, Job, JobOutcome, RunReport, RunStatus, RunSummary, SingleOutcome, Tally,
};
pub use poller::{PollState, StatusPoller};
pub use processor::{ActiveRun, BatchQueueProcessor};
pub use progress::{ProgressReporter, ProgressState};
pub use service::{GenerationService, GenerationServiceApi};
pub use settings::GenerationSettings;
pub use submitter::{AudioJobSubmitter, SubmitOutcome};

use crate::domain::entity::{Entity, EntityKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Request to start a bulk run.
/// Without `entities`, template runs load the active templates from the backend.
#[derive(Debug, Serialize, Deserialize)]
pub struct StartRunRequest {
    pub kind: EntityKind,
    #[serde(default)]
    pub entities: Option<Vec<Entity>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StartRunResponse {
    pub total: usize,
}

/// Response for the progress endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct ProgressResponse {
    #[serde(flatten)]
    pub state: ProgressState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_summary: Option<RunSummary>,
}

/// Request to generate audio for one entity and wait for it
#[derive(Debug, Serialize, Deserialize)]
pub struct SingleGenerationRequest {
    #[serde(default)]
    pub id: i64,
    pub text: String,
    #[serde(default)]
    pub translations: BTreeMap<String, String>,
}

impl From<SingleGenerationRequest> for Entity {
    fn from(request: SingleGenerationRequest) -> Self {
        Self {
            id: request.id,
            text: request.text,
            translations: request.translations,
        }
    }
}
