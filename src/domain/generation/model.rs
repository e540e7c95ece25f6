use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::audio::AudioRecord;
use crate::domain::entity::Entity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobOutcome {
    Pending,
    Success,
    SkippedDuplicate,
    Error,
}

/// One pass of one entity through a bulk run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub entity_id: i64,
    pub text: String,
    pub outcome: JobOutcome,
    /// Backend id of the created audio file, on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_id: Option<i64>,
    /// Only present when outcome is `Error`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Job {
    pub fn pending(entity: &Entity) -> Self {
        Self {
            entity_id: entity.id,
            text: entity.canonical_text().to_string(),
            outcome: JobOutcome::Pending,
            audio_id: None,
            error: None,
        }
    }

    pub fn succeeded(self, audio_id: i64) -> Self {
        Self {
            outcome: JobOutcome::Success,
            audio_id: Some(audio_id),
            ..self
        }
    }

    pub fn skipped(self) -> Self {
        Self {
            outcome: JobOutcome::SkippedDuplicate,
            ..self
        }
    }

    pub fn failed(self, detail: impl Into<String>) -> Self {
        Self {
            outcome: JobOutcome::Error,
            error: Some(detail.into()),
            ..self
        }
    }
}

/// Running totals of a bulk run. Counters only ever grow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub success_count: usize,
    pub skipped_count: usize,
    pub error_count: usize,
}

impl Tally {
    pub fn record(&mut self, outcome: JobOutcome) {
        match outcome {
            JobOutcome::Success => self.success_count += 1,
            JobOutcome::SkippedDuplicate => self.skipped_count += 1,
            JobOutcome::Error => self.error_count += 1,
            JobOutcome::Pending => {}
        }
    }

    pub fn total(&self) -> usize {
        self.success_count + self.skipped_count + self.error_count
    }
}

/// End-of-run summary, emitted once when a run completes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub total: usize,
    pub tally: Tally,
    pub finished_at: DateTime<Utc>,
}

impl RunSummary {
    pub fn message(&self) -> String {
        format!(
            "Audio generation finished: {} generated, {} skipped (already exist), {} failed",
            self.tally.success_count, self.tally.skipped_count, self.tally.error_count
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RunStatus {
    Completed,
    Paused { remaining: usize },
}

/// What `execute` hands back: how the run stopped, tallies so far and
/// every job processed so far
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    #[serde(flatten)]
    pub status: RunStatus,
    pub tally: Tally,
    pub jobs: Vec<Job>,
}

impl RunReport {
    pub fn is_completed(&self) -> bool {
        self.status == RunStatus::Completed
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GenerationEvent {
    BatchCompleted {
        batch: usize,
        current: usize,
        total: usize,
    },
    Paused {
        current: usize,
        total: usize,
    },
    Completed(RunSummary),
}

/// Result of generating audio for a single entity and waiting for it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SingleOutcome {
    Completed { record: AudioRecord },
    /// Generation was accepted but did not finish within the polling bound.
    /// It may still complete later.
    TimedOut { job_id: i64, message: String },
    Duplicate,
    Failed { message: String },
}
