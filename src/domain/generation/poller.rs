use crate::domain::audio::AudioRecord;
use crate::infrastructure::repositories::AudioRepository;
use std::sync::Arc;
use std::time::Duration;

/// Where a submitted job stands from the poller's point of view
#[derive(Debug, Clone, PartialEq)]
pub enum PollState {
    Pending { attempts: u32 },
    Completed(AudioRecord),
    /// Gave up waiting. The backend may still finish the job later.
    TimedOut { attempts: u32 },
}

impl PollState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, PollState::Pending { .. })
    }
}

/// Waits for background generation of one submitted job
pub struct StatusPoller {
    audio_repo: Arc<dyn AudioRepository>,
    interval: Duration,
    max_attempts: u32,
}

impl StatusPoller {
    pub fn new(audio_repo: Arc<dyn AudioRepository>, interval: Duration, max_attempts: u32) -> Self {
        Self {
            audio_repo,
            interval,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Advance the state machine by one status query.
    ///
    /// Terminal states are returned unchanged without touching the backend.
    /// A failed query or a failed record fetch counts as an unanswered attempt.
    pub async fn tick(&self, job_id: i64, state: PollState) -> PollState {
        let attempts = match state {
            PollState::Pending { attempts } => attempts,
            terminal => return terminal,
        };

        match self.audio_repo.get_status(job_id).await {
            Ok(status) if status.completed => match self.audio_repo.get_record(job_id).await {
                Ok(record) => {
                    tracing::info!(job_id, attempts = attempts + 1, "Audio generation completed");
                    return PollState::Completed(record);
                }
                Err(e) => {
                    tracing::warn!(job_id, error = %e, "Completed job record could not be fetched");
                }
            },
            Ok(_) => {
                tracing::debug!(job_id, attempts = attempts + 1, "Audio generation still running");
            }
            Err(e) => {
                tracing::warn!(job_id, error = %e, "Status check failed");
            }
        }

        let attempts = attempts + 1;
        if attempts >= self.max_attempts {
            tracing::warn!(
                job_id,
                attempts,
                "Audio generation is taking longer than expected, giving up polling"
            );
            PollState::TimedOut { attempts }
        } else {
            PollState::Pending { attempts }
        }
    }

    /// Tick once per interval until the job completes or the bound runs out.
    /// Each wait is a plain async sleep, so the runtime stays free in between.
    pub async fn wait_for_completion(&self, job_id: i64) -> PollState {
        let mut state = PollState::Pending { attempts: 0 };
        while !state.is_terminal() {
            tokio::time::sleep(self.interval).await;
            state = self.tick(job_id, state).await;
        }
        state
    }
}
