use super::duplicate_checker::DuplicateChecker;
use super::error::GenerationError;
use super::model::{GenerationEvent, Job, JobOutcome, RunReport, RunStatus, RunSummary, Tally};
use super::progress::{ProgressReporter, ProgressState};
use super::settings::GenerationSettings;
use super::submitter::{AudioJobSubmitter, SubmitOutcome};
use crate::domain::audio::resolve_translations;
use crate::domain::entity::Entity;
use chrono::Utc;
use futures::future::join_all;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast;

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Entities of one run plus how far the run got
#[derive(Debug)]
struct Queue {
    entities: Vec<Entity>,
    cursor: usize,
}

impl Queue {
    fn new(entities: Vec<Entity>) -> Self {
        Self {
            entities,
            cursor: 0,
        }
    }

    fn len(&self) -> usize {
        self.entities.len()
    }

    fn remaining(&self) -> usize {
        self.entities.len() - self.cursor
    }

    fn is_exhausted(&self) -> bool {
        self.cursor >= self.entities.len()
    }

    fn next_batch(&self, size: usize) -> &[Entity] {
        let end = (self.cursor + size).min(self.entities.len());
        &self.entities[self.cursor..end]
    }

    fn advance(&mut self, count: usize) {
        self.cursor = (self.cursor + count).min(self.entities.len());
    }
}

/// Everything a run accumulates; survives a pause inside the processor
#[derive(Debug)]
struct RunState {
    queue: Queue,
    tally: Tally,
    jobs: Vec<Job>,
    /// Canonical texts submitted or found existing in this run; failed texts are released
    claimed: HashSet<String>,
    batches_done: usize,
}

impl RunState {
    fn new(entities: Vec<Entity>) -> Self {
        Self {
            queue: Queue::new(entities),
            tally: Tally::default(),
            jobs: Vec::new(),
            claimed: HashSet::new(),
            batches_done: 0,
        }
    }
}

/// Per-entity decision taken before the batch goes out
enum Claim {
    Blank,
    /// Same text already settled in an earlier batch of this run
    RepeatedInRun,
    /// Same text earlier in this batch; takes that entity's result
    TwinOf(usize),
    Process,
}

struct ProcessorInner {
    checker: DuplicateChecker,
    submitter: AudioJobSubmitter,
    settings: GenerationSettings,
    progress: ProgressReporter,
    processing: AtomicBool,
    pause_requested: AtomicBool,
    suspended: Mutex<Option<RunState>>,
    last_summary: Mutex<Option<RunSummary>>,
    events: broadcast::Sender<GenerationEvent>,
}

/// Holds the single-flight flag for one run.
/// Dropped without `release`, it also clears the processing flag in progress.
struct ProcessingGuard {
    inner: Arc<ProcessorInner>,
    armed: bool,
}

impl ProcessingGuard {
    fn acquire(inner: &Arc<ProcessorInner>) -> Result<Self, GenerationError> {
        inner
            .processing
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map_err(|_| GenerationError::AlreadyRunning)?;
        Ok(Self {
            inner: inner.clone(),
            armed: true,
        })
    }

    /// Give the flag back once progress already reflects the end of the run
    fn release(mut self) {
        self.armed = false;
        self.inner.processing.store(false, Ordering::SeqCst);
    }
}

impl Drop for ProcessingGuard {
    fn drop(&mut self) {
        if self.armed {
            self.inner.progress.halt();
            self.inner.processing.store(false, Ordering::SeqCst);
        }
    }
}

/// Drives bulk audio generation in bounded, sequential batches.
///
/// Cloning is cheap and every clone shares the same run: at most one run is
/// active per processor, and a paused run is kept until it is resumed,
/// abandoned or replaced by a new run.
#[derive(Clone)]
pub struct BatchQueueProcessor {
    inner: Arc<ProcessorInner>,
}

impl BatchQueueProcessor {
    pub fn new(
        checker: DuplicateChecker,
        submitter: AudioJobSubmitter,
        settings: GenerationSettings,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            inner: Arc::new(ProcessorInner {
                checker,
                submitter,
                settings,
                progress: ProgressReporter::new(),
                processing: AtomicBool::new(false),
                pause_requested: AtomicBool::new(false),
                suspended: Mutex::new(None),
                last_summary: Mutex::new(None),
                events,
            }),
        }
    }

    /// Validate and claim the processor for a new run.
    ///
    /// Rejections happen here, before any backend call. A suspended run is
    /// dropped in favor of the new one.
    pub fn start(&self, entities: Vec<Entity>) -> Result<ActiveRun, GenerationError> {
        if entities.is_empty() {
            return Err(GenerationError::EmptyQueue);
        }

        let mut suspended = self.inner.suspended.lock();
        let guard = ProcessingGuard::acquire(&self.inner)?;
        self.inner.pause_requested.store(false, Ordering::SeqCst);

        if let Some(abandoned) = suspended.take() {
            tracing::warn!(
                remaining = abandoned.queue.remaining(),
                "Discarding paused run in favor of a new one"
            );
        }

        let total = entities.len();
        self.inner.progress.begin(total);
        drop(suspended);

        tracing::info!(
            total,
            batch_size = self.inner.settings.batch_size,
            "Bulk audio generation started"
        );

        Ok(ActiveRun {
            inner: self.inner.clone(),
            state: RunState::new(entities),
            guard,
        })
    }

    /// Start and drive a run to completion or pause
    pub async fn run(&self, entities: Vec<Entity>) -> Result<RunReport, GenerationError> {
        Ok(self.start(entities)?.execute().await)
    }

    /// Continue a paused run from where it stopped
    pub fn resume(&self) -> Result<ActiveRun, GenerationError> {
        let mut suspended = self.inner.suspended.lock();
        if self.inner.processing.load(Ordering::SeqCst) {
            return Err(GenerationError::AlreadyRunning);
        }
        if suspended.is_none() {
            return Err(GenerationError::NothingToResume);
        }
        let guard = ProcessingGuard::acquire(&self.inner)?;
        let state = suspended.take().ok_or(GenerationError::NothingToResume)?;

        self.inner.pause_requested.store(false, Ordering::SeqCst);
        self.inner.progress.resume();
        drop(suspended);

        tracing::info!(
            current = state.queue.cursor,
            total = state.queue.len(),
            "Bulk audio generation resumed"
        );

        Ok(ActiveRun {
            inner: self.inner.clone(),
            state,
            guard,
        })
    }

    /// Ask the active run to stop at the next batch boundary.
    /// Returns false when nothing is running.
    pub fn pause(&self) -> bool {
        if !self.inner.processing.load(Ordering::SeqCst) {
            return false;
        }
        self.inner.pause_requested.store(true, Ordering::SeqCst);
        tracing::info!("Pause requested, stopping after the current batch");
        true
    }

    /// Drop a paused run and return to idle. Returns false when there was none.
    pub fn abandon(&self) -> bool {
        let mut suspended = self.inner.suspended.lock();
        if self.inner.processing.load(Ordering::SeqCst) {
            return false;
        }
        match suspended.take() {
            Some(state) => {
                self.inner.progress.reset();
                tracing::info!(
                    remaining = state.queue.remaining(),
                    "Paused run abandoned"
                );
                true
            }
            None => false,
        }
    }

    pub fn progress(&self) -> ProgressState {
        self.inner.progress.snapshot()
    }

    pub fn is_processing(&self) -> bool {
        self.inner.processing.load(Ordering::SeqCst)
    }

    pub fn has_suspended_run(&self) -> bool {
        self.inner.suspended.lock().is_some()
    }

    pub fn last_summary(&self) -> Option<RunSummary> {
        self.inner.last_summary.lock().clone()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<GenerationEvent> {
        self.inner.events.subscribe()
    }
}

/// A run that holds the processor's single-flight slot
pub struct ActiveRun {
    inner: Arc<ProcessorInner>,
    state: RunState,
    guard: ProcessingGuard,
}

impl ActiveRun {
    pub fn total(&self) -> usize {
        self.state.queue.len()
    }

    pub fn current(&self) -> usize {
        self.state.queue.cursor
    }

    /// Process batches in queue order until the queue is exhausted or a
    /// pause request is seen at a batch boundary
    pub async fn execute(mut self) -> RunReport {
        let batch_size = self.inner.settings.batch_size.max(1);
        let batch_delay = self.inner.settings.batch_delay;
        let total = self.state.queue.len();

        while !self.state.queue.is_exhausted() {
            let batch = self.state.queue.next_batch(batch_size).to_vec();
            let batch_index = self.state.batches_done;

            let jobs = self.process_batch(&batch).await;
            for job in jobs {
                self.state.tally.record(job.outcome);
                self.state.jobs.push(job);
            }
            self.state.queue.advance(batch.len());
            self.state.batches_done += 1;

            let current = self.state.queue.cursor;
            self.inner.progress.advance_to(current);
            tracing::info!(
                batch = batch_index,
                current,
                total,
                success = self.state.tally.success_count,
                skipped = self.state.tally.skipped_count,
                errors = self.state.tally.error_count,
                "Batch processed"
            );
            let _ = self.inner.events.send(GenerationEvent::BatchCompleted {
                batch: batch_index,
                current,
                total,
            });

            if self.state.queue.is_exhausted() {
                break;
            }

            tokio::time::sleep(batch_delay).await;

            if self.inner.pause_requested.swap(false, Ordering::SeqCst) {
                return self.suspend();
            }
        }

        self.complete()
    }

    async fn process_batch(&mut self, batch: &[Entity]) -> Vec<Job> {
        let mut first_in_batch: HashMap<&str, usize> = HashMap::new();
        let mut claims = Vec::with_capacity(batch.len());
        for (index, entity) in batch.iter().enumerate() {
            let text = entity.canonical_text();
            let claim = if text.is_empty() {
                Claim::Blank
            } else if let Some(&first) = first_in_batch.get(text) {
                Claim::TwinOf(first)
            } else if self.state.claimed.contains(text) {
                Claim::RepeatedInRun
            } else {
                first_in_batch.insert(text, index);
                self.state.claimed.insert(text.to_string());
                Claim::Process
            };
            claims.push(claim);
        }

        let inner = &self.inner;
        let mut jobs = join_all(
            batch
                .iter()
                .zip(&claims)
                .map(|(entity, claim)| inner.process_entity(entity, claim)),
        )
        .await;

        for (index, claim) in claims.iter().enumerate() {
            if let Claim::TwinOf(first) = claim {
                let twin = Job::pending(&batch[index]);
                jobs[index] = match jobs[*first].outcome {
                    JobOutcome::Error => {
                        twin.failed(jobs[*first].error.clone().unwrap_or_default())
                    }
                    _ => twin.skipped(),
                };
            }
        }

        // A failed text is not settled; a later entity with it gets another try
        for job in jobs.iter().filter(|j| j.outcome == JobOutcome::Error) {
            self.state.claimed.remove(&job.text);
        }

        jobs
    }

    fn suspend(self) -> RunReport {
        let ActiveRun {
            inner,
            state,
            guard,
        } = self;
        let current = state.queue.cursor;
        let total = state.queue.len();
        let remaining = state.queue.remaining();

        let report = RunReport {
            status: RunStatus::Paused { remaining },
            tally: state.tally,
            jobs: state.jobs.clone(),
        };

        {
            let mut suspended = inner.suspended.lock();
            *suspended = Some(state);
            inner.progress.suspend();
            guard.release();
        }

        tracing::info!(current, total, remaining, "Bulk audio generation paused");
        let _ = inner.events.send(GenerationEvent::Paused { current, total });

        report
    }

    fn complete(self) -> RunReport {
        let ActiveRun {
            inner,
            state,
            guard,
        } = self;
        let summary = RunSummary {
            total: state.queue.len(),
            tally: state.tally,
            finished_at: Utc::now(),
        };

        {
            let _transition = inner.suspended.lock();
            *inner.last_summary.lock() = Some(summary.clone());
            inner.progress.reset();
            guard.release();
        }

        tracing::info!(
            total = summary.total,
            success = summary.tally.success_count,
            skipped = summary.tally.skipped_count,
            errors = summary.tally.error_count,
            "{}",
            summary.message()
        );
        let _ = inner.events.send(GenerationEvent::Completed(summary));

        RunReport {
            status: RunStatus::Completed,
            tally: state.tally,
            jobs: state.jobs,
        }
    }
}

impl ProcessorInner {
    /// Check, then submit. Never fails: every problem ends up in the job.
    async fn process_entity(&self, entity: &Entity, claim: &Claim) -> Job {
        let job = Job::pending(entity);

        match claim {
            Claim::Blank => return job.failed("English text is required"),
            Claim::RepeatedInRun => {
                tracing::debug!(entity_id = entity.id, "Text already handled in this run");
                return job.skipped();
            }
            // resolved once the batch settles
            Claim::TwinOf(_) => return job,
            Claim::Process => {}
        }

        let text = entity.canonical_text();
        if self.checker.exists(text).await {
            tracing::debug!(entity_id = entity.id, "Audio already exists, skipping");
            return job.skipped();
        }

        match self.submitter.submit(text, resolve_translations(entity)).await {
            SubmitOutcome::Accepted { id } => job.succeeded(id),
            SubmitOutcome::Duplicate(_) => job.skipped(),
            SubmitOutcome::Failed(message) => {
                tracing::warn!(entity_id = entity.id, error = %message, "Entity failed");
                job.failed(message)
            }
        }
    }
}
