use std::time::Duration;

pub const DEFAULT_BATCH_SIZE: usize = 5;
pub const DEFAULT_BATCH_DELAY: Duration = Duration::from_secs(1);
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);
pub const DEFAULT_POLL_MAX_ATTEMPTS: u32 = 30;

/// Pacing of bulk and single generation against the audio backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationSettings {
    /// Entities in flight at once
    pub batch_size: usize,
    pub batch_delay: Duration,
    pub poll_interval: Duration,
    pub poll_max_attempts: u32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            batch_delay: DEFAULT_BATCH_DELAY,
            poll_interval: DEFAULT_POLL_INTERVAL,
            poll_max_attempts: DEFAULT_POLL_MAX_ATTEMPTS,
        }
    }
}
