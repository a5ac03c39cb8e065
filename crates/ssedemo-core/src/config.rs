// Stream pacing configuration
//
// StreamConfig holds the delays between emitted items. Defaults match the
// demo's documented cadence; every value can be overridden from the
// environment with STREAM_*_INTERVAL_MS.

use std::time::Duration;

use crate::error::{Result, StreamError};

/// Number of "message" events the counter stream sends before "complete"
pub const COUNTER_MESSAGE_COUNT: u32 = 10;

/// Number of steps of a simulated task (the stream emits steps 0..=TOTAL)
pub const PROGRESS_TOTAL_STEPS: u32 = 20;

/// Prompt used by the generation stream when none is supplied
pub const DEFAULT_PROMPT: &str = "Tell me about SSE streaming";

/// Pacing for the four generators
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamConfig {
    /// Delay between counter messages
    pub counter_interval: Duration,
    /// Delay between generation chunks
    pub chunk_interval: Duration,
    /// Delay between progress steps
    pub progress_interval: Duration,
    /// Delay between echoed words
    pub echo_interval: Duration,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            counter_interval: Duration::from_secs(2),
            chunk_interval: Duration::from_millis(100),
            progress_interval: Duration::from_millis(500),
            echo_interval: Duration::from_millis(200),
        }
    }
}

impl StreamConfig {
    /// Configuration with no delays at all
    pub fn immediate() -> Self {
        Self {
            counter_interval: Duration::ZERO,
            chunk_interval: Duration::ZERO,
            progress_interval: Duration::ZERO,
            echo_interval: Duration::ZERO,
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup (extracted for testing)
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            counter_interval: interval(&lookup, "STREAM_COUNTER_INTERVAL_MS")?
                .unwrap_or(defaults.counter_interval),
            chunk_interval: interval(&lookup, "STREAM_CHUNK_INTERVAL_MS")?
                .unwrap_or(defaults.chunk_interval),
            progress_interval: interval(&lookup, "STREAM_PROGRESS_INTERVAL_MS")?
                .unwrap_or(defaults.progress_interval),
            echo_interval: interval(&lookup, "STREAM_ECHO_INTERVAL_MS")?
                .unwrap_or(defaults.echo_interval),
        })
    }
}

fn interval<F>(lookup: &F, key: &str) -> Result<Option<Duration>>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).filter(|s| !s.trim().is_empty()) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map(|ms| Some(Duration::from_millis(ms)))
            .map_err(|_| {
                StreamError::config(format!(
                    "{} must be a whole number of milliseconds, got {:?}",
                    key, raw
                ))
            }),
    }
}
