//! Runtime configuration shared by the binary and the library

use crate::array::Value;
use crate::runner::RunRequest;
use crate::sorting::CATALOG;
use std::time::Duration;

pub const DEFAULT_SIZE: usize = 100;
pub const MIN_SIZE: usize = 2;
pub const MAX_SIZE: usize = 1000;
pub const SIZE_STEP: usize = 10;

pub const DEFAULT_DELAY: Duration = Duration::from_millis(10);
pub const MAX_DELAY: Duration = Duration::from_millis(1000);

pub const DEFAULT_SNAPSHOT_LIMIT_MB: usize = 512;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Catalog name of the first algorithm to run
    pub algorithm: String,
    pub size: usize,
    /// Auto-advance cadence
    pub delay: Duration,
    /// Explicit input for the first run
    pub initial_values: Option<Vec<Value>>,
    pub seed: Option<u64>,
    /// Snapshot log budget in bytes
    pub snapshot_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            algorithm: CATALOG[0].name.to_string(),
            size: DEFAULT_SIZE,
            delay: DEFAULT_DELAY,
            initial_values: None,
            seed: None,
            snapshot_limit: DEFAULT_SNAPSHOT_LIMIT_MB * 1024 * 1024,
        }
    }
}

impl Config {
    /// Request for the first run
    pub fn run_request(&self) -> RunRequest {
        let mut request = RunRequest::new(self.algorithm.clone(), self.size);
        if let Some(values) = &self.initial_values {
            request = request.with_values(values.clone());
        }
        if let Some(seed) = self.seed {
            request = request.with_seed(seed);
        }
        request
    }
}

/// Next delay up or down the 1-2-5 ladder, within `[0, MAX_DELAY]`
pub fn adjust_delay(delay: Duration, faster: bool) -> Duration {
    const LADDER_MS: [u64; 11] = [0, 1, 2, 5, 10, 20, 50, 100, 200, 500, 1000];
    let ms = delay.as_millis() as u64;

    let next = if faster {
        LADDER_MS.iter().rev().find(|&&step| step < ms).copied().unwrap_or(0)
    } else {
        LADDER_MS
            .iter()
            .find(|&&step| step > ms)
            .copied()
            .unwrap_or(MAX_DELAY.as_millis() as u64)
    };
    Duration::from_millis(next)
}

/// Array size after one `]` / `[` press, within `[MIN_SIZE, MAX_SIZE]`
pub fn adjust_size(size: usize, grow: bool) -> usize {
    let next = if grow {
        size.saturating_add(SIZE_STEP)
    } else {
        size.saturating_sub(SIZE_STEP)
    };
    next.clamp(MIN_SIZE, MAX_SIZE)
}
