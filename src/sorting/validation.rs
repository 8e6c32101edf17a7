//! Headless validation of the catalog
//!
//! Every algorithm is run on a [`HeadlessArray`] in its own thread with a wall-clock budget,
//! then checked pair by pair with `compare_values`. Results are collected per algorithm, so one
//! failure (wrong order, array error, panic, timeout) never stops the others from being checked.
//!
//! Each algorithm is also run through a [`SubArray`] window over the middle of a larger array,
//! which must come out sorted while everything outside the window stays put.

use super::{catalog, Algorithm};
use crate::array::{HeadlessArray, Stats, SubArray, Value, VisualArray};
use crate::errors::ValidationError;
use crate::runner::generate_shuffled;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fmt;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;
use tracing::{info, warn};

/// Sizes exercised by [`validate_all`] when the caller has no preference
pub const DEFAULT_SIZES: [usize; 5] = [0, 1, 2, 10, 100];

/// Default per-run budget
pub const DEFAULT_BUDGET: Duration = Duration::from_secs(5);

/// How the algorithm was driven
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Directly on the root array
    Full,
    /// Through a subarray view over the middle half
    Window,
}

/// Outcome for one algorithm on one input
#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub algorithm: &'static str,
    pub size: usize,
    pub target: Target,
    pub outcome: Result<Stats, ValidationError>,
}

impl ValidationReport {
    pub fn passed(&self) -> bool {
        self.outcome.is_ok()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let target = match self.target {
            Target::Full => "full",
            Target::Window => "window",
        };
        match &self.outcome {
            Ok(stats) => write!(
                f,
                "PASS {:<15} n={:<5} {:<6} reads={} swaps={} moves={} comparisons={}",
                self.algorithm,
                self.size,
                target,
                stats.reads,
                stats.swaps,
                stats.moves,
                stats.comparisons
            ),
            Err(e) => write!(
                f,
                "FAIL {:<15} n={:<5} {:<6} {}",
                self.algorithm, self.size, target, e
            ),
        }
    }
}

/// Check that `arr` is non-decreasing using the array's own comparison
pub fn check_sorted(arr: &mut dyn VisualArray) -> Result<(), ValidationError> {
    for index in 0..arr.len().saturating_sub(1) {
        let left = arr.get(index)?;
        let right = arr.get(index + 1)?;
        if arr.compare_values(left, right).is_greater() {
            return Err(ValidationError::NotSorted { index, left, right });
        }
    }
    Ok(())
}

/// Sort `values` headlessly and verify the result
pub fn validate(
    algorithm: &'static Algorithm,
    values: Vec<Value>,
    target: Target,
    budget: Duration,
) -> ValidationReport {
    let size = values.len();
    let outcome = run_with_budget(algorithm, values, target, budget);

    match &outcome {
        Ok(_) => info!(algorithm = algorithm.name, size, ?target, "validation passed"),
        Err(e) => warn!(algorithm = algorithm.name, size, ?target, error = %e, "validation failed"),
    }

    ValidationReport {
        algorithm: algorithm.name,
        size,
        target,
        outcome,
    }
}

/// Validate every catalog algorithm at every size, full and windowed
pub fn validate_all(sizes: &[usize], budget: Duration, seed: Option<u64>) -> Vec<ValidationReport> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut reports = Vec::new();
    for algorithm in catalog() {
        for &size in sizes {
            let values = generate_shuffled(size, &mut rng);
            reports.push(validate(algorithm, values.clone(), Target::Full, budget));
            reports.push(validate(algorithm, values, Target::Window, budget));
        }
    }
    reports
}

fn run_with_budget(
    algorithm: &'static Algorithm,
    values: Vec<Value>,
    target: Target,
    budget: Duration,
) -> Result<Stats, ValidationError> {
    let (tx, rx) = mpsc::channel();
    let spawned = thread::Builder::new()
        .name(format!("validate-{}", algorithm.name))
        .spawn(move || {
            let _ = tx.send(sort_and_check(algorithm, values, target));
        });

    if let Err(e) = spawned {
        return Err(ValidationError::WorkerSpawn(e.to_string()));
    }

    // A timed-out worker is abandoned; its result is dropped when it eventually sends
    match rx.recv_timeout(budget) {
        Ok(outcome) => outcome,
        Err(RecvTimeoutError::Timeout) => Err(ValidationError::Timeout { budget }),
        Err(RecvTimeoutError::Disconnected) => Err(ValidationError::Panicked),
    }
}

fn sort_and_check(
    algorithm: &Algorithm,
    values: Vec<Value>,
    target: Target,
) -> Result<Stats, ValidationError> {
    let mut array = HeadlessArray::new(values.clone());

    match target {
        Target::Full => {
            (algorithm.sort)(&mut array)?;
            let stats = array.stats();
            check_sorted(&mut array)?;
            Ok(stats)
        }
        Target::Window => {
            let (start, end) = window(values.len());
            let stats = {
                let mut view = SubArray::new(&mut array, start, end)?;
                (algorithm.sort)(&mut view)?;
                let stats = view.stats();
                check_sorted(&mut view)?;
                stats
            };

            let sorted = array.into_values();
            let outside = (0..start).chain(end..values.len());
            for index in outside {
                if sorted[index] != values[index] {
                    return Err(ValidationError::WindowViolated { index });
                }
            }
            Ok(stats)
        }
    }
}

/// Middle half of `[0, len)`
fn window(len: usize) -> (usize, usize) {
    let quarter = len / 4;
    (quarter, len - quarter)
}
