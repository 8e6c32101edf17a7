//! Error types for the visualizer
//!
//! Errors are split by boundary:
//! - [`ArrayError`]: raised by array primitives while an algorithm runs. Fatal to that run.
//! - [`ValidationError`]: one algorithm failed headless validation. Other algorithms still run.
//! - [`VisualizerError`]: session and command-line level failures.

use std::io;
use std::time::Duration;
use thiserror::Error;

/// Errors raised through the array capability interface
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArrayError {
    /// Index outside `[0, len)`
    #[error("index {index} out of range for array of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// Subarray bounds that do not describe a range inside the parent
    #[error("invalid subarray range {start}..{end} for array of length {len}")]
    InvalidRange { start: usize, end: usize, len: usize },

    /// The consumer tore down the snapshot channel; the run has been superseded
    #[error("snapshot consumer detached")]
    Detached,
}

/// Per-algorithm validation failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Adjacent pair out of order after sorting
    #[error("values not sorted at index {index}: {left} > {right}")]
    NotSorted { index: usize, left: i64, right: i64 },

    /// Algorithm did not finish within its wall-clock budget
    #[error("did not finish within {budget:?}")]
    Timeout { budget: Duration },

    /// Algorithm stopped on an array error
    #[error("aborted: {0}")]
    Aborted(#[from] ArrayError),

    /// Sorting through a subarray view changed a value outside the view
    #[error("value outside the sorted window changed at index {index}")]
    WindowViolated { index: usize },

    /// Could not start the validation thread
    #[error("could not start validation worker: {0}")]
    WorkerSpawn(String),

    /// Worker thread panicked before reporting a result
    #[error("worker panicked")]
    Panicked,
}

/// Session and front-end errors
#[derive(Error, Debug)]
pub enum VisualizerError {
    /// No algorithm in the catalog has this name
    #[error("unknown algorithm '{0}'")]
    UnknownAlgorithm(String),

    /// Snapshot log is over its memory budget
    #[error("snapshot memory limit exceeded: {current} bytes used, limit is {limit}")]
    SnapshotLimitExceeded { current: usize, limit: usize },

    /// Could not start the worker thread for a run
    #[error("failed to spawn sort worker: {0}")]
    WorkerSpawn(#[source] io::Error),

    /// Array primitive failed during a run
    #[error("run aborted: {0}")]
    Array(#[from] ArrayError),

    /// Terminal or file I/O
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
