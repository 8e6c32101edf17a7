//! # Introduction
//!
//! sortty runs a sorting algorithm against an instrumented array, recording a
//! snapshot of the array and its highlighting after every comparison and swap.
//! The recording is then played back forward and backward, frame by frame or on
//! a timer, through a terminal UI built with [ratatui](https://docs.rs/ratatui).
//!
//! ## Pipeline
//!
//! ```text
//! Algorithm → VisualArray → Snapshots → Channel → Session (log + playback) → TUI
//! ```
//!
//! 1. [`sorting`]: the algorithm catalog. Algorithms only see the
//!    [`array::VisualArray`] capability trait, never a concrete array.
//! 2. [`array`]: the recording, headless and subarray implementations of that
//!    trait, plus [`array::highlight`] markers.
//! 3. [`snapshot`]: immutable [`snapshot::Snapshot`] captures, the memory-bounded
//!    [`snapshot::SnapshotLog`], and the cancellable producer/consumer channel.
//! 4. [`runner`]: runs one algorithm on a worker thread per request.
//! 5. [`playback`] and [`session`]: the consumer side, where the log is filled
//!    and walked.
//! 6. [`ui`]: ratatui-based TUI; not part of the stable library API.
//!
//! ## Algorithms
//!
//! Bubble, selection, insertion and quick sort (Lomuto partition, last element
//! as pivot). All are in-place and use only comparisons and swaps.

pub mod array;
pub mod config;
pub mod errors;
pub mod playback;
pub mod runner;
pub mod session;
pub mod snapshot;
pub mod sorting;
pub mod ui;
