//! Instrumented arrays
//!
//! Sorting algorithms never touch a `Vec` directly. They run against the [`VisualArray`]
//! capability trait, which counts every primitive in [`Stats`], tags indices with
//! highlights, and decides when a [`Snapshot`](crate::snapshot::Snapshot) is emitted.
//!
//! # Variants
//!
//! - [`recording::RecordingArray`]: full backing store that emits snapshots to a
//!   [`SnapshotSink`](crate::snapshot::SnapshotSink) (in-memory log or worker channel)
//! - [`headless::HeadlessArray`]: same primitives and stats, no highlighting or snapshots;
//!   used for validation
//! - [`view::SubArray`]: offset view into a parent array, used for recursion on partitions
//!
//! # Bounds
//!
//! Every index is checked against `[0, len)`. A violation is an
//! [`ArrayError::IndexOutOfRange`] and aborts the run; nothing is clamped.

pub mod headless;
pub mod highlight;
pub mod recording;
pub mod view;

use crate::errors::ArrayError;
use highlight::HighlightKind;
use std::cmp::Ordering;

pub use headless::HeadlessArray;
pub use recording::RecordingArray;
pub use view::SubArray;

/// Element type stored in visual arrays
pub type Value = i64;

/// Primitive operation counters for one run. Never decrease.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub reads: u64,
    pub swaps: u64,
    pub moves: u64,
    pub comparisons: u64,
}

impl Stats {
    pub fn total(&self) -> u64 {
        self.reads + self.swaps + self.moves + self.comparisons
    }

    /// Every counter is at least the matching counter in `earlier`
    pub fn dominates(&self, earlier: &Stats) -> bool {
        self.reads >= earlier.reads
            && self.swaps >= earlier.swaps
            && self.moves >= earlier.moves
            && self.comparisons >= earlier.comparisons
    }
}

/// Outcome of a comparison, negative/zero/positive like `a - b`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComparisonResult(Ordering);

impl ComparisonResult {
    pub fn of(first: Value, second: Value) -> Self {
        ComparisonResult(first.cmp(&second))
    }

    /// -1, 0 or 1
    pub fn signum(self) -> i32 {
        self.0 as i32
    }

    pub fn is_greater(self) -> bool {
        self.0 == Ordering::Greater
    }

    pub fn is_greater_or_equal(self) -> bool {
        self.0 != Ordering::Less
    }

    pub fn is_less(self) -> bool {
        self.0 == Ordering::Less
    }

    pub fn is_less_or_equal(self) -> bool {
        self.0 != Ordering::Greater
    }

    pub fn is_equal(self) -> bool {
        self.0 == Ordering::Equal
    }
}

/// The operations a sorting algorithm may perform on an array.
///
/// Object safe: algorithms take `&mut dyn VisualArray`, so the same code drives a
/// recording array, a headless array or a [`SubArray`] view.
pub trait VisualArray {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read one value. Counts a read.
    fn get(&mut self, index: usize) -> Result<Value, ArrayError>;

    /// Mark both indices as compared, read them, and compare. Counts a comparison.
    fn compare_indexes(&mut self, first: usize, second: usize)
        -> Result<ComparisonResult, ArrayError>;

    /// Compare two plain values. Counts a comparison.
    fn compare_values(&mut self, first: Value, second: Value) -> ComparisonResult;

    /// Exchange two values and mark both as moved. Counts a swap.
    fn swap(&mut self, first: usize, second: usize) -> Result<(), ArrayError>;

    /// Remove the value at `from` and reinsert it at `to`, shifting everything between.
    /// Marks `to` as moved. Counts a move.
    fn move_element(&mut self, from: usize, to: usize) -> Result<(), ArrayError>;

    /// Tag `index` unless a permanent tag already sits there
    fn mark(&mut self, index: usize, kind: HighlightKind, permanent: bool)
        -> Result<(), ArrayError>;

    /// Remove any tag at `index`
    fn unmark(&mut self, index: usize) -> Result<(), ArrayError>;

    /// Capture the current state, hand it to the sink, then drop temporary tags
    fn take_snapshot(&mut self) -> Result<(), ArrayError>;

    fn stats(&self) -> Stats;

    fn mark_index(&mut self, index: usize, permanent: bool) -> Result<(), ArrayError> {
        self.mark(index, HighlightKind::Index, permanent)
    }

    fn mark_comparison(
        &mut self,
        first: usize,
        second: usize,
        permanent: bool,
    ) -> Result<(), ArrayError> {
        self.mark(first, HighlightKind::Comparison, permanent)?;
        self.mark(second, HighlightKind::Comparison, permanent)
    }
}

pub(crate) fn check_index(index: usize, len: usize) -> Result<usize, ArrayError> {
    if index < len {
        Ok(index)
    } else {
        Err(ArrayError::IndexOutOfRange { index, len })
    }
}

/// List-splice move: take `values[from]` out and insert it at `to`
pub(crate) fn splice_move(values: &mut [Value], from: usize, to: usize) {
    if from < to {
        values[from..=to].rotate_left(1);
    } else if to < from {
        values[to..=from].rotate_right(1);
    }
}
