//! Recording array: the full backing-store variant
//!
//! Owns the values, the live highlighting and the stats. Snapshots go to a
//! [`SnapshotSink`]: an in-memory [`SnapshotLog`] for synchronous runs, or a
//! [`SnapshotSender`](crate::snapshot::channel::SnapshotSender) when sorting on a worker.
//! The live highlighting is never exposed; renderers read the copy inside each snapshot.

use super::highlight::{HighlightKind, Highlighting};
use super::{check_index, splice_move, ComparisonResult, Stats, Value, VisualArray};
use crate::errors::ArrayError;
use crate::snapshot::{Snapshot, SnapshotLog, SnapshotSink};

pub struct RecordingArray<S: SnapshotSink = SnapshotLog> {
    values: Vec<Value>,
    highlighting: Highlighting,
    stats: Stats,
    sink: S,
}

impl<S: SnapshotSink> RecordingArray<S> {
    pub fn new(values: Vec<Value>, sink: S) -> Self {
        RecordingArray {
            values,
            highlighting: Highlighting::new(),
            stats: Stats::default(),
            sink,
        }
    }

    /// Read-only view of the current values; does not count as a read
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Capture without emitting or decaying highlights
    pub fn capture(&self) -> Snapshot {
        Snapshot::new(self.values.clone(), self.highlighting.clone(), self.stats)
    }

    /// Drop every tag, permanent ones included
    pub fn clear_highlighting(&mut self) {
        self.highlighting.clear();
    }

    /// Emit the two closing frames of a run: the last highlighted state, then a clean one
    pub fn finish(&mut self) -> Result<(), ArrayError> {
        self.take_snapshot()?;
        self.clear_highlighting();
        self.take_snapshot()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}

impl RecordingArray<SnapshotLog> {
    /// Record into an unbounded in-memory log
    pub fn with_log(values: Vec<Value>) -> Self {
        RecordingArray::new(values, SnapshotLog::unbounded())
    }
}

impl<S: SnapshotSink> VisualArray for RecordingArray<S> {
    fn len(&self) -> usize {
        self.values.len()
    }

    fn get(&mut self, index: usize) -> Result<Value, ArrayError> {
        let index = check_index(index, self.values.len())?;
        self.stats.reads += 1;
        Ok(self.values[index])
    }

    fn compare_indexes(
        &mut self,
        first: usize,
        second: usize,
    ) -> Result<ComparisonResult, ArrayError> {
        check_index(first, self.values.len())?;
        check_index(second, self.values.len())?;
        self.mark_comparison(first, second, false)?;
        let a = self.get(first)?;
        let b = self.get(second)?;
        Ok(self.compare_values(a, b))
    }

    fn compare_values(&mut self, first: Value, second: Value) -> ComparisonResult {
        self.stats.comparisons += 1;
        ComparisonResult::of(first, second)
    }

    fn swap(&mut self, first: usize, second: usize) -> Result<(), ArrayError> {
        let first = check_index(first, self.values.len())?;
        let second = check_index(second, self.values.len())?;
        self.stats.swaps += 1;
        self.highlighting.mark(first, HighlightKind::Move, false);
        self.highlighting.mark(second, HighlightKind::Move, false);
        self.values.swap(first, second);
        Ok(())
    }

    fn move_element(&mut self, from: usize, to: usize) -> Result<(), ArrayError> {
        let from = check_index(from, self.values.len())?;
        let to = check_index(to, self.values.len())?;
        self.stats.moves += 1;
        self.highlighting.mark(to, HighlightKind::Move, false);
        splice_move(&mut self.values, from, to);
        Ok(())
    }

    fn mark(
        &mut self,
        index: usize,
        kind: HighlightKind,
        permanent: bool,
    ) -> Result<(), ArrayError> {
        let index = check_index(index, self.values.len())?;
        self.highlighting.mark(index, kind, permanent);
        Ok(())
    }

    fn unmark(&mut self, index: usize) -> Result<(), ArrayError> {
        let index = check_index(index, self.values.len())?;
        self.highlighting.unmark(index);
        Ok(())
    }

    fn take_snapshot(&mut self) -> Result<(), ArrayError> {
        let snapshot = self.capture();
        self.highlighting.decay();
        self.sink.emit(snapshot)
    }

    fn stats(&self) -> Stats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array::highlight::HighlightTag;

    #[test]
    fn test_primitives_update_stats() {
        let mut arr = RecordingArray::with_log(vec![3, 1, 2]);
        assert_eq!(arr.get(0), Ok(3));
        assert!(arr.compare_indexes(0, 1).unwrap().is_greater());
        arr.swap(0, 1).unwrap();
        arr.move_element(0, 2).unwrap();

        assert_eq!(
            arr.stats(),
            Stats {
                reads: 3,
                swaps: 1,
                moves: 1,
                comparisons: 1,
            }
        );
        assert_eq!(arr.values(), &[3, 2, 1]);
    }

    #[test]
    fn test_out_of_range_is_rejected() {
        let mut arr = RecordingArray::with_log(vec![1, 2]);
        let err = ArrayError::IndexOutOfRange { index: 2, len: 2 };
        assert_eq!(arr.get(2), Err(err.clone()));
        assert_eq!(arr.swap(0, 2), Err(err.clone()));
        assert_eq!(arr.move_element(2, 0), Err(err.clone()));
        assert_eq!(arr.compare_indexes(2, 0).unwrap_err(), err.clone());
        assert_eq!(arr.mark(2, HighlightKind::Index, false), Err(err.clone()));
        assert_eq!(arr.unmark(2), Err(err));
        // Failed calls leave the array untouched
        assert_eq!(arr.stats(), Stats::default());
        assert_eq!(arr.values(), &[1, 2]);
    }

    #[test]
    fn test_snapshot_is_independent_of_later_mutation() {
        let mut arr = RecordingArray::with_log(vec![2, 1]);
        arr.mark(0, HighlightKind::Index, true).unwrap();
        arr.take_snapshot().unwrap();
        arr.swap(0, 1).unwrap();
        arr.unmark(0).unwrap();
        arr.mark(1, HighlightKind::Comparison, false).unwrap();

        let log = arr.into_sink();
        let first = log.get(0).unwrap();
        assert_eq!(first.values(), &[2, 1]);
        assert_eq!(
            first.highlighting().get(0),
            Some(HighlightTag::new(HighlightKind::Index, true))
        );
        assert_eq!(first.highlighting().get(1), None);
    }

    #[test]
    fn test_temporary_highlight_decays_after_one_snapshot() {
        let mut arr = RecordingArray::with_log(vec![1, 2, 3]);
        arr.compare_indexes(0, 1).unwrap();
        arr.mark_index(2, true).unwrap();
        arr.take_snapshot().unwrap();
        arr.take_snapshot().unwrap();

        let log = arr.into_sink();
        let first = log.get(0).unwrap().highlighting();
        assert_eq!(first.kind_at(0), HighlightKind::Comparison);
        assert_eq!(first.kind_at(1), HighlightKind::Comparison);
        assert_eq!(first.kind_at(2), HighlightKind::Index);

        let second = log.get(1).unwrap().highlighting();
        assert_eq!(second.get(0), None);
        assert_eq!(second.get(1), None);
        assert_eq!(second.kind_at(2), HighlightKind::Index);
    }

    #[test]
    fn test_swap_does_not_override_permanent_mark() {
        let mut arr = RecordingArray::with_log(vec![2, 1]);
        arr.mark_index(1, true).unwrap();
        arr.swap(0, 1).unwrap();
        let snapshot = arr.capture();
        assert_eq!(snapshot.highlighting().kind_at(0), HighlightKind::Move);
        assert_eq!(snapshot.highlighting().kind_at(1), HighlightKind::Index);
    }

    #[test]
    fn test_finish_emits_highlighted_then_clean_frame() {
        let mut arr = RecordingArray::with_log(vec![1, 2]);
        arr.mark_index(0, true).unwrap();
        arr.swap(0, 1).unwrap();
        arr.finish().unwrap();

        let log = arr.into_sink();
        assert_eq!(log.len(), 2);
        assert_eq!(log.get(0).unwrap().highlighting().len(), 2);
        assert!(log.get(1).unwrap().highlighting().is_empty());
        assert_eq!(log.get(0).unwrap().values(), log.get(1).unwrap().values());
    }

    #[test]
    fn test_snapshot_carries_stats() {
        let mut arr = RecordingArray::with_log(vec![1, 2]);
        arr.take_snapshot().unwrap();
        arr.compare_indexes(0, 1).unwrap();
        arr.take_snapshot().unwrap();
        let log = arr.into_sink();
        assert_eq!(log.get(0).unwrap().stats().comparisons, 0);
        assert_eq!(log.get(1).unwrap().stats().comparisons, 1);
        assert_eq!(log.get(1).unwrap().stats().reads, 2);
    }
}
