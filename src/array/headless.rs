//! Headless array for validation runs
//!
//! Same bounds checks and stats as [`RecordingArray`](super::RecordingArray); highlighting
//! and snapshots are no-ops, so an algorithm runs at full speed.

use super::highlight::HighlightKind;
use super::{check_index, splice_move, ComparisonResult, Stats, Value, VisualArray};
use crate::errors::ArrayError;

#[derive(Debug, Clone)]
pub struct HeadlessArray {
    values: Vec<Value>,
    stats: Stats,
}

impl HeadlessArray {
    pub fn new(values: Vec<Value>) -> Self {
        HeadlessArray {
            values,
            stats: Stats::default(),
        }
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}

impl VisualArray for HeadlessArray {
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
        self.values.swap(first, second);
        Ok(())
    }

    fn move_element(&mut self, from: usize, to: usize) -> Result<(), ArrayError> {
        let from = check_index(from, self.values.len())?;
        let to = check_index(to, self.values.len())?;
        self.stats.moves += 1;
        splice_move(&mut self.values, from, to);
        Ok(())
    }

    fn mark(
        &mut self,
        index: usize,
        _kind: HighlightKind,
        _permanent: bool,
    ) -> Result<(), ArrayError> {
        check_index(index, self.values.len()).map(|_| ())
    }

    fn unmark(&mut self, index: usize) -> Result<(), ArrayError> {
        check_index(index, self.values.len()).map(|_| ())
    }

    fn take_snapshot(&mut self) -> Result<(), ArrayError> {
        Ok(())
    }

    fn stats(&self) -> Stats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headless_counts_but_does_not_record() {
        let mut arr = HeadlessArray::new(vec![4, 3, 2, 1]);
        arr.mark_comparison(0, 3, true).unwrap();
        arr.swap(0, 3).unwrap();
        arr.move_element(3, 1).unwrap();
        arr.take_snapshot().unwrap();

        assert_eq!(arr.values(), &[1, 4, 3, 2]);
        assert_eq!(arr.stats().swaps, 1);
        assert_eq!(arr.stats().moves, 1);
        assert_eq!(
            arr.mark_index(4, false),
            Err(ArrayError::IndexOutOfRange { index: 4, len: 4 })
        );
    }
}
