//! Offset views into a parent array
//!
//! A [`SubArray`] owns no memory. It holds a mutable borrow of its parent plus a
//! `[start, end)` window, bounds-checks against the window, adds `start`, and forwards.
//! Snapshots and stats always belong to the root array, so a view never has a log of its own.
//! Views can be nested; each level adds its own offset on the way down.

use super::highlight::HighlightKind;
use super::{check_index, ComparisonResult, Stats, Value, VisualArray};
use crate::errors::ArrayError;

pub struct SubArray<'a> {
    parent: &'a mut dyn VisualArray,
    start: usize,
    end: usize,
}

impl<'a> SubArray<'a> {
    /// View `parent[start..end]`
    pub fn new(
        parent: &'a mut dyn VisualArray,
        start: usize,
        end: usize,
    ) -> Result<Self, ArrayError> {
        let len = parent.len();
        if start > end || end > len {
            return Err(ArrayError::InvalidRange { start, end, len });
        }
        Ok(SubArray { parent, start, end })
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    fn parent_index(&self, index: usize) -> Result<usize, ArrayError> {
        check_index(index, self.len()).map(|i| self.start + i)
    }
}

impl VisualArray for SubArray<'_> {
    fn len(&self) -> usize {
        self.end - self.start
    }

    fn get(&mut self, index: usize) -> Result<Value, ArrayError> {
        let index = self.parent_index(index)?;
        self.parent.get(index)
    }

    fn compare_indexes(
        &mut self,
        first: usize,
        second: usize,
    ) -> Result<ComparisonResult, ArrayError> {
        let first = self.parent_index(first)?;
        let second = self.parent_index(second)?;
        self.parent.compare_indexes(first, second)
    }

    fn compare_values(&mut self, first: Value, second: Value) -> ComparisonResult {
        self.parent.compare_values(first, second)
    }

    fn swap(&mut self, first: usize, second: usize) -> Result<(), ArrayError> {
        let first = self.parent_index(first)?;
        let second = self.parent_index(second)?;
        self.parent.swap(first, second)
    }

    fn move_element(&mut self, from: usize, to: usize) -> Result<(), ArrayError> {
        let from = self.parent_index(from)?;
        let to = self.parent_index(to)?;
        self.parent.move_element(from, to)
    }

    fn mark(
        &mut self,
        index: usize,
        kind: HighlightKind,
        permanent: bool,
    ) -> Result<(), ArrayError> {
        let index = self.parent_index(index)?;
        self.parent.mark(index, kind, permanent)
    }

    fn unmark(&mut self, index: usize) -> Result<(), ArrayError> {
        let index = self.parent_index(index)?;
        self.parent.unmark(index)
    }

    fn take_snapshot(&mut self) -> Result<(), ArrayError> {
        self.parent.take_snapshot()
    }

    fn stats(&self) -> Stats {
        self.parent.stats()
    }
}
