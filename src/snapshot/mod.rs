// Snapshot capture and history for step-by-step playback

pub mod channel;

use crate::array::highlight::Highlighting;
use crate::array::{Stats, Value};
use crate::errors::{ArrayError, VisualizerError};

/// Immutable capture of the array at one instant.
///
/// Values and highlighting are deep copies; later mutation of the live array never
/// reaches an existing snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    values: Vec<Value>,
    highlighting: Highlighting,
    stats: Stats,
}

impl Snapshot {
    pub fn new(values: Vec<Value>, highlighting: Highlighting, stats: Stats) -> Self {
        Snapshot {
            values,
            highlighting,
            stats,
        }
    }

    /// Unhighlighted capture of `values` with zeroed stats
    pub fn initial(values: &[Value]) -> Self {
        Snapshot::new(values.to_vec(), Highlighting::new(), Stats::default())
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn highlighting(&self) -> &Highlighting {
        &self.highlighting
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Non-decreasing values
    pub fn is_sorted(&self) -> bool {
        self.values.windows(2).all(|pair| pair[0] <= pair[1])
    }

    /// Estimate the memory usage of this snapshot in bytes
    pub fn estimated_size(&self) -> usize {
        std::mem::size_of::<Snapshot>()
            + self.values.len() * std::mem::size_of::<Value>()
            + self.highlighting.estimated_size()
    }
}

/// Destination for snapshots taken by an array.
///
/// Returning [`ArrayError::Detached`] tells the producer that nobody is listening any more;
/// algorithms propagate it with `?` and stop.
pub trait SnapshotSink {
    fn emit(&mut self, snapshot: Snapshot) -> Result<(), ArrayError>;
}

/// Ordered, append-only snapshot history with a memory budget
#[derive(Debug, Clone)]
pub struct SnapshotLog {
    snapshots: Vec<Snapshot>,
    max_memory: usize,
    current_memory: usize,
}

impl SnapshotLog {
    pub fn new(max_memory: usize) -> Self {
        SnapshotLog {
            snapshots: Vec::new(),
            max_memory,
            current_memory: 0,
        }
    }

    pub fn unbounded() -> Self {
        SnapshotLog::new(usize::MAX)
    }

    /// Add a snapshot to history
    pub fn push(&mut self, snapshot: Snapshot) -> Result<(), VisualizerError> {
        let snapshot_size = snapshot.estimated_size();

        if self.current_memory.saturating_add(snapshot_size) > self.max_memory {
            return Err(VisualizerError::SnapshotLimitExceeded {
                current: self.current_memory,
                limit: self.max_memory,
            });
        }

        self.current_memory += snapshot_size;
        self.snapshots.push(snapshot);
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<&Snapshot> {
        self.snapshots.get(index)
    }

    pub fn last(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Snapshot> {
        self.snapshots.iter()
    }

    pub fn memory_usage(&self) -> usize {
        self.current_memory
    }

    pub fn memory_limit(&self) -> usize {
        self.max_memory
    }
}

impl Default for SnapshotLog {
    fn default() -> Self {
        Self::unbounded()
    }
}

/// Synchronous recording: once the budget is spent the log detaches and the run stops.
impl SnapshotSink for SnapshotLog {
    fn emit(&mut self, snapshot: Snapshot) -> Result<(), ArrayError> {
        self.push(snapshot).map_err(|_| ArrayError::Detached)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array::highlight::HighlightKind;

    #[test]
    fn test_log_enforces_memory_limit() {
        let snapshot = Snapshot::initial(&[1, 2, 3, 4]);
        let size = snapshot.estimated_size();
        let mut log = SnapshotLog::new(size * 2);

        assert!(log.push(snapshot.clone()).is_ok());
        assert!(log.push(snapshot.clone()).is_ok());
        let err = log.push(snapshot).unwrap_err();
        assert!(matches!(
            err,
            VisualizerError::SnapshotLimitExceeded { current, limit } if current == size * 2 && limit == size * 2
        ));
        assert_eq!(log.len(), 2);
        assert_eq!(log.memory_usage(), size * 2);
        assert_eq!(log.memory_limit(), size * 2);
    }

    #[test]
    fn test_log_as_sink_detaches_when_full() {
        let mut log = SnapshotLog::new(0);
        assert_eq!(
            log.emit(Snapshot::initial(&[1])),
            Err(ArrayError::Detached)
        );
        assert!(log.is_empty());
    }

    #[test]
    fn test_is_sorted() {
        assert!(Snapshot::initial(&[]).is_sorted());
        assert!(Snapshot::initial(&[1, 1, 2]).is_sorted());
        assert!(!Snapshot::initial(&[2, 1]).is_sorted());
    }

    #[test]
    fn test_highlighting_is_counted_in_size() {
        let plain = Snapshot::initial(&[1, 2]);
        let mut h = Highlighting::new();
        h.mark(0, HighlightKind::Move, false);
        let marked = Snapshot::new(vec![1, 2], h, Stats::default());
        assert!(marked.estimated_size() > plain.estimated_size());
    }
}
