//! One-way snapshot channel between a sort worker and its consumer
//!
//! The producer pushes [`RunMessage`]s strictly in generation order over a bounded
//! `std::sync::mpsc::sync_channel`. A full queue blocks the producer until the consumer
//! catches up, so at most [`CHANNEL_CAPACITY`] frames are in flight outside the log.
//!
//! Teardown is driven by the consumer: [`SnapshotReceiver::detach`] (or dropping the receiver)
//! flips a shared flag and drains the queue, which wakes a producer blocked on a full queue.
//! After that every push on the producer side fails with [`ArrayError::Detached`] and nothing
//! more is handed to the consumer.

use super::{Snapshot, SnapshotSink};
use crate::array::Stats;
use crate::errors::ArrayError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError, TryRecvError};
use std::sync::Arc;
use std::time::Duration;

/// Messages flowing from a run to its consumer
#[derive(Debug, Clone, PartialEq)]
pub enum RunMessage {
    Snapshot(Snapshot),
    /// Algorithm returned normally
    Finished { stats: Stats },
    /// Algorithm stopped on an array error
    Failed(ArrayError),
}

/// Frames the producer may run ahead of the consumer
pub const CHANNEL_CAPACITY: usize = 256;

/// Create a connected sender/receiver pair
pub fn channel() -> (SnapshotSender, SnapshotReceiver) {
    channel_with_capacity(CHANNEL_CAPACITY)
}

/// Same as [`channel`] with an explicit queue bound
pub fn channel_with_capacity(capacity: usize) -> (SnapshotSender, SnapshotReceiver) {
    let (tx, rx) = mpsc::sync_channel(capacity);
    let detached = Arc::new(AtomicBool::new(false));
    (
        SnapshotSender {
            tx,
            detached: Arc::clone(&detached),
        },
        SnapshotReceiver { rx, detached },
    )
}

/// Producer half, owned by the worker's array
#[derive(Debug, Clone)]
pub struct SnapshotSender {
    tx: mpsc::SyncSender<RunMessage>,
    detached: Arc<AtomicBool>,
}

impl SnapshotSender {
    /// Blocks while the queue is full
    pub fn send(&self, message: RunMessage) -> Result<(), ArrayError> {
        if self.is_detached() {
            return Err(ArrayError::Detached);
        }
        self.tx.send(message).map_err(|_| {
            self.detached.store(true, Ordering::Release);
            ArrayError::Detached
        })
    }

    pub fn is_detached(&self) -> bool {
        self.detached.load(Ordering::Acquire)
    }
}

impl SnapshotSink for SnapshotSender {
    fn emit(&mut self, snapshot: Snapshot) -> Result<(), ArrayError> {
        self.send(RunMessage::Snapshot(snapshot))
    }
}

/// Consumer half
#[derive(Debug)]
pub struct SnapshotReceiver {
    rx: mpsc::Receiver<RunMessage>,
    detached: Arc<AtomicBool>,
}

impl SnapshotReceiver {
    /// Next queued message, if any. Always `None` after teardown.
    pub fn try_recv(&self) -> Option<RunMessage> {
        if self.is_detached() {
            return None;
        }
        match self.rx.try_recv() {
            Ok(message) => Some(message),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Block until a message arrives, the producer hangs up, or `timeout` passes
    pub fn recv_timeout(&self, timeout: Duration) -> Result<RunMessage, RecvTimeoutError> {
        if self.is_detached() {
            return Err(RecvTimeoutError::Disconnected);
        }
        self.rx.recv_timeout(timeout)
    }

    /// Tear down the channel; the producer's next push fails.
    ///
    /// Queued messages are discarded so a producer blocked on a full queue can return.
    pub fn detach(&self) {
        self.detached.store(true, Ordering::Release);
        while self.rx.try_recv().is_ok() {}
    }

    pub fn is_detached(&self) -> bool {
        self.detached.load(Ordering::Acquire)
    }
}

impl Drop for SnapshotReceiver {
    fn drop(&mut self) {
        self.detach();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::thread;

    fn frame(v: i64) -> Snapshot {
        Snapshot::initial(&[v])
    }

    #[test]
    fn test_messages_arrive_in_order() {
        let (mut tx, rx) = channel();
        for v in 0..5 {
            tx.emit(frame(v)).unwrap();
        }
        tx.send(RunMessage::Finished {
            stats: Stats::default(),
        })
        .unwrap();

        let mut seen = Vec::new();
        while let Some(message) = rx.try_recv() {
            match message {
                RunMessage::Snapshot(s) => seen.push(s.values()[0]),
                RunMessage::Finished { .. } => break,
                RunMessage::Failed(e) => panic!("unexpected failure: {}", e),
            }
        }
        assert_eq!(seen, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_detach_stops_producer_and_delivery() {
        let (mut tx, rx) = channel();
        tx.emit(frame(1)).unwrap();
        rx.detach();

        assert_eq!(tx.emit(frame(2)), Err(ArrayError::Detached));
        assert!(tx.is_detached());
        // Already-queued frames are not delivered after teardown either
        assert!(rx.try_recv().is_none());
    }

    #[test]
    fn test_full_queue_blocks_producer_until_teardown() {
        let (mut tx, rx) = channel_with_capacity(4);
        let sent = Arc::new(AtomicUsize::new(0));

        let producer = {
            let sent = Arc::clone(&sent);
            thread::spawn(move || {
                for v in 0..100 {
                    tx.emit(frame(v))?;
                    sent.fetch_add(1, Ordering::SeqCst);
                }
                Ok::<(), ArrayError>(())
            })
        };

        thread::sleep(Duration::from_millis(100));
        assert_eq!(sent.load(Ordering::SeqCst), 4);

        rx.detach();
        assert_eq!(producer.join().unwrap(), Err(ArrayError::Detached));
        assert!(sent.load(Ordering::SeqCst) <= 5);
    }

    #[test]
    fn test_dropping_receiver_detaches() {
        let (mut tx, rx) = channel();
        drop(rx);
        assert_eq!(tx.emit(frame(1)), Err(ArrayError::Detached));
    }
}
