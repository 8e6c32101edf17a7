//! Off-thread execution of a single run
//!
//! A [`Run`] owns one worker thread. The worker builds a
//! [`RecordingArray`] over the producer half of a snapshot channel, runs the algorithm, emits
//! the two closing frames, and reports how it ended. The consumer drains the receiving half.
//!
//! Cancelling (or dropping) a run detaches the channel first, so the worker's next
//! `take_snapshot` fails with [`ArrayError::Detached`] and it unwinds, then joins the thread.

use crate::array::{RecordingArray, Value, VisualArray};
use crate::errors::{ArrayError, VisualizerError};
use crate::snapshot::channel::{self, RunMessage, SnapshotReceiver, SnapshotSender};
use crate::sorting::{self, Algorithm};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::RecvTimeoutError;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Deep recursion on adversarial inputs (quick sort on sorted data) needs headroom
const WORKER_STACK_SIZE: usize = 16 * 1024 * 1024;

static NEXT_RUN_ID: AtomicU64 = AtomicU64::new(1);

/// `[1, 2, ..., size]`
pub fn generate_array(size: usize) -> Vec<Value> {
    (1..=size as Value).collect()
}

/// Uniformly shuffled permutation of `1..=size`
pub fn generate_shuffled<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Vec<Value> {
    let mut values = generate_array(size);
    values.shuffle(rng);
    values
}

/// What the UI asks for when it wants a new run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRequest {
    pub algorithm: String,
    pub size: usize,
    /// Explicit input; `size` is ignored when present
    pub initial_values: Option<Vec<Value>>,
    /// Seed for the shuffle, for reproducible runs
    pub seed: Option<u64>,
}

impl RunRequest {
    pub fn new(algorithm: impl Into<String>, size: usize) -> Self {
        RunRequest {
            algorithm: algorithm.into(),
            size,
            initial_values: None,
            seed: None,
        }
    }

    pub fn with_values(mut self, values: Vec<Value>) -> Self {
        self.size = values.len();
        self.initial_values = Some(values);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// The input array this request describes
    pub fn resolve_values(&self) -> Vec<Value> {
        match (&self.initial_values, self.seed) {
            (Some(values), _) => values.clone(),
            (None, Some(seed)) => generate_shuffled(self.size, &mut StdRng::seed_from_u64(seed)),
            (None, None) => generate_shuffled(self.size, &mut rand::thread_rng()),
        }
    }
}

/// A sort executing on its own thread
pub struct Run {
    id: u64,
    algorithm: &'static Algorithm,
    initial_values: Vec<Value>,
    receiver: SnapshotReceiver,
    worker: Option<JoinHandle<()>>,
}

impl Run {
    /// Resolve the request and start the worker
    pub fn spawn(request: &RunRequest) -> Result<Run, VisualizerError> {
        let algorithm = sorting::find(&request.algorithm)
            .ok_or_else(|| VisualizerError::UnknownAlgorithm(request.algorithm.clone()))?;
        Run::spawn_with(algorithm, request.resolve_values())
    }

    /// Start a worker running `algorithm` over `initial_values`
    pub fn spawn_with(
        algorithm: &'static Algorithm,
        initial_values: Vec<Value>,
    ) -> Result<Run, VisualizerError> {
        let id = NEXT_RUN_ID.fetch_add(1, Ordering::Relaxed);
        let (sender, receiver) = channel::channel();

        let values = initial_values.clone();
        let worker = thread::Builder::new()
            .name(format!("sort-run-{}", id))
            .stack_size(WORKER_STACK_SIZE)
            .spawn(move || execute(id, algorithm, values, sender))
            .map_err(VisualizerError::WorkerSpawn)?;

        info!(
            run = id,
            algorithm = algorithm.name,
            size = initial_values.len(),
            "run started"
        );

        Ok(Run {
            id,
            algorithm,
            initial_values,
            receiver,
            worker: Some(worker),
        })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn algorithm(&self) -> &'static Algorithm {
        self.algorithm
    }

    pub fn initial_values(&self) -> &[Value] {
        &self.initial_values
    }

    /// Next message without blocking
    pub fn try_next(&self) -> Option<RunMessage> {
        self.receiver.try_recv()
    }

    /// Next message, waiting up to `timeout`
    pub fn next_timeout(&self, timeout: Duration) -> Result<RunMessage, RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }

    pub fn is_cancelled(&self) -> bool {
        self.receiver.is_detached()
    }

    /// Detach the channel and wait for the worker to wind down
    pub fn cancel(&mut self) {
        self.receiver.detach();
        if let Some(handle) = self.worker.take() {
            if handle.join().is_err() {
                warn!(run = self.id, "sort worker panicked");
            }
            debug!(run = self.id, "run cancelled");
        }
    }
}

impl Drop for Run {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Worker body
fn execute(id: u64, algorithm: &'static Algorithm, values: Vec<Value>, sender: SnapshotSender) {
    let mut array = RecordingArray::new(values, sender.clone());
    let outcome = (algorithm.sort)(&mut array).and_then(|()| array.finish());
    let stats = array.stats();

    // Terminal messages may fail to send if the consumer left; nothing to do then
    match outcome {
        Ok(()) => {
            debug!(run = id, ?stats, "run finished");
            let _ = sender.send(RunMessage::Finished { stats });
        }
        Err(ArrayError::Detached) => {
            debug!(run = id, "run superseded");
        }
        Err(e) => {
            warn!(run = id, algorithm = algorithm.name, error = %e, "run aborted");
            let _ = sender.send(RunMessage::Failed(e));
        }
    }
}
