//! Consumer side of a visualization
//!
//! A [`Session`] owns at most one live [`Run`], the [`SnapshotLog`] being filled from it, and
//! the [`PlaybackController`] walking that log. Starting a new run always tears the previous
//! one down first, so frames from a superseded run never reach the new log.
//!
//! Frame 0 of every log is the unhighlighted initial array, added here rather than by the
//! worker; the worker streams the algorithm's frames and the two closing frames after it.

use crate::array::{Stats, Value};
use crate::config::{self, Config};
use crate::errors::{ArrayError, VisualizerError};
use crate::playback::{PlaybackCommand, PlaybackController, PlaybackStatus};
use crate::runner::{Run, RunRequest};
use crate::snapshot::channel::RunMessage;
use crate::snapshot::{Snapshot, SnapshotLog};
use crate::sorting::{self, Algorithm};
use std::sync::mpsc::RecvTimeoutError;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Messages drained per [`Session::pump`] call
pub const PUMP_BUDGET: usize = 4096;

/// What the producer side is doing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunState {
    /// Frames are still arriving
    Recording,
    /// Algorithm returned and the closing frames are in the log
    Finished(Stats),
    /// Algorithm stopped on an array error; the log holds what was recorded before it
    Failed(ArrayError),
    /// Snapshot budget ran out and the run was cancelled
    Truncated,
}

impl RunState {
    pub fn is_recording(&self) -> bool {
        matches!(self, RunState::Recording)
    }
}

pub struct Session {
    algorithm_index: usize,
    size: usize,
    snapshot_limit: usize,
    run: Option<Run>,
    log: SnapshotLog,
    controller: PlaybackController,
    state: RunState,
}

impl Session {
    /// Start the run described by `config`
    pub fn new(config: &Config) -> Result<Session, VisualizerError> {
        let algorithm_index = sorting::position(&config.algorithm)
            .ok_or_else(|| VisualizerError::UnknownAlgorithm(config.algorithm.clone()))?;

        let mut session = Session {
            algorithm_index,
            size: config.size,
            snapshot_limit: config.snapshot_limit,
            run: None,
            log: SnapshotLog::new(config.snapshot_limit),
            controller: PlaybackController::new(config.delay),
            state: RunState::Recording,
        };
        session.start(config.run_request())?;
        Ok(session)
    }

    /// Replace the current run with a fresh one.
    ///
    /// The current run and its log are left alone if the new run cannot be started.
    pub fn start(&mut self, request: RunRequest) -> Result<(), VisualizerError> {
        let run = Run::spawn(&request)?;
        self.start_run(run)
    }

    /// Make an already spawned run the current one
    pub(crate) fn start_run(&mut self, run: Run) -> Result<(), VisualizerError> {
        if let Some(mut old) = self.run.take() {
            old.cancel();
        }

        self.algorithm_index = sorting::position(run.algorithm().name).unwrap_or(0);
        self.size = run.initial_values().len();
        self.log = SnapshotLog::new(self.snapshot_limit);
        self.controller.reset();
        self.state = RunState::Recording;

        let initial = Snapshot::initial(run.initial_values());
        self.run = Some(run);
        self.record(initial)
    }

    /// Move queued frames from the run into the log. Returns how many were added.
    ///
    /// Takes at most [`PUMP_BUDGET`] messages per call so a fast producer cannot keep the
    /// caller here indefinitely.
    pub fn pump(&mut self) -> Result<usize, VisualizerError> {
        let mut added = 0;
        for _ in 0..PUMP_BUDGET {
            let Some(message) = self.run.as_ref().and_then(Run::try_next) else {
                break;
            };
            if self.handle(message)? {
                added += 1;
            }
        }
        Ok(added)
    }

    /// Block until the run ends or `timeout` passes. Returns whether it ended.
    pub fn run_to_completion(&mut self, timeout: Duration) -> Result<bool, VisualizerError> {
        let deadline = Instant::now() + timeout;

        while self.state.is_recording() {
            let Some(run) = self.run.as_ref() else {
                break;
            };
            let remaining = deadline.saturating_duration_since(Instant::now());
            match run.next_timeout(remaining) {
                Ok(message) => {
                    self.handle(message)?;
                }
                Err(RecvTimeoutError::Timeout) => return Ok(false),
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        Ok(!self.state.is_recording())
    }

    pub fn command(&mut self, command: PlaybackCommand, now: Instant) -> Option<PlaybackStatus> {
        self.controller.apply(command, now, self.log.len())
    }

    /// Drive auto-advance; call once per event-loop iteration
    pub fn tick(&mut self, now: Instant) -> Option<PlaybackStatus> {
        self.controller.tick(now, self.log.len())
    }

    pub fn set_delay(&mut self, delay: Duration, now: Instant) {
        self.controller.set_delay(delay, now);
    }

    /// Run the algorithm `offset` places away in the catalog on the same input
    pub fn cycle_algorithm(&mut self, offset: isize) -> Result<(), VisualizerError> {
        let next = sorting::cycle(self.algorithm_index, offset);
        let request = RunRequest::new(sorting::CATALOG[next].name, self.size)
            .with_values(self.initial_values().to_vec());
        self.start(request)
    }

    /// Same algorithm on a newly shuffled array
    pub fn reshuffle(&mut self) -> Result<(), VisualizerError> {
        self.start(RunRequest::new(self.algorithm().name, self.size))
    }

    /// Shuffled array of a different size, clamped to the allowed range
    pub fn resize(&mut self, size: usize) -> Result<(), VisualizerError> {
        let size = size.clamp(config::MIN_SIZE, config::MAX_SIZE);
        self.start(RunRequest::new(self.algorithm().name, size))
    }

    /// Frame under the playback cursor
    pub fn current(&self) -> Option<&Snapshot> {
        self.log.get(self.controller.current_index())
    }

    pub fn status(&self) -> PlaybackStatus {
        self.controller.status(self.log.len())
    }

    pub fn log(&self) -> &SnapshotLog {
        &self.log
    }

    pub fn controller(&self) -> &PlaybackController {
        &self.controller
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn algorithm(&self) -> &'static Algorithm {
        &sorting::CATALOG[self.algorithm_index]
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn initial_values(&self) -> &[Value] {
        self.log.get(0).map(Snapshot::values).unwrap_or(&[])
    }

    /// Returns whether a frame was added
    fn handle(&mut self, message: RunMessage) -> Result<bool, VisualizerError> {
        match message {
            RunMessage::Snapshot(snapshot) => {
                self.record(snapshot)?;
                Ok(true)
            }
            RunMessage::Finished { stats } => {
                info!(
                    algorithm = self.algorithm().name,
                    frames = self.log.len(),
                    comparisons = stats.comparisons,
                    swaps = stats.swaps,
                    "recording complete"
                );
                self.state = RunState::Finished(stats);
                self.run = None;
                Ok(false)
            }
            RunMessage::Failed(e) => {
                self.state = RunState::Failed(e.clone());
                self.run = None;
                Err(VisualizerError::Array(e))
            }
        }
    }

    fn record(&mut self, snapshot: Snapshot) -> Result<(), VisualizerError> {
        if let Err(e) = self.log.push(snapshot) {
            warn!(
                frames = self.log.len(),
                bytes = self.log.memory_usage(),
                "snapshot limit reached, recording truncated"
            );
            self.state = RunState::Truncated;
            if let Some(mut run) = self.run.take() {
                run.cancel();
                debug!(run = run.id(), "run stopped at snapshot limit");
            }
            return Err(e);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array::VisualArray;

    const WAIT: Duration = Duration::from_secs(10);

    fn config(algorithm: &str, values: Vec<Value>) -> Config {
        Config {
            algorithm: algorithm.to_string(),
            initial_values: Some(values),
            ..Config::default()
        }
    }

    #[test]
    fn test_log_starts_with_initial_frame() {
        let mut session = Session::new(&config("Bubble Sort", vec![3, 1, 2])).unwrap();
        assert!(session.run_to_completion(WAIT).unwrap());

        // initial + 5 algorithm frames + 2 closing frames
        assert_eq!(session.log().len(), 8);
        let first = session.log().get(0).unwrap();
        assert_eq!(first.values(), &[3, 1, 2]);
        assert!(first.highlighting().is_empty());
        assert_eq!(first.stats(), Stats::default());
        assert!(session.log().last().unwrap().is_sorted());
        assert!(matches!(session.state(), RunState::Finished(stats) if stats.swaps == 2));
    }

    #[test]
    fn test_unknown_algorithm_is_rejected() {
        let err = Session::new(&config("Bogo Sort", vec![1])).err().unwrap();
        assert!(matches!(err, VisualizerError::UnknownAlgorithm(_)));
    }

    #[test]
    fn test_new_run_replaces_log() {
        let mut session = Session::new(&Config {
            size: 300,
            seed: Some(5),
            ..Config::default()
        })
        .unwrap();
        session
            .start(RunRequest::new("Insertion Sort", 3).with_values(vec![2, 1, 3]))
            .unwrap();
        assert!(session.run_to_completion(WAIT).unwrap());

        assert_eq!(session.algorithm().name, "Insertion Sort");
        assert_eq!(session.initial_values(), &[2, 1, 3]);
        for snapshot in session.log().iter() {
            assert_eq!(snapshot.len(), 3);
        }
    }

    #[test]
    fn test_cycle_keeps_input() {
        let mut session = Session::new(&config("Bubble Sort", vec![5, 4, 3, 2, 1])).unwrap();
        session.cycle_algorithm(-1).unwrap();
        assert_eq!(session.algorithm().name, "Quick Sort");
        assert_eq!(session.initial_values(), &[5, 4, 3, 2, 1]);
        assert!(session.run_to_completion(WAIT).unwrap());
        assert_eq!(session.log().last().unwrap().values(), &[1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_snapshot_limit_truncates() {
        let values: Vec<Value> = (0..50).rev().collect();
        let budget = Snapshot::initial(&values).estimated_size() * 10;
        let mut session = Session::new(&Config {
            snapshot_limit: budget,
            ..config("Bubble Sort", values)
        })
        .unwrap();

        let err = session.run_to_completion(WAIT).unwrap_err();
        assert!(matches!(err, VisualizerError::SnapshotLimitExceeded { .. }));
        assert_eq!(session.state(), &RunState::Truncated);
        assert!(session.log().len() <= 10);
        assert_eq!(session.pump().unwrap(), 0);
    }

    #[test]
    fn test_playback_over_log() {
        let mut session = Session::new(&config("Selection Sort", vec![2, 1])).unwrap();
        session.run_to_completion(WAIT).unwrap();
        let now = Instant::now();

        assert_eq!(session.command(PlaybackCommand::StepBackward, now), None);
        let end = session.command(PlaybackCommand::JumpToEnd, now).unwrap();
        assert_eq!(end.current_index, session.log().len() - 1);
        assert_eq!(session.current().unwrap().values(), &[1, 2]);
        assert_eq!(session.command(PlaybackCommand::StepForward, now), None);
    }

    #[test]
    fn test_failed_start_keeps_current_run() {
        let mut session = Session::new(&Config {
            size: 1000,
            seed: Some(2),
            ..Config::default()
        })
        .unwrap();

        let err = session.start(RunRequest::new("Bogo Sort", 4)).unwrap_err();
        assert!(matches!(err, VisualizerError::UnknownAlgorithm(_)));

        // The bubble run is still live and keeps filling the log
        assert_eq!(session.algorithm().name, "Bubble Sort");
        assert_eq!(session.initial_values().len(), 1000);
        assert!(session.state().is_recording());
        let mut added = 0;
        while added == 0 {
            added = session.pump().unwrap();
        }
        assert!(session.log().len() > 1);
    }

    fn swap_then_overrun(arr: &mut dyn VisualArray) -> Result<(), ArrayError> {
        arr.swap(0, 1)?;
        arr.take_snapshot()?;
        let len = arr.len();
        arr.get(len).map(|_| ())
    }

    static OVERRUN: Algorithm = Algorithm {
        name: "Overrun",
        description: "reads one past the end",
        sort: swap_then_overrun,
    };

    #[test]
    fn test_array_error_fails_run() {
        let mut session = Session::new(&config("Bubble Sort", vec![1, 2])).unwrap();
        let run = Run::spawn_with(&OVERRUN, vec![2, 1, 3]).unwrap();
        session.start_run(run).unwrap();

        let err = session.run_to_completion(WAIT).unwrap_err();
        let expected = ArrayError::IndexOutOfRange { index: 3, len: 3 };
        assert!(matches!(&err, VisualizerError::Array(e) if *e == expected));
        assert_eq!(session.state(), &RunState::Failed(expected));

        // Initial frame plus the one recorded before the error
        assert_eq!(session.log().len(), 2);
        assert_eq!(session.log().last().unwrap().values(), &[1, 2, 3]);
        assert_eq!(session.pump().unwrap(), 0);
    }

    #[test]
    fn test_resize_clamps() {
        let mut session = Session::new(&config("Quick Sort", vec![1, 2])).unwrap();
        session.resize(1).unwrap();
        assert_eq!(session.size(), config::MIN_SIZE);
        assert_eq!(session.initial_values().len(), config::MIN_SIZE);
    }
}
