//! Playback controller for a recorded snapshot log
//!
//! A single-threaded state machine with three states: [`PlaybackState::Stopped`],
//! [`PlaybackState::PlayingForward`] and [`PlaybackState::PlayingBackward`]. Auto-advance is
//! driven by a [`RepeatingTimer`] that the event loop polls through [`PlaybackController::tick`].
//!
//! The controller never sees the log itself, only its length, passed in on every call. The
//! log may still be growing while playing; each call is bounded by the frames available at
//! that moment.
//!
//! Hitting either end is not an error: a step reports [`StepOutcome::AtBoundary`], and
//! auto-advance stops once it runs into the end it is heading for.

pub mod timer;

use std::time::{Duration, Instant};
use timer::RepeatingTimer;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Stopped,
    PlayingForward,
    PlayingBackward,
}

impl PlaybackState {
    fn delta(self) -> isize {
        match self {
            PlaybackState::Stopped => 0,
            PlaybackState::PlayingForward => 1,
            PlaybackState::PlayingBackward => -1,
        }
    }
}

/// Sent to the consumer on every index change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackStatus {
    pub current_index: usize,
    pub total_frames: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Moved(PlaybackStatus),
    /// The move would have left `[0, total_frames - 1]`; nothing changed
    AtBoundary,
}

/// Transport commands accepted from the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackCommand {
    Play,
    Rewind,
    Pause,
    StepForward,
    StepBackward,
    JumpToStart,
    JumpToEnd,
}

#[derive(Debug, Clone)]
pub struct PlaybackController {
    current_index: usize,
    state: PlaybackState,
    delay: Duration,
    timer: RepeatingTimer,
}

impl PlaybackController {
    pub fn new(delay: Duration) -> Self {
        PlaybackController {
            current_index: 0,
            state: PlaybackState::Stopped,
            delay,
            timer: RepeatingTimer::new(),
        }
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state != PlaybackState::Stopped
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn timer(&self) -> &RepeatingTimer {
        &self.timer
    }

    /// Auto-advance forward every `delay`
    pub fn play(&mut self, now: Instant) {
        self.start(PlaybackState::PlayingForward, now);
    }

    /// Auto-advance backward every `delay`
    pub fn rewind(&mut self, now: Instant) {
        self.start(PlaybackState::PlayingBackward, now);
    }

    pub fn pause(&mut self) {
        self.timer.cancel();
        if self.state != PlaybackState::Stopped {
            debug!(index = self.current_index, "playback stopped");
        }
        self.state = PlaybackState::Stopped;
    }

    /// Move by `delta` frames. Auto-advance only stops when the boundary hit lies in the
    /// direction it is playing.
    pub fn step(&mut self, delta: isize, total_frames: usize) -> StepOutcome {
        match self.offset(delta, total_frames) {
            Some(index) => {
                self.current_index = index;
                StepOutcome::Moved(self.status(total_frames))
            }
            None => {
                if self.state.delta().signum() == delta.signum() {
                    self.pause();
                }
                StepOutcome::AtBoundary
            }
        }
    }

    /// Jump to `index` and stop auto-advance
    pub fn seek(&mut self, index: usize, total_frames: usize) -> StepOutcome {
        self.pause();
        if index >= total_frames || index == self.current_index {
            return StepOutcome::AtBoundary;
        }
        self.current_index = index;
        StepOutcome::Moved(self.status(total_frames))
    }

    /// Run the ticks that are due at `now`. Returns the status after the last index change.
    pub fn tick(&mut self, now: Instant, total_frames: usize) -> Option<PlaybackStatus> {
        let due = self.timer.poll(now);
        let mut last = None;

        for _ in 0..due {
            match self.step(self.state.delta(), total_frames) {
                StepOutcome::Moved(status) => last = Some(status),
                StepOutcome::AtBoundary => break,
            }
        }
        last
    }

    /// Change the cadence; a running timer is rescheduled at the new interval
    pub fn set_delay(&mut self, delay: Duration, now: Instant) {
        self.delay = delay;
        if self.is_playing() {
            self.timer.start(delay, now);
        }
    }

    /// Back to frame 0, stopped. Used when a new run replaces the log.
    pub fn reset(&mut self) {
        self.pause();
        self.current_index = 0;
    }

    pub fn status(&self, total_frames: usize) -> PlaybackStatus {
        PlaybackStatus {
            current_index: self.current_index,
            total_frames,
        }
    }

    /// Apply a transport command
    pub fn apply(
        &mut self,
        command: PlaybackCommand,
        now: Instant,
        total_frames: usize,
    ) -> Option<PlaybackStatus> {
        match command {
            PlaybackCommand::Play => {
                self.play(now);
                None
            }
            PlaybackCommand::Rewind => {
                self.rewind(now);
                None
            }
            PlaybackCommand::Pause => {
                self.pause();
                None
            }
            PlaybackCommand::StepForward => moved(self.step(1, total_frames)),
            PlaybackCommand::StepBackward => moved(self.step(-1, total_frames)),
            PlaybackCommand::JumpToStart => moved(self.seek(0, total_frames)),
            PlaybackCommand::JumpToEnd => {
                moved(self.seek(total_frames.saturating_sub(1), total_frames))
            }
        }
    }

    fn start(&mut self, state: PlaybackState, now: Instant) {
        self.timer.cancel();
        self.state = state;
        self.timer.start(self.delay, now);
        debug!(?state, delay = ?self.delay, index = self.current_index, "playback started");
    }

    fn offset(&self, delta: isize, total_frames: usize) -> Option<usize> {
        let target = self.current_index.checked_add_signed(delta)?;
        (target < total_frames).then_some(target)
    }
}

fn moved(outcome: StepOutcome) -> Option<PlaybackStatus> {
    match outcome {
        StepOutcome::Moved(status) => Some(status),
        StepOutcome::AtBoundary => None,
    }
}
