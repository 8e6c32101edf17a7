//! Main TUI application state and logic

use crate::config;
use crate::errors::VisualizerError;
use crate::playback::{PlaybackCommand, PlaybackState};
use crate::session::Session;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};
use tracing::debug;

/// Longest wait for input between redraws
const IDLE_POLL: Duration = Duration::from_millis(50);

/// Space and `b` ignore key repeat inside this window
const TOGGLE_DEBOUNCE: Duration = Duration::from_millis(200);

/// The main application state
pub struct App {
    /// Active run, its recording and the playback cursor
    pub session: Session,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Last time a play/rewind toggle was pressed (for debouncing)
    pub last_toggle_press: Instant,
}

impl App {
    pub fn new(session: Session) -> Self {
        App {
            session,
            should_quit: false,
            status_message: String::from("Ready!"),
            last_toggle_press: Instant::now()
                .checked_sub(Duration::from_secs(1))
                .unwrap_or_else(Instant::now),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            self.pump();
            self.advance(Instant::now());

            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            // Wake up in time for the next playback tick
            let timeout = self
                .session
                .controller()
                .timer()
                .time_until_due(Instant::now())
                .map_or(IDLE_POLL, |due| due.min(IDLE_POLL));

            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key, Instant::now());
                    }
                }
            }
        }

        Ok(())
    }

    /// Pull recorded frames from the worker
    fn pump(&mut self) {
        if let Err(e) = self.session.pump() {
            self.report(e);
        }
    }

    /// Auto-advance playback
    fn advance(&mut self, now: Instant) {
        let was_playing = self.session.controller().is_playing();
        self.session.tick(now);
        if was_playing && !self.session.controller().is_playing() {
            self.status_message = "Playback complete".to_string();
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut Frame) {
        let size = frame.area();

        // Bars and info side by side, plus status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(75), Constraint::Percentage(25)])
            .split(main_chunks[0]);

        let current = self.session.current();

        super::panes::render_bars_pane(frame, columns[0], current);

        super::panes::render_info_pane(
            frame,
            columns[1],
            super::panes::InfoRenderData {
                algorithm: self.session.algorithm(),
                stats: current.map(|s| s.stats()).unwrap_or_default(),
                size: self.session.size(),
                delay: self.session.controller().delay(),
                run_state: self.session.state(),
                memory_usage: self.session.log().memory_usage(),
                memory_limit: self.session.log().memory_limit(),
            },
        );

        super::panes::render_status_bar(
            frame,
            main_chunks[1],
            super::panes::StatusRenderData {
                message: &self.status_message,
                status: self.session.status(),
                playback: self.session.controller().state(),
                run_state: self.session.state(),
            },
        );
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent, now: Instant) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Left => {
                self.step(PlaybackCommand::StepBackward, now, "Stepped backward");
            }
            KeyCode::Right => {
                self.step(PlaybackCommand::StepForward, now, "Stepped forward");
            }
            KeyCode::Char(' ') => {
                // Toggle auto-play mode (with debounce to prevent key repeat spam)
                if self.debounce(now) {
                    if self.session.controller().state() == PlaybackState::PlayingForward {
                        self.session.command(PlaybackCommand::Pause, now);
                        self.status_message = "Paused".to_string();
                    } else {
                        self.session.command(PlaybackCommand::Play, now);
                        self.status_message = "Playing...".to_string();
                    }
                }
            }
            KeyCode::Char('b') | KeyCode::Char('B') => {
                if self.debounce(now) {
                    if self.session.controller().state() == PlaybackState::PlayingBackward {
                        self.session.command(PlaybackCommand::Pause, now);
                        self.status_message = "Paused".to_string();
                    } else {
                        self.session.command(PlaybackCommand::Rewind, now);
                        self.status_message = "Rewinding...".to_string();
                    }
                }
            }
            KeyCode::Enter => {
                self.session.command(PlaybackCommand::JumpToEnd, now);
                self.status_message = "Jumped to end".to_string();
            }
            KeyCode::Backspace => {
                self.session.command(PlaybackCommand::JumpToStart, now);
                self.status_message = "Jumped to start".to_string();
            }
            KeyCode::Tab => self.cycle_algorithm(1),
            KeyCode::BackTab => self.cycle_algorithm(-1),
            KeyCode::Char('n') | KeyCode::Char('N') => {
                let result = self.session.reshuffle();
                self.started(result, "New shuffled run");
            }
            KeyCode::Char('+') | KeyCode::Char('=') => self.adjust_delay(true, now),
            KeyCode::Char('-') | KeyCode::Char('_') => self.adjust_delay(false, now),
            KeyCode::Char(']') => self.adjust_size(true),
            KeyCode::Char('[') => self.adjust_size(false),
            _ => {}
        }
    }

    fn step(&mut self, command: PlaybackCommand, now: Instant, message: &str) {
        self.status_message = match self.session.command(command, now) {
            Some(_) => message.to_string(),
            None => "Cannot step: at the edge of the recording".to_string(),
        };
    }

    fn cycle_algorithm(&mut self, offset: isize) {
        let result = self.session.cycle_algorithm(offset);
        let message = format!("Switched to {}", self.session.algorithm().name);
        self.started(result, &message);
    }

    fn adjust_delay(&mut self, faster: bool, now: Instant) {
        let delay = config::adjust_delay(self.session.controller().delay(), faster);
        self.session.set_delay(delay, now);
        self.status_message = format!("Delay {} ms", delay.as_millis());
    }

    fn adjust_size(&mut self, grow: bool) {
        let size = config::adjust_size(self.session.size(), grow);
        if size == self.session.size() {
            self.status_message = format!("Size stays at {}", size);
            return;
        }
        let result = self.session.resize(size);
        self.started(result, &format!("Array size {}", size));
    }

    /// Report the outcome of starting a new run
    fn started(&mut self, result: Result<(), VisualizerError>, message: &str) {
        match result {
            Ok(()) => self.status_message = message.to_string(),
            Err(e) => self.report(e),
        }
    }

    fn report(&mut self, error: VisualizerError) {
        debug!(error = %error, "shown in status bar");
        self.status_message = format!("Error: {}", error);
    }

    fn debounce(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.last_toggle_press) < TOGGLE_DEBOUNCE {
            return false;
        }
        self.last_toggle_press = now;
        true
    }
}
