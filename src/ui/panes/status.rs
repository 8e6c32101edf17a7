//! Status bar rendering with keybindings and state indicators

use crate::playback::{PlaybackState, PlaybackStatus};
use crate::session::RunState;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Data needed to render the status bar
pub struct StatusRenderData<'a> {
    pub message: &'a str,
    pub status: PlaybackStatus,
    pub playback: PlaybackState,
    pub run_state: &'a RunState,
}

/// Render the status bar at the bottom.
pub fn render_status_bar(frame: &mut Frame, area: Rect, data: StatusRenderData) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let recording = data.run_state.is_recording();
    let failed = matches!(data.run_state, RunState::Failed(_) | RunState::Truncated);

    // Total is still growing while the worker records
    let frame_text = if recording {
        format!(
            " Frame {}/{}+ ",
            data.status.current_index + 1,
            data.status.total_frames
        )
    } else {
        format!(
            " Frame {}/{} ",
            data.status.current_index + 1,
            data.status.total_frames
        )
    };

    let left_spans = vec![
        Span::styled(
            frame_text,
            Style::default()
                .bg(if failed {
                    DEFAULT_THEME.error
                } else if recording {
                    DEFAULT_THEME.secondary
                } else {
                    DEFAULT_THEME.primary
                })
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            " | ",
            Style::default()
                .bg(DEFAULT_THEME.status_bg)
                .fg(DEFAULT_THEME.comment),
        ),
        Span::styled(
            format!(" {} ", data.message),
            Style::default()
                .bg(DEFAULT_THEME.status_bg)
                .fg(if failed {
                    DEFAULT_THEME.error
                } else {
                    DEFAULT_THEME.fg
                }),
        ),
    ];

    let left_paragraph = Paragraph::new(Line::from(left_spans))
        .style(Style::default().bg(DEFAULT_THEME.status_bg))
        .alignment(Alignment::Left);

    frame.render_widget(left_paragraph, layout[0]);

    // Right side: Keybinds with visual grouping
    let key_style = Style::default().bg(DEFAULT_THEME.comment).fg(Color::Black);
    let desc_style = Style::default()
        .bg(DEFAULT_THEME.status_bg)
        .fg(DEFAULT_THEME.fg);
    let sep_style = Style::default()
        .bg(DEFAULT_THEME.status_bg)
        .fg(DEFAULT_THEME.comment);

    let keys: [(&str, &str); 8] = [
        (" ←/→ ", " step "),
        (" ⎵ ", " play "),
        (" b ", " rewind "),
        (" ↵ / ⌫ ", " end/start "),
        (" ⇥ ", " algorithm "),
        (" n ", " shuffle "),
        (" +/- [/] ", " speed/size "),
        ("q", " quit "),
    ];

    let mut right_spans = Vec::new();
    for (i, (key, desc)) in keys.iter().enumerate() {
        if i > 0 {
            right_spans.push(Span::styled("│", sep_style));
            right_spans.push(Span::styled(" ", desc_style));
        }
        right_spans.push(Span::styled(*key, key_style));
        right_spans.push(Span::styled(*desc, desc_style));
    }

    if let Some((label, color)) = badge(data.status, data.playback) {
        right_spans.push(Span::styled("│", sep_style));
        right_spans.push(Span::styled(
            label,
            Style::default()
                .bg(color)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ));
    }

    let right_paragraph = Paragraph::new(Line::from(right_spans))
        .style(Style::default().bg(DEFAULT_THEME.status_bg))
        .alignment(Alignment::Right);

    frame.render_widget(right_paragraph, layout[1]);
}

/// State indicator shown after the keybinds
fn badge(status: PlaybackStatus, playback: PlaybackState) -> Option<(&'static str, Color)> {
    let is_at_start = status.current_index == 0;
    let is_at_end = status.current_index + 1 >= status.total_frames;

    match playback {
        PlaybackState::PlayingForward => Some((" ▶ PLAYING ", DEFAULT_THEME.secondary)),
        PlaybackState::PlayingBackward => Some((" ◀ REWINDING ", DEFAULT_THEME.secondary)),
        PlaybackState::Stopped if is_at_end => Some((" END ", DEFAULT_THEME.error)),
        PlaybackState::Stopped if is_at_start => Some((" START ", DEFAULT_THEME.success)),
        PlaybackState::Stopped => None,
    }
}
