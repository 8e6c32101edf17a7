//! Algorithm name, description, and the counters of the current frame

use crate::array::highlight::HighlightKind;
use crate::array::Stats;
use crate::session::RunState;
use crate::sorting::Algorithm;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use std::time::Duration;

/// Data needed to render the info pane
pub struct InfoRenderData<'a> {
    pub algorithm: &'static Algorithm,
    pub stats: Stats,
    pub size: usize,
    pub delay: Duration,
    pub run_state: &'a RunState,
    pub memory_usage: usize,
    pub memory_limit: usize,
}

pub fn render_info_pane(frame: &mut Frame, area: Rect, data: InfoRenderData) {
    let block = Block::default()
        .title(" Algorithm ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border));

    let label = Style::default().fg(DEFAULT_THEME.comment);
    let number = Style::default().fg(DEFAULT_THEME.number);
    let counter = |name: &'static str, value: String| {
        Line::from(vec![
            Span::styled(format!("{:<13}", name), label),
            Span::styled(value, number),
        ])
    };

    let mut lines = vec![Line::from(Span::styled(
        data.algorithm.name,
        Style::default()
            .fg(DEFAULT_THEME.title)
            .add_modifier(Modifier::BOLD),
    ))];
    lines.extend(description_lines(data.algorithm.description));
    lines.extend([
        Line::raw(""),
        counter("Comparisons", data.stats.comparisons.to_string()),
        counter("Swaps", data.stats.swaps.to_string()),
        counter("Moves", data.stats.moves.to_string()),
        counter("Reads", data.stats.reads.to_string()),
        Line::raw(""),
        counter("Size", data.size.to_string()),
        counter("Delay", format!("{} ms", data.delay.as_millis())),
        counter(
            "Recorded",
            format!(
                "{} / {}",
                format_bytes(data.memory_usage),
                format_bytes(data.memory_limit)
            ),
        ),
        Line::from(vec![
            Span::styled(format!("{:<13}", "Run"), label),
            run_state_span(data.run_state),
        ]),
        Line::raw(""),
        legend(),
    ]);

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

/// One line per paragraph; a single span would not break on `\n`
fn description_lines(description: &'static str) -> impl Iterator<Item = Line<'static>> {
    description
        .split('\n')
        .map(|paragraph| {
            Line::from(Span::styled(
                paragraph,
                Style::default().fg(DEFAULT_THEME.fg),
            ))
        })
}

/// Color key for the highlight kinds drawn in the bars pane
fn legend() -> Line<'static> {
    let kinds = [
        HighlightKind::Index,
        HighlightKind::Comparison,
        HighlightKind::Move,
    ];
    let spans = kinds.into_iter().flat_map(|kind| {
        [
            Span::styled("█ ", Style::default().fg(DEFAULT_THEME.highlight(kind))),
            Span::styled(
                format!("{}  ", kind.label()),
                Style::default().fg(DEFAULT_THEME.comment),
            ),
        ]
    });
    Line::from(spans.collect::<Vec<_>>())
}

fn run_state_span(state: &RunState) -> Span<'static> {
    match state {
        RunState::Recording => {
            Span::styled("recording", Style::default().fg(DEFAULT_THEME.secondary))
        }
        RunState::Finished(_) => Span::styled("finished", Style::default().fg(DEFAULT_THEME.success)),
        RunState::Failed(e) => Span::styled(
            format!("failed: {}", e),
            Style::default().fg(DEFAULT_THEME.error),
        ),
        RunState::Truncated => Span::styled(
            "truncated (snapshot limit)",
            Style::default().fg(DEFAULT_THEME.error),
        ),
    }
}

fn format_bytes(bytes: usize) -> String {
    const KIB: usize = 1024;
    const MIB: usize = 1024 * 1024;
    if bytes >= MIB {
        format!("{:.1} MiB", bytes as f64 / MIB as f64)
    } else if bytes >= KIB {
        format!("{:.1} KiB", bytes as f64 / KIB as f64)
    } else {
        format!("{} B", bytes)
    }
}
