//! Bar chart of the current frame
//!
//! Each value is drawn as a vertical bar whose height is scaled between the smallest and
//! largest value in the frame. Bar tops use eighth-block glyphs for sub-cell resolution.
//! When there are more values than columns, each column shows the value at its sampled index.

use crate::array::highlight::HighlightKind;
use crate::array::Value;
use crate::snapshot::Snapshot;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const EIGHTHS: [char; 9] = [' ', '▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// One drawn column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    /// Array index shown in this column
    pub index: usize,
    /// Bar height in eighths of a row
    pub height: usize,
}

/// Map `values` onto `width` columns of `rows` rows each
pub fn layout_columns(values: &[Value], width: usize, rows: usize) -> Vec<Column> {
    if values.is_empty() || width == 0 || rows == 0 {
        return Vec::new();
    }

    let lo = values.iter().copied().min().unwrap_or(0);
    let hi = values.iter().copied().max().unwrap_or(0);
    let span = hi as f64 - lo as f64;
    let max_height = rows * 8;

    // Wide terminals repeat each value across several columns
    let per_value = (width / values.len()).max(1);
    let columns = (values.len() * per_value).min(width);

    (0..columns)
        .map(|column| {
            let index = if per_value > 1 {
                column / per_value
            } else {
                column * values.len() / columns
            };
            let ratio = if span > 0.0 {
                (values[index] as f64 - lo as f64) / span
            } else {
                1.0
            };
            // Smallest value still gets one full row
            let height = 8 + (ratio * (max_height - 8) as f64).round() as usize;
            Column { index, height }
        })
        .collect()
}

/// Glyph for `row` (0 = bottom) of a bar `height` eighths tall
pub fn glyph(height: usize, row: usize) -> char {
    let filled = height.saturating_sub(row * 8).min(8);
    EIGHTHS[filled]
}

/// Render the bars pane
pub fn render_bars_pane(frame: &mut Frame, area: Rect, snapshot: Option<&Snapshot>) {
    let block = Block::default()
        .title(" Array ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border));

    let width = area.width.saturating_sub(2) as usize; // borders
    let rows = area.height.saturating_sub(2) as usize;

    let Some(snapshot) = snapshot.filter(|s| !s.is_empty()) else {
        let empty = Paragraph::new("(empty array)")
            .style(Style::default().fg(DEFAULT_THEME.comment))
            .block(block);
        frame.render_widget(empty, area);
        return;
    };

    let columns = layout_columns(snapshot.values(), width, rows);
    let sorted_frame = snapshot.highlighting().is_empty() && snapshot.is_sorted();
    let colors: Vec<_> = columns
        .iter()
        .map(|column| match snapshot.highlighting().kind_at(column.index) {
            HighlightKind::Default if sorted_frame => DEFAULT_THEME.bar_sorted,
            kind => DEFAULT_THEME.highlight(kind),
        })
        .collect();

    let lines: Vec<Line> = (0..rows)
        .rev()
        .map(|row| {
            let spans: Vec<Span> = columns
                .iter()
                .zip(&colors)
                .map(|(column, &color)| {
                    Span::styled(
                        glyph(column.height, row).to_string(),
                        Style::default().fg(color),
                    )
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heights_scale_between_min_and_max() {
        let columns = layout_columns(&[1, 3, 2], 3, 2);
        assert_eq!(
            columns,
            vec![
                Column { index: 0, height: 8 },
                Column { index: 1, height: 16 },
                Column { index: 2, height: 12 },
            ]
        );
    }

    #[test]
    fn test_wide_area_repeats_columns() {
        let columns = layout_columns(&[1, 2], 7, 1);
        let indexes: Vec<usize> = columns.iter().map(|c| c.index).collect();
        assert_eq!(indexes, vec![0, 0, 0, 1, 1, 1]);
    }

    #[test]
    fn test_narrow_area_samples_values() {
        let values: Vec<Value> = (0..100).collect();
        let columns = layout_columns(&values, 10, 4);
        assert_eq!(columns.len(), 10);
        assert_eq!(columns[0].index, 0);
        assert_eq!(columns[9].index, 90);
    }

    #[test]
    fn test_equal_values_fill_area() {
        let columns = layout_columns(&[5, 5], 2, 3);
        assert!(columns.iter().all(|c| c.height == 24));
    }

    #[test]
    fn test_glyph_rows() {
        assert_eq!(glyph(12, 0), '█');
        assert_eq!(glyph(12, 1), '▄');
        assert_eq!(glyph(12, 2), ' ');
    }
}
