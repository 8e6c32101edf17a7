use crate::array::highlight::HighlightKind;
use ratatui::style::Color;

pub struct Theme {
    pub fg: Color,
    pub primary: Color,   // Blue
    pub secondary: Color, // Orange
    pub comment: Color,   // Grey
    pub success: Color,   // Green
    pub error: Color,     // Red
    pub title: Color,
    pub number: Color,
    pub border: Color,
    pub status_bg: Color,
    pub bar: Color,             // Unhighlighted bar
    pub bar_sorted: Color,      // Bars of a fully sorted frame
    pub mark_index: Color,      // Scan position, partition boundary
    pub mark_comparison: Color, // Pair being compared
    pub mark_move: Color,       // Just swapped or moved
}

impl Theme {
    pub fn highlight(&self, kind: HighlightKind) -> Color {
        match kind {
            HighlightKind::Default => self.bar,
            HighlightKind::Index => self.mark_index,
            HighlightKind::Comparison => self.mark_comparison,
            HighlightKind::Move => self.mark_move,
        }
    }
}

pub const DEFAULT_THEME: Theme = Theme {
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),   // Blue
    secondary: Color::Rgb(250, 179, 135), // Orange
    comment: Color::Rgb(108, 112, 134),
    success: Color::Rgb(166, 227, 161),
    error: Color::Rgb(243, 139, 168),
    title: Color::Rgb(249, 226, 175),  // Yellow for the algorithm name
    number: Color::Rgb(250, 179, 135), // Orange for counters
    border: Color::Rgb(108, 112, 134),
    status_bg: Color::Rgb(50, 50, 70),
    bar: Color::Rgb(205, 214, 244),
    bar_sorted: Color::Rgb(166, 227, 161),
    mark_index: Color::Rgb(137, 180, 250),
    mark_comparison: Color::Rgb(249, 226, 175),
    mark_move: Color::Rgb(243, 139, 168),
};
