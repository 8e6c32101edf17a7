//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`bars`]: The current frame as a bar chart, colored by highlight kind
//! - [`info`]: Algorithm name and description with the frame's counters
//! - [`status`]: Status bar with frame counter, keybindings and playback state
//!
//! Each pane module exports a primary `render_*` function taking the frame, its area and the
//! data it draws. Panes hold no state between frames.

pub mod bars;
pub mod info;
pub mod status;

pub use bars::render_bars_pane;
pub use info::{render_info_pane, InfoRenderData};
pub use status::{render_status_bar, StatusRenderData};
