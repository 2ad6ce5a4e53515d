//! capscore TUI: ratatui dashboard and headless report.

pub mod app;
pub mod event;
pub mod report;
pub mod theme;
pub mod widgets;

pub use app::{App, Screen};

use capscore_core::format::Separators;

/// Show `screen` in the interactive dashboard until the user quits.
pub fn run(screen: Screen, seps: Separators) -> anyhow::Result<()> {
    let theme = theme::Theme::load_default();
    App::new(screen, theme, seps).run()
}
