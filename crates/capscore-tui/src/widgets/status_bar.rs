//! Status bar: one line at the top with the load summary and key hints.

use crate::theme::Theme;
use capscore_core::Dashboard;
use chrono::Local;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    widgets::Widget,
};

pub struct StatusBar<'a> {
    summary: String,
    theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    /// Summary for a loaded dashboard: source count, leader and local load time.
    pub fn loaded(dash: &Dashboard, theme: &'a Theme) -> Self {
        let at = dash.loaded_at().with_timezone(&Local).format("%H:%M:%S");
        let sources = dash.len();
        let noun = if sources == 1 { "source" } else { "sources" };
        let leader = dash
            .winner()
            .map(|w| format!(" · leader {}", w.name))
            .unwrap_or_default();
        Self {
            summary: format!(" capscore · {sources} {noun} ranked{leader} · loaded {at} "),
            theme,
        }
    }

    /// Summary when nothing could be loaded.
    pub fn empty(theme: &'a Theme) -> Self {
        Self {
            summary: " capscore · no data ".to_string(),
            theme,
        }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, self.theme.status_bar);
        buf.set_string(area.x, area.y, &self.summary, self.theme.status_bar);

        let hint = " q:quit  ?:help  enter:details ";
        let hint_x = area.right().saturating_sub(hint.len() as u16);
        if hint_x > area.x + self.summary.chars().count() as u16 {
            buf.set_string(
                hint_x,
                area.y,
                hint,
                self.theme.status_bar.add_modifier(Modifier::DIM),
            );
        }
    }
}
