//! Detail popup: per-post table for one source.
//!
//! Columns: date, raw likes, recognized likes (1 decimal, warning colour when
//! capped), likes lost to the cap (`-x` only when positive), and the post link.

use super::centered_rect_pct;
use crate::theme::Theme;
use capscore_core::format::{format_dec, format_int, Separators};
use capscore_core::Metrics;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Cell, Clear, Paragraph, Row, Table, Widget},
};

/// Open detail view: which source and how far it is scrolled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailState {
    pub name: String,
    /// Index of the first visible post.
    pub offset: usize,
}

impl DetailState {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            offset: 0,
        }
    }

    /// Move the first visible row by `delta`, clamped to `[0, total - 1]`.
    pub fn scroll(&mut self, delta: isize, total: usize) {
        let max = total.saturating_sub(1);
        self.offset = self.offset.saturating_add_signed(delta).min(max);
    }
}

pub struct DetailPopup<'a> {
    state: &'a DetailState,
    metrics: &'a Metrics,
    theme: &'a Theme,
    seps: &'a Separators,
}

impl<'a> DetailPopup<'a> {
    pub fn new(
        state: &'a DetailState,
        metrics: &'a Metrics,
        theme: &'a Theme,
        seps: &'a Separators,
    ) -> Self {
        Self {
            state,
            metrics,
            theme,
            seps,
        }
    }

    fn post_row(&self, idx: usize) -> Option<Row<'static>> {
        let post = self.metrics.posts().get(idx)?;
        let recognized_style = if post.is_capped() {
            self.theme.detail_capped
        } else {
            self.theme.detail_kept
        };
        let lost = if post.lost() > 0.0 {
            format!("-{}", format_dec(post.lost(), self.seps))
        } else {
            String::new()
        };
        Some(Row::new(vec![
            Cell::from(post.date().to_string()),
            Cell::from(format_int(post.likes() as f64, self.seps)).style(self.theme.detail_likes),
            Cell::from(format_dec(post.recognized(), self.seps)).style(recognized_style),
            Cell::from(lost).style(self.theme.detail_lost),
            Cell::from(post.url().to_string()).style(self.theme.detail_link),
        ]))
    }
}

impl Widget for DetailPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = centered_rect_pct(90, 80, area);
        Clear.render(popup, buf);

        let block = Block::bordered()
            .title(format!(" Detail: {} (Esc to close) ", self.state.name))
            .border_style(self.theme.card_selected);
        let inner = block.inner(popup);
        block.render(popup, buf);

        let [table_area, summary_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(inner);

        let header = Row::new(["Date", "Likes", "Recognized", "Lost", "Link"])
            .style(self.theme.detail_header);
        let rows: Vec<Row> = (self.state.offset..self.metrics.posts().len())
            .filter_map(|idx| self.post_row(idx))
            .collect();
        let widths = [
            Constraint::Length(14),
            Constraint::Length(10),
            Constraint::Length(12),
            Constraint::Length(10),
            Constraint::Fill(1),
        ];
        Table::new(rows, widths).header(header).render(table_area, buf);

        let m = self.metrics;
        let summary = Line::from(vec![
            Span::styled(" cap ", self.theme.label),
            Span::styled(format_dec(m.max_allowed(), self.seps), self.theme.max_allowed),
            Span::styled("  average ", self.theme.label),
            Span::styled(format_dec(m.average(), self.seps), self.theme.average),
            Span::styled("  std dev ", self.theme.label),
            Span::raw(format_dec(m.std_dev(), self.seps)),
            Span::styled(
                format!("  rows {}-{} of {}", self.state.offset + 1, m.posts().len(), m.posts().len()),
                self.theme.label,
            ),
        ]);
        Paragraph::new(summary).render(summary_area, buf);
    }
}
