//! Error screen shown when no configured source produced any data.

use super::centered_rect;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::Line,
    widgets::{Block, Paragraph, Widget, Wrap},
};

pub struct EmptyScreen<'a> {
    expected: &'a [String],
    theme: &'a Theme,
}

impl<'a> EmptyScreen<'a> {
    pub fn new(expected: &'a [String], theme: &'a Theme) -> Self {
        Self { expected, theme }
    }
}

impl Widget for EmptyScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = centered_rect(72, 12, area);
        let block = Block::bordered().border_style(self.theme.error);
        let inner = block.inner(popup);
        block.render(popup, buf);

        let lines = vec![
            Line::styled("⚠  No data found", self.theme.error),
            Line::default(),
            Line::raw("Could not read any source."),
            Line::raw(format!(
                "1. Check that the sheet tabs are named: {}.",
                self.expected.join(", ")
            )),
            Line::raw("2. Make sure the spreadsheet is shared with \"Anyone with the link\"."),
            Line::default(),
            Line::styled("q to quit", self.theme.label),
        ];

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}
