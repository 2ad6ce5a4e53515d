//! Help popup: key bindings and what each card figure means.
//!
//! Toggle with `?`; close with `?` or `Escape`.

use super::centered_rect;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Widget},
};

const BINDINGS: &[(&str, &str)] = &[
    ("q  /  Ctrl+c", "Quit (closes the open popup first)"),
    ("← h  /  → l", "Previous / next card"),
    ("↑ k  /  ↓ j", "Card above / below; scroll detail table"),
    ("Enter", "Open / close post detail"),
    ("PageUp  /  Ctrl+u", "Scroll detail table up"),
    ("PageDown / Ctrl+d", "Scroll detail table down"),
    ("Escape", "Close popup"),
    ("?", "Toggle this help popup"),
];

const FIGURES: &[(&str, &str)] = &[
    ("Recognized likes", "Total after capping atypical viral posts"),
    ("Total likes", "Raw total, no adjustment"),
    ("Average", "Mean likes per post"),
    ("Max allowed", "Cap per post: average + standard deviation"),
];

pub struct HelpPopup<'a> {
    theme: &'a Theme,
}

impl<'a> HelpPopup<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }
}

impl Widget for HelpPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = centered_rect(72, 18, area);
        Clear.render(popup, buf);

        let block = Block::bordered()
            .title(" capscore — help (? to close) ")
            .border_style(Style::default().add_modifier(Modifier::BOLD));
        let inner = block.inner(popup);
        block.render(popup, buf);

        let row = |(key, desc): &(&str, &str)| {
            Line::from(vec![
                Span::styled(
                    format!("  {:<22}", key),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(desc.to_string()),
            ])
        };

        let mut lines: Vec<Line> = BINDINGS.iter().map(row).collect();
        lines.push(Line::default());
        lines.extend(FIGURES.iter().map(row));
        lines.push(Line::default());
        lines.push(Line::styled(
            "  Ranking uses recognized likes; the winner is marked with 🏆.",
            self.theme.label,
        ));

        Paragraph::new(lines).render(inner, buf);
    }
}
