//! Account cards: one bordered summary per ranked source.

use crate::theme::Theme;
use capscore_core::format::{format_int, Separators};
use capscore_core::RankedEntry;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

/// Cards per grid row.
pub const CARDS_PER_ROW: usize = 3;
/// Height of one card including borders.
pub const CARD_HEIGHT: u16 = 8;

const LABEL_WIDTH: usize = 18;

/// A single account card.
pub struct AccountCard<'a> {
    entry: &'a RankedEntry,
    position: usize,
    selected: bool,
    theme: &'a Theme,
    seps: &'a Separators,
}

impl<'a> AccountCard<'a> {
    pub fn new(
        entry: &'a RankedEntry,
        position: usize,
        selected: bool,
        theme: &'a Theme,
        seps: &'a Separators,
    ) -> Self {
        Self {
            entry,
            position,
            selected,
            theme,
            seps,
        }
    }

    fn metric_line(&self, label: &str, value: String, style: Style) -> Line<'static> {
        Line::from(vec![
            Span::styled(format!(" {label:<LABEL_WIDTH$}"), self.theme.label),
            Span::styled(value, style),
        ])
    }
}

impl Widget for AccountCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let entry = self.entry;
        let m = &entry.metrics;

        let mut title = vec![Span::styled(
            format!(" #{} {} ", self.position + 1, entry.name),
            self.theme.card_title,
        )];
        if entry.is_winner {
            title.push(Span::styled("🏆 ", self.theme.card_winner));
        }

        let block = Block::bordered()
            .title(Line::from(title))
            .border_style(self.theme.card_border_style(self.selected, entry.is_winner));
        let inner = block.inner(area);
        block.render(area, buf);

        let lines = vec![
            self.metric_line(
                "Recognized likes",
                format_int(m.total_recognized(), self.seps),
                self.theme.recognized,
            ),
            self.metric_line(
                "Total likes",
                format_int(m.total_likes() as f64, self.seps),
                self.theme.total,
            ),
            self.metric_line("Average", format_int(m.average(), self.seps), self.theme.average),
            self.metric_line(
                "Max allowed",
                format_int(m.max_allowed(), self.seps),
                self.theme.max_allowed,
            ),
            Line::default(),
            Line::styled(
                format!(
                    " {} posts, {} capped · Enter for details",
                    m.posts().len(),
                    m.capped_count()
                ),
                self.theme.label,
            ),
        ];

        Paragraph::new(lines).render(inner, buf);
    }
}

/// Grid of account cards, [`CARDS_PER_ROW`] per row, in rank order.
pub struct CardGrid<'a> {
    entries: &'a [RankedEntry],
    selected: usize,
    theme: &'a Theme,
    seps: &'a Separators,
}

impl<'a> CardGrid<'a> {
    pub fn new(
        entries: &'a [RankedEntry],
        selected: usize,
        theme: &'a Theme,
        seps: &'a Separators,
    ) -> Self {
        Self {
            entries,
            selected,
            theme,
            seps,
        }
    }
}

/// First grid row to draw so that the selected card's row is on screen.
///
/// Scrolls only as far as needed: the selected row becomes the last visible one.
fn first_visible_row(selected: usize, visible_rows: usize) -> usize {
    let selected_row = selected / CARDS_PER_ROW;
    selected_row.saturating_sub(visible_rows.saturating_sub(1))
}

impl Widget for CardGrid<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let row_count = self.entries.len().div_ceil(CARDS_PER_ROW);
        let visible_rows = usize::from(area.height / CARD_HEIGHT).max(1);
        let offset = first_visible_row(self.selected, visible_rows);
        let shown = row_count.saturating_sub(offset).min(visible_rows);

        let mut constraints = vec![Constraint::Length(CARD_HEIGHT); shown];
        constraints.push(Constraint::Fill(1));
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        let chunks = self.entries.chunks(CARDS_PER_ROW).enumerate();
        for (slot, (row_idx, chunk)) in chunks.skip(offset).take(shown).enumerate() {
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Ratio(1, CARDS_PER_ROW as u32); CARDS_PER_ROW])
                .split(rows[slot]);

            for (col_idx, entry) in chunk.iter().enumerate() {
                let position = row_idx * CARDS_PER_ROW + col_idx;
                AccountCard::new(
                    entry,
                    position,
                    position == self.selected,
                    self.theme,
                    self.seps,
                )
                .render(cols[col_idx], buf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use capscore_core::{metrics::compute, rank::rank, ResultSet, RowRecord};

    fn buffer_text(buf: &Buffer) -> String {
        let area = buf.area;
        (area.top()..area.bottom())
            .map(|y| {
                (area.left()..area.right())
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn seven_sources() -> Vec<RankedEntry> {
        let mut set = ResultSet::new();
        for i in 0..7u64 {
            set.insert(
                format!("acct{}", i + 1),
                compute(vec![RowRecord::new("d", 100 - i, None)]),
            );
        }
        rank(set)
    }

    #[test]
    fn first_visible_row_follows_selection() {
        assert_eq!(first_visible_row(0, 1), 0);
        assert_eq!(first_visible_row(4, 1), 1);
        assert_eq!(first_visible_row(6, 1), 2);
        assert_eq!(first_visible_row(6, 2), 1);
        assert_eq!(first_visible_row(6, 5), 0);
        assert_eq!(first_visible_row(2, 0), 0);
    }

    #[test]
    fn short_grid_scrolls_to_the_selected_card() {
        let ranked = seven_sources();
        let theme = Theme::load_default();
        let seps = Separators::default();
        let area = Rect::new(0, 0, 120, CARD_HEIGHT);

        let mut buf = Buffer::empty(area);
        CardGrid::new(&ranked, 6, &theme, &seps).render(area, &mut buf);
        let text = buffer_text(&buf);
        assert!(text.contains("#7 acct7"), "{text}");
        assert!(!text.contains("#1 acct1"), "{text}");

        let mut buf = Buffer::empty(area);
        CardGrid::new(&ranked, 0, &theme, &seps).render(area, &mut buf);
        let text = buffer_text(&buf);
        assert!(text.contains("#1 acct1"), "{text}");
        assert!(!text.contains("#7 acct7"), "{text}");
    }

    #[test]
    fn tall_grid_shows_every_row() {
        let ranked = seven_sources();
        let theme = Theme::load_default();
        let seps = Separators::default();
        let area = Rect::new(0, 0, 120, CARD_HEIGHT * 3);
        let mut buf = Buffer::empty(area);
        CardGrid::new(&ranked, 6, &theme, &seps).render(area, &mut buf);
        let text = buffer_text(&buf);
        assert!(text.contains("#1 acct1"), "{text}");
        assert!(text.contains("#7 acct7"), "{text}");
    }

    #[test]
    fn grid_renders_every_source_with_its_score() {
        let mut set = ResultSet::new();
        set.insert(
            "Los_delaU",
            compute(vec![RowRecord::new("d", 1500, None), RowRecord::new("d", 1500, None)]),
        );
        set.insert("Bogota.Atl", compute(vec![RowRecord::new("d", 10, None)]));
        let ranked = rank(set);

        let theme = Theme::load_default();
        let seps = Separators::default();
        let area = Rect::new(0, 0, 120, CARD_HEIGHT);
        let mut buf = Buffer::empty(area);
        CardGrid::new(&ranked, 0, &theme, &seps).render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("#1 Los_delaU"), "{text}");
        assert!(text.contains("#2 Bogota.Atl"), "{text}");
        assert!(text.contains("3.000"), "{text}");
    }
}
