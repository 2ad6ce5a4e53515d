//! Ratatui widgets for the capscore dashboard.

pub mod cards;
pub mod detail;
pub mod empty;
pub mod help;
pub mod status_bar;

use ratatui::layout::Rect;

/// A `width` × `height` cell rectangle centred in `area`, clipped to it.
pub(crate) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// A rectangle covering `pct_x` / `pct_y` percent of `area`, centred.
pub(crate) fn centered_rect_pct(pct_x: u16, pct_y: u16, area: Rect) -> Rect {
    let width = (u32::from(area.width) * u32::from(pct_x.min(100)) / 100) as u16;
    let height = (u32::from(area.height) * u32::from(pct_y.min(100)) / 100) as u16;
    centered_rect(width, height, area)
}
