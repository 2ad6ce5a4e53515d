//! Colour theme for the capscore TUI.
//!
//! The default theme is a TOML file embedded in the binary via
//! [`include_str!`] so the dashboard works without any files on disk. Call
//! [`Theme::load_default`] at startup and pass the result through the
//! application as a shared reference.

use config::{Config, File, FileFormat};
use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

const DEFAULT_THEME_SRC: &str = include_str!("themes/default.toml");

// ---------------------------------------------------------------------------
// Raw (serde) types: mirror the TOML structure
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawStyle {
    fg: Option<String>,
    bg: Option<String>,
    #[serde(default)]
    bold: bool,
    #[serde(default)]
    dim: bool,
    #[serde(default)]
    underlined: bool,
}

impl RawStyle {
    fn into_style(self) -> Style {
        let mut style = Style::default();
        if let Some(c) = self.fg.as_deref().and_then(parse_color) {
            style = style.fg(c);
        }
        if let Some(c) = self.bg.as_deref().and_then(parse_color) {
            style = style.bg(c);
        }
        if self.bold {
            style = style.add_modifier(Modifier::BOLD);
        }
        if self.dim {
            style = style.add_modifier(Modifier::DIM);
        }
        if self.underlined {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        style
    }
}

#[derive(Debug, Deserialize)]
struct RawCard {
    border: RawStyle,
    selected: RawStyle,
    winner: RawStyle,
    title: RawStyle,
    label: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawMetrics {
    recognized: RawStyle,
    total: RawStyle,
    average: RawStyle,
    max_allowed: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawDetail {
    header: RawStyle,
    likes: RawStyle,
    kept: RawStyle,
    capped: RawStyle,
    lost: RawStyle,
    link: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawStatus {
    bar: RawStyle,
    error: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawTheme {
    card: RawCard,
    metrics: RawMetrics,
    detail: RawDetail,
    status: RawStatus,
}

// ---------------------------------------------------------------------------
// Public Theme type
// ---------------------------------------------------------------------------

/// Application colour theme. All styles are pre-resolved ratatui [`Style`]s.
#[derive(Debug, Clone)]
pub struct Theme {
    pub card_border: Style,
    /// Border of the card under the cursor.
    pub card_selected: Style,
    /// Border and trophy of the winning card.
    pub card_winner: Style,
    pub card_title: Style,
    pub label: Style,

    pub recognized: Style,
    pub total: Style,
    pub average: Style,
    pub max_allowed: Style,

    pub detail_header: Style,
    pub detail_likes: Style,
    /// Recognized value of a post below the cap.
    pub detail_kept: Style,
    /// Recognized value of a capped post.
    pub detail_capped: Style,
    pub detail_lost: Style,
    pub detail_link: Style,

    pub status_bar: Style,
    pub error: Style,
}

impl Theme {
    /// Load and parse the embedded default theme.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed, which a unit test rules out.
    pub fn load_default() -> Self {
        Self::from_toml_str(DEFAULT_THEME_SRC).expect("embedded default theme must be valid TOML")
    }

    /// Parse a theme from a TOML string. Unknown keys are ignored.
    pub fn from_toml_str(src: &str) -> anyhow::Result<Self> {
        let raw: RawTheme = Config::builder()
            .add_source(File::from_str(src, FileFormat::Toml))
            .build()?
            .try_deserialize()?;

        Ok(Self {
            card_border: raw.card.border.into_style(),
            card_selected: raw.card.selected.into_style(),
            card_winner: raw.card.winner.into_style(),
            card_title: raw.card.title.into_style(),
            label: raw.card.label.into_style(),
            recognized: raw.metrics.recognized.into_style(),
            total: raw.metrics.total.into_style(),
            average: raw.metrics.average.into_style(),
            max_allowed: raw.metrics.max_allowed.into_style(),
            detail_header: raw.detail.header.into_style(),
            detail_likes: raw.detail.likes.into_style(),
            detail_kept: raw.detail.kept.into_style(),
            detail_capped: raw.detail.capped.into_style(),
            detail_lost: raw.detail.lost.into_style(),
            detail_link: raw.detail.link.into_style(),
            status_bar: raw.status.bar.into_style(),
            error: raw.status.error.into_style(),
        })
    }

    /// Border style for a card.
    pub fn card_border_style(&self, selected: bool, winner: bool) -> Style {
        match (selected, winner) {
            (true, _) => self.card_selected,
            (false, true) => self.card_winner,
            (false, false) => self.card_border,
        }
    }
}

/// Parse a colour name into a ratatui [`Color`].
///
/// Accepts named terminal colours (case-insensitive), `#rrggbb`, and `indexed:N`.
fn parse_color(s: &str) -> Option<Color> {
    match s.to_ascii_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "gray" | "grey" => Some(Color::Gray),
        "dark_gray" | "darkgray" | "dark_grey" | "darkgrey" => Some(Color::DarkGray),
        "white" => Some(Color::White),
        s if s.starts_with('#') && s.len() == 7 => {
            let r = u8::from_str_radix(&s[1..3], 16).ok()?;
            let g = u8::from_str_radix(&s[3..5], 16).ok()?;
            let b = u8::from_str_radix(&s[5..7], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        s if s.starts_with("indexed:") => s["indexed:".len()..].parse().ok().map(Color::Indexed),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
