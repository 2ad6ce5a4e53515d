//! Top-level application state and the main event loop.
//!
//! [`App::run`] sets up the terminal, drives the crossterm event loop, and
//! tears everything down cleanly on exit or panic. All state transitions go
//! through [`App::handle`] so they can be tested without a terminal.

use crate::{
    event::{self, AppEvent, Direction},
    theme::Theme,
    widgets::{
        cards::{CardGrid, CARDS_PER_ROW},
        detail::{DetailPopup, DetailState},
        empty::EmptyScreen,
        help::HelpPopup,
        status_bar::StatusBar,
    },
};
use capscore_core::{format::Separators, Dashboard};
use crossterm::{
    event as ct_event, execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    Frame, Terminal,
};
use std::{io, time::Duration};

/// Rows moved by one PageUp / PageDown in the detail table.
const DETAIL_PAGE: isize = 10;

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

/// What the main area shows.
pub enum Screen {
    Ranked(Dashboard),
    /// No source produced data; lists the names that were expected.
    Empty { expected: Vec<String> },
}

pub struct AppState {
    pub screen: Screen,
    /// Index of the selected card in rank order.
    pub selected: usize,
    pub detail: Option<DetailState>,
    pub show_help: bool,
    pub theme: Theme,
    pub seps: Separators,
    pub quit: bool,
}

impl AppState {
    fn card_count(&self) -> usize {
        match &self.screen {
            Screen::Ranked(dash) => dash.len(),
            Screen::Empty { .. } => 0,
        }
    }

    fn detail_rows(&self) -> usize {
        match (&self.screen, &self.detail) {
            (Screen::Ranked(dash), Some(detail)) => dash
                .metrics(&detail.name)
                .map_or(0, |m| m.posts().len()),
            _ => 0,
        }
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    state: AppState,
}

impl App {
    pub fn new(screen: Screen, theme: Theme, seps: Separators) -> Self {
        App {
            state: AppState {
                screen,
                selected: 0,
                detail: None,
                show_help: false,
                theme,
                seps,
                quit: false,
            },
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Set up the terminal, run the event loop, and restore the terminal on exit.
    pub fn run(mut self) -> anyhow::Result<()> {
        install_panic_hook();

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        // Always restore terminal, even if the loop returned an error
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            {
                let s = &self.state;
                terminal.draw(|frame| draw(frame, s))?;
            }

            if self.state.quit {
                break;
            }

            if ct_event::poll(Duration::from_millis(50))? {
                if let Some(ev) = event::to_app_event(ct_event::read()?) {
                    tracing::debug!(event = ?ev, "key event");
                    self.handle(ev);
                }
            }
        }
        Ok(())
    }

    pub fn handle(&mut self, event: AppEvent) {
        let s = &mut self.state;

        // Help popup intercepts all events; only close keys pass through.
        if s.show_help {
            if matches!(event, AppEvent::Help | AppEvent::Escape | AppEvent::Quit) {
                tracing::debug!("help popup closed");
                s.show_help = false;
            }
            return;
        }

        // Detail popup: scrolling, or any close key.
        if s.detail.is_some() {
            let rows = s.detail_rows();
            let delta = match event {
                AppEvent::Nav(Direction::Up) => -1,
                AppEvent::Nav(Direction::Down) => 1,
                AppEvent::ScrollUp => -DETAIL_PAGE,
                AppEvent::ScrollDown => DETAIL_PAGE,
                AppEvent::Escape | AppEvent::Enter | AppEvent::Quit => {
                    tracing::debug!("detail popup closed");
                    s.detail = None;
                    return;
                }
                AppEvent::Help => {
                    s.show_help = true;
                    return;
                }
                _ => return,
            };
            if let Some(detail) = s.detail.as_mut() {
                detail.scroll(delta, rows);
            }
            return;
        }

        match event {
            AppEvent::Quit => {
                tracing::debug!("quit");
                s.quit = true;
            }
            AppEvent::Help => {
                tracing::debug!("help popup opened");
                s.show_help = true;
            }
            AppEvent::Nav(dir) => {
                let count = s.card_count();
                if count == 0 {
                    return;
                }
                s.selected = match dir {
                    Direction::Left => s.selected.saturating_sub(1),
                    Direction::Right => (s.selected + 1).min(count - 1),
                    Direction::Up => s.selected.saturating_sub(CARDS_PER_ROW),
                    Direction::Down => (s.selected + CARDS_PER_ROW).min(count - 1),
                };
            }
            AppEvent::Enter => {
                if let Screen::Ranked(dash) = &s.screen {
                    if let Some(entry) = dash.ranked().get(s.selected) {
                        tracing::debug!(source = %entry.name, "detail popup opened");
                        s.detail = Some(DetailState::new(entry.name.clone()));
                    }
                }
            }
            // Terminal resize is handled automatically by ratatui
            AppEvent::Escape | AppEvent::ScrollUp | AppEvent::ScrollDown | AppEvent::Resize(..) => {}
        }
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn draw(frame: &mut Frame, state: &AppState) {
    let area = frame.area();
    let [bar, body] = Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(area);

    match &state.screen {
        Screen::Ranked(dash) => {
            frame.render_widget(StatusBar::loaded(dash, &state.theme), bar);
            frame.render_widget(
                CardGrid::new(dash.ranked(), state.selected, &state.theme, &state.seps),
                body,
            );
            if let Some(detail) = &state.detail {
                if let Some(metrics) = dash.metrics(&detail.name) {
                    frame.render_widget(
                        DetailPopup::new(detail, metrics, &state.theme, &state.seps),
                        body,
                    );
                }
            }
        }
        Screen::Empty { expected } => {
            frame.render_widget(StatusBar::empty(&state.theme), bar);
            frame.render_widget(EmptyScreen::new(expected, &state.theme), body);
        }
    }

    if state.show_help {
        frame.render_widget(HelpPopup::new(&state.theme), area);
    }
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original(info);
    }));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
