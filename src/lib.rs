//! # geoquiz
//!
//! A terminal geography quiz: find the regions of Greece on a map.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use geoquiz::{Config, Quiz, QuizError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), QuizError> {
//!     // Regions come from a GeoJSON feature collection
//!     let config = Config::default();
//!
//!     // Run the quiz in the terminal
//!     Quiz::new(config).run().await
//! }
//! ```

mod app;
pub mod config;
mod data;
pub mod logging;
mod models;
mod runtime;
mod state;
pub mod terminal;
mod ui;
mod viewport;

use std::io;

use crossterm::event::{
    Event, EventStream, KeyCode, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use futures_util::StreamExt;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::info;

pub use app::{App, Effect, LoadRequest, LoadStatus};
pub use config::{Config, ConfigError, Interaction, Overrides};
pub use data::{LoadError, load_atlas, parse_atlas};
pub use models::{Atlas, BoundingBox, Language, Point, Polygon, Rank, Region, Ring, Text};
pub use runtime::{EffectRunner, Message, apply};
pub use state::{Attempt, ClickOutcome, FeedbackTicket, Phase, QuizState};
pub use ui::{MapProps, MapView, RegionStatus};
pub use viewport::{Projection, Viewport};

/// Error type for quiz operations.
#[derive(Debug, Error)]
pub enum QuizError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// A quiz instance that can be run in the terminal.
pub struct Quiz {
    config: Config,
}

impl Quiz {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Run the quiz in the terminal.
    ///
    /// Takes over the terminal until the user quits. A region file that
    /// can't be loaded is reported on screen, not returned as an error.
    pub async fn run(self) -> Result<(), QuizError> {
        self.config.validate()?;

        let mut terminal = terminal::TerminalGuard::acquire()?;
        let (tx, mut rx) = mpsc::unbounded_channel();
        let effects = EffectRunner::new(self.config.data.clone(), tx);

        let mut app = App::new(&self.config);
        let mut map = MapView::default();
        let mut events = EventStream::new();

        info!(data = %self.config.data.display(), "quiz started");
        effects.run(app.start());

        loop {
            terminal.draw(|frame| ui::render(frame, &app, &mut map))?;

            tokio::select! {
                event = events.next() => match event {
                    Some(Ok(event)) => {
                        if handle_event(&mut app, &map, &effects, event) {
                            break;
                        }
                    }
                    Some(Err(err)) => return Err(err.into()),
                    None => break,
                },
                Some(message) = rx.recv() => apply(&mut app, message),
            }
        }

        info!("quiz closed");
        Ok(())
    }
}

/// Returns true if the app should exit.
fn handle_event(app: &mut App, map: &MapView, effects: &EffectRunner, event: Event) -> bool {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_input(app, effects, key.code),
        Event::Mouse(mouse) => {
            handle_mouse(app, map, effects, mouse);
            false
        }
        _ => false,
    }
}

fn handle_input(app: &mut App, effects: &EffectRunner, key: KeyCode) -> bool {
    match app.phase() {
        Phase::Loading => handle_loading_input(app, effects, key),
        Phase::AwaitingClick | Phase::ShowingFeedback => handle_quiz_input(app, effects, key),
        Phase::Complete => handle_complete_input(app, effects, key),
    }
}

fn handle_loading_input(app: &mut App, effects: &EffectRunner, key: KeyCode) -> bool {
    match key {
        KeyCode::Char('t') | KeyCode::Char('T') => {
            effects.run(app.toggle_language());
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        _ => false,
    }
}

fn handle_quiz_input(app: &mut App, effects: &EffectRunner, key: KeyCode) -> bool {
    match key {
        KeyCode::Left | KeyCode::Char('h') => app.move_cursor(-1, 0),
        KeyCode::Right | KeyCode::Char('l') => app.move_cursor(1, 0),
        KeyCode::Up | KeyCode::Char('k') => app.move_cursor(0, 1),
        KeyCode::Down | KeyCode::Char('j') => app.move_cursor(0, -1),
        KeyCode::Enter | KeyCode::Char(' ') => {
            if let Some(effect) = app.click_cursor() {
                effects.run(effect);
            }
        }
        KeyCode::Char('+') | KeyCode::Char('=') => app.zoom_in(),
        KeyCode::Char('-') => app.zoom_out(),
        KeyCode::Char('0') => app.reset_view(),
        KeyCode::Char('r') | KeyCode::Char('R') => app.reset(),
        KeyCode::Char('t') | KeyCode::Char('T') => effects.run(app.toggle_language()),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return true,
        _ => {}
    }
    false
}

fn handle_complete_input(app: &mut App, effects: &EffectRunner, key: KeyCode) -> bool {
    match key {
        KeyCode::Char('r') | KeyCode::Char('R') => {
            app.reset();
            false
        }
        KeyCode::Char('t') | KeyCode::Char('T') => {
            effects.run(app.toggle_language());
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        _ => false,
    }
}

fn handle_mouse(app: &mut App, map: &MapView, effects: &EffectRunner, mouse: MouseEvent) {
    let Some(point) = map.point_at(mouse.column, mouse.row) else {
        return;
    };

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            app.set_cursor(point);
            let clickable = app
                .atlas()
                .and_then(|atlas| map.region_at(atlas, &app.map_props(), mouse.column, mouse.row))
                .map(|region| region.name.clone());
            if let Some(region) = clickable {
                if let Some(effect) = app.click_region(&region) {
                    effects.run(effect);
                }
            }
        }
        MouseEventKind::ScrollUp => {
            app.set_cursor(point);
            app.zoom_in();
        }
        MouseEventKind::ScrollDown => app.zoom_out(),
        _ => {}
    }
}
