use std::time::Duration;

use tracing::{debug, error, info};

use crate::config::{Config, Interaction};
use crate::data::LoadError;
use crate::models::{Atlas, Language, Point, Rank, Text};
use crate::state::{FeedbackTicket, Phase, QuizState};
use crate::ui::MapProps;
use crate::viewport::Viewport;

/// Cursor steps across the visible map at zoom 1.
const CURSOR_STEPS: f64 = 48.0;

/// Progress of the current atlas load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Pending,
    Failed(String),
    Ready,
}

/// Identifies one atlas load so that a superseded result can be dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadRequest {
    pub generation: u64,
    pub language: Language,
}

/// Side effects requested by [`App`], carried out by the runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    LoadAtlas(LoadRequest),
    ClearFeedbackAfter {
        ticket: FeedbackTicket,
        delay: Duration,
    },
}

/// The quiz controller.
///
/// Owns the quiz state and the loaded atlas and turns user actions into state
/// transitions. Anything asynchronous is returned as an [`Effect`].
pub struct App {
    language: Language,
    interaction: Interaction,
    feedback_delay: Duration,
    quiz: QuizState,
    atlas: Option<Atlas>,
    load: LoadStatus,
    generation: u64,
    viewport: Viewport,
    cursor: Option<Point>,
}

impl App {
    pub fn new(config: &Config) -> Self {
        let quiz = match config.seed {
            Some(seed) => QuizState::seeded(seed),
            None => QuizState::from_entropy(),
        };
        Self::with_quiz(config, quiz)
    }

    pub fn with_quiz(config: &Config, quiz: QuizState) -> Self {
        Self {
            language: config.language,
            interaction: config.interaction,
            feedback_delay: config.feedback_delay(),
            quiz,
            atlas: None,
            load: LoadStatus::Pending,
            generation: 0,
            viewport: Viewport::default(),
            cursor: None,
        }
    }

    /// Request the first atlas load.
    pub fn start(&mut self) -> Effect {
        self.begin_load()
    }

    fn begin_load(&mut self) -> Effect {
        self.generation += 1;
        self.load = LoadStatus::Pending;
        self.atlas = None;
        self.cursor = None;
        self.viewport.reset();
        self.quiz.unload();

        info!(generation = self.generation, language = ?self.language, "loading atlas");
        Effect::LoadAtlas(LoadRequest {
            generation: self.generation,
            language: self.language,
        })
    }

    /// Apply a finished load. Results for an older request are ignored.
    pub fn on_atlas_loaded(&mut self, request: LoadRequest, result: Result<Atlas, LoadError>) -> bool {
        if request.generation != self.generation {
            debug!(
                stale = request.generation,
                current = self.generation,
                "dropping superseded atlas load"
            );
            return false;
        }

        match result {
            Ok(atlas) => {
                self.quiz.initialize(atlas.catalog());
                self.cursor = atlas.bounds().map(|bounds| bounds.center());
                self.atlas = Some(atlas);
                self.load = LoadStatus::Ready;
            }
            Err(err) => {
                error!(error = %err, "failed to load atlas");
                self.load = LoadStatus::Failed(err.to_string());
            }
        }
        true
    }

    /// Answer with `region`.
    pub fn click_region(&mut self, region: &str) -> Option<Effect> {
        let outcome = self.quiz.submit_click(region);
        outcome.ticket().map(|ticket| Effect::ClearFeedbackAfter {
            ticket,
            delay: self.feedback_delay,
        })
    }

    /// Answer with whatever region lies under `point`. Clicking outside every
    /// region does nothing.
    pub fn click_at(&mut self, point: Point) -> Option<Effect> {
        let region = self.atlas.as_ref()?.region_at(point)?.name.clone();
        self.click_region(&region)
    }

    pub fn click_cursor(&mut self) -> Option<Effect> {
        let cursor = self.cursor?;
        self.click_at(cursor)
    }

    pub fn on_feedback_elapsed(&mut self, ticket: FeedbackTicket) -> bool {
        self.quiz.clear_feedback(ticket)
    }

    /// Start over with the current catalog. Does nothing until an atlas is
    /// loaded.
    pub fn reset(&mut self) {
        if let Some(atlas) = &self.atlas {
            info!("quiz reset");
            self.quiz.reset(atlas.catalog());
        }
    }

    /// Switch language, reloading the catalog and resetting the quiz.
    pub fn toggle_language(&mut self) -> Effect {
        self.set_language(self.language.toggled())
    }

    pub fn set_language(&mut self, language: Language) -> Effect {
        self.language = language;
        self.begin_load()
    }

    pub fn move_cursor(&mut self, dx: i32, dy: i32) {
        let (Some(cursor), Some(bounds)) = (self.cursor, self.atlas.as_ref().and_then(Atlas::bounds))
        else {
            return;
        };

        let step = bounds.width().max(bounds.height()) / (CURSOR_STEPS * self.viewport.zoom());
        let lon = (cursor.lon + f64::from(dx) * step).clamp(bounds.min.lon, bounds.max.lon);
        let lat = (cursor.lat + f64::from(dy) * step).clamp(bounds.min.lat, bounds.max.lat);
        let cursor = Point::new(lon, lat);
        self.cursor = Some(cursor);
        self.viewport.follow(cursor, bounds);
    }

    pub fn set_cursor(&mut self, point: Point) {
        if self.atlas.is_some() {
            self.cursor = Some(point);
        }
    }

    pub fn zoom_in(&mut self) {
        if let (true, Some(cursor)) = (self.interaction.allows_zoom(), self.cursor) {
            self.viewport.zoom_in(cursor);
        }
    }

    pub fn zoom_out(&mut self) {
        if !self.interaction.allows_zoom() {
            return;
        }
        self.viewport.zoom_out();
        let bounds = self.atlas.as_ref().and_then(Atlas::bounds);
        if let (Some(cursor), Some(bounds)) = (self.cursor, bounds) {
            self.viewport.follow(cursor, bounds);
        }
    }

    pub fn reset_view(&mut self) {
        self.viewport.reset();
    }

    /// Rank for the errors so far. `None` before a catalog is loaded.
    pub fn rank(&self) -> Option<Rank> {
        let total = self.quiz.catalog().len();
        (total > 0).then(|| Rank::from_errors(self.quiz.errors(), total))
    }

    pub fn map_props(&self) -> MapProps<'_> {
        MapProps {
            prompt: self.quiz.prompt(),
            solved: self.quiz.solved(),
            last_attempt: self.quiz.last_attempt(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.quiz.phase()
    }

    pub fn quiz(&self) -> &QuizState {
        &self.quiz
    }

    pub fn atlas(&self) -> Option<&Atlas> {
        self.atlas.as_ref()
    }

    pub fn load_status(&self) -> &LoadStatus {
        &self.load
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn text(&self) -> &'static Text {
        self.language.text()
    }

    pub fn interaction(&self) -> Interaction {
        self.interaction
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn cursor(&self) -> Option<Point> {
        self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::parse_atlas;
    use crate::viewport::Projection;
    use ratatui::layout::Rect;

    const REGIONS: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            { "type": "Feature", "properties": { "NAME_1": "North", "NL_NAME_1": "Βορράς" },
              "geometry": { "type": "Polygon", "coordinates": [[[20, 40], [24, 40], [24, 42], [20, 42], [20, 40]]] } },
            { "type": "Feature", "properties": { "NAME_1": "South", "NL_NAME_1": "Νότος" },
              "geometry": { "type": "Polygon", "coordinates": [[[20, 36], [24, 36], [24, 38], [20, 38], [20, 36]]] } }
        ]
    }"#;

    fn center_of(app: &App, name: &str) -> Point {
        app.atlas().unwrap().region(name).unwrap().bounds().unwrap().center()
    }

    fn loaded_app() -> App {
        let mut app = App::with_quiz(&Config::default(), QuizState::seeded(3));
        let Effect::LoadAtlas(request) = app.start() else {
            panic!("expected a load");
        };
        let atlas = parse_atlas(REGIONS, request.language).unwrap();
        assert!(app.on_atlas_loaded(request, Ok(atlas)));
        app
    }

    #[test]
    fn start_requests_load_in_configured_language() {
        let config = Config {
            language: Language::Greek,
            ..Config::default()
        };
        let mut app = App::with_quiz(&config, QuizState::seeded(1));

        assert_eq!(
            app.start(),
            Effect::LoadAtlas(LoadRequest {
                generation: 1,
                language: Language::Greek
            })
        );
        assert_eq!(app.phase(), Phase::Loading);
        assert_eq!(app.load_status(), &LoadStatus::Pending);
        assert!(app.rank().is_none());
    }

    #[test]
    fn loaded_atlas_starts_quiz() {
        let app = loaded_app();
        assert_eq!(app.phase(), Phase::AwaitingClick);
        assert_eq!(app.load_status(), &LoadStatus::Ready);
        assert!(app.cursor().is_some());
        assert_eq!(app.rank(), Some(Rank::Cartographer));
    }

    #[test]
    fn failed_load_stays_loading() {
        let mut app = App::with_quiz(&Config::default(), QuizState::seeded(1));
        let Effect::LoadAtlas(request) = app.start() else {
            panic!("expected a load");
        };
        let err = LoadError::Read {
            path: "missing.geojson".into(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };

        assert!(app.on_atlas_loaded(request, Err(err)));
        assert_eq!(app.phase(), Phase::Loading);
        assert!(matches!(app.load_status(), LoadStatus::Failed(msg) if msg.contains("missing.geojson")));
        assert!(app.click_cursor().is_none());
    }

    #[test]
    fn wrong_click_schedules_feedback_clear() {
        let mut app = loaded_app();
        let prompt = app.quiz().prompt().unwrap().to_string();
        let other = if prompt == "North" { "South" } else { "North" };

        let effect = app.click_at(center_of(&app, other));
        let Some(Effect::ClearFeedbackAfter { ticket, delay }) = effect else {
            panic!("expected feedback timer, got {effect:?}");
        };
        assert_eq!(delay, Duration::from_millis(1500));
        assert_eq!(app.phase(), Phase::ShowingFeedback);
        assert_eq!(app.quiz().errors(), 1);

        assert!(app.on_feedback_elapsed(ticket));
        assert_eq!(app.phase(), Phase::AwaitingClick);
        assert_eq!(app.quiz().prompt(), Some(prompt.as_str()));
    }

    #[test]
    fn click_on_sea_does_nothing() {
        let mut app = loaded_app();
        assert!(app.click_at(Point::new(22.0, 39.0)).is_none());
        assert_eq!(app.quiz().errors(), 0);
    }

    #[test]
    fn completing_the_map() {
        let mut app = loaded_app();
        while let Some(prompt) = app.quiz().prompt().map(str::to_owned) {
            let point = center_of(&app, &prompt);
            app.set_cursor(point);
            assert!(app.click_cursor().is_some());
        }
        assert_eq!(app.phase(), Phase::Complete);
        assert_eq!(app.rank(), Some(Rank::Cartographer));
    }

    #[test]
    fn reset_clears_progress() {
        let mut app = loaded_app();
        let prompt = app.quiz().prompt().unwrap().to_string();
        app.click_region(&prompt);
        app.reset();

        assert_eq!(app.quiz().solved().len(), 0);
        assert_eq!(app.quiz().remaining().len(), 2);
        assert_eq!(app.phase(), Phase::AwaitingClick);
    }

    #[test]
    fn language_switch_reloads_and_drops_stale_results() {
        let mut app = loaded_app();
        let Effect::LoadAtlas(old) = app.start() else {
            panic!("expected a load");
        };
        let Effect::LoadAtlas(new) = app.toggle_language() else {
            panic!("expected a load");
        };
        assert_eq!(new.language, Language::Greek);
        assert_eq!(app.phase(), Phase::Loading);

        let stale = parse_atlas(REGIONS, old.language).unwrap();
        assert!(!app.on_atlas_loaded(old, Ok(stale)));
        assert_eq!(app.phase(), Phase::Loading);

        let fresh = parse_atlas(REGIONS, new.language).unwrap();
        assert!(app.on_atlas_loaded(new, Ok(fresh)));
        assert!(matches!(app.quiz().prompt(), Some("Βορράς") | Some("Νότος")));
        assert_eq!(app.quiz().errors(), 0);
    }

    #[test]
    fn static_profile_ignores_zoom() {
        let config = Config {
            interaction: Interaction::Static,
            ..Config::default()
        };
        let mut app = App::with_quiz(&config, QuizState::seeded(1));
        let Effect::LoadAtlas(request) = app.start() else {
            panic!("expected a load");
        };
        app.on_atlas_loaded(request, Ok(parse_atlas(REGIONS, request.language).unwrap()));

        app.zoom_in();
        assert_eq!(app.viewport(), &Viewport::default());

        let mut interactive = loaded_app();
        interactive.zoom_in();
        assert!(interactive.viewport().zoom() > 1.0);
    }

    fn cursor_on_screen(app: &App, area: Rect) -> bool {
        let bounds = app.atlas().unwrap().bounds().unwrap();
        let projection = Projection::fit(bounds, app.viewport(), area).unwrap();
        let (x, y) = projection.project(app.cursor().unwrap());
        let [x0, x1] = projection.x_bounds();
        let [y0, y1] = projection.y_bounds();
        (x0..=x1).contains(&x) && (y0..=y1).contains(&y)
    }

    #[test]
    fn zoomed_view_follows_cursor() {
        let mut app = loaded_app();
        for _ in 0..4 {
            app.zoom_in();
        }

        let area = Rect::new(0, 0, 80, 24);
        for (dx, dy) in [(0, -1), (-1, 0), (0, 1), (1, 0)] {
            for _ in 0..40 {
                app.move_cursor(dx, dy);
                assert!(cursor_on_screen(&app, area), "cursor {:?}", app.cursor());
            }
        }

        app.zoom_out();
        assert!(cursor_on_screen(&app, area));
    }

    #[test]
    fn cursor_stays_inside_atlas() {
        let mut app = loaded_app();
        for _ in 0..500 {
            app.move_cursor(1, 1);
        }
        let cursor = app.cursor().unwrap();
        assert_eq!(cursor, Point::new(24.0, 42.0));
    }
}
