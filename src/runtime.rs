//! Carries out [`Effect`]s on the tokio runtime and feeds their results back
//! to the UI loop as [`Message`]s.

use std::path::PathBuf;

use tokio::sync::mpsc;
use tracing::trace;

use crate::app::{App, Effect, LoadRequest};
use crate::data::{LoadError, load_atlas};
use crate::models::Atlas;
use crate::state::FeedbackTicket;

/// Results of background work.
#[derive(Debug)]
pub enum Message {
    AtlasLoaded {
        request: LoadRequest,
        result: Result<Atlas, LoadError>,
    },
    FeedbackElapsed(FeedbackTicket),
}

/// Spawns one task per effect. A task finishing after the receiver is gone
/// drops its result.
#[derive(Clone)]
pub struct EffectRunner {
    data: PathBuf,
    tx: mpsc::UnboundedSender<Message>,
}

impl EffectRunner {
    pub fn new(data: PathBuf, tx: mpsc::UnboundedSender<Message>) -> Self {
        Self { data, tx }
    }

    pub fn run(&self, effect: Effect) {
        let tx = self.tx.clone();
        match effect {
            Effect::LoadAtlas(request) => {
                let path = self.data.clone();
                tokio::spawn(async move {
                    let result = load_atlas(&path, request.language).await;
                    if tx.send(Message::AtlasLoaded { request, result }).is_err() {
                        trace!("atlas load finished after shutdown");
                    }
                });
            }
            Effect::ClearFeedbackAfter { ticket, delay } => {
                tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    if tx.send(Message::FeedbackElapsed(ticket)).is_err() {
                        trace!("feedback timer fired after shutdown");
                    }
                });
            }
        }
    }
}

/// Apply a background result to the controller.
pub fn apply(app: &mut App, message: Message) {
    match message {
        Message::AtlasLoaded { request, result } => {
            app.on_atlas_loaded(request, result);
        }
        Message::FeedbackElapsed(ticket) => {
            app.on_feedback_elapsed(ticket);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::config::Config;
    use crate::state::{Phase, QuizState};

    const REGIONS: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            { "type": "Feature", "properties": { "NAME_1": "West" },
              "geometry": { "type": "Polygon", "coordinates": [[[20, 38], [21, 38], [21, 39], [20, 39], [20, 38]]] } },
            { "type": "Feature", "properties": { "NAME_1": "East" },
              "geometry": { "type": "Polygon", "coordinates": [[[22, 38], [23, 38], [23, 39], [22, 39], [22, 38]]] } }
        ]
    }"#;

    fn config_for(path: PathBuf) -> Config {
        Config {
            data: path,
            feedback_ms: 100,
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn load_effect_delivers_atlas() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("regions.geojson");
        std::fs::write(&path, REGIONS).unwrap();

        let config = config_for(path.clone());
        let mut app = App::with_quiz(&config, QuizState::seeded(1));
        let (tx, mut rx) = mpsc::unbounded_channel();
        let runner = EffectRunner::new(path, tx);

        runner.run(app.start());
        let message = rx.recv().await.unwrap();
        apply(&mut app, message);

        assert_eq!(app.phase(), Phase::AwaitingClick);
        assert_eq!(app.atlas().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn feedback_timer_returns_to_awaiting_click() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("regions.geojson");
        std::fs::write(&path, REGIONS).unwrap();

        let config = config_for(path.clone());
        let mut app = App::with_quiz(&config, QuizState::seeded(1));
        let (tx, mut rx) = mpsc::unbounded_channel();
        let runner = EffectRunner::new(path, tx);

        runner.run(app.start());
        let message = rx.recv().await.unwrap();
        apply(&mut app, message);

        let prompt = app.quiz().prompt().unwrap().to_string();
        let wrong = if prompt == "West" { "East" } else { "West" };
        let effect = app.click_region(wrong).unwrap();
        assert_eq!(
            effect,
            Effect::ClearFeedbackAfter {
                ticket: app.quiz().last_attempt().unwrap().ticket,
                delay: Duration::from_millis(100),
            }
        );

        runner.run(effect);
        let message = rx.recv().await.unwrap();
        assert!(matches!(message, Message::FeedbackElapsed(_)));
        apply(&mut app, message);

        assert_eq!(app.phase(), Phase::AwaitingClick);
        assert_eq!(app.quiz().prompt(), Some(prompt.as_str()));
    }

    #[tokio::test]
    async fn failed_load_is_reported_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.geojson");

        let mut app = App::with_quiz(&config_for(path.clone()), QuizState::seeded(1));
        let (tx, mut rx) = mpsc::unbounded_channel();
        EffectRunner::new(path, tx).run(app.start());

        apply(&mut app, rx.recv().await.unwrap());
        assert_eq!(app.phase(), Phase::Loading);
        assert!(matches!(app.load_status(), crate::app::LoadStatus::Failed(_)));
    }

    #[tokio::test]
    async fn timer_outliving_receiver_is_harmless() {
        let (tx, rx) = mpsc::unbounded_channel();
        let runner = EffectRunner::new(PathBuf::from("unused"), tx);
        let mut quiz = QuizState::seeded(1);
        quiz.initialize(vec!["A".to_string(), "B".to_string()]);
        let wrong = if quiz.prompt() == Some("A") { "B" } else { "A" };
        let ticket = quiz.submit_click(wrong).ticket().unwrap();

        drop(rx);
        runner.run(Effect::ClearFeedbackAfter {
            ticket,
            delay: Duration::from_millis(5),
        });
        tokio::time::sleep(Duration::from_millis(30)).await;
    }
}
