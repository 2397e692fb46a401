mod complete;
mod loading;
mod map;
mod question;
mod status;

use ratatui::{prelude::*, widgets::Block};

use crate::app::App;
use crate::state::Phase;

pub use map::{MapProps, MapView, RegionStatus};

pub fn render(frame: &mut Frame, app: &App, map: &mut MapView) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    match app.phase() {
        Phase::Loading => {
            map.release();
            loading::render(frame, area, app);
        }
        Phase::AwaitingClick | Phase::ShowingFeedback | Phase::Complete => {
            render_quiz(frame, area, app, map);
        }
    }
}

fn render_quiz(frame: &mut Frame, area: Rect, app: &App, map: &mut MapView) {
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    render_header(frame, chunks[0], app);

    match app.quiz().prompt() {
        Some(prompt) => question::render(frame, chunks[1], app.text(), prompt),
        None => complete::render(frame, chunks[1], app),
    }

    map.render(frame, chunks[2], app);
    status::render_feedback(frame, chunks[3], app);
    status::render_controls(frame, chunks[4], app);
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let [title, score] =
        Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).areas(area);

    let widget = Span::styled(app.text().title, Style::default().fg(Color::Cyan).bold());
    frame.render_widget(widget, title);
    status::render_scoreboard(frame, score, app);
}
