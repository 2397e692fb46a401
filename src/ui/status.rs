//! Score line, feedback line and key hints.

use ratatui::{prelude::*, widgets::Paragraph};

use crate::app::App;
use crate::state::{Attempt, Phase};

pub fn render_scoreboard(frame: &mut Frame, area: Rect, app: &App) {
    let text = app.text();
    let quiz = app.quiz();

    let line = Line::from(vec![
        Span::styled(format!("{}: ", text.errors), Style::default().fg(Color::DarkGray)),
        Span::styled(
            quiz.errors().to_string(),
            Style::default().fg(Color::Red).bold(),
        ),
        Span::styled("  ·  ", Style::default().fg(Color::DarkGray)),
        Span::styled(format!("{}: ", text.solved), Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("{}/{}", quiz.solved().len(), quiz.catalog().len()),
            Style::default().fg(Color::Green).bold(),
        ),
        Span::styled("  ·  ", Style::default().fg(Color::DarkGray)),
        Span::styled(app.language().label(), Style::default().fg(Color::Gray)),
    ]);

    frame.render_widget(Paragraph::new(line).alignment(Alignment::Right), area);
}

pub fn render_feedback(frame: &mut Frame, area: Rect, app: &App) {
    let Some(attempt) = app.quiz().last_attempt() else {
        return;
    };

    let widget = Paragraph::new(feedback_message(app, attempt)).alignment(Alignment::Center);
    frame.render_widget(widget, area);
}

fn feedback_message(app: &App, attempt: &Attempt) -> Line<'static> {
    let text = app.text();
    if attempt.correct {
        Line::from(Span::styled(
            text.correct,
            Style::default().fg(Color::Green).bold(),
        ))
    } else {
        Line::from(Span::styled(
            format!("{} {}", text.incorrect_was, attempt.region),
            Style::default().fg(Color::Red).bold(),
        ))
    }
}

pub fn render_controls(frame: &mut Frame, area: Rect, app: &App) {
    let text = app.text();
    let mut hint = match app.phase() {
        Phase::Complete => text.complete_controls.to_string(),
        _ => text.controls.to_string(),
    };
    if app.interaction().allows_zoom() && app.phase() != Phase::Complete {
        hint.push_str("  ·  +/- zoom");
    }

    let widget = Paragraph::new(hint)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
