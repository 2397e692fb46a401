use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::{App, LoadStatus};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Percentage(35),
        Constraint::Length(9),
        Constraint::Fill(1),
    ])
    .split(area);

    let text = app.text();
    let mut content = vec![
        Line::from(""),
        Line::from(Span::styled(
            text.title,
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
    ];

    match app.load_status() {
        LoadStatus::Failed(reason) => {
            content.push(Line::from(Span::styled(
                text.load_failed,
                Style::default().fg(Color::Red).bold(),
            )));
            content.push(Line::from(Span::styled(
                reason.clone(),
                Style::default().fg(Color::DarkGray),
            )));
        }
        // A loaded but empty catalog never produces a prompt either.
        LoadStatus::Pending | LoadStatus::Ready => {
            content.push(Line::from(Span::styled(
                text.loading,
                Style::default().fg(Color::Yellow),
            )));
        }
    }
    content.push(Line::from(""));
    content.push(Line::from(Span::styled(
        "t language  ·  q quit",
        Style::default().fg(Color::DarkGray),
    )));

    let widget = Paragraph::new(content)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Color::DarkGray),
        );
    frame.render_widget(widget, chunks[1]);
}
