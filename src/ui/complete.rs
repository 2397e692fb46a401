use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::app::App;

/// Summary shown in place of the prompt once every region is found.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let text = app.text();
    let errors = app.quiz().errors();

    let mut summary = vec![
        Span::styled(format!("{}: ", text.errors), Style::default().fg(Color::DarkGray)),
        Span::styled(errors.to_string(), Style::default().fg(Color::White).bold()),
    ];
    if let Some(rank) = app.rank() {
        summary.push(Span::styled("  ·  ", Style::default().fg(Color::DarkGray)));
        summary.push(Span::styled(
            format!("{}: ", text.rank),
            Style::default().fg(Color::DarkGray),
        ));
        summary.push(Span::styled(
            rank.label(app.language()),
            Style::default().fg(rank.color()).bold(),
        ));
    }

    let content = vec![
        Line::from(Span::styled(
            text.complete,
            Style::default().fg(Color::Green).bold(),
        )),
        Line::from(summary),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(widget, area);
}
