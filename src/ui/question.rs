use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::models::Text;

/// Render the prompt.
pub fn render(frame: &mut Frame, area: Rect, text: &Text, prompt: &str) {
    let content = vec![
        Line::from(Span::styled(text.find_region, Style::default().fg(Color::Gray))),
        Line::from(Span::styled(
            prompt.to_string(),
            Style::default().fg(Color::Cyan).bold(),
        )),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}
