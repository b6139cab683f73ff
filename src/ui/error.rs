use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::data::LoadError;

pub fn render(frame: &mut Frame, area: Rect, error: &LoadError) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(9),
        Constraint::Fill(1),
    ])
    .split(area);

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "LOAD FAILED",
            Style::default().fg(Color::Red).bold(),
        )),
        Line::from(""),
        Line::from(error.to_string().fg(Color::Gray)),
        Line::from(""),
        Line::from(""),
        Line::from("q to quit".fg(Color::DarkGray)),
    ];

    let widget = Paragraph::new(content)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Color::Red),
        );

    frame.render_widget(widget, chunks[1]);
}
