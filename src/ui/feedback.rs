use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::session::Feedback;

pub fn render(frame: &mut Frame, area: Rect, feedback: &Feedback) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(11),
        Constraint::Fill(1),
    ])
    .split(area);

    let (verdict, color) = if feedback.is_correct {
        ("CORRECT", Color::Green)
    } else {
        ("INCORRECT", Color::Red)
    };

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(verdict, Style::default().fg(color).bold())),
        Line::from(""),
        Line::from(feedback.prompt.as_str().fg(Color::Gray)),
        Line::from(""),
        Line::from(vec![
            Span::styled("answer: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                feedback.correct_answer.as_str(),
                Style::default().fg(Color::White).bold(),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "ENTER",
            Style::default().fg(Color::Green).bold(),
        )),
        Line::from("to continue".fg(Color::DarkGray)),
    ];

    let widget = Paragraph::new(content)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(color),
        );

    frame.render_widget(widget, chunks[1]);
}
