use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::session::SessionController;

const PROMPT_PREVIEW_LENGTH: usize = 55;

pub fn render(frame: &mut Frame, area: Rect, session: &SessionController, scroll: usize) {
    let results = session.results();
    let score = results.iter().filter(|r| r.was_correct).count();
    let total = results.len();
    let percentage = calculate_percentage(score, total);
    let grade_color = get_grade_color(percentage);

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(6),
        Constraint::Fill(1),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    render_score_summary(frame, chunks[1], session, score, total, percentage, grade_color);
    render_breakdown(frame, chunks[2], session, scroll);
    render_controls(frame, chunks[3]);
}

fn calculate_percentage(score: usize, total: usize) -> f64 {
    if total > 0 {
        (score as f64 / total as f64) * 100.0
    } else {
        0.0
    }
}

fn get_grade_color(percentage: f64) -> Color {
    match percentage as u32 {
        90..=100 => Color::Green,
        70..=89 => Color::Cyan,
        50..=69 => Color::Yellow,
        _ => Color::Red,
    }
}

fn render_score_summary(
    frame: &mut Frame,
    area: Rect,
    session: &SessionController,
    score: usize,
    total: usize,
    percentage: f64,
    grade_color: Color,
) {
    let topic = session
        .quiz()
        .map(|q| q.topic.as_str())
        .unwrap_or("RESULTS");

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            topic.to_uppercase(),
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("{} / {}  ({:.0}%)", score, total, percentage),
            Style::default().fg(grade_color).bold(),
        )),
        Line::from(""),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn render_breakdown(frame: &mut Frame, area: Rect, session: &SessionController, scroll: usize) {
    let questions = session.quiz().map(|q| q.questions.as_slice()).unwrap_or(&[]);

    let lines: Vec<Line> = session
        .results()
        .iter()
        .enumerate()
        .map(|(index, result)| {
            let (symbol, color) = if result.was_correct {
                ("+", Color::Green)
            } else {
                ("-", Color::Red)
            };
            let preview = questions
                .get(index)
                .map(|q| truncate_prompt(&q.prompt))
                .unwrap_or_default();

            Line::from(vec![
                Span::styled(format!(" {} ", symbol), Style::default().fg(color)),
                Span::styled(
                    format!("{:2}. ", index + 1),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(preview, Style::default().fg(Color::Gray)),
            ])
        })
        .collect();

    let widget = Paragraph::new(lines)
        .block(Block::default().padding(Padding::horizontal(1)))
        .scroll((scroll as u16, 0));
    frame.render_widget(widget, area);
}

fn truncate_prompt(text: &str) -> String {
    let char_count = text.chars().count();
    if char_count > PROMPT_PREVIEW_LENGTH {
        let truncated: String = text.chars().take(PROMPT_PREVIEW_LENGTH).collect();
        format!("{}...", truncated)
    } else {
        text.to_string()
    }
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("j/k scroll  ·  q quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
