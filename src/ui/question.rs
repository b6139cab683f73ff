use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::models::{QuestionKind, QuizVariant};
use crate::session::SessionController;

const OPTION_LABELS: [char; 8] = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H'];

pub fn render(frame: &mut Frame, area: Rect, session: &SessionController) {
    let Some(question) = session.current_question() else {
        return;
    };
    let variant = session.variant().unwrap_or(QuizVariant::Normal);
    let chunks = layout(area);

    render_header(frame, chunks[0], session);

    let revealed = variant != QuizVariant::CardGame || session.card_revealed();
    if revealed {
        render_prompt(frame, chunks[1], &question.prompt);
    } else {
        render_card_back(frame, chunks[1]);
    }

    match variant {
        QuizVariant::BoardGame => render_board(frame, chunks[2], session),
        _ if question.kind == QuestionKind::Choice => {
            render_options(frame, chunks[2], &question.options, session.selected_option());
        }
        _ => render_input(frame, chunks[2], session.current_draft()),
    }

    render_controls(frame, chunks[3], variant, question.kind);
}

fn layout(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area)
}

/// Screen rectangle of the letter grid, derived from the same layout the
/// renderer uses so pointer events can be hit-tested against it.
pub fn board_grid_rect(area: Rect, size: usize) -> Rect {
    let chunks = layout(area);
    center_grid(chunks[2], size)
}

/// Map a terminal coordinate to a grid cell index, if it falls on the
/// grid. Each cell is two columns wide and one row tall.
pub fn board_cell_at(grid: Rect, size: usize, column: u16, row: u16) -> Option<usize> {
    if column < grid.x || row < grid.y {
        return None;
    }
    let col = ((column - grid.x) / 2) as usize;
    let row = (row - grid.y) as usize;
    if col < size && row < size {
        Some(row * size + col)
    } else {
        None
    }
}

fn center_grid(area: Rect, size: usize) -> Rect {
    let width = (size as u16 * 2).min(area.width);
    let height = (size as u16).min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn render_header(frame: &mut Frame, area: Rect, session: &SessionController) {
    let halves = Layout::horizontal([Constraint::Fill(1), Constraint::Length(8)]).split(area);

    let mut left = format!(
        "{}/{}",
        session.current_index() + 1,
        session.total_questions()
    );
    if let Some(question) = session.current_question() {
        if !question.category.is_empty() {
            left.push_str(&format!("  ·  {}", question.category));
        }
        if question.points > 0 {
            left.push_str(&format!("  ·  {} pts", question.points));
        }
    }
    frame.render_widget(Paragraph::new(left).fg(Color::DarkGray), halves[0]);

    if let Some(remaining) = session.remaining_secs() {
        let color = if remaining <= 5 {
            Color::Red
        } else {
            Color::DarkGray
        };
        let widget = Paragraph::new(format!("{}s", remaining))
            .alignment(Alignment::Right)
            .fg(color);
        frame.render_widget(widget, halves[1]);
    }
}

fn render_prompt(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .bold();
    frame.render_widget(widget, area);
}

fn render_card_back(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("· · ·  card face down  · · ·")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

fn render_options(frame: &mut Frame, area: Rect, options: &[String], selected: usize) {
    let mut lines: Vec<Line> = Vec::with_capacity(options.len() * 2);

    for (index, option) in options.iter().enumerate() {
        let is_selected = index == selected;
        let style = if is_selected {
            Style::default().fg(Color::Cyan).bold()
        } else {
            Style::default().fg(Color::Gray)
        };
        let marker = if is_selected { ">" } else { " " };
        let label = OPTION_LABELS.get(index).copied().unwrap_or('?');

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), style),
            Span::styled(format!("{}. ", label), style),
            Span::styled(option.as_str(), style),
        ]));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_input(frame: &mut Frame, area: Rect, draft: &str) {
    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("> ", Style::default().fg(Color::DarkGray)),
            Span::styled(draft, Style::default().fg(Color::Cyan).bold()),
            Span::styled("_", Style::default().fg(Color::DarkGray)),
        ]),
    ];
    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn render_board(frame: &mut Frame, area: Rect, session: &SessionController) {
    let Some(board) = session.board() else {
        return;
    };
    let size = board.size();
    let grid_area = center_grid(area, size);

    let selected_style = Style::default().fg(Color::Black).bg(Color::Cyan).bold();
    let normal_style = Style::default().fg(Color::Gray);

    let mut lines: Vec<Line> = Vec::with_capacity(size);
    for row in 0..size {
        let mut spans = Vec::with_capacity(size);
        for col in 0..size {
            let index = row * size + col;
            let selected = session
                .selection()
                .is_some_and(|tracker| tracker.is_selected(index));
            let style = if selected { selected_style } else { normal_style };
            spans.push(Span::styled(format!("{} ", board.letter(index)), style));
        }
        lines.push(Line::from(spans));
    }
    frame.render_widget(Paragraph::new(lines), grid_area);

    // Committed candidate under the grid.
    let draft = session.current_draft();
    if !draft.is_empty() && grid_area.y + grid_area.height < area.y + area.height {
        let below = Rect {
            x: area.x,
            y: grid_area.y + grid_area.height,
            width: area.width,
            height: 1,
        };
        let widget = Paragraph::new(format!("found: {}", draft))
            .alignment(Alignment::Center)
            .fg(Color::Cyan);
        frame.render_widget(widget, below);
    }
}

fn render_controls(frame: &mut Frame, area: Rect, variant: QuizVariant, kind: QuestionKind) {
    let text = match (variant, kind) {
        (QuizVariant::BoardGame, _) => "drag to select  ·  enter submit  ·  esc quit",
        (QuizVariant::CardGame, QuestionKind::Choice) => {
            "tab flip  ·  j/k navigate  ·  enter submit  ·  left prev  ·  esc quit"
        }
        (QuizVariant::CardGame, QuestionKind::FreeText) => {
            "tab flip  ·  type answer  ·  enter submit  ·  left prev  ·  esc quit"
        }
        (_, QuestionKind::Choice) => "j/k navigate  ·  enter submit  ·  left prev  ·  esc quit",
        (_, QuestionKind::FreeText) => "type answer  ·  enter submit  ·  left prev  ·  esc quit",
    };
    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_hit_testing_round_trips() {
        let grid = Rect::new(10, 5, 20, 10);
        let size = 10;

        assert_eq!(board_cell_at(grid, size, 10, 5), Some(0));
        assert_eq!(board_cell_at(grid, size, 11, 5), Some(0)); // trailing space column
        assert_eq!(board_cell_at(grid, size, 12, 5), Some(1));
        assert_eq!(board_cell_at(grid, size, 10, 6), Some(size));
        assert_eq!(board_cell_at(grid, size, 29, 14), Some(99));
        assert_eq!(board_cell_at(grid, size, 9, 5), None);
        assert_eq!(board_cell_at(grid, size, 10, 15), None);
        assert_eq!(board_cell_at(grid, size, 30, 5), None);
    }

    #[test]
    fn test_grid_rect_is_stable_for_same_area() {
        let area = Rect::new(0, 0, 80, 24);
        assert_eq!(board_grid_rect(area, 10), board_grid_rect(area, 10));
    }
}
