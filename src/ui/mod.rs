mod error;
mod feedback;
mod question;
mod result;

use ratatui::{
    prelude::*,
    widgets::{Block, Paragraph},
};

pub use question::{board_cell_at, board_grid_rect};

use crate::session::{Phase, SessionController};

pub fn render(frame: &mut Frame, session: &SessionController, result_scroll: usize) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    match session.phase() {
        Phase::Loading => render_loading(frame, area),
        Phase::Answering => question::render(frame, area, session),
        Phase::Feedback(feedback) => feedback::render(frame, area, feedback),
        Phase::Finished => result::render(frame, area, session, result_scroll),
        Phase::Error(error) => error::render(frame, area, error),
    }
}

fn render_loading(frame: &mut Frame, area: Rect) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .split(area);

    let widget = Paragraph::new("loading quiz ...")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, chunks[1]);
}
