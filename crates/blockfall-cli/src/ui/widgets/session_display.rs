use blockfall_engine::{GameSession, Termination};
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};

use super::{BoardDisplay, PieceStackDisplay, StatsDisplay, color, style};

const NEXT_PIECES: usize = 5;

/// Stats, board and preview of one session, side by side.
#[derive(Debug)]
pub struct SessionDisplay<'a> {
    session: &'a GameSession,
    ended: Option<Termination>,
}

impl<'a> SessionDisplay<'a> {
    pub fn new(session: &'a GameSession) -> Self {
        Self {
            session,
            ended: None,
        }
    }

    /// Shows a game-over banner over the board.
    pub fn ended(self, reason: Termination) -> Self {
        Self {
            ended: Some(reason),
            ..self
        }
    }
}

impl Widget for SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let panel = |title: &'static str| {
            let border_style = if self.ended.is_some() {
                color::RED
            } else {
                color::WHITE
            };
            Block::bordered()
                .title(Line::from(title).centered())
                .padding(Padding::horizontal(1))
                .border_style(border_style)
                .style(style::DEFAULT)
        };

        let mut game_board = BoardDisplay::new(self.session.board())
            .block(panel("").padding(Padding::ZERO));
        if self.ended.is_none() {
            game_board = game_board
                .ghost(self.session.ghost_piece())
                .falling_piece(*self.session.falling_piece());
        }
        let piece_stack = PieceStackDisplay::new(self.session.next_pieces().take(NEXT_PIECES))
            .block(panel("NEXT"));
        let stats = StatsDisplay::new(self.session).block(panel("STATS"));

        let [left_column, center_column, right_column] = Layout::horizontal([
            Constraint::Length(stats.width()),
            Constraint::Length(game_board.width()),
            Constraint::Length(piece_stack.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [stats_area] = Layout::vertical([Constraint::Length(stats.height())]).areas(left_column);
        let [board_area] =
            Layout::vertical([Constraint::Length(game_board.height())]).areas(center_column);
        let [piece_stack_area] =
            Layout::vertical([Constraint::Length(piece_stack.height())]).areas(right_column);

        let game_board_width = game_board.width();
        stats.render(stats_area, buf);
        game_board.render(board_area, buf);
        piece_stack.render(piece_stack_area, buf);

        if let Some(reason) = self.ended {
            let block = Block::new().style(style::GAME_OVER);
            let text = Text::from(vec![
                Line::from("GAME OVER"),
                Line::from(reason.to_string().to_uppercase()),
            ])
            .style(style::GAME_OVER)
            .centered();
            let area =
                board_area.centered(Constraint::Length(game_board_width), Constraint::Length(4));
            let inner = block.inner(area);
            Clear.render(area, buf);
            block.render(area, buf);
            text.render(inner.centered_vertically(Constraint::Length(2)), buf);
        }
    }
}
