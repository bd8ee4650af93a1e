use std::iter;

use blockfall_engine::{Board, Piece};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use super::{BlockDisplay, Tile};

const WIDTH: usize = Board::WIDTH;
const HEIGHT: usize = Board::VISIBLE_HEIGHT;

/// The visible part of the board, with the falling piece and its ghost on top.
#[derive(Debug)]
pub struct BoardDisplay<'a> {
    board: &'a Board,
    ghost: Option<Piece>,
    falling_piece: Option<Piece>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self {
            board,
            ghost: None,
            falling_piece: None,
            block: None,
        }
    }

    pub fn ghost(self, piece: Piece) -> Self {
        Self {
            ghost: Some(piece),
            ..self
        }
    }

    pub fn falling_piece(self, piece: Piece) -> Self {
        Self {
            falling_piece: Some(piece),
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        10 * BlockDisplay::width() + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        20 * BlockDisplay::height() + super::block_vertical_margin(self.block.as_ref())
    }

    /// Tiles of the visible rows, top row first.
    fn tiles(&self) -> [[Tile; WIDTH]; HEIGHT] {
        let mut tiles = [[Tile::Empty; WIDTH]; HEIGHT];
        for (tile_row, cells) in iter::zip(&mut tiles, self.board.visible_rows()) {
            for (tile, cell) in iter::zip(tile_row, cells) {
                *tile = Tile::from(*cell);
            }
        }

        let mut overlay = |piece: Piece, make: fn(Piece) -> Tile| {
            for (col, row) in piece.cells() {
                let (Ok(col), Ok(row)) = (usize::try_from(col), usize::try_from(row)) else {
                    continue;
                };
                if col < WIDTH && row < HEIGHT {
                    let tile = &mut tiles[HEIGHT - 1 - row][col];
                    if *tile == Tile::Empty || matches!(tile, Tile::Ghost(_)) {
                        *tile = make(piece);
                    }
                }
            }
        };
        if let Some(ghost) = self.ghost {
            overlay(ghost, |piece| Tile::Ghost(piece.kind()));
        }
        if let Some(piece) = self.falling_piece {
            overlay(piece, |piece| Tile::Piece(piece.kind()));
        }
        tiles
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let col_constraints = (0..WIDTH).map(|_| Constraint::Length(BlockDisplay::width()));
        let row_constraints = (0..HEIGHT).map(|_| Constraint::Length(BlockDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        let grid_cells = area
            .layout::<HEIGHT>(&vertical)
            .into_iter()
            .map(|row| row.layout::<WIDTH>(&horizontal));

        for (grid_row, tiles) in iter::zip(grid_cells, self.tiles()) {
            for (grid_cell, tile) in iter::zip(grid_row, tiles) {
                BlockDisplay::from_tile(tile, true).render(grid_cell, buf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use blockfall_engine::PieceKind;

    use super::*;

    #[test]
    fn test_tiles_put_row_zero_at_the_bottom() {
        let board = Board::from_ascii("J.........");
        let tiles = BoardDisplay::new(&board).tiles();
        assert_eq!(tiles[HEIGHT - 1][0], Tile::Piece(PieceKind::J));
        assert_eq!(tiles[0][0], Tile::Empty);
    }

    #[test]
    fn test_falling_piece_covers_ghost() {
        let board = Board::EMPTY;
        let piece = Piece::new(PieceKind::I, 0, 1);
        let ghost = Piece::new(PieceKind::O, 0, 1);
        let tiles = BoardDisplay::new(&board)
            .ghost(ghost)
            .falling_piece(piece)
            .tiles();
        // I occupies row 0, columns 0-3; O's ghost shows only where I is not
        assert_eq!(tiles[HEIGHT - 1][1], Tile::Piece(PieceKind::I));
        assert_eq!(tiles[HEIGHT - 2][1], Tile::Ghost(PieceKind::O));
    }

    #[test]
    fn test_buffer_rows_are_hidden() {
        let board = Board::EMPTY;
        let tiles = BoardDisplay::new(&board)
            .falling_piece(Piece::spawn(PieceKind::T))
            .tiles();
        let shown = tiles.iter().flatten().filter(|tile| **tile != Tile::Empty).count();
        assert_eq!(shown, 3);
        assert_eq!(tiles[0][4], Tile::Piece(PieceKind::T));
    }
}
