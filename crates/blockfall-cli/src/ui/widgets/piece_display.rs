use blockfall_engine::{PieceKind, Shape};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use super::{BlockDisplay, Tile};

/// Smallest `(first_row, first_col, rows, cols)` box around the occupied cells.
fn bounding_box(shape: Shape) -> (u8, u8, u8, u8) {
    let (mut top, mut left, mut bottom, mut right) = (u8::MAX, u8::MAX, 0, 0);
    for (i, j) in shape.cells() {
        top = top.min(i);
        left = left.min(j);
        bottom = bottom.max(i);
        right = right.max(j);
    }
    if top > bottom {
        return (0, 0, 0, 0);
    }
    (top, left, bottom - top + 1, right - left + 1)
}

/// A piece kind in its spawn orientation, trimmed to its occupied cells.
#[derive(Debug)]
pub struct PieceDisplay<'a> {
    piece: Option<PieceKind>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> PieceDisplay<'a> {
    pub fn new() -> Self {
        Self {
            piece: None,
            block: None,
        }
    }

    pub fn piece(self, piece: PieceKind) -> Self {
        Self {
            piece: Some(piece),
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
        4 * BlockDisplay::width() + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        2 * BlockDisplay::height() + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let Some(kind) = self.piece else {
            BlockDisplay::from_tile(Tile::Empty, false).render(area, buf);
            return;
        };
        let shape = kind.base_shape();
        let (top, left, rows, cols) = bounding_box(shape);

        let piece_area = area.centered(
            Constraint::Length(u16::from(cols) * BlockDisplay::width()),
            Constraint::Length(u16::from(rows) * BlockDisplay::height()),
        );
        let col_constraints = (0..cols).map(|_| Constraint::Length(BlockDisplay::width()));
        let row_constraints = (0..rows).map(|_| Constraint::Length(BlockDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);
        let grid_rows = piece_area
            .layout_vec(&vertical)
            .into_iter()
            .map(|row| row.layout_vec(&horizontal));

        for (i, grid_row) in (top..).zip(grid_rows) {
            for (j, grid_cell) in (left..).zip(grid_row) {
                let tile = if shape.is_occupied(usize::from(i), usize::from(j)) {
                    Tile::Piece(kind)
                } else {
                    Tile::Empty
                };
                BlockDisplay::from_tile(tile, false).render(grid_cell, buf);
            }
        }
    }
}
