use std::fmt;

use super::{
    BOARD_HEIGHT, BOARD_WIDTH, VISIBLE_HEIGHT,
    piece::Piece,
    shape::{PieceKind, Shape},
};

/// A single cell of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Cell {
    /// Empty cell (no piece).
    #[default]
    Empty,
    /// Cell written by a locked piece of a specific type.
    Filled(PieceKind),
}

impl Cell {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    #[must_use]
    pub fn is_occupied(self) -> bool {
        !self.is_empty()
    }

    #[must_use]
    pub fn kind(self) -> Option<PieceKind> {
        match self {
            Cell::Empty => None,
            Cell::Filled(kind) => Some(kind),
        }
    }
}

type Row = [Cell; BOARD_WIDTH];

const EMPTY_ROW: Row = [Cell::Empty; BOARD_WIDTH];

/// The playfield: 10 columns by 40 rows of [`Cell`]s.
///
/// Row 0 is the floor. Rows `0..20` are visible; rows `20..40` are a buffer above
/// the visible field that only matters for detecting top-out.
///
/// Cells become occupied only through [`Board::lock`]. The falling piece is never
/// stored here.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Board, Piece, PieceKind};
///
/// let mut board = Board::EMPTY;
/// let piece = Piece::spawn(PieceKind::O);
///
/// let landed = piece.moved(0, -board.drop_offset(&piece));
/// assert!(!board.lock(&landed));
/// assert!(board.collides_piece(&landed));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    rows: [Row; BOARD_HEIGHT],
}

impl Board {
    pub const WIDTH: usize = BOARD_WIDTH;
    pub const HEIGHT: usize = BOARD_HEIGHT;
    pub const VISIBLE_HEIGHT: usize = VISIBLE_HEIGHT;

    pub const EMPTY: Self = Self {
        rows: [EMPTY_ROW; BOARD_HEIGHT],
    };

    fn index(col: i32, row: i32) -> Option<(usize, usize)> {
        let col = usize::try_from(col).ok().filter(|&c| c < BOARD_WIDTH)?;
        let row = usize::try_from(row).ok().filter(|&r| r < BOARD_HEIGHT)?;
        Some((col, row))
    }

    /// Returns the cell at `(col, row)`, or `None` outside the board.
    #[must_use]
    pub fn cell(&self, col: i32, row: i32) -> Option<Cell> {
        let (col, row) = Self::index(col, row)?;
        Some(self.rows[row][col])
    }

    /// Checks whether `shape` placed at `(x, y)` hits a wall, the floor, the ceiling
    /// or an occupied cell.
    ///
    /// This is the only bounds check in the engine. Every move, rotation and drop
    /// goes through it.
    #[must_use]
    pub fn collides(&self, shape: Shape, x: i32, y: i32) -> bool {
        shape.cells().any(|(i, j)| {
            let col = x + i32::from(j);
            let row = y - i32::from(i);
            self.cell(col, row).is_none_or(Cell::is_occupied)
        })
    }

    #[must_use]
    pub fn collides_piece(&self, piece: &Piece) -> bool {
        self.collides(piece.shape(), piece.x(), piece.y())
    }

    /// Returns how many rows `piece` can fall before it would collide.
    ///
    /// Offsets are tried from 0 upward until the next one collides.
    #[must_use]
    pub fn drop_offset(&self, piece: &Piece) -> i32 {
        let mut offset = 0;
        while !self.collides(piece.shape(), piece.x(), piece.y() - offset - 1) {
            offset += 1;
        }
        offset
    }

    /// Writes the piece's cells into the board.
    ///
    /// Returns `true` if any written cell is at or above the visible height, which
    /// means the game has topped out. The cells are written either way.
    pub fn lock(&mut self, piece: &Piece) -> bool {
        let mut overflowed = false;
        for (col, row) in piece.cells() {
            let index = Self::index(col, row);
            debug_assert!(index.is_some(), "locking {piece:?} outside the board");
            let Some((col, row)) = index else {
                continue;
            };
            self.rows[row][col] = Cell::Filled(piece.kind());
            overflowed |= row >= VISIBLE_HEIGHT;
        }
        overflowed
    }

    /// Removes every full visible row and returns how many were removed.
    ///
    /// Rows above a removed row, buffer rows included, move down to close the gap
    /// and empty rows enter at the top.
    pub fn clear_full_rows(&mut self) -> usize {
        let mut kept = 0;
        for row in 0..BOARD_HEIGHT {
            let is_full = self.rows[row].iter().all(|cell| cell.is_occupied());
            if row < VISIBLE_HEIGHT && is_full {
                continue;
            }
            if kept != row {
                self.rows[kept] = self.rows[row];
            }
            kept += 1;
        }
        self.rows[kept..].fill(EMPTY_ROW);
        BOARD_HEIGHT - kept
    }

    /// Returns an iterator over the visible rows, top to bottom.
    pub fn visible_rows(&self) -> impl Iterator<Item = &[Cell; BOARD_WIDTH]> {
        self.rows[..VISIBLE_HEIGHT].iter().rev()
    }

    /// Returns the `(column, row)` of every occupied cell.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (i32, i32, PieceKind)> + '_ {
        self.rows.iter().zip(0..).flat_map(|(cells, row)| {
            cells
                .iter()
                .zip(0..)
                .filter_map(move |(cell, col)| cell.kind().map(|kind| (col, row, kind)))
        })
    }

    /// Creates a `Board` from ASCII art for testing.
    ///
    /// Each non-blank line is one row of 10 cells, listed top to bottom; the last line
    /// is row 0. `.` is empty and a piece letter (`I`, `T`, ...) is a cell filled
    /// by that kind.
    ///
    /// # Panics
    ///
    /// Panics on a row that is not 10 cells wide, an unknown character, or more
    /// than 40 rows.
    #[must_use]
    pub fn from_ascii(art: &str) -> Self {
        let mut board = Self::EMPTY;
        let lines: Vec<&str> = art
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        assert!(
            lines.len() <= BOARD_HEIGHT,
            "at most {BOARD_HEIGHT} rows, got {}",
            lines.len()
        );

        for (row, line) in lines.iter().rev().enumerate() {
            let cells: Vec<char> = line.chars().collect();
            assert_eq!(
                cells.len(),
                BOARD_WIDTH,
                "Each row must have exactly {BOARD_WIDTH} cells, got {} at row {row}",
                cells.len(),
            );
            for (col, ch) in cells.into_iter().enumerate() {
                board.rows[row][col] = match ch {
                    '.' => Cell::Empty,
                    _ => Cell::Filled(
                        PieceKind::from_char(ch)
                            .unwrap_or_else(|| panic!("unknown cell {ch:?} at row {row}")),
                    ),
                };
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Only rows up to the highest occupied one, to keep test failures readable.
        let height = self
            .rows
            .iter()
            .rposition(|row| row.iter().any(|cell| cell.is_occupied()))
            .map_or(0, |top| top + 1);
        writeln!(f, "Board {{")?;
        for row in self.rows[..height].iter().rev() {
            let line: String = row
                .iter()
                .map(|cell| cell.kind().map_or('.', PieceKind::as_char))
                .collect();
            writeln!(f, "    {line}")?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_board() {
        let board = Board::EMPTY;
        for row in 0..40 {
            for col in 0..10 {
                assert_eq!(board.cell(col, row), Some(Cell::Empty));
            }
        }
        assert_eq!(board.cell(-1, 0), None);
        assert_eq!(board.cell(10, 0), None);
        assert_eq!(board.cell(0, -1), None);
        assert_eq!(board.cell(0, 40), None);
    }

    #[test]
    fn test_collides_outside_bounds_for_every_shape() {
        let board = Board::EMPTY;
        for kind in PieceKind::ALL {
            for q in 0..4 {
                let piece = Piece::spawn(kind).rotated(q);
                let shape = piece.shape();
                let (min_j, max_j, min_i, max_i) = shape.cells().fold(
                    (4, 0, 4, 0),
                    |(min_j, max_j, min_i, max_i), (i, j)| {
                        let (i, j) = (i32::from(i), i32::from(j));
                        (min_j.min(j), max_j.max(j), min_i.min(i), max_i.max(i))
                    },
                );

                // flush against each edge: no collision
                assert!(!board.collides(shape, -min_j, 20));
                assert!(!board.collides(shape, 9 - max_j, 20));
                assert!(!board.collides(shape, 3, max_i));
                assert!(!board.collides(shape, 3, 39 + min_i));

                // one step further: collision
                assert!(board.collides(shape, -min_j - 1, 20), "{kind:?} q={q} left");
                assert!(board.collides(shape, 10 - max_j, 20), "{kind:?} q={q} right");
                assert!(board.collides(shape, 3, max_i - 1), "{kind:?} q={q} floor");
                assert!(board.collides(shape, 3, 40 + min_i), "{kind:?} q={q} ceiling");
            }
        }
    }

    #[test]
    fn test_collides_with_occupied_cell() {
        let board = Board::from_ascii(
            "
            ....T.....
            ",
        );
        let piece = Piece::new(PieceKind::O, 3, 1);
        // O cells at columns 4-5, rows 0-1
        assert!(board.collides_piece(&piece));
        assert!(!board.collides_piece(&piece.moved(1, 0)));
    }

    #[test]
    fn test_lock_writes_cells_with_kind() {
        let mut board = Board::EMPTY;
        let piece = Piece::new(PieceKind::J, 0, 1);
        assert!(!board.lock(&piece));
        assert_eq!(board, Board::from_ascii("J.........\nJJJ......."));
    }

    #[test]
    fn test_lock_reports_overflow() {
        let mut board = Board::EMPTY;
        // T at spawn has one cell on row 20
        assert!(board.lock(&Piece::spawn(PieceKind::T)));
        assert_eq!(board.cell(4, 20), Some(Cell::Filled(PieceKind::T)));

        let mut board = Board::EMPTY;
        // I at spawn sits on row 19 only
        assert!(!board.lock(&Piece::spawn(PieceKind::I)));
    }

    #[test]
    fn test_drop_offset() {
        let board = Board::from_ascii(
            "
            ...OO.....
            ...OO.....
            ",
        );
        let piece = Piece::new(PieceKind::I, 0, 10);
        // I cells at row 9, columns 0-3; column 3 is occupied up to row 1
        assert_eq!(board.drop_offset(&piece), 7);
        assert_eq!(board.drop_offset(&piece.moved(6, 0)), 9);
    }

    #[test]
    fn test_drop_offset_lands_on_floating_cell() {
        let board = Board::from_ascii(
            "
            .Z........
            ..........
            ..........
            ",
        );
        let piece = Piece::new(PieceKind::T, 0, 10);
        assert_eq!(board.drop_offset(&piece), 6);
        assert_eq!(board.drop_offset(&piece.moved(2, 0)), 9);

        let landed = piece.moved(0, -6);
        assert!(!board.collides_piece(&landed));
        assert!(board.collides_piece(&landed.moved(0, -1)));
    }

    #[test]
    fn test_clear_full_rows_basic() {
        let mut board = Board::from_ascii(
            "
            ..T.......
            IIIIIIIIII
            ",
        );
        assert_eq!(board.clear_full_rows(), 1);
        assert_eq!(board, Board::from_ascii("..T......."));
    }

    #[test]
    fn test_clear_full_rows_non_adjacent() {
        let mut board = Board::from_ascii(
            "
            .........L
            JJJJJJJJJJ
            S.........
            OOOOOOOOOO
            ",
        );
        assert_eq!(board.clear_full_rows(), 2);
        assert_eq!(board, Board::from_ascii(".........L\nS........."));
    }

    #[test]
    fn test_clear_full_rows_with_partial_rows() {
        let art = "
            IIIIIIIII.
            .TTTTTTTTT
            ";
        let mut board = Board::from_ascii(art);
        assert_eq!(board.clear_full_rows(), 0);
        assert_eq!(board, Board::from_ascii(art));
    }

    #[test]
    fn test_clear_full_rows_shifts_buffer_rows_down() {
        let mut board = Board::EMPTY;
        board.rows[0] = [Cell::Filled(PieceKind::I); BOARD_WIDTH];
        board.rows[25][7] = Cell::Filled(PieceKind::Z);
        board.rows[39][0] = Cell::Filled(PieceKind::S);

        assert_eq!(board.clear_full_rows(), 1);
        assert_eq!(board.cell(7, 24), Some(Cell::Filled(PieceKind::Z)));
        assert_eq!(board.cell(0, 38), Some(Cell::Filled(PieceKind::S)));
        assert_eq!(board.cell(0, 39), Some(Cell::Empty));
        assert_eq!(board.cell(0, 0), Some(Cell::Empty));
    }

    #[test]
    fn test_full_buffer_row_is_not_cleared() {
        let mut board = Board::EMPTY;
        board.rows[VISIBLE_HEIGHT] = [Cell::Filled(PieceKind::O); BOARD_WIDTH];
        assert_eq!(board.clear_full_rows(), 0);
        assert!(board.rows[VISIBLE_HEIGHT].iter().all(|cell| cell.is_occupied()));
    }

    #[test]
    fn test_visible_rows_top_to_bottom() {
        let board = Board::from_ascii("T.........\n.........I");
        let rows: Vec<_> = board.visible_rows().collect();
        assert_eq!(rows.len(), VISIBLE_HEIGHT);
        assert_eq!(rows[VISIBLE_HEIGHT - 1][9], Cell::Filled(PieceKind::I));
        assert_eq!(rows[VISIBLE_HEIGHT - 2][0], Cell::Filled(PieceKind::T));
    }

    #[test]
    fn test_occupied_cells() {
        let board = Board::from_ascii("T.........\n.........I");
        let cells: Vec<_> = board.occupied_cells().collect();
        assert_eq!(cells, vec![(9, 0, PieceKind::I), (0, 1, PieceKind::T)]);
    }
}
