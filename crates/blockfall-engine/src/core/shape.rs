use serde::{Deserialize, Serialize};

/// Enum representing the type of piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 0,
    /// T-piece.
    T = 1,
    /// Z-piece.
    Z = 2,
    /// S-piece.
    S = 3,
    /// L-piece.
    L = 4,
    /// J-piece.
    J = 5,
    /// O-piece.
    O = 6,
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    /// All piece kinds, in bag order before shuffling.
    pub const ALL: [Self; Self::LEN] = [
        PieceKind::I,
        PieceKind::T,
        PieceKind::Z,
        PieceKind::S,
        PieceKind::L,
        PieceKind::J,
        PieceKind::O,
    ];

    /// Returns the spawn orientation of this kind.
    #[must_use]
    pub const fn base_shape(self) -> Shape {
        BASE_SHAPES[self as usize]
    }

    /// Returns the point this kind rotates around.
    #[must_use]
    pub const fn pivot(self) -> Pivot {
        match self {
            PieceKind::I | PieceKind::O => Pivot::new(4, 4),
            PieceKind::T | PieceKind::Z | PieceKind::S | PieceKind::L | PieceKind::J => {
                Pivot::new(3, 3)
            }
        }
    }

    /// Returns the display color of this kind.
    #[must_use]
    pub const fn color(self) -> Rgb {
        match self {
            PieceKind::I => Rgb(0, 255, 255),
            PieceKind::T => Rgb(200, 0, 200),
            PieceKind::Z => Rgb(255, 0, 0),
            PieceKind::S => Rgb(0, 255, 0),
            PieceKind::L => Rgb(255, 165, 0),
            PieceKind::J => Rgb(0, 0, 255),
            PieceKind::O => Rgb(255, 255, 0),
        }
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_char(), 'I');
    /// assert_eq!(PieceKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::T => 'T',
            PieceKind::Z => 'Z',
            PieceKind::S => 'S',
            PieceKind::L => 'L',
            PieceKind::J => 'J',
            PieceKind::O => 'O',
        }
    }

    /// Parses a piece kind from a single character.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_char('S'), Some(PieceKind::S));
    /// assert_eq!(PieceKind::from_char('X'), None);
    /// ```
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(PieceKind::I),
            'T' => Some(PieceKind::T),
            'Z' => Some(PieceKind::Z),
            'S' => Some(PieceKind::S),
            'L' => Some(PieceKind::L),
            'J' => Some(PieceKind::J),
            'O' => Some(PieceKind::O),
            _ => None,
        }
    }
}

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Rotation center of a piece kind.
///
/// Stored in half-cell units measured from the top-left corner of the 4×4 box, so
/// `Pivot::new(3, 3)` is the point (1.5, 1.5): the center of local cell (1, 1).
/// I and O turn around the cell corner at (2, 2), so an O shifts by a cell within
/// the box on every quarter turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pivot {
    x2: i32,
    y2: i32,
}

impl Pivot {
    const fn new(x2: i32, y2: i32) -> Self {
        Self { x2, y2 }
    }
}

/// Occupancy mask of a piece within its 4×4 bounding box.
///
/// Row `i` counts downward from the top of the box and bit `j` of a row is column `j`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: [u8; 4],
}

impl Shape {
    /// Side length of the bounding box.
    pub const SIZE: usize = 4;

    pub const EMPTY: Self = Self { rows: [0; 4] };

    /// Builds a shape from a top-to-bottom grid of cells.
    #[must_use]
    pub const fn from_grid(grid: [[bool; 4]; 4]) -> Self {
        let mut rows = [0; 4];
        let mut i = 0;
        while i < 4 {
            let mut j = 0;
            while j < 4 {
                if grid[i][j] {
                    rows[i] |= 1 << j;
                }
                j += 1;
            }
            i += 1;
        }
        Self { rows }
    }

    #[must_use]
    pub const fn is_occupied(self, i: usize, j: usize) -> bool {
        i < Self::SIZE && j < Self::SIZE && self.rows[i] & (1 << j) != 0
    }

    /// Number of occupied cells (4 for every tetromino).
    #[must_use]
    pub const fn cell_count(self) -> u32 {
        self.rows[0].count_ones()
            + self.rows[1].count_ones()
            + self.rows[2].count_ones()
            + self.rows[3].count_ones()
    }

    /// Returns an iterator of occupied `(i, j)` cells, row by row.
    pub fn cells(self) -> impl Iterator<Item = (u8, u8)> {
        (0..4u8).flat_map(move |i| {
            (0..4u8)
                .filter(move |&j| self.is_occupied(usize::from(i), usize::from(j)))
                .map(move |j| (i, j))
        })
    }

    fn occupy(&mut self, i: usize, j: usize) {
        self.rows[i] |= 1 << j;
    }
}

/// Rotates `shape` by `quarter_turns` clockwise quarter turns around the pivot of `kind`.
///
/// Every occupied cell is taken as an offset of its center from the pivot, in half
/// cells, and mapped through the rotation matrix for `quarter_turns % 4`:
///
/// - `0`: identity
/// - `1`: 90° clockwise
/// - `2`: 180°
/// - `3`: 90° counterclockwise
///
/// The board is not consulted. Whether the result fits is the caller's business
/// (see [`Board::collides`](crate::Board::collides)).
///
/// # Panics
///
/// Panics if a cell would leave the 4×4 box. That cannot happen for a kind's own
/// rotation states.
///
/// # Examples
///
/// ```
/// use blockfall_engine::{PieceKind, rotate};
///
/// let base = PieceKind::T.base_shape();
/// let right = rotate(base, PieceKind::T, 1);
/// assert_ne!(right, base);
/// assert_eq!(rotate(right, PieceKind::T, 3), base);
/// ```
#[must_use]
pub fn rotate(shape: Shape, kind: PieceKind, quarter_turns: u8) -> Shape {
    let Pivot { x2: px, y2: py } = kind.pivot();
    let mut rotated = Shape::EMPTY;
    for (i, j) in shape.cells() {
        let dx = 2 * i32::from(j) + 1 - px;
        let dy = 2 * i32::from(i) + 1 - py;
        // y points down, so (dx, dy) -> (-dy, dx) turns clockwise on screen
        let (dx, dy) = match quarter_turns % 4 {
            0 => (dx, dy),
            1 => (-dy, dx),
            2 => (-dx, -dy),
            _ => (dy, -dx),
        };
        let new_i = usize::try_from((py + dy - 1) / 2);
        let new_j = usize::try_from((px + dx - 1) / 2);
        match (new_i, new_j) {
            (Ok(i), Ok(j)) if i < Shape::SIZE && j < Shape::SIZE => rotated.occupy(i, j),
            _ => panic!(
                "{kind:?} cell ({i}, {j}) left the 4x4 box after {quarter_turns} quarter turns"
            ),
        }
    }
    rotated
}

/// Accumulated clockwise quarter turns, kept modulo 4.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rotation(u8);

impl Rotation {
    pub const SPAWN: Self = Self(0);

    #[must_use]
    pub const fn quarter_turns(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn turned(self, quarter_turns: u8) -> Self {
        Self((self.0 + quarter_turns % 4) % 4)
    }
}

const BASE_SHAPES: [Shape; PieceKind::LEN] = {
    const C: bool = true;
    const E: bool = false;
    const EEEE: [bool; 4] = [E; 4];
    [
        // I-piece
        Shape::from_grid([EEEE, [C, C, C, C], EEEE, EEEE]),
        // T-piece
        Shape::from_grid([[E, C, E, E], [C, C, C, E], EEEE, EEEE]),
        // Z-piece
        Shape::from_grid([[C, C, E, E], [E, C, C, E], EEEE, EEEE]),
        // S-piece
        Shape::from_grid([[E, C, C, E], [C, C, E, E], EEEE, EEEE]),
        // L-piece
        Shape::from_grid([[E, E, C, E], [C, C, C, E], EEEE, EEEE]),
        // J-piece
        Shape::from_grid([[C, E, E, E], [C, C, C, E], EEEE, EEEE]),
        // O-piece
        Shape::from_grid([[E, C, C, E], [E, C, C, E], EEEE, EEEE]),
    ]
};

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(shape: Shape) -> Vec<(u8, u8)> {
        shape.cells().collect()
    }

    #[test]
    fn test_every_base_shape_has_four_cells() {
        for kind in PieceKind::ALL {
            assert_eq!(kind.base_shape().cell_count(), 4, "{kind:?}");
        }
    }

    #[test]
    fn test_four_quarter_turns_is_identity() {
        for kind in PieceKind::ALL {
            let base = kind.base_shape();
            for q in 0..4 {
                let turned = rotate(base, kind, q);
                assert_eq!(turned.cell_count(), 4, "{kind:?} q={q}");
                assert_eq!(rotate(turned, kind, 4 - q), base, "{kind:?} q={q}");
            }

            let mut shape = base;
            for _ in 0..4 {
                shape = rotate(shape, kind, 1);
            }
            assert_eq!(shape, base, "{kind:?}");
        }
    }

    #[test]
    fn test_quarter_turns_wrap_modulo_four() {
        for kind in PieceKind::ALL {
            let base = kind.base_shape();
            assert_eq!(rotate(base, kind, 5), rotate(base, kind, 1));
            assert_eq!(rotate(base, kind, 4), base);
        }
    }

    #[test]
    fn test_i_piece_rotates_into_third_column() {
        let right = rotate(PieceKind::I.base_shape(), PieceKind::I, 1);
        assert_eq!(cells(right), vec![(0, 2), (1, 2), (2, 2), (3, 2)]);

        let flipped = rotate(PieceKind::I.base_shape(), PieceKind::I, 2);
        assert_eq!(cells(flipped), vec![(2, 0), (2, 1), (2, 2), (2, 3)]);

        let left = rotate(PieceKind::I.base_shape(), PieceKind::I, 3);
        assert_eq!(cells(left), vec![(0, 1), (1, 1), (2, 1), (3, 1)]);
    }

    #[test]
    fn test_t_piece_clockwise_points_right() {
        let right = rotate(PieceKind::T.base_shape(), PieceKind::T, 1);
        assert_eq!(cells(right), vec![(0, 1), (1, 1), (1, 2), (2, 1)]);

        let left = rotate(PieceKind::T.base_shape(), PieceKind::T, 3);
        assert_eq!(cells(left), vec![(0, 1), (1, 0), (1, 1), (2, 1)]);
    }

    #[test]
    fn test_o_piece_turns_around_the_box_corner() {
        let base = PieceKind::O.base_shape();
        assert_eq!(cells(base), vec![(0, 1), (0, 2), (1, 1), (1, 2)]);

        let right = rotate(base, PieceKind::O, 1);
        assert_eq!(cells(right), vec![(1, 2), (1, 3), (2, 2), (2, 3)]);

        let flipped = rotate(base, PieceKind::O, 2);
        assert_eq!(cells(flipped), vec![(2, 1), (2, 2), (3, 1), (3, 2)]);

        let left = rotate(base, PieceKind::O, 3);
        assert_eq!(cells(left), vec![(1, 0), (1, 1), (2, 0), (2, 1)]);
    }

    #[test]
    fn test_pivots() {
        assert_eq!(PieceKind::I.pivot(), Pivot::new(4, 4));
        assert_eq!(PieceKind::O.pivot(), PieceKind::I.pivot());
        for kind in [PieceKind::T, PieceKind::Z, PieceKind::S, PieceKind::L, PieceKind::J] {
            assert_eq!(kind.pivot(), Pivot::new(3, 3));
        }
    }

    #[test]
    fn test_rotation_counter_wraps() {
        let rotation = Rotation::SPAWN.turned(3).turned(3);
        assert_eq!(rotation.quarter_turns(), 2);
        assert_eq!(Rotation::SPAWN.turned(4), Rotation::SPAWN);
    }

    #[test]
    fn test_piece_kind_char_conversion() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_char(kind.as_char()), Some(kind));
        }
        assert_eq!(PieceKind::from_char('x'), None);
    }
}
