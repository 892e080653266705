use arrayvec::ArrayVec;
use rand::{Rng, distr::StandardUniform, prelude::Distribution};

/// Largest shape extent in either dimension (the I piece is 4 cells long).
pub(crate) const MAX_SHAPE_EXTENT: usize = 4;

type ShapeRow = ArrayVec<bool, MAX_SHAPE_EXTENT>;

/// Enum representing the type of piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PieceKind {
    /// T-piece.
    T = 0,
    /// O-piece.
    O = 1,
    /// S-piece.
    S = 2,
    /// Z-piece.
    Z = 3,
    /// L-piece.
    L = 4,
    /// J-piece.
    J = 5,
    /// I-piece.
    I = 6,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        match rng.random_range(0..=6) {
            0 => PieceKind::T,
            1 => PieceKind::O,
            2 => PieceKind::S,
            3 => PieceKind::Z,
            4 => PieceKind::L,
            5 => PieceKind::J,
            _ => PieceKind::I,
        }
    }
}

impl PieceKind {
    /// Number of piece kinds (7).
    pub const LEN: usize = 7;

    /// All piece kinds, in catalogue order.
    pub const ALL: [Self; Self::LEN] = [
        PieceKind::T,
        PieceKind::O,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::L,
        PieceKind::J,
        PieceKind::I,
    ];

    /// Returns the canonical (unrotated) shape matrix for this kind.
    #[must_use]
    pub fn shape(self) -> PieceShape {
        const C: bool = true;
        const E: bool = false;

        let rows: &[&[bool]] = match self {
            PieceKind::T => &[&[C, C, C], &[E, C, E]],
            PieceKind::O => &[&[C, C], &[C, C]],
            PieceKind::S => &[&[C, C, E], &[E, C, C]],
            PieceKind::Z => &[&[E, C, C], &[C, C, E]],
            PieceKind::L => &[&[C, E, E], &[C, C, C]],
            PieceKind::J => &[&[E, E, C], &[C, C, C]],
            PieceKind::I => &[&[C, C, C, C]],
        };
        PieceShape::from_rows(rows)
    }
}

/// A rectangular boolean matrix of occupied cells, relative to a top-left
/// origin.
///
/// Shapes are never mutated in place: [`PieceShape::rotated`] produces a new
/// matrix, so a rejected rotation simply drops the candidate. A shape's
/// dimensions follow its matrix (the I piece is 1×4 unrotated, 4×1 after one
/// rotation).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceShape {
    rows: ArrayVec<ShapeRow, MAX_SHAPE_EXTENT>,
}

impl PieceShape {
    pub(crate) fn from_rows(rows: &[&[bool]]) -> Self {
        debug_assert!(!rows.is_empty());
        debug_assert!(rows.iter().all(|row| row.len() == rows[0].len()));
        Self {
            rows: rows
                .iter()
                .map(|row| row.iter().copied().collect())
                .collect(),
        }
    }

    /// Width of the shape matrix in columns.
    #[must_use]
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, ArrayVec::len)
    }

    /// Height of the shape matrix in rows.
    #[must_use]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Returns an iterator of occupied (col, row) offsets within the matrix.
    pub fn occupied_offsets(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows.iter().enumerate().flat_map(|(dy, row)| {
            row.iter()
                .enumerate()
                .filter_map(move |(dx, &occupied)| occupied.then_some((dx, dy)))
        })
    }

    /// Returns the shape turned by a quarter turn: the matrix is transposed
    /// and the transposed rows are then reversed in order. Four turns restore
    /// the original matrix.
    #[must_use]
    pub fn rotated(&self) -> Self {
        let mut rows = ArrayVec::new();
        for col in (0..self.width()).rev() {
            rows.push(self.rows.iter().map(|row| row[col]).collect());
        }
        Self { rows }
    }
}

/// The currently falling piece: a kind, its (possibly rotated) shape, and
/// the grid offset of the shape matrix's top-left corner.
///
/// Movement and rotation produce candidate pieces; the engine commits a
/// candidate only after the collision check passes, so an `ActivePiece`
/// held by the engine is always at a legal position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivePiece {
    kind: PieceKind,
    shape: PieceShape,
    x: i32,
    y: i32,
}

impl ActivePiece {
    /// Creates a piece of the given kind at column `x`, row 0, in its
    /// canonical orientation.
    #[must_use]
    pub fn spawn(kind: PieceKind, x: i32) -> Self {
        Self {
            kind,
            shape: kind.shape(),
            x,
            y: 0,
        }
    }

    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub fn shape(&self) -> &PieceShape {
        &self.shape
    }

    #[must_use]
    pub fn x(&self) -> i32 {
        self.x
    }

    #[must_use]
    pub fn y(&self) -> i32 {
        self.y
    }

    /// Candidate shifted one column left (`dx = -1`) or right (`dx = 1`).
    #[must_use]
    pub fn shifted(&self, dx: i32) -> Self {
        Self {
            x: self.x + dx,
            ..self.clone()
        }
    }

    /// Candidate moved down one row.
    #[must_use]
    pub fn descended(&self) -> Self {
        Self {
            y: self.y + 1,
            ..self.clone()
        }
    }

    /// Candidate with the shape turned by a quarter turn in place.
    #[must_use]
    pub fn rotated(&self) -> Self {
        Self {
            shape: self.shape.rotated(),
            ..self.clone()
        }
    }

    /// Returns an iterator of absolute (x, y) grid cells covered by the
    /// piece.
    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn occupied_cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape
            .occupied_offsets()
            .map(|(dx, dy)| (self.x + dx as i32, self.y + dy as i32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogue_dimensions() {
        for kind in PieceKind::ALL {
            let shape = kind.shape();
            let expected = match kind {
                PieceKind::I => (4, 1),
                PieceKind::O => (2, 2),
                _ => (3, 2),
            };
            assert_eq!(
                (shape.width(), shape.height()),
                expected,
                "unexpected dimensions for {kind:?}"
            );
        }
    }

    #[test]
    fn test_catalogue_cell_counts() {
        // Every tetromino covers exactly four cells.
        for kind in PieceKind::ALL {
            assert_eq!(kind.shape().occupied_offsets().count(), 4, "{kind:?}");
        }
    }

    #[test]
    fn test_rotation_swaps_dimensions() {
        let shape = PieceKind::I.shape();
        let rotated = shape.rotated();
        assert_eq!((rotated.width(), rotated.height()), (1, 4));
    }

    #[test]
    fn test_rotation_of_l_shape() {
        const C: bool = true;
        const E: bool = false;

        // X..      .X
        // XXX  ->  .X
        //          XX
        let rotated = PieceKind::L.shape().rotated();
        assert_eq!(
            rotated,
            PieceShape::from_rows(&[&[E, C], &[E, C], &[C, C]])
        );
    }

    #[test]
    fn test_four_rotations_restore_shape() {
        for kind in PieceKind::ALL {
            let shape = kind.shape();
            let full_turn = shape.rotated().rotated().rotated().rotated();
            assert_eq!(shape, full_turn, "{kind:?}");
        }
    }

    #[test]
    fn test_occupied_cells_offset_by_position() {
        let piece = ActivePiece::spawn(PieceKind::O, 4);
        let cells: Vec<_> = piece.occupied_cells().collect();
        assert_eq!(cells, [(4, 0), (5, 0), (4, 1), (5, 1)]);

        let moved = piece.shifted(-1).descended();
        let cells: Vec<_> = moved.occupied_cells().collect();
        assert_eq!(cells, [(3, 1), (4, 1), (3, 2), (4, 2)]);
    }

    #[test]
    fn test_candidates_leave_original_untouched() {
        let piece = ActivePiece::spawn(PieceKind::T, 3);
        let _ = piece.shifted(1);
        let _ = piece.rotated();
        assert_eq!(piece, ActivePiece::spawn(PieceKind::T, 3));
    }
}
