//! The single legality predicate for piece placement.
//!
//! Every engine operation — spawn, move, rotate, gravity step, game-over
//! detection — funnels through [`collides`]; there is no other collision
//! logic anywhere.

use crate::core::{board::Board, piece::ActivePiece};

/// Returns true iff any occupied cell of the piece overlaps a wall, the
/// floor, or a locked cell of the board.
///
/// Pure: neither argument is mutated. Cells above the top of the board do
/// not collide (see [`Board::is_occupied`]).
#[must_use]
pub fn collides(board: &Board, piece: &ActivePiece) -> bool {
    piece
        .occupied_cells()
        .any(|(x, y)| board.is_occupied(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::piece::PieceKind;

    #[test]
    fn test_open_board_is_collision_free() {
        let board = Board::new(10, 20);
        assert!(!collides(&board, &ActivePiece::spawn(PieceKind::T, 3)));
    }

    #[test]
    fn test_wall_collisions() {
        let board = Board::new(10, 20);

        let piece = ActivePiece::spawn(PieceKind::O, 0);
        assert!(collides(&board, &piece.shifted(-1)));

        // O is two cells wide, so x = 8 is flush against the right wall.
        let piece = ActivePiece::spawn(PieceKind::O, 8);
        assert!(!collides(&board, &piece));
        assert!(collides(&board, &piece.shifted(1)));
    }

    #[test]
    fn test_floor_collision() {
        let board = Board::new(10, 20);
        let mut piece = ActivePiece::spawn(PieceKind::I, 3);
        // The I piece is one row tall; row 19 is the lowest legal position.
        for _ in 0..19 {
            piece = piece.descended();
            assert!(!collides(&board, &piece));
        }
        assert!(collides(&board, &piece.descended()));
    }

    #[test]
    fn test_locked_cell_collision() {
        let mut board = Board::new(10, 20);
        board.lock(&ActivePiece::spawn(PieceKind::O, 4));

        assert!(collides(&board, &ActivePiece::spawn(PieceKind::T, 4)));
        assert!(!collides(&board, &ActivePiece::spawn(PieceKind::T, 6)));
    }
}
