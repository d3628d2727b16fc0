//! Board representation
//!
//! Mailbox (8x8 array) board. `squares[row][col]`, row 0 is rank 8.

mod types;

pub use types::{Color, Kind, Piece, Square};

use serde::{Deserialize, Serialize};
use std::fmt;

const BACK_RANK: [Kind; 8] = [
    Kind::Rook,
    Kind::Knight,
    Kind::Bishop,
    Kind::Queen,
    Kind::King,
    Kind::Bishop,
    Kind::Knight,
    Kind::Rook,
];

/// 8x8 grid, each square empty or holding one piece
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}

impl Board {
    pub fn empty() -> Self {
        Board {
            squares: [[None; 8]; 8],
        }
    }

    /// Standard starting arrangement, black on rows 0-1 and white on rows 6-7
    pub fn standard() -> Self {
        let mut board = Board::empty();
        for (col, kind) in BACK_RANK.iter().enumerate() {
            board.squares[0][col] = Some(Piece::new(Color::Black, *kind));
            board.squares[1][col] = Some(Piece::new(Color::Black, Kind::Pawn));
            board.squares[6][col] = Some(Piece::new(Color::White, Kind::Pawn));
            board.squares[7][col] = Some(Piece::new(Color::White, *kind));
        }
        board
    }

    /// Piece on a square. Off-board squares are empty.
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        if square.is_on_board() {
            self.squares[square.row as usize][square.col as usize]
        } else {
            None
        }
    }

    pub fn is_empty(&self, square: Square) -> bool {
        self.piece_at(square).is_none()
    }

    /// Places or clears a square. Off-board squares are ignored.
    pub fn set(&mut self, square: Square, piece: Option<Piece>) {
        if square.is_on_board() {
            self.squares[square.row as usize][square.col as usize] = piece;
        }
    }

    /// Occupied squares in row-major order
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(|sq| self.piece_at(sq).map(|p| (sq, p)))
    }

    /// Builds a board from eight text rows, rank 8 first.
    /// Uppercase letters are white, lowercase black, anything else empty.
    #[cfg(test)]
    pub(crate) fn from_diagram(rows: [&str; 8]) -> Self {
        let mut board = Board::empty();
        for (row, line) in rows.iter().enumerate() {
            for (col, ch) in line.chars().take(8).enumerate() {
                if let Some(kind) = Kind::from_code(ch) {
                    let color = if ch.is_ascii_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    board.squares[row][col] = Some(Piece::new(color, kind));
                }
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::standard()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, squares) in self.squares.iter().enumerate() {
            write!(f, "{} ", 8 - row)?;
            for square in squares {
                let ch = match square {
                    Some(p) if p.color == Color::White => p.kind.code(),
                    Some(p) => p.kind.code().to_ascii_lowercase(),
                    None => '.',
                };
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        write!(f, "  abcdefgh")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_board() {
        let board = Board::standard();
        assert_eq!(board.pieces().count(), 32);
        assert_eq!(
            board.piece_at(Square::new(7, 4)),
            Some(Piece::new(Color::White, Kind::King))
        );
        assert_eq!(
            board.piece_at(Square::new(0, 3)),
            Some(Piece::new(Color::Black, Kind::Queen))
        );
        for col in 0..8 {
            assert!(board.is_empty(Square::new(3, col)));
            assert_eq!(
                board.piece_at(Square::new(6, col)),
                Some(Piece::new(Color::White, Kind::Pawn))
            );
        }
    }

    #[test]
    fn test_off_board_access() {
        let mut board = Board::empty();
        board.set(Square::new(9, 2), Some(Piece::new(Color::White, Kind::Rook)));
        assert_eq!(board, Board::empty());
        assert!(board.is_empty(Square::new(200, 200)));
    }

    #[test]
    fn test_diagram_matches_display() {
        let board = Board::from_diagram([
            "rnbqkbnr", "pppppppp", "........", "........", "........", "........",
            "PPPPPPPP", "RNBQKBNR",
        ]);
        assert_eq!(board, Board::standard());
        assert!(board.to_string().starts_with("8 rnbqkbnr\n"));
        assert!(board.to_string().ends_with("1 RNBQKBNR\n  abcdefgh"));
    }
}
