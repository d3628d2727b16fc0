//! Value types shared by the board, the rules and the session

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Side of a piece, or the side to move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opposite(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    pub fn code(self) -> char {
        match self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }

    /// Row delta of a pawn step. White moves toward row 0.
    pub fn pawn_direction(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// Row the pawns of this color start on
    pub fn pawn_home_row(self) -> u8 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Color::White => "White",
            Color::Black => "Black",
        }
    }
}

/// Kind of a chess piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

impl Kind {
    pub fn code(self) -> char {
        match self {
            Kind::Pawn => 'P',
            Kind::Rook => 'R',
            Kind::Knight => 'N',
            Kind::Bishop => 'B',
            Kind::Queen => 'Q',
            Kind::King => 'K',
        }
    }

    pub fn from_code(code: char) -> Option<Kind> {
        match code.to_ascii_uppercase() {
            'P' => Some(Kind::Pawn),
            'R' => Some(Kind::Rook),
            'N' => Some(Kind::Knight),
            'B' => Some(Kind::Bishop),
            'Q' => Some(Kind::Queen),
            'K' => Some(Kind::King),
            _ => None,
        }
    }
}

/// A chess piece with color and kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub color: Color,
    pub kind: Kind,
}

impl Piece {
    pub const fn new(color: Color, kind: Kind) -> Self {
        Piece { color, kind }
    }
}

/// Two-letter code such as `wP` or `bK`
impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.color.code(), self.kind.code())
    }
}

/// Square coordinate (row, col)
///
/// Row 0 is rank 8 (black's back rank), row 7 is rank 1.
/// Col 0 is file a, col 7 is file h.
///
/// A `Square` can hold coordinates outside the board; every board lookup
/// treats those as empty and the rules treat them as illegal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Square {
    pub row: u8,
    pub col: u8,
}

impl Square {
    pub const fn new(row: u8, col: u8) -> Self {
        Square { row, col }
    }

    pub fn is_on_board(&self) -> bool {
        self.row < 8 && self.col < 8
    }

    /// Square displaced by (dr, dc), if it stays on the board
    pub fn offset(&self, dr: i8, dc: i8) -> Option<Square> {
        let row = self.row as i8 + dr;
        let col = self.col as i8 + dc;
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Some(Square::new(row as u8, col as u8))
        } else {
            None
        }
    }

    // Callers check is_on_board first
    fn file_char(&self) -> char {
        (b'a' + self.col) as char
    }

    fn rank(&self) -> u8 {
        8 - self.row
    }

    /// Iterates all 64 squares, row by row from a8 to h1
    pub fn all() -> impl Iterator<Item = Square> {
        (0..8u8).flat_map(|row| (0..8u8).map(move |col| Square::new(row, col)))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_on_board() {
            write!(f, "{}{}", self.file_char(), self.rank())
        } else {
            write!(f, "({}, {})", self.row, self.col)
        }
    }
}

impl FromStr for Square {
    type Err = Error;

    /// Parses algebraic names such as `e2`
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidSquare(s.to_string());
        let bytes = s.trim().as_bytes();
        let [file, rank] = bytes else {
            return Err(invalid());
        };

        let file = file.to_ascii_lowercase();
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(rank) {
            return Err(invalid());
        }

        Ok(Square::new(8 - (rank - b'0'), file - b'a'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_names() {
        assert_eq!(Square::new(6, 4).to_string(), "e2");
        assert_eq!(Square::new(0, 0).to_string(), "a8");
        assert_eq!(Square::new(7, 7).to_string(), "h1");
        assert_eq!("e4".parse::<Square>().unwrap(), Square::new(4, 4));
        assert_eq!("A1".parse::<Square>().unwrap(), Square::new(7, 0));
    }

    #[test]
    fn test_invalid_square_names() {
        for name in ["", "e", "e9", "i1", "e22", "4e"] {
            assert_eq!(
                name.parse::<Square>(),
                Err(Error::InvalidSquare(name.to_string()))
            );
        }
    }

    #[test]
    fn test_out_of_range_square() {
        assert!(!Square::new(8, 0).is_on_board());
        assert!(!Square::new(3, 9).is_on_board());
        assert_eq!(Square::new(8, 0).to_string(), "(8, 0)");
        assert_eq!(Square::new(255, 255).to_string(), "(255, 255)");
        assert_eq!(Square::new(7, 7).offset(1, 0), None);
        assert_eq!(Square::new(7, 7).offset(-1, -1), Some(Square::new(6, 6)));
        assert_eq!(Square::all().count(), 64);
    }

    #[test]
    fn test_piece_codes() {
        assert_eq!(Piece::new(Color::White, Kind::Pawn).to_string(), "wP");
        assert_eq!(Piece::new(Color::Black, Kind::Knight).to_string(), "bN");
        assert_eq!(Kind::from_code('q'), Some(Kind::Queen));
        assert_eq!(Kind::from_code('x'), None);
    }

    #[test]
    fn test_color_pawn_geometry() {
        assert_eq!(Color::White.pawn_direction(), -1);
        assert_eq!(Color::Black.pawn_home_row(), 1);
        assert_eq!(Color::White.opposite(), Color::Black);
    }
}
