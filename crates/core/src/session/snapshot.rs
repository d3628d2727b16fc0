//! Read-only view of a session for rendering

use serde::Serialize;

use crate::board::{Board, Color, Piece, Square};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSnapshot {
    pub board: Board,
    pub turn: Color,
    pub selection: Option<Square>,
    /// Destinations of the selected piece, empty when idle
    pub hints: Vec<Square>,
    /// Last N move strings, oldest first
    pub recent_moves: Vec<String>,
    pub move_count: usize,
    pub captured_by_white: Vec<Piece>,
    pub captured_by_black: Vec<Piece>,
}
