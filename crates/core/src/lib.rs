//! Chess Table Core Library
//!
//! Move-legality engine and game-session state machine for a local
//! two-player chess table.

pub mod board;
pub mod error;
pub mod rules;
pub mod session;

pub use board::{Board, Color, Kind, Piece, Square};
pub use error::{Error, Result};
pub use rules::{is_legal_move, is_path_clear};
pub use session::{AudioCue, GameSession, GameSnapshot, MoveCommitted, MoveRecord, Selection};
