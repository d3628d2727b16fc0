//! Game session: the single owner of mutable game state
//!
//! Input events (square picks, undo, reset) are applied one at a time.
//! Every operation is total: invalid picks are absorbed as no-ops or as a
//! deselect, never as errors.

mod record;
mod snapshot;

pub use record::{AudioCue, MoveCommitted, MoveRecord};
pub use snapshot::GameSnapshot;

use tracing::{debug, trace};

use crate::board::{Board, Color, Piece, Square};
use crate::rules;

/// Selection state of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    /// Waiting for a piece to be picked
    #[default]
    Idle,
    /// Waiting for a destination for the piece on this square
    PieceSelected(Square),
}

impl Selection {
    pub fn square(&self) -> Option<Square> {
        match self {
            Selection::Idle => None,
            Selection::PieceSelected(sq) => Some(*sq),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    turn: Color,
    selection: Selection,
    history: Vec<MoveRecord>,
    captured_by_white: Vec<Piece>,
    captured_by_black: Vec<Piece>,
}

impl GameSession {
    /// New game from the standard starting position
    pub fn new() -> Self {
        Self::from_board(Board::standard(), Color::White)
    }

    /// Session starting from an arbitrary position
    pub fn from_board(board: Board, turn: Color) -> Self {
        Self {
            board,
            turn,
            selection: Selection::Idle,
            history: Vec::new(),
            captured_by_white: Vec::new(),
            captured_by_black: Vec::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    /// Black pieces taken by white, in capture order
    pub fn captured_by_white(&self) -> &[Piece] {
        &self.captured_by_white
    }

    /// White pieces taken by black, in capture order
    pub fn captured_by_black(&self) -> &[Piece] {
        &self.captured_by_black
    }

    /// Last `n` move strings, oldest first
    pub fn recent_moves(&self, n: usize) -> Vec<String> {
        let start = self.history.len().saturating_sub(n);
        self.history[start..].iter().map(|m| m.to_string()).collect()
    }

    /// Pointer event on a square: picks a piece when idle, otherwise
    /// tries the square as destination.
    ///
    /// Clicking the selected square again always deselects, since no piece
    /// may move onto its own square.
    pub fn pointer_down(&mut self, square: Square) -> Option<MoveCommitted> {
        match self.selection {
            Selection::Idle => {
                self.select_square(square);
                None
            }
            Selection::PieceSelected(_) => self.choose_destination(square),
        }
    }

    /// Selects a piece of the side to move. Ignored unless idle.
    pub fn select_square(&mut self, square: Square) {
        if self.selection != Selection::Idle {
            return;
        }

        match self.board.piece_at(square) {
            Some(piece) if piece.color == self.turn => {
                trace!(%square, %piece, "selected");
                self.selection = Selection::PieceSelected(square);
            }
            _ => trace!(%square, "ignored selection"),
        }
    }

    /// Moves the selected piece to `square` if legal; either way the
    /// session returns to idle. Ignored when nothing is selected.
    pub fn choose_destination(&mut self, square: Square) -> Option<MoveCommitted> {
        let Selection::PieceSelected(from) = self.selection else {
            return None;
        };
        self.selection = Selection::Idle;

        if !rules::is_legal_move(&self.board, from, square, self.turn) {
            trace!(%from, to = %square, "illegal destination, deselecting");
            return None;
        }

        // is_legal_move guarantees a piece of `turn` on `from`
        let moved = self.board.piece_at(from)?;
        let captured = self.board.piece_at(square);

        if let Some(taken) = captured {
            match taken.color {
                Color::Black => self.captured_by_white.push(taken),
                Color::White => self.captured_by_black.push(taken),
            }
            debug!(%taken, at = %square, "capture");
        }

        self.board.set(square, Some(moved));
        self.board.set(from, None);

        let record = MoveRecord {
            from,
            to: square,
            moved,
            captured,
        };
        self.history.push(record);
        self.turn = self.turn.opposite();

        debug!(
            mv = %record,
            ply = self.history.len(),
            "move committed\n{}",
            self.board
        );

        Some(record.into())
    }

    /// Takes back the most recent move, including its capture-list entry.
    /// Returns the undone move, or `None` when there is nothing to undo.
    pub fn undo(&mut self) -> Option<MoveRecord> {
        self.selection = Selection::Idle;

        let record = self.history.pop()?;
        self.board.set(record.from, Some(record.moved));
        self.board.set(record.to, record.captured);
        self.turn = self.turn.opposite();

        if let Some(taken) = record.captured {
            let list = match taken.color {
                Color::Black => &mut self.captured_by_white,
                Color::White => &mut self.captured_by_black,
            };
            list.pop();
        }

        debug!(mv = %record, ply = self.history.len(), "move undone");
        Some(record)
    }

    /// Back to the standard starting position with empty history
    pub fn reset(&mut self) {
        *self = Self::new();
        debug!("game reset");
    }

    /// Whether the selected piece may move to `square`. False when idle.
    pub fn is_legal_target(&self, square: Square) -> bool {
        match self.selection {
            Selection::Idle => false,
            Selection::PieceSelected(from) => {
                rules::is_legal_move(&self.board, from, square, self.turn)
            }
        }
    }

    /// Destinations of the selected piece, empty when idle
    pub fn selected_destinations(&self) -> Vec<Square> {
        match self.selection {
            Selection::Idle => Vec::new(),
            Selection::PieceSelected(from) => {
                rules::legal_destinations(&self.board, from, self.turn)
            }
        }
    }

    /// Snapshot for rendering, with the last `history_len` move strings
    pub fn snapshot(&self, history_len: usize) -> GameSnapshot {
        GameSnapshot {
            board: self.board.clone(),
            turn: self.turn,
            selection: self.selection.square(),
            hints: self.selected_destinations(),
            recent_moves: self.recent_moves(history_len),
            move_count: self.history.len(),
            captured_by_white: self.captured_by_white.clone(),
            captured_by_black: self.captured_by_black.clone(),
        }
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}
