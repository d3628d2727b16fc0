//! Pseudo-legal move rules
//!
//! Piece-movement geometry and occupancy only. King safety is never
//! inspected, and castling, en passant and promotion do not exist here.

use crate::board::{Board, Color, Kind, Square};

/// Whether `turn` may move the piece on `from` to `to`
///
/// Off-board squares are never legal.
pub fn is_legal_move(board: &Board, from: Square, to: Square, turn: Color) -> bool {
    if !from.is_on_board() || !to.is_on_board() {
        return false;
    }

    let piece = match board.piece_at(from) {
        Some(p) if p.color == turn => p,
        _ => return false,
    };

    let dest = board.piece_at(to);
    if dest.is_some_and(|d| d.color == turn) {
        return false;
    }

    let dr = to.row as i8 - from.row as i8;
    let dc = to.col as i8 - from.col as i8;

    match piece.kind {
        Kind::Pawn => pawn_move(board, from, to, turn, dr, dc),
        Kind::Rook => is_straight(dr, dc) && is_path_clear(board, from, to),
        Kind::Knight => matches!((dr.abs(), dc.abs()), (2, 1) | (1, 2)),
        Kind::Bishop => is_diagonal(dr, dc) && is_path_clear(board, from, to),
        Kind::Queen => {
            (is_straight(dr, dc) || is_diagonal(dr, dc)) && is_path_clear(board, from, to)
        }
        Kind::King => dr.abs().max(dc.abs()) == 1,
    }
}

fn pawn_move(board: &Board, from: Square, to: Square, turn: Color, dr: i8, dc: i8) -> bool {
    let dir = turn.pawn_direction();
    let dest_empty = board.is_empty(to);

    if dc == 0 {
        if !dest_empty {
            return false;
        }
        if dr == dir {
            return true;
        }
        // Double step from the home row over an empty square
        from.row == turn.pawn_home_row()
            && dr == 2 * dir
            && from.offset(dir, 0).is_some_and(|mid| board.is_empty(mid))
    } else {
        dc.abs() == 1 && dr == dir && !dest_empty
    }
}

fn is_straight(dr: i8, dc: i8) -> bool {
    (dr == 0) != (dc == 0)
}

fn is_diagonal(dr: i8, dc: i8) -> bool {
    dr != 0 && dr.abs() == dc.abs()
}

/// Whether every square strictly between `from` and `to` is empty
///
/// Expects the squares to share a row, column or diagonal. Anything else
/// (or an off-board endpoint) reports a blocked path.
pub fn is_path_clear(board: &Board, from: Square, to: Square) -> bool {
    if !from.is_on_board() || !to.is_on_board() {
        return false;
    }

    let dr = to.row as i8 - from.row as i8;
    let dc = to.col as i8 - from.col as i8;
    if !(is_straight(dr, dc) || is_diagonal(dr, dc)) {
        return false;
    }

    let step = (dr.signum(), dc.signum());
    let mut current = from;
    loop {
        current = match current.offset(step.0, step.1) {
            Some(next) => next,
            None => return false,
        };
        if current == to {
            return true;
        }
        if !board.is_empty(current) {
            return false;
        }
    }
}

/// Every square the piece on `from` may move to, row-major
pub fn legal_destinations(board: &Board, from: Square, turn: Color) -> Vec<Square> {
    Square::all()
        .filter(|&to| is_legal_move(board, from, to, turn))
        .collect()
}

/// Every pseudo-legal (from, to) pair for `turn`, row-major by origin
pub fn legal_moves(board: &Board, turn: Color) -> Vec<(Square, Square)> {
    board
        .pieces()
        .filter(|(_, piece)| piece.color == turn)
        .flat_map(|(from, _)| {
            legal_destinations(board, from, turn)
                .into_iter()
                .map(move |to| (from, to))
        })
        .collect()
}
