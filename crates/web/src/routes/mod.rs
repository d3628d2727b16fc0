use askama::Template;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::error;

use chess_table_core::{Color, Piece, Square};

use crate::AppState;

pub mod api;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/api/state", get(api::state))
        .route("/api/click", post(api::click))
        .route("/api/hover", post(api::hover))
        .route("/api/undo", post(api::undo))
        .route("/api/reset", post(api::reset))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================================
// TEMPLATES
// ============================================================================

#[derive(Template)]
#[template(path = "board.html")]
pub struct BoardTemplate {
    pub title: String,
    pub rows: Vec<Vec<CellView>>,
    pub turn: String,
    pub moves: Vec<String>,
    pub captured_by_white: String,
    pub captured_by_black: String,
}

pub struct CellView {
    pub name: String,
    pub shade: &'static str,
    pub glyph: &'static str,
    pub selected: bool,
}

/// Unicode chess symbol for a piece
pub fn glyph(piece: Piece) -> &'static str {
    use chess_table_core::Kind::*;
    match (piece.color, piece.kind) {
        (Color::White, King) => "\u{2654}",
        (Color::White, Queen) => "\u{2655}",
        (Color::White, Rook) => "\u{2656}",
        (Color::White, Bishop) => "\u{2657}",
        (Color::White, Knight) => "\u{2658}",
        (Color::White, Pawn) => "\u{2659}",
        (Color::Black, King) => "\u{265A}",
        (Color::Black, Queen) => "\u{265B}",
        (Color::Black, Rook) => "\u{265C}",
        (Color::Black, Bishop) => "\u{265D}",
        (Color::Black, Knight) => "\u{265E}",
        (Color::Black, Pawn) => "\u{265F}",
    }
}

fn glyphs(pieces: &[Piece]) -> String {
    pieces.iter().map(|p| glyph(*p)).collect()
}

// ============================================================================
// HANDLERS
// ============================================================================

pub async fn index(State(state): State<Arc<AppState>>) -> Response {
    let snapshot = state.table().session.snapshot(state.config.history_len);

    let rows = (0..8u8)
        .map(|row| {
            (0..8u8)
                .map(|col| {
                    let square = Square::new(row, col);
                    CellView {
                        name: square.to_string(),
                        shade: if (row + col) % 2 == 0 { "light" } else { "dark" },
                        glyph: snapshot.board.piece_at(square).map(glyph).unwrap_or(""),
                        selected: snapshot.selection == Some(square),
                    }
                })
                .collect()
        })
        .collect();

    let template = BoardTemplate {
        title: "2 Player Chess".to_string(),
        rows,
        turn: snapshot.turn.name().to_string(),
        moves: snapshot.recent_moves,
        captured_by_white: glyphs(&snapshot.captured_by_white),
        captured_by_black: glyphs(&snapshot.captured_by_black),
    };

    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!("Template render failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

pub async fn health() -> &'static str {
    "OK"
}
