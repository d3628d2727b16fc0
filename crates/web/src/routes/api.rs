//! JSON endpoints driving the game session

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use chess_table_core::{AudioCue, GameSnapshot, Square};

use crate::{AppState, Table};

// ============================================================================
// REQUESTS / RESPONSES
// ============================================================================

#[derive(Deserialize)]
pub struct SquareRequest {
    /// Algebraic square name, e.g. "e2"
    pub square: String,
}

impl SquareRequest {
    fn parse(&self) -> Result<Square, ApiError> {
        Ok(self.square.parse()?)
    }
}

#[derive(Serialize)]
pub struct StateResponse {
    #[serde(flatten)]
    pub snapshot: GameSnapshot,
    pub turn_elapsed_secs: u64,
    /// Sound to play for the move this request committed, if any
    pub cue: Option<AudioCue>,
}

#[derive(Serialize)]
pub struct HoverResponse {
    pub legal: bool,
}

pub struct ApiError(chess_table_core::Error);

impl From<chess_table_core::Error> for ApiError {
    fn from(error: chess_table_core::Error) -> Self {
        ApiError(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, self.0.to_string()).into_response()
    }
}

fn respond(table: &Table, history_len: usize, cue: Option<AudioCue>) -> Json<StateResponse> {
    Json(StateResponse {
        snapshot: table.session.snapshot(history_len),
        turn_elapsed_secs: table.turn_started.elapsed().as_secs(),
        cue,
    })
}

// ============================================================================
// HANDLERS
// ============================================================================

pub async fn state(State(state): State<Arc<AppState>>) -> Json<StateResponse> {
    let table = state.table();
    respond(&table, state.config.history_len, None)
}

pub async fn click(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SquareRequest>,
) -> Result<Json<StateResponse>, ApiError> {
    let square = req.parse()?;
    let mut table = state.table();

    let committed = table.session.pointer_down(square);
    if let Some(committed) = committed {
        info!("{}", committed.record);
        table.restart_clock();
    }

    Ok(respond(
        &table,
        state.config.history_len,
        committed.map(|c| c.cue),
    ))
}

pub async fn hover(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SquareRequest>,
) -> Result<Json<HoverResponse>, ApiError> {
    let square = req.parse()?;
    let legal = state.table().session.is_legal_target(square);
    Ok(Json(HoverResponse { legal }))
}

pub async fn undo(State(state): State<Arc<AppState>>) -> Json<StateResponse> {
    let mut table = state.table();
    if let Some(undone) = table.session.undo() {
        info!("Undo {}", undone);
        table.restart_clock();
    }
    respond(&table, state.config.history_len, None)
}

pub async fn reset(State(state): State<Arc<AppState>>) -> Json<StateResponse> {
    let mut table = state.table();
    table.session.reset();
    table.restart_clock();
    info!("New game");
    respond(&table, state.config.history_len, None)
}

#[cfg(test)]
mod tests {
    use crate::routes::router;
    use crate::config::Config;
    use crate::AppState;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        Router,
    };
    use serde_json::Value;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app() -> (Router, Arc<AppState>) {
        let state = Arc::new(AppState::new(Config::default()));
        (router(state.clone()), state)
    }

    async fn post(app: &Router, uri: &str, body: &str) -> (StatusCode, Vec<u8>) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    async fn post_json(app: &Router, uri: &str, body: &str) -> Value {
        let (status, bytes) = post(app, uri, body).await;
        assert_eq!(status, StatusCode::OK);
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_click_plays_move() {
        let (app, state) = app();

        let selected = post_json(&app, "/api/click", r#"{"square":"e2"}"#).await;
        assert_eq!(selected["selection"]["row"], 6);
        assert!(selected["cue"].is_null());

        let moved = post_json(&app, "/api/click", r#"{"square":"e4"}"#).await;
        assert_eq!(moved["cue"], "quiet");
        assert_eq!(moved["turn"], "black");
        assert_eq!(moved["recent_moves"][0], "wP e2->e4");
        assert!(moved["selection"].is_null());

        assert_eq!(state.table().session.history().len(), 1);
    }

    #[tokio::test]
    async fn test_hover_reports_legality() {
        let (app, _) = app();
        let idle = post_json(&app, "/api/hover", r#"{"square":"e4"}"#).await;
        assert_eq!(idle["legal"], false);

        post_json(&app, "/api/click", r#"{"square":"e2"}"#).await;
        let legal = post_json(&app, "/api/hover", r#"{"square":"e4"}"#).await;
        assert_eq!(legal["legal"], true);
        let illegal = post_json(&app, "/api/hover", r#"{"square":"e5"}"#).await;
        assert_eq!(illegal["legal"], false);
    }

    #[tokio::test]
    async fn test_undo_and_reset() {
        let (app, _) = app();
        post_json(&app, "/api/click", r#"{"square":"g1"}"#).await;
        post_json(&app, "/api/click", r#"{"square":"f3"}"#).await;

        let undone = post_json(&app, "/api/undo", "").await;
        assert_eq!(undone["move_count"], 0);
        assert_eq!(undone["turn"], "white");

        post_json(&app, "/api/click", r#"{"square":"b1"}"#).await;
        post_json(&app, "/api/click", r#"{"square":"c3"}"#).await;
        let reset = post_json(&app, "/api/reset", "").await;
        assert_eq!(reset["move_count"], 0);
        assert_eq!(reset["captured_by_white"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_bad_square_is_rejected() {
        let (app, state) = app();
        let (status, body) = post(&app, "/api/click", r#"{"square":"z9"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(String::from_utf8(body).unwrap().contains("z9"));
        assert!(state.table().session.history().is_empty());
    }

    #[tokio::test]
    async fn test_index_renders_board() {
        let (app, _) = app();
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains(r#"data-square="e2""#));
        assert!(html.contains("Turn: White"));
    }
}
