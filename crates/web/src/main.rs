use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use chess_table_core::GameSession;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod routes;

use config::Config;

/// The one game on the table, plus when the current turn began
pub struct Table {
    pub session: GameSession,
    pub turn_started: Instant,
}

impl Table {
    pub fn new() -> Self {
        Self {
            session: GameSession::new(),
            turn_started: Instant::now(),
        }
    }

    pub fn restart_clock(&mut self) {
        self.turn_started = Instant::now();
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}

pub struct AppState {
    pub table: Mutex<Table>,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            table: Mutex::new(Table::default()),
            config,
        }
    }

    /// Locks the table, recovering from a poisoned lock
    pub fn table(&self) -> MutexGuard<'_, Table> {
        self.table.lock().unwrap_or_else(|poisoned: PoisonError<_>| {
            warn!("Recovering poisoned table lock");
            poisoned.into_inner()
        })
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();
    let addr = config.bind_addr;
    let state = Arc::new(AppState::new(config));
    let app = routes::router(state);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    info!("Chess table running at http://{}", addr);

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}
