pub mod client;
pub mod config;
pub mod error;
pub mod lobby;

use axum::{
    Router,
    routing::{delete, get, post},
};
use config::Config;
use lobby::http_handler as handlers;
use lobby::{PlayerRegistry, RateLimiter, SessionDirectory, spawn_presence_monitor};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

async fn health() -> &'static str {
    "ok"
}

#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<SessionDirectory>,
    pub players: Arc<PlayerRegistry>,
    pub limiter: Arc<RateLimiter>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            directory: Arc::new(SessionDirectory::new(Some(config.lobby_timeout))),
            players: Arc::new(PlayerRegistry::new()),
            limiter: Arc::new(RateLimiter::new(config.rate_limit_per_second)),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/auth/anonymous", post(handlers::sign_in))
        .route("/lobbies", post(handlers::create_lobby))
        .route("/lobbies/query", post(handlers::query_lobbies))
        .route("/lobbies/join-by-code", post(handlers::join_by_code))
        .route(
            "/lobbies/:lobby_id",
            get(handlers::get_lobby).patch(handlers::update_lobby),
        )
        .route("/lobbies/:lobby_id/join", post(handlers::join_lobby))
        .route("/lobbies/:lobby_id/heartbeat", post(handlers::heartbeat))
        .route(
            "/lobbies/:lobby_id/players/:player_id",
            delete(handlers::remove_player),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Full service with default settings. Must be called inside a tokio runtime.
pub fn app() -> Router {
    app_with_config(&Config::default())
}

/// Build the service and start its presence monitor
pub fn app_with_config(config: &Config) -> Router {
    let state = AppState::new(config);
    spawn_presence_monitor(
        state.directory.clone(),
        state.players.clone(),
        state.limiter.clone(),
        config.sweep_interval,
    );
    router(state)
}
