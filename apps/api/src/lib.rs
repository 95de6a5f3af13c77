//! # Poker Hall API
//!
//! JSON/HTTP server for tournament events: registration and login, event
//! layouts, seat assignment, score recording and rankings.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           API Layers                                    │
//! │                                                                         │
//! │  Request ──► TraceLayer ──► Router (/api/v1/...)                       │
//! │                                  │                                      │
//! │                                  ▼                                      │
//! │                         CurrentPlayer extractor                         │
//! │                     (Bearer JWT → player reload)                        │
//! │                                  │                                      │
//! │                                  ▼                                      │
//! │                     Handler: validate input (core)                      │
//! │                              check policy  (core)                       │
//! │                              persist       (db)                         │
//! │                                  │                                      │
//! │                                  ▼                                      │
//! │                 Json<T>  or  ApiError { code, message }                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables:
//! - `POKERHALL_HTTP_ADDR` - bind address (default: 0.0.0.0:5000)
//! - `POKERHALL_DATABASE_PATH` - SQLite file (default: ./pokerhall.db)
//! - `POKERHALL_DB_MAX_CONNECTIONS` - pool size (default: 5)
//! - `JWT_SECRET` - Secret for JWT signing
//! - `JWT_LIFETIME_SECS` - Token lifetime (default: 7200)

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::Router;
use pokerhall_db::Database;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::JwtManager;

// Re-exports
pub use config::ApiConfig;
pub use error::{ApiError, ApiResult, ErrorCode};

/// Shared application state.
///
/// Cloned per request; every field is cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub jwt: Arc<JwtManager>,
    pub config: Arc<ApiConfig>,
}

impl AppState {
    pub fn new(db: Database, config: ApiConfig) -> Self {
        let jwt = JwtManager::new(&config.jwt_secret, config.jwt_lifetime_secs);
        AppState {
            db,
            jwt: Arc::new(jwt),
            config: Arc::new(config),
        }
    }
}

/// Create the API router.
///
/// ```text
/// GET  /health                               - Health check (public)
/// POST /api/v1/auth/register                 - Register player (public)
/// POST /api/v1/auth/login                    - Login (public)
/// GET  /api/v1/me                            - Current player
/// GET  /api/v1/players                       - List players
/// PUT  /api/v1/players/{id}/role             - Change role (CRUPIER)
/// POST /api/v1/players/{id}/capital          - Adjust capital (CRUPIER)
/// GET  /api/v1/events                        - List events
/// POST /api/v1/events                        - Create event (CRUPIER)
/// GET  /api/v1/events/{id}                   - Event with layout
/// POST /api/v1/seats/{id}/assign             - Assign seat
/// GET  /api/v1/events/{id}/scores            - Score ledger
/// POST /api/v1/events/{id}/scores            - Record score (CRUPIER)
/// GET  /api/v1/events/{id}/ranking?mode=...  - Ranking
/// ```
pub fn create_router(state: AppState) -> Router {
    use handlers::{auth, events, players, scores, seats};

    let v1_routes = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/me", get(auth::me))
        .route("/players", get(players::list_players))
        .route("/players/{id}/role", put(players::set_role))
        .route("/players/{id}/capital", post(players::adjust_capital))
        .route("/events", get(events::list_events).post(events::create_event))
        .route("/events/{id}", get(events::get_event))
        .route("/seats/{id}/assign", post(seats::assign_seat))
        .route(
            "/events/{id}/scores",
            get(scores::list_scores).post(scores::add_score),
        )
        .route("/events/{id}/ranking", get(scores::ranking));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", v1_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health_check(State(state): State<AppState>) -> (StatusCode, &'static str) {
    if state.db.health_check().await {
        (StatusCode::OK, "OK")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "DATABASE UNAVAILABLE")
    }
}
