//! helpdesk-lambda
//!
//! HTTP surface of the helpdesk: ticket intake, the triage conversation,
//! chat relays, escalation and reviews. Runs under AWS Lambda or as a plain
//! local server.

pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::Router;
use axum::middleware as axum_mw;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};

use state::AppState;

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Liveness
        .route("/health", get(routes::health::health_check))
        .route(
            "/api/test",
            get(routes::health::test_get).post(routes::health::test_post),
        )
        // Tickets
        .route("/api/ticket/initiate", post(routes::tickets::initiate))
        .route("/api/ticket/respond", post(routes::tickets::respond))
        .route(
            "/api/ticket/{id}/messages",
            get(routes::tickets::list_messages),
        )
        // Chat relays
        .route("/api/gemini-chat", post(routes::chat::gemini_chat))
        .route("/api/openai-chat", post(routes::chat::openai_chat))
        // Staff notifications
        .route("/api/escalate", post(routes::escalate::escalate))
        .route("/api/review", post(routes::review::submit_review))
        .layer(axum_mw::from_fn(middleware::audit::audit_log))
        .layer(cors)
        .with_state(state)
}
