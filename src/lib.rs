pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod response;
pub mod state;
pub mod types;
pub mod validate;

use axum::{routing::get, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;

/// Build the full application router over the given state.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(canteen_routes())
        .merge(menu_routes())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn canteen_routes() -> Router<AppState> {
    use axum::routing::delete;
    use handlers::canteens;

    Router::new()
        .route(
            "/canteens",
            get(canteens::list).post(canteens::create).put(canteens::update),
        )
        .route("/canteens/:id", delete(canteens::remove))
}

fn menu_routes() -> Router<AppState> {
    use axum::routing::delete;
    use handlers::menus;

    Router::new()
        .route("/menus", get(menus::list).post(menus::create).put(menus::update))
        .route("/menus/:id", delete(menus::remove))
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "status": true,
        "statusCode": 200,
        "data": {
            "name": "Canteen API (Rust)",
            "version": version,
            "description": "CRUD backend for canteens and their menus",
            "endpoints": {
                "canteens": "GET/POST/PUT /canteens, DELETE /canteens/:id",
                "menus": "GET/POST/PUT /menus, DELETE /menus/:id",
                "health": "/health",
            }
        }
    }))
}

async fn health(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match state.repo.ping().await {
        Ok(()) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "status": true,
                "statusCode": 200,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "status": false,
                "statusCode": 503,
                "message": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
