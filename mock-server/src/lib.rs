//! In-memory stand-in for the GeoExplorer REST service.
//!
//! Serves the same routes, error bodies and ordering rules as the real
//! service so the client crate can be exercised end to end without it.

pub mod model;
pub mod routes;
pub mod store;

use std::sync::Arc;

use axum::{
    routing::{get, put},
    Router,
};
use tokio::{net::TcpListener, sync::RwLock};

pub use model::*;
pub use store::{Store, DEMO_USER_ID};

pub type Db = Arc<RwLock<Store>>;

/// Router over the seeded demo data.
pub fn app() -> Router {
    app_with(Store::seeded())
}

pub fn app_with(store: Store) -> Router {
    let db: Db = Arc::new(RwLock::new(store));
    Router::new()
        .route("/health", get(routes::health))
        .route("/api/users/{id}", get(routes::get_user).put(routes::update_user))
        .route("/api/users/{id}/progress", get(routes::get_user_progress))
        .route("/api/trivia", get(routes::list_trivia))
        .route("/api/trivia/today", get(routes::get_today_trivia))
        .route("/api/trivia/{id}", get(routes::get_trivia))
        .route("/api/levels", get(routes::list_levels))
        .route("/api/levels/{id}", get(routes::get_level))
        .route("/api/levels/user/{user_id}/progress", get(routes::get_user_level_progress))
        .route(
            "/api/levels/user/{user_id}/progress/{level_id}",
            put(routes::update_level_progress),
        )
        .route("/api/mistakes", get(routes::list_mistakes).post(routes::create_mistake))
        .route(
            "/api/mistakes/{id}",
            get(routes::get_mistake)
                .put(routes::update_mistake)
                .delete(routes::delete_mistake),
        )
        .route("/api/geo-features", get(routes::list_features))
        .route("/api/geo-features/search/{query}", get(routes::search_features))
        .route("/api/geo-features/{id}", get(routes::get_feature))
        .route("/api/ar-landforms", get(routes::list_landforms))
        .route("/api/ar-landforms/{id}", get(routes::get_landform))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with(listener, Store::seeded()).await
}

pub async fn run_with(listener: TcpListener, store: Store) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(store)).await
}
