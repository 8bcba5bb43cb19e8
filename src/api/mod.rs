use axum::{
    Router,
    http::HeaderValue,
    routing::{delete, get, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::state::SharedState;

pub mod auth;
mod error;
mod parts;
mod products;
mod system;
mod types;
mod users;
mod validation;
mod vehicle;

pub use error::ApiError;
pub use types::*;

pub async fn router(state: Arc<SharedState>) -> Router {
    let (cors_origins, secure_cookies, session_expiry_minutes) = {
        let config = state.config.read().await;
        (
            config.server.cors_allowed_origins.clone(),
            config.server.secure_cookies,
            config.server.session_expiry_minutes,
        )
    };

    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(secure_cookies)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(
            session_expiry_minutes,
        )));

    let api_router = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::get_current_account))
        .route("/user/profile", get(users::get_profile))
        .route("/user/favorites", post(users::add_favorite))
        .route("/user/favorites", get(users::list_favorites))
        .route("/user/favorites", delete(users::remove_favorite))
        .route("/user/search-history", post(users::add_search_record))
        .route("/user/search-history", get(users::list_search_records))
        .route("/parts", post(parts::create_part))
        .route("/parts", get(parts::list_parts))
        .route("/parts/{id}", get(parts::get_part))
        .route("/vehicle/makes", get(vehicle::list_makes))
        .route("/vehicle/models", get(vehicle::list_models))
        .route("/products/search", post(products::search_products))
        .route("/products/last-search", get(products::last_search))
        .route("/system/status", get(system::get_status))
        .layer(session_layer)
        .with_state(state);

    let cors_layer = if cors_origins.contains(&"*".to_string()) {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .nest("/api", api_router)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}
