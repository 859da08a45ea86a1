//! Professors: listing, detail, search, ranking and ratings

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;

use axum::{
    routing::{get, post},
    Router,
};

use crate::interfaces::http::router::ApiState;

pub fn public_routes() -> Router<ApiState> {
    Router::new()
        .route("/api/professors", get(list_professors))
        .route("/api/professors/top", get(top_professors))
        .route("/api/professors/search/{name}", get(search_professors))
        .route("/api/professors/{id}", get(get_professor))
}

pub fn protected_routes() -> Router<ApiState> {
    Router::new().route("/api/professors/{id}/ratings", post(rate_professor))
}
