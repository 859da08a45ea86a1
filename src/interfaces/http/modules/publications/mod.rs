//! Publications and their comments

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
        .route("/api/publications", get(list_publications))
        .route("/api/publications/{id}", get(get_publication))
        .route("/api/publications/{id}/comments", get(list_comments))
}

pub fn protected_routes() -> Router<ApiState> {
    Router::new()
        .route("/api/publications", post(create_publication))
        .route("/api/publications/{id}/comments", post(add_comment))
}
