//! Course catalogue: listing, detail, search, areas and approvals

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
        .route("/api/courses", get(list_courses))
        .route("/api/courses/areas", get(list_areas))
        .route("/api/courses/search/{term}", get(search_courses))
        .route("/api/courses/{id}", get(get_course))
}

pub fn protected_routes() -> Router<ApiState> {
    Router::new().route("/api/courses/{id}/approve", post(approve_course))
}
