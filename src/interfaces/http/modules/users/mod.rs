//! Authenticated student profile, approvals and statistics

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;

use axum::{
    routing::{delete, get},
    Router,
};

use crate::interfaces::http::router::ApiState;

pub fn protected_routes() -> Router<ApiState> {
    Router::new()
        .route("/api/users/me", get(get_me).put(update_me))
        .route(
            "/api/users/me/approved-courses",
            get(list_approved_courses).post(add_approved_course),
        )
        .route(
            "/api/users/me/approved-courses/{course_id}",
            delete(remove_approved_course),
        )
        .route("/api/users/me/stats", get(get_stats))
        .route("/api/users/search/{student_id}", get(find_student))
}
