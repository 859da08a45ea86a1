//! Authentication module: register, login, password reset

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;

use axum::{routing::post, Router};

use crate::interfaces::http::router::ApiState;

pub fn public_routes() -> Router<ApiState> {
    Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/forgot-password", post(forgot_password))
}
