//! HTTP REST API interfaces
//!
//! - `common`: response wrapper, error mapping, validated JSON extractor
//! - `middleware`: bearer JWT authentication
//! - `modules`: handlers and DTOs per resource
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod middleware;
pub mod modules;
pub mod router;

pub use router::{create_api_router, ApiState, RouterOptions};
