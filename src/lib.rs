//! # Professor Ranking
//!
//! REST backend where students browse courses and professors, publish
//! reviews and keep track of the courses they have approved.
//!
//! ## Architecture
//!
//! - **domain**: read models, commands and repository traits
//! - **application**: account and profile use-cases
//! - **infrastructure**: SeaORM persistence, the listing query engine, crypto
//! - **interfaces**: Axum REST API with Swagger documentation
//! - **shared**: errors, pagination and shutdown primitives

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig, Environment};
pub use infrastructure::{init_database, DatabaseConfig};
pub use interfaces::http::{create_api_router, RouterOptions};
