pub mod auth;
pub mod courses;
pub mod health;
pub mod metrics;
pub mod professors;
pub mod publications;
pub mod request_id;
pub mod users;
