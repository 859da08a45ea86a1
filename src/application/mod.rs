//! Application layer: use-case services on top of the repositories

pub mod identity;
pub mod profile;

pub use identity::{AccountService, AuthResult, Registration};
pub use profile::ProfileService;
