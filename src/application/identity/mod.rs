//! Identity module: registration, login and password reset
//!
//! Contains the `AccountService` which orchestrates the account
//! use-cases. Profile reads and updates live in [`crate::application::profile`].

pub mod service;

pub use service::{AccountService, AuthResult, Registration};
