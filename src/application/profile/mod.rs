//! Profile module: a student's own record and public records of others

pub mod service;

pub use service::ProfileService;
