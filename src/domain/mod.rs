//! Domain layer for the category store
//!
//! This module contains the models, errors and port traits. It has no
//! knowledge of SQLite, Redis or HTTP.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{DomainError, DomainResult};
