//! Services Layer
//!
//! Business logic extracted from HTTP handlers. Handlers validate request
//! shape, services own existence checks and multi-table orchestration.

pub mod book_service;

pub use book_service::*;
