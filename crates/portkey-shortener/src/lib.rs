//! URL shortener service implementation.
//!
//! This crate provides the orchestrator that ties the sharded generator and
//! the link store together: idempotent shortening with bounded collision
//! retry, resolution with expiry checks and hit counting, and a stats read
//! path. Core types are re-exported from `portkey_core`.

pub mod error;
pub mod service;
pub mod shortener;

pub use error::ShortenerError;
pub use service::{ShortenerService, CODE_LENGTH, MAX_GENERATE_ATTEMPTS, RETENTION};
pub use shortener::{ShortenedUrl, Shortener};
