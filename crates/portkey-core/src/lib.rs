//! Core types and traits for the Portkey URL shortener.
//!
//! This crate provides the base-62 encoder, the validated short code type,
//! the link record types, and the store trait shared by the generator,
//! storage, and shortener crates.

pub mod base62;
pub mod error;
pub mod record;
pub mod shortcode;
pub mod store;

pub use error::{CoreError, StorageError};
pub use record::{LinkRecord, LinkSnapshot, LinkStats};
pub use shortcode::ShortCode;
pub use store::LinkStore;
