//! Short code generation for the Portkey URL shortener.
//!
//! This crate provides the generator trait and the sharded sequential
//! implementation used by the shortener service.

pub mod error;
pub mod sharded;

pub use error::GeneratorError;
pub use sharded::{ShardedGenerator, ShardedGeneratorSettings, DEFAULT_SHARD_ID};

use portkey_core::ShortCode;

/// Trait for generating short codes.
///
/// Implementations are pure generators that don't interact with storage;
/// collision handling against a store is the caller's concern.
pub trait Generator: Send + Sync + 'static {
    /// Generates a candidate short code of the requested total length.
    ///
    /// Implementations must never hand the same code to two concurrent
    /// callers of the same instance.
    fn generate(&self, total_length: usize) -> Result<ShortCode, GeneratorError>;
}
