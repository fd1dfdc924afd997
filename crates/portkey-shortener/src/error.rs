use portkey_core::StorageError;
use portkey_generator::GeneratorError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ShortenerError>;

#[derive(Debug, Clone, Error)]
pub enum ShortenerError {
    /// Every generation attempt collided with an existing code. The caller
    /// may retry; this depends on transient contention, not permanent state.
    #[error("code generation exhausted after {attempts} attempts")]
    GenerationExhausted { attempts: u32 },
    #[error(transparent)]
    Generator(#[from] GeneratorError),
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}
