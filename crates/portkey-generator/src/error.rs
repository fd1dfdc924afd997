use thiserror::Error;

/// Errors returned by generator construction and code generation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("invalid shard id '{shard_id}'; expected one uppercase letter followed by one digit")]
    InvalidShardId { shard_id: String },
    #[error("code length {requested} is too small; need at least {minimum}")]
    CodeLengthTooSmall { requested: usize, minimum: usize },
}
