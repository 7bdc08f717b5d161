use thiserror::Error;

/// Errors that can occur while interacting with a status normalizer.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum NormalizerError {
    /// Indicates that the normalizer has been detached and no longer accepts directives.
    #[error("the status normalizer has been detached")]
    Detached,
}

/// Result type for status normalizer operations.
pub type Result<T> = std::result::Result<T, NormalizerError>;
