use std::io;

pub type Result<T> = std::result::Result<T, RecommendError>;

/// Error taxonomy for the recommendation core.
///
/// The first four variants are expected, recoverable outcomes reported to the
/// caller per request; none of them is a system fault and none is retried.
/// The remaining variants cover model-bundle loading at startup.
#[derive(Debug, thiserror::Error)]
pub enum RecommendError {
    #[error("Movie not found in catalog: {0}")]
    MovieNotFound(String),

    #[error("User ID not found: {0}")]
    UserNotFound(i64),

    #[error("Could not find a valid anchor movie for user {0}")]
    NoAnchorFound(i64),

    #[error("Not enough similar users to generate predictions")]
    InsufficientNeighbors,

    #[error("Model error: {0}")]
    Model(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),
}
