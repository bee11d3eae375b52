use thiserror::Error;

use crate::domain::GameMode;

pub type TierResult<T> = Result<T, TierError>;

/// Failures reported by the ranking engine
#[derive(Debug, Error)]
pub enum TierError {
    /// A tier value outside HT1..LT5
    #[error("invalid tier: {0:?}")]
    InvalidTier(String),

    /// An operation whose precondition does not hold for the placement
    #[error("invalid transition: {0}")]
    InvalidTransition(String),

    /// Identity resolution exhausted every lookup step
    #[error("player not found: {0}")]
    NotFound(String),

    /// The champion invariant could not be committed because the store
    /// changed underneath the operation. Re-fetch and retry the whole call.
    #[error("champion write for {mode} conflicted with a concurrent update")]
    ConflictUnresolved { mode: GameMode },

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl TierError {
    pub fn invalid_transition(message: impl Into<String>) -> Self {
        TierError::InvalidTransition(message.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, TierError::NotFound(_))
    }
}

/// Context message for store failures
pub fn store_context(operation: &str, key: &str) -> String {
    format!("Failed to {} for key: {}", operation, key)
}
