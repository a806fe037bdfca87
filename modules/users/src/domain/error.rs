use thiserror::Error;
use uuid::Uuid;

/// Domain errors for the users module.
///
/// The system has exactly one client-visible failure mode: a lookup by id
/// that matches nothing. `Internal` covers repository failures; the
/// in-memory adapter never produces them.
#[derive(Debug, Error)]
pub enum UsersError {
    #[error("user {id} not found")]
    NotFound { id: Uuid },

    #[error("internal error: {0}")]
    Internal(String),
}

impl UsersError {
    pub fn not_found(id: Uuid) -> Self {
        Self::NotFound { id }
    }

    pub(crate) fn internal(e: anyhow::Error) -> Self {
        Self::Internal(e.to_string())
    }
}
