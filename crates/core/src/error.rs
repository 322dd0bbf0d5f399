use thiserror::Error;

/// Failures surfaced by the task store and session provider.
///
/// The UI layer splits these into its load-failure and mutation-failure
/// indicators depending on which operation produced them; derivations never
/// produce errors at all.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    Validation(String),

    #[error("task {0} not found")]
    NotFound(i64),

    #[error("no profile registered for {0}")]
    UnknownProfile(String),

    #[error("no active session; run `taskdeck login <email>` first")]
    NoSession,

    #[error(transparent)]
    Database(#[from] rusqlite::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;
