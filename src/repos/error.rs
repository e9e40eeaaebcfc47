/**
 * Responsibility
 * - What the repo layer tells its callers
 */
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("db error")]
    Db(#[from] sqlx::Error),
    #[error("conflict")]
    Conflict,
}

pub type RepoResult<T> = Result<T, RepoError>;

impl RepoError {
    /// Unique (23505) and foreign-key (23503) violations become `Conflict`.
    pub fn from_sqlx(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(dbe) = &e
            && matches!(dbe.code().as_deref(), Some("23505") | Some("23503"))
        {
            return RepoError::Conflict;
        }
        RepoError::Db(e)
    }
}
