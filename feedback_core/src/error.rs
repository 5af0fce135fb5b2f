use sea_orm::{DbErr, RuntimeErr, SqlErr};
use thiserror::Error;

use crate::ids::CommentId;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no data directory on this platform, set DATABASE_URL instead")]
    NoDataDir,
    #[error("DATABASE_URL is set but is not valid unicode: {0:?}")]
    NotUnicode(std::ffi::OsString),
    #[error("config io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed config file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Coarse failure taxonomy. Every kind aborts the seed run the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Connection,
    Constraint,
    Conflict,
    Other,
}

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("database connection failed: {0}")]
    Connection(#[source] DbErr),

    #[error("constraint violated: {0}")]
    Constraint(#[source] DbErr),

    #[error("transaction conflict: {0}")]
    Conflict(#[source] DbErr),

    #[error("database error: {0}")]
    Database(#[source] DbErr),

    #[error("seed plan references user {0} before it was created")]
    UnknownUser(String),

    #[error("seed plan references comment {0} before it was created")]
    UnknownComment(CommentId),

    #[error("{entity} {key} missing after upsert")]
    MissingRow { entity: &'static str, key: String },
}

impl SeedError {
    pub fn kind(&self) -> FailureKind {
        match self {
            SeedError::Connection(_) => FailureKind::Connection,
            SeedError::Constraint(_) => FailureKind::Constraint,
            SeedError::Conflict(_) => FailureKind::Conflict,
            SeedError::Database(_)
            | SeedError::UnknownUser(_)
            | SeedError::UnknownComment(_)
            | SeedError::MissingRow { .. } => FailureKind::Other,
        }
    }
}

impl From<DbErr> for SeedError {
    fn from(error: DbErr) -> Self {
        match classify(&error) {
            FailureKind::Connection => SeedError::Connection(error),
            FailureKind::Constraint => SeedError::Constraint(error),
            FailureKind::Conflict => SeedError::Conflict(error),
            FailureKind::Other => SeedError::Database(error),
        }
    }
}

fn classify(error: &DbErr) -> FailureKind {
    if matches!(error, DbErr::Conn(_) | DbErr::ConnectionAcquire(_)) {
        return FailureKind::Connection;
    }

    if matches!(
        error.sql_err(),
        Some(SqlErr::UniqueConstraintViolation(_) | SqlErr::ForeignKeyConstraintViolation(_))
    ) {
        return FailureKind::Constraint;
    }

    match sqlx_error(error) {
        Some(sqlx::Error::Database(db)) if is_conflict_code(db.code().as_deref()) => {
            FailureKind::Conflict
        }
        Some(
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed,
        ) => FailureKind::Connection,
        _ => FailureKind::Other,
    }
}

fn sqlx_error(error: &DbErr) -> Option<&sqlx::Error> {
    match error {
        DbErr::Conn(RuntimeErr::SqlxError(e))
        | DbErr::Exec(RuntimeErr::SqlxError(e))
        | DbErr::Query(RuntimeErr::SqlxError(e)) => Some(e),
        _ => None,
    }
}

// 40001/40P01: postgres serialization failure and deadlock.
// 5/6: sqlite busy and locked, plus their extended codes
// 261/517/773: busy recovery, busy snapshot, busy timeout
// 262: locked sharedcache
fn is_conflict_code(code: Option<&str>) -> bool {
    matches!(
        code,
        Some("40001" | "40P01" | "5" | "6" | "261" | "262" | "517" | "773")
    )
}
