//! Storage ports used by the use cases.
//! Adapters live in `crate::adapters`.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{BookingFields, BookingTransaction, NewBooking, OfficeSpace};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("record not found: {0}")]
    NotFound(String),

    #[error("duplicate record: {0}")]
    Conflict(String),

    #[error("database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => RepositoryError::NotFound("row not found".to_string()),
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                RepositoryError::Conflict(db_err.message().to_string())
            }
            other => RepositoryError::Database(other.to_string()),
        }
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Admin list filter. `search` matches transaction code or customer name.
#[derive(Debug, Clone, Default)]
pub struct BookingFilter {
    pub search: Option<String>,
    pub limit: i64,
    pub offset: i64,
}

/// Persistence for booking transactions. Soft-deleted rows are invisible to
/// every operation.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn insert(&self, booking: &NewBooking) -> RepositoryResult<BookingTransaction>;

    async fn trx_code_exists(&self, booking_trx_id: &str) -> RepositoryResult<bool>;

    async fn get_by_id(&self, id: i64) -> RepositoryResult<BookingTransaction>;

    /// Exact, case-sensitive match on both fields.
    async fn find_by_phone_and_code(
        &self,
        phone_number: &str,
        booking_trx_id: &str,
    ) -> RepositoryResult<Option<BookingTransaction>>;

    /// Sets `is_paid` only if it is currently false. Returns the updated row,
    /// or `None` when nothing changed (already paid or absent).
    async fn mark_paid(&self, id: i64) -> RepositoryResult<Option<BookingTransaction>>;

    async fn update(&self, id: i64, fields: &BookingFields) -> RepositoryResult<BookingTransaction>;

    async fn soft_delete(&self, id: i64) -> RepositoryResult<()>;

    async fn list(&self, filter: &BookingFilter) -> RepositoryResult<Vec<BookingTransaction>>;
}

/// Read-only access to the office catalog, cities resolved.
#[async_trait]
pub trait OfficeSpaceRepository: Send + Sync {
    async fn get_by_id(&self, id: i64) -> RepositoryResult<Option<OfficeSpace>>;

    async fn get_by_slug(&self, slug: &str) -> RepositoryResult<Option<OfficeSpace>>;

    async fn list(&self) -> RepositoryResult<Vec<OfficeSpace>>;
}
