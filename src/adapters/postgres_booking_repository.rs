//! Postgres implementation of BookingRepository.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;

use crate::domain::{BookingFields, BookingTransaction, NewBooking};
use crate::ports::{BookingFilter, BookingRepository, RepositoryError, RepositoryResult};

/// Postgres-backed booking repository.
#[derive(Clone)]
pub struct PostgresBookingRepository {
    pool: PgPool,
}

impl PostgresBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for PostgresBookingRepository {
    async fn insert(&self, booking: &NewBooking) -> RepositoryResult<BookingTransaction> {
        let fields = &booking.fields;
        let row = sqlx::query_as::<_, BookingRow>(
            r#"
            INSERT INTO booking_transactions (
                booking_trx_id, name, phone_number, total_amount, duration,
                started_at, ended_at, is_paid, office_space_id
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, FALSE, $8)
            RETURNING id, booking_trx_id, name, phone_number, total_amount, duration,
                started_at, ended_at, is_paid, office_space_id, created_at, updated_at, deleted_at
            "#,
        )
        .bind(&booking.booking_trx_id)
        .bind(&fields.name)
        .bind(&fields.phone_number)
        .bind(fields.total_amount)
        .bind(fields.duration)
        .bind(fields.started_at)
        .bind(fields.ended_at)
        .bind(fields.office_space_id)
        .fetch_one(&self.pool)
        .await
        .map_err(RepositoryError::from)?;

        Ok(row.into_domain())
    }

    async fn trx_code_exists(&self, booking_trx_id: &str) -> RepositoryResult<bool> {
        // Soft-deleted rows still hold their code.
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM booking_transactions WHERE booking_trx_id = $1)",
        )
        .bind(booking_trx_id)
        .fetch_one(&self.pool)
        .await
        .map_err(RepositoryError::from)?;

        Ok(exists)
    }

    async fn get_by_id(&self, id: i64) -> RepositoryResult<BookingTransaction> {
        let row = sqlx::query_as::<_, BookingRow>(
            r#"
            SELECT id, booking_trx_id, name, phone_number, total_amount, duration,
                started_at, ended_at, is_paid, office_space_id, created_at, updated_at, deleted_at
            FROM booking_transactions
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepositoryError::from)?;

        row.map(|r| r.into_domain())
            .ok_or_else(|| RepositoryError::NotFound(format!("booking {}", id)))
    }

    async fn find_by_phone_and_code(
        &self,
        phone_number: &str,
        booking_trx_id: &str,
    ) -> RepositoryResult<Option<BookingTransaction>> {
        let row = sqlx::query_as::<_, BookingRow>(
            r#"
            SELECT id, booking_trx_id, name, phone_number, total_amount, duration,
                started_at, ended_at, is_paid, office_space_id, created_at, updated_at, deleted_at
            FROM booking_transactions
            WHERE phone_number = $1 AND booking_trx_id = $2 AND deleted_at IS NULL
            "#,
        )
        .bind(phone_number)
        .bind(booking_trx_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepositoryError::from)?;

        Ok(row.map(|r| r.into_domain()))
    }

    async fn mark_paid(&self, id: i64) -> RepositoryResult<Option<BookingTransaction>> {
        let row = sqlx::query_as::<_, BookingRow>(
            r#"
            UPDATE booking_transactions
            SET is_paid = TRUE, updated_at = NOW()
            WHERE id = $1 AND is_paid = FALSE AND deleted_at IS NULL
            RETURNING id, booking_trx_id, name, phone_number, total_amount, duration,
                started_at, ended_at, is_paid, office_space_id, created_at, updated_at, deleted_at
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepositoryError::from)?;

        Ok(row.map(|r| r.into_domain()))
    }

    async fn update(&self, id: i64, fields: &BookingFields) -> RepositoryResult<BookingTransaction> {
        let row = sqlx::query_as::<_, BookingRow>(
            r#"
            UPDATE booking_transactions
            SET name = $2, phone_number = $3, total_amount = $4, duration = $5,
                started_at = $6, ended_at = $7, office_space_id = $8, updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING id, booking_trx_id, name, phone_number, total_amount, duration,
                started_at, ended_at, is_paid, office_space_id, created_at, updated_at, deleted_at
            "#,
        )
        .bind(id)
        .bind(&fields.name)
        .bind(&fields.phone_number)
        .bind(fields.total_amount)
        .bind(fields.duration)
        .bind(fields.started_at)
        .bind(fields.ended_at)
        .bind(fields.office_space_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepositoryError::from)?;

        row.map(|r| r.into_domain())
            .ok_or_else(|| RepositoryError::NotFound(format!("booking {}", id)))
    }

    async fn soft_delete(&self, id: i64) -> RepositoryResult<()> {
        let result = sqlx::query(
            "UPDATE booking_transactions SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(RepositoryError::from)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("booking {}", id)));
        }

        Ok(())
    }

    async fn list(&self, filter: &BookingFilter) -> RepositoryResult<Vec<BookingTransaction>> {
        let rows = sqlx::query_as::<_, BookingRow>(
            r#"
            SELECT id, booking_trx_id, name, phone_number, total_amount, duration,
                started_at, ended_at, is_paid, office_space_id, created_at, updated_at, deleted_at
            FROM booking_transactions
            WHERE deleted_at IS NULL
              AND ($1::TEXT IS NULL
                   OR booking_trx_id ILIKE $1 ESCAPE '\'
                   OR name ILIKE $1 ESCAPE '\')
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(filter.search.as_deref().map(contains_pattern))
        .bind(filter.limit)
        .bind(filter.offset)
        .fetch_all(&self.pool)
        .await
        .map_err(RepositoryError::from)?;

        Ok(rows.into_iter().map(|r| r.into_domain()).collect())
    }
}

/// `%needle%` with LIKE wildcards in the needle matched literally.
fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// Internal row type for SQLx. Not exposed outside the adapter.
#[derive(Debug, sqlx::FromRow)]
struct BookingRow {
    id: i64,
    booking_trx_id: String,
    name: String,
    phone_number: String,
    total_amount: i64,
    duration: i32,
    started_at: NaiveDate,
    ended_at: NaiveDate,
    is_paid: bool,
    office_space_id: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl BookingRow {
    fn into_domain(self) -> BookingTransaction {
        BookingTransaction {
            id: self.id,
            booking_trx_id: self.booking_trx_id,
            name: self.name,
            phone_number: self.phone_number,
            total_amount: self.total_amount,
            duration: self.duration,
            started_at: self.started_at,
            ended_at: self.ended_at,
            is_paid: self.is_paid,
            office_space_id: self.office_space_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
            deleted_at: self.deleted_at,
        }
    }
}
