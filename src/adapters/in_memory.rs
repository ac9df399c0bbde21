//! In-process implementations of the storage ports, for tests and local runs
//! without a database.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::{BookingFields, BookingTransaction, NewBooking, OfficeSpace};
use crate::ports::{
    BookingFilter, BookingRepository, OfficeSpaceRepository, RepositoryError, RepositoryResult,
};

#[derive(Debug, Clone)]
struct StoredBooking {
    booking: BookingTransaction,
    deleted: bool,
}

#[derive(Debug, Default)]
struct BookingTable {
    next_id: i64,
    rows: Vec<StoredBooking>,
}

impl BookingTable {
    fn live_mut(&mut self, id: i64) -> Option<&mut BookingTransaction> {
        self.rows
            .iter_mut()
            .find(|row| !row.deleted && row.booking.id == id)
            .map(|row| &mut row.booking)
    }
}

#[derive(Clone, Default)]
pub struct InMemoryBookingRepository {
    table: Arc<RwLock<BookingTable>>,
}

impl InMemoryBookingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live (not soft-deleted) bookings.
    pub async fn count(&self) -> usize {
        self.table
            .read()
            .await
            .rows
            .iter()
            .filter(|row| !row.deleted)
            .count()
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn insert(&self, booking: &NewBooking) -> RepositoryResult<BookingTransaction> {
        let mut table = self.table.write().await;
        if table
            .rows
            .iter()
            .any(|row| row.booking.booking_trx_id == booking.booking_trx_id)
        {
            return Err(RepositoryError::Conflict(format!(
                "booking_trx_id {} already exists",
                booking.booking_trx_id
            )));
        }

        table.next_id += 1;
        let now = Utc::now();
        let fields = booking.fields.clone();
        let stored = BookingTransaction {
            id: table.next_id,
            booking_trx_id: booking.booking_trx_id.clone(),
            name: fields.name,
            phone_number: fields.phone_number,
            total_amount: fields.total_amount,
            duration: fields.duration,
            started_at: fields.started_at,
            ended_at: fields.ended_at,
            is_paid: false,
            office_space_id: fields.office_space_id,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        table.rows.push(StoredBooking {
            booking: stored.clone(),
            deleted: false,
        });

        Ok(stored)
    }

    async fn trx_code_exists(&self, booking_trx_id: &str) -> RepositoryResult<bool> {
        Ok(self
            .table
            .read()
            .await
            .rows
            .iter()
            .any(|row| row.booking.booking_trx_id == booking_trx_id))
    }

    async fn get_by_id(&self, id: i64) -> RepositoryResult<BookingTransaction> {
        self.table
            .read()
            .await
            .rows
            .iter()
            .find(|row| !row.deleted && row.booking.id == id)
            .map(|row| row.booking.clone())
            .ok_or_else(|| RepositoryError::NotFound(format!("booking {}", id)))
    }

    async fn find_by_phone_and_code(
        &self,
        phone_number: &str,
        booking_trx_id: &str,
    ) -> RepositoryResult<Option<BookingTransaction>> {
        Ok(self
            .table
            .read()
            .await
            .rows
            .iter()
            .find(|row| {
                !row.deleted
                    && row.booking.phone_number == phone_number
                    && row.booking.booking_trx_id == booking_trx_id
            })
            .map(|row| row.booking.clone()))
    }

    async fn mark_paid(&self, id: i64) -> RepositoryResult<Option<BookingTransaction>> {
        let mut table = self.table.write().await;
        match table.live_mut(id) {
            Some(booking) if !booking.is_paid => {
                booking.is_paid = true;
                booking.updated_at = Utc::now();
                Ok(Some(booking.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn update(&self, id: i64, fields: &BookingFields) -> RepositoryResult<BookingTransaction> {
        let mut table = self.table.write().await;
        let booking = table
            .live_mut(id)
            .ok_or_else(|| RepositoryError::NotFound(format!("booking {}", id)))?;

        booking.name = fields.name.clone();
        booking.phone_number = fields.phone_number.clone();
        booking.total_amount = fields.total_amount;
        booking.duration = fields.duration;
        booking.started_at = fields.started_at;
        booking.ended_at = fields.ended_at;
        booking.office_space_id = fields.office_space_id;
        booking.updated_at = Utc::now();

        Ok(booking.clone())
    }

    async fn soft_delete(&self, id: i64) -> RepositoryResult<()> {
        let mut table = self.table.write().await;
        let row = table
            .rows
            .iter_mut()
            .find(|row| !row.deleted && row.booking.id == id)
            .ok_or_else(|| RepositoryError::NotFound(format!("booking {}", id)))?;
        row.deleted = true;
        row.booking.deleted_at = Some(Utc::now());

        Ok(())
    }

    async fn list(&self, filter: &BookingFilter) -> RepositoryResult<Vec<BookingTransaction>> {
        let needle = filter.search.as_deref().map(str::to_lowercase);
        let table = self.table.read().await;

        let mut matches: Vec<BookingTransaction> = table
            .rows
            .iter()
            .filter(|row| !row.deleted)
            .map(|row| &row.booking)
            .filter(|booking| match needle.as_deref() {
                Some(needle) => {
                    booking.booking_trx_id.to_lowercase().contains(needle)
                        || booking.name.to_lowercase().contains(needle)
                }
                None => true,
            })
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        let offset = usize::try_from(filter.offset).unwrap_or(0);
        let limit = usize::try_from(filter.limit).unwrap_or(0);

        Ok(matches.into_iter().skip(offset).take(limit).collect())
    }
}

#[derive(Clone, Default)]
pub struct InMemoryOfficeSpaceRepository {
    offices: Arc<RwLock<Vec<OfficeSpace>>>,
}

impl InMemoryOfficeSpaceRepository {
    pub fn with_offices(offices: Vec<OfficeSpace>) -> Self {
        Self {
            offices: Arc::new(RwLock::new(offices)),
        }
    }
}

#[async_trait]
impl OfficeSpaceRepository for InMemoryOfficeSpaceRepository {
    async fn get_by_id(&self, id: i64) -> RepositoryResult<Option<OfficeSpace>> {
        Ok(self
            .offices
            .read()
            .await
            .iter()
            .find(|office| office.id == id)
            .cloned())
    }

    async fn get_by_slug(&self, slug: &str) -> RepositoryResult<Option<OfficeSpace>> {
        Ok(self
            .offices
            .read()
            .await
            .iter()
            .find(|office| office.slug == slug)
            .cloned())
    }

    async fn list(&self) -> RepositoryResult<Vec<OfficeSpace>> {
        let mut offices = self.offices.read().await.clone();
        offices.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(offices)
    }
}
