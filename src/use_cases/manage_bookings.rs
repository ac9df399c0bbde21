//! Back-office booking management: list, view, edit, soft delete.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use utoipa::ToSchema;

use super::create_booking::BookingRequest;
use crate::domain::{BookingTransaction, OfficeSpace};
use crate::error::AppError;
use crate::ports::{BookingFilter, BookingRepository, OfficeSpaceRepository};

pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 100;

/// One row of the admin booking table.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookingSummary {
    pub id: i64,
    pub booking_trx_id: String,
    pub name: String,
    pub office_name: Option<String>,
    pub started_at: NaiveDate,
    pub is_paid: bool,
}

pub struct ManageBookings {
    bookings: Arc<dyn BookingRepository>,
    offices: Arc<dyn OfficeSpaceRepository>,
}

impl ManageBookings {
    pub fn new(
        bookings: Arc<dyn BookingRepository>,
        offices: Arc<dyn OfficeSpaceRepository>,
    ) -> Self {
        Self { bookings, offices }
    }

    pub async fn list(
        &self,
        search: Option<String>,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<BookingSummary>, AppError> {
        let filter = BookingFilter {
            search: search
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            limit: limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE),
            offset: offset.unwrap_or(0).max(0),
        };

        let bookings = self.bookings.list(&filter).await?;
        let office_names: HashMap<i64, String> = self
            .offices
            .list()
            .await?
            .into_iter()
            .map(|office| (office.id, office.name))
            .collect();

        Ok(bookings
            .into_iter()
            .map(|booking| BookingSummary {
                office_name: office_names.get(&booking.office_space_id).cloned(),
                id: booking.id,
                booking_trx_id: booking.booking_trx_id,
                name: booking.name,
                started_at: booking.started_at,
                is_paid: booking.is_paid,
            })
            .collect())
    }

    pub async fn get(
        &self,
        id: i64,
    ) -> Result<(BookingTransaction, Option<OfficeSpace>), AppError> {
        let booking = self.bookings.get_by_id(id).await?;
        let office = super::office_of(self.offices.as_ref(), &booking).await;

        Ok((booking, office))
    }

    /// Replaces the editable fields. Duration and end date are re-derived
    /// from the (possibly new) office; payment status and code are untouched.
    pub async fn update(
        &self,
        id: i64,
        request: BookingRequest,
    ) -> Result<(BookingTransaction, OfficeSpace), AppError> {
        let details = request.validate()?;
        // Surface a missing booking before complaining about its office.
        self.bookings.get_by_id(id).await?;
        let (fields, office) = super::resolve_fields(self.offices.as_ref(), details).await?;

        let booking = self.bookings.update(id, &fields).await?;
        tracing::info!(
            booking_id = id,
            booking_trx_id = %booking.booking_trx_id,
            "Booking updated"
        );

        Ok((booking, office))
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.bookings.soft_delete(id).await?;
        tracing::info!(booking_id = id, "Booking soft-deleted");
        Ok(())
    }
}
