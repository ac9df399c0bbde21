//! Booking status lookup by phone number and transaction code.

use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::domain::{BookingTransaction, OfficeSpace};
use crate::error::AppError;
use crate::ports::{BookingRepository, OfficeSpaceRepository};
use crate::validation::{self, ValidationErrors};

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct LookupRequest {
    pub phone_number: Option<String>,
    pub booking_trx_id: Option<String>,
}

pub struct LookupBooking {
    bookings: Arc<dyn BookingRepository>,
    offices: Arc<dyn OfficeSpaceRepository>,
}

impl LookupBooking {
    pub fn new(
        bookings: Arc<dyn BookingRepository>,
        offices: Arc<dyn OfficeSpaceRepository>,
    ) -> Self {
        Self { bookings, offices }
    }

    /// Returns the booking with its office space and city, matching both
    /// fields exactly.
    pub async fn execute(
        &self,
        request: LookupRequest,
    ) -> Result<(BookingTransaction, Option<OfficeSpace>), AppError> {
        let mut errors = ValidationErrors::new();
        let phone_number = errors.check(validation::required_string(
            "phone_number",
            request.phone_number.as_deref(),
        ));
        let booking_trx_id = errors.check(validation::required_string(
            "booking_trx_id",
            request.booking_trx_id.as_deref(),
        ));
        let (Some(phone_number), Some(booking_trx_id)) = (phone_number, booking_trx_id) else {
            return Err(errors.into());
        };

        let booking = self
            .bookings
            .find_by_phone_and_code(&phone_number, &booking_trx_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

        let office = super::office_of(self.offices.as_ref(), &booking).await;
        Ok((booking, office))
    }
}
