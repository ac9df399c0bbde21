//! Create booking use case.
//! Validates the request, derives the end date and transaction code, persists
//! the booking, then sends the creation notification on a best-effort basis.

use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::domain::{trx_code, BookingDetails, BookingTransaction, NewBooking, OfficeSpace};
use crate::error::AppError;
use crate::notifications::{MessageTemplate, NotificationDispatcher, NotificationOutcome};
use crate::ports::{BookingRepository, OfficeSpaceRepository, RepositoryError};
use crate::validation::{self, ValidationErrors};

const MAX_CODE_ATTEMPTS: usize = 10;

/// Booking form payload. Every field is optional on the wire so that all
/// missing fields are reported at once.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct BookingRequest {
    pub name: Option<String>,
    pub phone_number: Option<String>,
    /// `YYYY-MM-DD`
    pub started_at: Option<String>,
    pub office_space_id: Option<i64>,
    pub total_amount: Option<i64>,
}

impl BookingRequest {
    pub fn validate(self) -> Result<BookingDetails, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name = errors.check(validation::required_string("name", self.name.as_deref()));
        let phone_number = errors.check(validation::required_string(
            "phone_number",
            self.phone_number.as_deref(),
        ));
        let started_at = errors.check(validation::parse_date(
            "started_at",
            self.started_at.as_deref(),
        ));
        let office_space_id =
            errors.check(validation::required("office_space_id", self.office_space_id));
        let total_amount = errors
            .check(validation::required("total_amount", self.total_amount))
            .and_then(|amount| {
                errors
                    .check(validation::validate_non_negative("total_amount", amount))
                    .map(|_| amount)
            });

        match (name, phone_number, started_at, office_space_id, total_amount) {
            (
                Some(name),
                Some(phone_number),
                Some(started_at),
                Some(office_space_id),
                Some(total_amount),
            ) if errors.is_empty() => Ok(BookingDetails {
                name,
                phone_number,
                started_at,
                office_space_id,
                total_amount,
            }),
            _ => Err(errors),
        }
    }
}

/// Output of the CreateBooking use case.
#[derive(Debug)]
pub struct CreatedBooking {
    pub booking: BookingTransaction,
    pub office: OfficeSpace,
    pub notification: NotificationOutcome,
}

/// Use case for creating bookings.
pub struct CreateBooking {
    bookings: Arc<dyn BookingRepository>,
    offices: Arc<dyn OfficeSpaceRepository>,
    notifier: NotificationDispatcher,
}

impl CreateBooking {
    pub fn new(
        bookings: Arc<dyn BookingRepository>,
        offices: Arc<dyn OfficeSpaceRepository>,
        notifier: NotificationDispatcher,
    ) -> Self {
        Self {
            bookings,
            offices,
            notifier,
        }
    }

    pub async fn execute(&self, request: BookingRequest) -> Result<CreatedBooking, AppError> {
        let details = request.validate()?;
        let (fields, office) = super::resolve_fields(self.offices.as_ref(), details).await?;

        let mut attempts = 0;
        let booking = loop {
            attempts += 1;
            let code = trx_code::generate();
            if self.bookings.trx_code_exists(&code).await? {
                tracing::debug!(booking_trx_id = %code, "Transaction code collision, regenerating");
            } else {
                let new_booking = NewBooking {
                    booking_trx_id: code,
                    fields: fields.clone(),
                };
                match self.bookings.insert(&new_booking).await {
                    Ok(booking) => break booking,
                    // Lost a race for the same code.
                    Err(RepositoryError::Conflict(_)) => {}
                    Err(e) => return Err(e.into()),
                }
            }

            if attempts >= MAX_CODE_ATTEMPTS {
                return Err(AppError::Internal(format!(
                    "could not generate a unique transaction code after {} attempts",
                    MAX_CODE_ATTEMPTS
                )));
            }
        };

        tracing::info!(
            booking_id = booking.id,
            booking_trx_id = %booking.booking_trx_id,
            office_space_id = office.id,
            started_at = %booking.started_at,
            ended_at = %booking.ended_at,
            "Booking created"
        );

        let notification = self
            .notifier
            .dispatch(MessageTemplate::BookingCreated, &booking, &office)
            .await;

        Ok(CreatedBooking {
            booking,
            office,
            notification,
        })
    }
}
