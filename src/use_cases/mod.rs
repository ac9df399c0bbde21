pub mod approve_booking;
pub mod create_booking;
pub mod lookup_booking;
pub mod manage_bookings;

pub use approve_booking::{Approval, ApproveBooking};
pub use create_booking::{BookingRequest, CreateBooking, CreatedBooking};
pub use lookup_booking::{LookupBooking, LookupRequest};
pub use manage_bookings::{BookingSummary, ManageBookings};

use crate::domain::{BookingDetails, BookingFields, BookingTransaction, OfficeSpace};
use crate::error::AppError;
use crate::ports::OfficeSpaceRepository;
use crate::validation::ValidationError;

/// Loads the referenced office space and derives the stored booking columns.
async fn resolve_fields(
    offices: &dyn OfficeSpaceRepository,
    details: BookingDetails,
) -> Result<(BookingFields, OfficeSpace), AppError> {
    let office = offices
        .get_by_id(details.office_space_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Office space {} not found", details.office_space_id))
        })?;

    let fields = BookingFields::derive(details, &office).ok_or_else(|| {
        ValidationError::new(
            "started_at",
            "The started at field is too far in the future for this office's duration.",
        )
    })?;

    Ok((fields, office))
}

/// Loads the office of an existing booking for display. A missing office or a
/// failed read is logged and yields `None`; the booking is still reported.
async fn office_of(
    offices: &dyn OfficeSpaceRepository,
    booking: &BookingTransaction,
) -> Option<OfficeSpace> {
    match offices.get_by_id(booking.office_space_id).await {
        Ok(Some(office)) => Some(office),
        Ok(None) => {
            tracing::warn!(
                booking_id = booking.id,
                office_space_id = booking.office_space_id,
                "Office space of booking no longer exists"
            );
            None
        }
        Err(e) => {
            tracing::error!(
                booking_id = booking.id,
                office_space_id = booking.office_space_id,
                error = %e,
                "Failed to load office space of booking"
            );
            None
        }
    }
}
