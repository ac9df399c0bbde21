//! Admin approval: marks a booking as paid and sends the confirmation.

use std::sync::Arc;

use crate::domain::{BookingTransaction, OfficeSpace};
use crate::error::AppError;
use crate::notifications::{MessageTemplate, NotificationDispatcher, NotificationOutcome};
use crate::ports::{BookingRepository, OfficeSpaceRepository};

#[derive(Debug)]
pub struct Approval {
    pub booking: BookingTransaction,
    /// `None` when the booked office space has since been removed.
    pub office: Option<OfficeSpace>,
    /// False when the booking was already paid; nothing is sent in that case.
    pub newly_approved: bool,
    pub notification: Option<NotificationOutcome>,
}

pub struct ApproveBooking {
    bookings: Arc<dyn BookingRepository>,
    offices: Arc<dyn OfficeSpaceRepository>,
    notifier: NotificationDispatcher,
}

impl ApproveBooking {
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

    pub async fn execute(&self, booking_id: i64) -> Result<Approval, AppError> {
        let Some(booking) = self.bookings.mark_paid(booking_id).await? else {
            let booking = self.bookings.get_by_id(booking_id).await?;
            tracing::info!(
                booking_id,
                booking_trx_id = %booking.booking_trx_id,
                "Booking already approved; no notification sent"
            );
            let office = super::office_of(self.offices.as_ref(), &booking).await;
            return Ok(Approval {
                booking,
                office,
                newly_approved: false,
                notification: None,
            });
        };

        tracing::info!(
            booking_id,
            booking_trx_id = %booking.booking_trx_id,
            "Booking Approved"
        );

        let office = super::office_of(self.offices.as_ref(), &booking).await;
        let notification = match &office {
            Some(office) => {
                self.notifier
                    .dispatch(MessageTemplate::BookingApproved, &booking, office)
                    .await
            }
            None => NotificationOutcome::Skipped {
                reason: format!("office space {} not found", booking.office_space_id),
            },
        };

        Ok(Approval {
            booking,
            office,
            newly_approved: true,
            notification: Some(notification),
        })
    }
}
