//! Booking transaction domain entity.
//! Framework-agnostic representation of a customer's office reservation.

use chrono::{DateTime, Days, NaiveDate, Utc};

use super::office::OfficeSpace;

/// A persisted booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingTransaction {
    pub id: i64,
    pub booking_trx_id: String,
    pub name: String,
    pub phone_number: String,
    pub total_amount: i64,
    pub duration: i32,
    pub started_at: NaiveDate,
    pub ended_at: NaiveDate,
    pub is_paid: bool,
    pub office_space_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Set by soft delete; repositories only return rows where this is `None`.
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Validated customer input, before anything is derived from the office.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingDetails {
    pub name: String,
    pub phone_number: String,
    pub started_at: NaiveDate,
    pub office_space_id: i64,
    pub total_amount: i64,
}

/// Every stored column a booking's details determine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingFields {
    pub name: String,
    pub phone_number: String,
    pub total_amount: i64,
    pub duration: i32,
    pub started_at: NaiveDate,
    pub ended_at: NaiveDate,
    pub office_space_id: i64,
}

impl BookingFields {
    /// Takes the duration from `office` and derives the end date.
    /// Returns `None` when the end date falls outside the calendar range.
    pub fn derive(details: BookingDetails, office: &OfficeSpace) -> Option<Self> {
        let ended_at = end_date(details.started_at, office.duration)?;

        Some(Self {
            name: details.name,
            phone_number: details.phone_number,
            total_amount: details.total_amount,
            duration: office.duration,
            started_at: details.started_at,
            ended_at,
            office_space_id: office.id,
        })
    }
}

/// A booking ready to be inserted. Always starts unpaid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    pub booking_trx_id: String,
    pub fields: BookingFields,
}

pub fn end_date(started_at: NaiveDate, duration_days: i32) -> Option<NaiveDate> {
    let days = u64::try_from(duration_days).ok()?;
    started_at.checked_add_days(Days::new(days))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::City;

    fn office(duration: i32) -> OfficeSpace {
        OfficeSpace {
            id: 7,
            name: "Angga Park".to_string(),
            slug: "angga-park".to_string(),
            address: "Jl. Sudirman 1".to_string(),
            about: String::new(),
            price: 1_500_000,
            duration,
            city: City {
                id: 1,
                name: "Jakarta".to_string(),
                slug: "jakarta".to_string(),
            },
        }
    }

    fn details(started_at: NaiveDate) -> BookingDetails {
        BookingDetails {
            name: "Budi".to_string(),
            phone_number: "08123456789".to_string(),
            started_at,
            office_space_id: 99,
            total_amount: 1_499_500,
        }
    }

    #[test]
    fn end_date_adds_duration_days() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 30).unwrap();
        assert_eq!(end_date(start, 3), NaiveDate::from_ymd_opt(2024, 2, 2));
        assert_eq!(end_date(start, 0), Some(start));
    }

    #[test]
    fn end_date_rejects_negative_duration() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 30).unwrap();
        assert_eq!(end_date(start, -1), None);
    }

    #[test]
    fn end_date_rejects_overflow() {
        assert_eq!(end_date(NaiveDate::MAX, 1), None);
    }

    #[test]
    fn derive_takes_duration_and_id_from_office() {
        let start = NaiveDate::from_ymd_opt(2024, 12, 25).unwrap();
        let fields = BookingFields::derive(details(start), &office(20)).unwrap();

        assert_eq!(fields.duration, 20);
        assert_eq!(fields.office_space_id, 7);
        assert_eq!(fields.ended_at, NaiveDate::from_ymd_opt(2025, 1, 14).unwrap());
        assert_eq!(fields.total_amount, 1_499_500);
    }
}
