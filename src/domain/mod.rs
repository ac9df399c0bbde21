pub mod booking;
pub mod office;
pub mod trx_code;

pub use booking::{BookingDetails, BookingFields, BookingTransaction, NewBooking};
pub use office::{City, OfficeSpace};
