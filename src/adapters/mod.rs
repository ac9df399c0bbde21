pub mod in_memory;
pub mod postgres_booking_repository;
pub mod postgres_office_repository;

pub use in_memory::{InMemoryBookingRepository, InMemoryOfficeSpaceRepository};
pub use postgres_booking_repository::PostgresBookingRepository;
pub use postgres_office_repository::PostgresOfficeSpaceRepository;
