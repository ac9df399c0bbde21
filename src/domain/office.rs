//! Office catalog entities.
//! Owned by the admin catalog; the booking flow only reads them.

/// A city grouping office spaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct City {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

/// A bookable office space with a fixed price and rental duration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfficeSpace {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub address: String,
    pub about: String,
    pub price: i64,
    /// Rental period in days.
    pub duration: i32,
    pub city: City,
}
