use chrono::NaiveDate;
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

use crate::domain::{BookingTransaction, City, OfficeSpace};
use crate::error::ErrorBody;
use crate::handlers;
use crate::health::{DependencyStatus, HealthResponse};
use crate::use_cases::{BookingRequest, BookingSummary, LookupRequest};

/// Successful responses are wrapped as `{"data": ...}`.
#[derive(Debug, Serialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

impl<T> DataEnvelope<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CityView {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

impl From<&City> for CityView {
    fn from(city: &City) -> Self {
        Self {
            id: city.id,
            name: city.name.clone(),
            slug: city.slug.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OfficeView {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub address: String,
    pub about: String,
    pub price: i64,
    pub duration: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<CityView>,
}

impl OfficeView {
    /// Office without its city.
    pub fn summary(office: &OfficeSpace) -> Self {
        Self {
            id: office.id,
            name: office.name.clone(),
            slug: office.slug.clone(),
            address: office.address.clone(),
            about: office.about.clone(),
            price: office.price,
            duration: office.duration,
            city: None,
        }
    }

    pub fn detailed(office: &OfficeSpace) -> Self {
        Self {
            city: Some(CityView::from(&office.city)),
            ..Self::summary(office)
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookingView {
    pub id: i64,
    pub name: String,
    pub phone_number: String,
    pub booking_trx_id: String,
    pub is_paid: bool,
    pub duration: i32,
    pub total_amount: i64,
    pub started_at: NaiveDate,
    pub ended_at: NaiveDate,
    /// Absent when the booked office space has since been removed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub office: Option<OfficeView>,
}

impl BookingView {
    pub fn new(booking: BookingTransaction, office: Option<OfficeView>) -> Self {
        Self {
            id: booking.id,
            name: booking.name,
            phone_number: booking.phone_number,
            booking_trx_id: booking.booking_trx_id,
            is_paid: booking.is_paid,
            duration: booking.duration,
            total_amount: booking.total_amount,
            started_at: booking.started_at,
            ended_at: booking.ended_at,
            office,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ApprovalView {
    /// Operator acknowledgement, e.g. "Booking Approved".
    pub message: String,
    pub newly_approved: bool,
    pub booking: BookingView,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health,
        handlers::office::list_offices,
        handlers::office::get_office,
        handlers::booking::create_booking,
        handlers::booking::booking_details,
        handlers::admin::list_bookings,
        handlers::admin::get_booking,
        handlers::admin::create_booking,
        handlers::admin::update_booking,
        handlers::admin::delete_booking,
        handlers::admin::approve_booking,
    ),
    components(schemas(
        BookingRequest,
        LookupRequest,
        BookingView,
        OfficeView,
        CityView,
        BookingSummary,
        ApprovalView,
        ErrorBody,
        HealthResponse,
        DependencyStatus,
    )),
    modifiers(&AdminKeyScheme),
    tags(
        (name = "Bookings", description = "Public booking API"),
        (name = "Offices", description = "Office catalog"),
        (name = "Admin", description = "Back-office booking management"),
        (name = "Health", description = "Service health"),
    )
)]
pub struct ApiDoc;

struct AdminKeyScheme;

impl utoipa::Modify for AdminKeyScheme {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};

        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "admin_api_key",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
            );
        }
    }
}
