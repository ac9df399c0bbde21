use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::error::{AppError, ErrorBody};
use crate::schemas::{BookingView, DataEnvelope, OfficeView};
use crate::use_cases::{BookingRequest, CreateBooking, LookupBooking, LookupRequest};
use crate::validation::ValidationError;
use crate::AppState;

/// Malformed JSON is reported like any other validation failure.
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| ValidationError::new("body", rejection.body_text()).into())
}

#[utoipa::path(
    post,
    path = "/booking-transaction",
    request_body = BookingRequest,
    responses(
        (status = 201, description = "Booking created", body = BookingView),
        (status = 404, description = "Office space not found", body = ErrorBody),
        (status = 422, description = "Invalid input, errors keyed by field", body = ErrorBody)
    ),
    tag = "Bookings"
)]
pub async fn create_booking(
    State(state): State<AppState>,
    payload: Result<Json<BookingRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let request = json_body(payload)?;
    let created = CreateBooking::new(
        state.bookings.clone(),
        state.offices.clone(),
        state.notifier.clone(),
    )
    .execute(request)
    .await?;

    let view = BookingView::new(created.booking, Some(OfficeView::summary(&created.office)));
    Ok((StatusCode::CREATED, Json(DataEnvelope::new(view))))
}

#[utoipa::path(
    post,
    path = "/booking-details",
    request_body = LookupRequest,
    responses(
        (status = 200, description = "Booking with office space and city", body = BookingView),
        (status = 404, description = "No booking matches", body = ErrorBody),
        (status = 422, description = "Missing fields", body = ErrorBody)
    ),
    tag = "Bookings"
)]
pub async fn booking_details(
    State(state): State<AppState>,
    payload: Result<Json<LookupRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let request = json_body(payload)?;
    let (booking, office) = LookupBooking::new(state.bookings.clone(), state.offices.clone())
        .execute(request)
        .await?;

    Ok(Json(DataEnvelope::new(BookingView::new(
        booking,
        office.as_ref().map(OfficeView::detailed),
    ))))
}
