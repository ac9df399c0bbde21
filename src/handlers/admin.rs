use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use super::booking::json_body;
use crate::error::{AppError, ErrorBody};
use crate::schemas::{ApprovalView, BookingView, DataEnvelope, OfficeView};
use crate::use_cases::{
    ApproveBooking, BookingRequest, BookingSummary, CreateBooking, ManageBookings,
};
use crate::AppState;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BookingListQuery {
    /// Matches transaction code or customer name.
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

fn manage(state: &AppState) -> ManageBookings {
    ManageBookings::new(state.bookings.clone(), state.offices.clone())
}

#[utoipa::path(
    get,
    path = "/admin/bookings",
    params(BookingListQuery),
    responses(
        (status = 200, description = "Bookings, newest first", body = [BookingSummary]),
        (status = 401, description = "Missing or invalid API key", body = ErrorBody)
    ),
    security(("admin_api_key" = [])),
    tag = "Admin"
)]
pub async fn list_bookings(
    State(state): State<AppState>,
    Query(query): Query<BookingListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let rows = manage(&state)
        .list(query.search, query.limit, query.offset)
        .await?;

    Ok(Json(DataEnvelope::new(rows)))
}

#[utoipa::path(
    get,
    path = "/admin/bookings/{id}",
    params(("id" = i64, Path, description = "Booking id")),
    responses(
        (status = 200, description = "Booking detail", body = BookingView),
        (status = 404, description = "Unknown booking", body = ErrorBody)
    ),
    security(("admin_api_key" = [])),
    tag = "Admin"
)]
pub async fn get_booking(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let (booking, office) = manage(&state).get(id).await?;

    Ok(Json(DataEnvelope::new(BookingView::new(
        booking,
        office.as_ref().map(OfficeView::detailed),
    ))))
}

#[utoipa::path(
    post,
    path = "/admin/bookings",
    request_body = BookingRequest,
    responses(
        (status = 201, description = "Booking created", body = BookingView),
        (status = 404, description = "Office space not found", body = ErrorBody),
        (status = 422, description = "Invalid input", body = ErrorBody)
    ),
    security(("admin_api_key" = [])),
    tag = "Admin"
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

    let view = BookingView::new(created.booking, Some(OfficeView::detailed(&created.office)));
    Ok((StatusCode::CREATED, Json(DataEnvelope::new(view))))
}

#[utoipa::path(
    put,
    path = "/admin/bookings/{id}",
    params(("id" = i64, Path, description = "Booking id")),
    request_body = BookingRequest,
    responses(
        (status = 200, description = "Booking updated; end date recomputed", body = BookingView),
        (status = 404, description = "Unknown booking or office space", body = ErrorBody),
        (status = 422, description = "Invalid input", body = ErrorBody)
    ),
    security(("admin_api_key" = [])),
    tag = "Admin"
)]
pub async fn update_booking(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<BookingRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let request = json_body(payload)?;
    let (booking, office) = manage(&state).update(id, request).await?;

    Ok(Json(DataEnvelope::new(BookingView::new(
        booking,
        Some(OfficeView::detailed(&office)),
    ))))
}

#[utoipa::path(
    delete,
    path = "/admin/bookings/{id}",
    params(("id" = i64, Path, description = "Booking id")),
    responses(
        (status = 204, description = "Booking soft-deleted"),
        (status = 404, description = "Unknown booking", body = ErrorBody)
    ),
    security(("admin_api_key" = [])),
    tag = "Admin"
)]
pub async fn delete_booking(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    manage(&state).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/admin/bookings/{id}/approve",
    params(("id" = i64, Path, description = "Booking id")),
    responses(
        (status = 200, description = "Booking marked as paid", body = ApprovalView),
        (status = 404, description = "Unknown booking", body = ErrorBody)
    ),
    security(("admin_api_key" = [])),
    tag = "Admin"
)]
pub async fn approve_booking(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let approval = ApproveBooking::new(
        state.bookings.clone(),
        state.offices.clone(),
        state.notifier.clone(),
    )
    .execute(id)
    .await?;

    let message = if approval.newly_approved {
        "Booking Approved"
    } else {
        "Booking already approved"
    };

    Ok(Json(DataEnvelope::new(ApprovalView {
        message: message.to_string(),
        newly_approved: approval.newly_approved,
        booking: BookingView::new(
            approval.booking,
            approval.office.as_ref().map(OfficeView::detailed),
        ),
    })))
}
