use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};

use crate::error::{AppError, ErrorBody};
use crate::schemas::{DataEnvelope, OfficeView};
use crate::AppState;

#[utoipa::path(
    get,
    path = "/offices",
    responses((status = 200, description = "All office spaces with their city", body = [OfficeView])),
    tag = "Offices"
)]
pub async fn list_offices(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let offices = state.offices.list().await?;
    let views: Vec<OfficeView> = offices.iter().map(OfficeView::detailed).collect();

    Ok(Json(DataEnvelope::new(views)))
}

#[utoipa::path(
    get,
    path = "/office/{slug}",
    params(("slug" = String, Path, description = "Office space slug")),
    responses(
        (status = 200, description = "Office space detail", body = OfficeView),
        (status = 404, description = "Unknown slug", body = ErrorBody)
    ),
    tag = "Offices"
)]
pub async fn get_office(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let office = state
        .offices
        .get_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Office space '{}' not found", slug)))?;

    Ok(Json(DataEnvelope::new(OfficeView::detailed(&office))))
}
