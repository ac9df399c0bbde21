pub mod adapters;
pub mod cli;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod handlers;
pub mod health;
pub mod middleware;
pub mod notifications;
pub mod ports;
pub mod schemas;
pub mod startup;
pub mod use_cases;
pub mod utils;
pub mod validation;

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::health::HealthChecker;
use crate::middleware::auth::{admin_auth, AdminApiKey};
use crate::middleware::request_logger::{request_logger_middleware, RequestLogSettings};
use crate::notifications::NotificationDispatcher;
use crate::ports::{BookingRepository, OfficeSpaceRepository};
use crate::schemas::ApiDoc;

#[derive(Clone)]
pub struct AppState {
    pub bookings: Arc<dyn BookingRepository>,
    pub offices: Arc<dyn OfficeSpaceRepository>,
    pub notifier: NotificationDispatcher,
    pub health: HealthChecker,
    pub admin_api_key: AdminApiKey,
    pub request_log: RequestLogSettings,
}

pub fn create_app(state: AppState) -> Router {
    let admin = Router::new()
        .route(
            "/bookings",
            get(handlers::admin::list_bookings).post(handlers::admin::create_booking),
        )
        .route(
            "/bookings/:id",
            get(handlers::admin::get_booking)
                .put(handlers::admin::update_booking)
                .delete(handlers::admin::delete_booking),
        )
        .route("/bookings/:id/approve", post(handlers::admin::approve_booking))
        .layer(from_fn_with_state(state.admin_api_key.clone(), admin_auth));

    Router::new()
        .route("/health", get(handlers::health))
        .route("/offices", get(handlers::office::list_offices))
        .route("/office/:slug", get(handlers::office::get_office))
        .route("/booking-transaction", post(handlers::booking::create_booking))
        .route("/booking-details", post(handlers::booking::booking_details))
        .nest("/admin", admin)
        .layer(from_fn_with_state(state.request_log, request_logger_middleware))
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
