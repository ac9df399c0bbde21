use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::error::AppError;

/// Shared admin API key, taken from configuration at startup.
#[derive(Clone)]
pub struct AdminApiKey(pub Arc<str>);

impl AdminApiKey {
    pub fn new(key: &str) -> Self {
        Self(Arc::from(key))
    }

    fn matches(&self, header: &str) -> bool {
        let presented = header.strip_prefix("Bearer ").unwrap_or(header);
        !self.0.is_empty() && presented == &*self.0
    }
}

pub async fn admin_auth(
    State(key): State<AdminApiKey>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok());

    match auth_header {
        Some(auth) if key.matches(auth) => Ok(next.run(req).await),
        _ => {
            tracing::warn!(uri = %req.uri(), "Rejected admin request with missing or invalid API key");
            Err(AppError::Unauthorized("invalid admin API key".to_string()))
        }
    }
}
