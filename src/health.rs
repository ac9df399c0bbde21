use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::timeout;
use utoipa::ToSchema;

const CHECK_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    /// "configured" or "disabled"; never affects the overall status.
    pub messaging: String,
    pub dependencies: BTreeMap<String, DependencyStatus>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum DependencyStatus {
    Healthy { status: String, latency_ms: u64 },
    Unhealthy { status: String, error: String },
}

impl DependencyStatus {
    pub fn is_healthy(&self) -> bool {
        matches!(self, DependencyStatus::Healthy { .. })
    }
}

#[async_trait]
pub trait DependencyChecker: Send + Sync {
    async fn check(&self) -> DependencyStatus;
}

pub struct PostgresChecker {
    pool: sqlx::PgPool,
}

impl PostgresChecker {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DependencyChecker for PostgresChecker {
    async fn check(&self) -> DependencyStatus {
        let start = Instant::now();
        match sqlx::query("SELECT 1").execute(&self.pool).await {
            Ok(_) => DependencyStatus::Healthy {
                status: "healthy".to_string(),
                latency_ms: start.elapsed().as_millis() as u64,
            },
            Err(e) => DependencyStatus::Unhealthy {
                status: "unhealthy".to_string(),
                error: e.to_string(),
            },
        }
    }
}

/// Named dependency checks run by `GET /health`.
#[derive(Clone)]
pub struct HealthChecker {
    checkers: Vec<(String, Arc<dyn DependencyChecker>)>,
    start_time: Instant,
}

impl Default for HealthChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl HealthChecker {
    pub fn new() -> Self {
        Self {
            checkers: Vec::new(),
            start_time: Instant::now(),
        }
    }

    pub fn with_checker(mut self, name: impl Into<String>, checker: Arc<dyn DependencyChecker>) -> Self {
        self.checkers.push((name.into(), checker));
        self
    }

    pub async fn check_all(&self, messaging_enabled: bool) -> HealthResponse {
        let mut dependencies = BTreeMap::new();
        for (name, checker) in &self.checkers {
            let status = match timeout(CHECK_TIMEOUT, checker.check()).await {
                Ok(status) => status,
                Err(_) => DependencyStatus::Unhealthy {
                    status: "unhealthy".to_string(),
                    error: format!("timed out after {}s", CHECK_TIMEOUT.as_secs()),
                },
            };
            dependencies.insert(name.clone(), status);
        }

        let healthy = dependencies.values().all(DependencyStatus::is_healthy);

        HealthResponse {
            status: if healthy { "healthy" } else { "unhealthy" }.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            messaging: if messaging_enabled { "configured" } else { "disabled" }.to_string(),
            dependencies,
        }
    }
}
