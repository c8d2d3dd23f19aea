//! Service health: probe both backends and the cache, then fold the
//! results into one verdict.

use std::time::Instant;

use alum_config::ApiMode;
use alum_core::responses::ApiResult;
use alum_http::Endpoints;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::context::Backend;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

impl HealthStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Degraded => "degraded",
            Self::Unhealthy => "unhealthy",
        }
    }
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentHealth {
    pub name: String,
    pub status: HealthStatus,
    /// Whether calls are currently routed to this component.
    pub active: bool,
    pub latency_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub status: HealthStatus,
    pub mode: ApiMode,
    pub components: Vec<ComponentHealth>,
    pub checked_at: DateTime<Utc>,
}

/// Fold component results: the backend in use being down is unhealthy,
/// anything else down is degraded.
#[must_use]
pub fn aggregate(components: &[ComponentHealth]) -> HealthStatus {
    let mut status = HealthStatus::Healthy;
    for component in components {
        match (component.status, component.active) {
            (HealthStatus::Healthy, _) => {}
            (HealthStatus::Unhealthy, true) => return HealthStatus::Unhealthy,
            _ => status = HealthStatus::Degraded,
        }
    }
    status
}

fn component(name: &str, active: bool, started: Instant, outcome: ApiResult<()>) -> ComponentHealth {
    let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    let (status, message) = match outcome {
        Ok(()) => (HealthStatus::Healthy, None),
        Err(e) => (HealthStatus::Unhealthy, Some(e.to_string())),
    };
    ComponentHealth {
        name: name.to_string(),
        status,
        active,
        latency_ms,
        message,
    }
}

pub struct HealthAggregator {
    backend: Backend,
}

impl HealthAggregator {
    #[must_use]
    pub const fn new(backend: Backend) -> Self {
        Self { backend }
    }

    pub async fn check(&self) -> HealthReport {
        let mode = self.backend.mode();
        let mut components = Vec::with_capacity(3);

        let started = Instant::now();
        let real = self
            .backend
            .client()
            .get::<Value>(Endpoints::HEALTH)
            .await
            .map(|_| ());
        components.push(component("api", !mode.is_mock(), started, real));

        let started = Instant::now();
        let mock = self.backend.mocks().loader.probe().await;
        components.push(component("mock", mode.is_mock(), started, mock));

        let keys = self.backend.mocks().loader.cache().keys();
        components.push(ComponentHealth {
            name: "cache".to_string(),
            status: HealthStatus::Healthy,
            active: mode.is_mock(),
            latency_ms: 0,
            message: Some(format!("{} cached collection(s)", keys.len())),
        });

        let status = aggregate(&components);
        if status != HealthStatus::Healthy {
            tracing::warn!(%status, %mode, "service health check not healthy");
        }
        HealthReport {
            status,
            mode,
            components,
            checked_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn part(status: HealthStatus, active: bool) -> ComponentHealth {
        ComponentHealth {
            name: "x".into(),
            status,
            active,
            latency_ms: 0,
            message: None,
        }
    }

    #[rstest]
    #[case(vec![part(HealthStatus::Healthy, true), part(HealthStatus::Healthy, false)], HealthStatus::Healthy)]
    #[case(vec![part(HealthStatus::Healthy, true), part(HealthStatus::Unhealthy, false)], HealthStatus::Degraded)]
    #[case(vec![part(HealthStatus::Unhealthy, true), part(HealthStatus::Healthy, false)], HealthStatus::Unhealthy)]
    #[case(vec![part(HealthStatus::Degraded, true)], HealthStatus::Degraded)]
    #[case(vec![], HealthStatus::Healthy)]
    fn aggregation(#[case] components: Vec<ComponentHealth>, #[case] expected: HealthStatus) {
        assert_eq!(aggregate(&components), expected);
    }

    #[test]
    fn status_serializes_snake_case() {
        let json = serde_json::to_string(&HealthStatus::Unhealthy).unwrap();
        assert_eq!(json, "\"unhealthy\"");
    }
}
