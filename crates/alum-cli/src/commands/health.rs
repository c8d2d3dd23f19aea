use std::fmt;
use std::time::Duration;

use alum_http::retry::{RetryConfig, with_retry};
use alum_services::{HealthReport, HealthStatus, ServiceContext};

use crate::cli::root_commands::HealthArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::output::output;

struct Unreachable(HealthReport);

impl fmt::Display for Unreachable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "the {} backend is unreachable", self.0.mode)
    }
}

/// Handle `alum health`. Exits non-zero only when the backend in use is
/// still down after the last probe.
pub async fn handle(args: &HealthArgs, ctx: &ServiceContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let retry = RetryConfig {
        max_attempts: args.retries.saturating_add(1),
        delay: Duration::from_millis(args.interval_ms),
    };
    let probe = with_retry(&retry, |attempt| async move {
        let report = ctx.health().check().await;
        tracing::debug!(attempt, status = %report.status, "health probe");
        if report.status == HealthStatus::Unhealthy {
            Err(Unreachable(report))
        } else {
            Ok(report)
        }
    })
    .await;

    let (report, unreachable) = match probe {
        Ok(report) => (report, None),
        Err(down) => {
            let message = down.to_string();
            (down.0, Some(message))
        }
    };

    match flags.format {
        OutputFormat::Table => {
            output(&report.components, flags.format)?;
            println!("overall: {} (mode {})", report.status, report.mode);
        }
        OutputFormat::Json | OutputFormat::Raw => output(&report, flags.format)?,
    }
    match unreachable {
        Some(message) => anyhow::bail!(message),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use alum_config::{AlumConfig, ApiMode, ModeResolver};
    use alum_core::state::KeyValueStore;
    use alum_services::{NoJitter, ServiceContext};
    use alum_storage::LocalStore;

    use super::handle;
    use crate::cli::root_commands::HealthArgs;
    use crate::commands::test_support::{flags, mock_context};

    const ONCE: HealthArgs = HealthArgs {
        retries: 0,
        interval_ms: 0,
    };

    #[tokio::test]
    async fn mock_mode_with_live_mock_is_not_an_error() {
        let (_server, ctx) = mock_context();
        handle(&ONCE, &ctx, &flags()).await.expect("mock backend is up");
    }

    #[tokio::test]
    async fn unreachable_real_backend_fails_after_retries() {
        let mut config = AlumConfig::default();
        config.api.base_url = "http://127.0.0.1:9".to_string();
        config.mock.base_url = "http://127.0.0.1:9".to_string();
        config.api.timeout_secs = 2;
        let store: Arc<dyn KeyValueStore> = Arc::new(LocalStore::in_memory());
        let ctx = ServiceContext::assemble(
            config,
            store,
            Arc::new(ModeResolver::fixed(ApiMode::Real)),
            Arc::new(NoJitter),
        )
        .expect("context should assemble");

        let args = HealthArgs {
            retries: 1,
            interval_ms: 10,
        };
        let err = handle(&args, &ctx, &flags()).await.expect_err("real backend is down");
        assert_eq!(err.to_string(), "the real backend is unreachable");
    }
}
