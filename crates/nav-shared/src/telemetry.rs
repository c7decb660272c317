//! Telemetry setup

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::AppError;

/// Installs the global subscriber. With `log_dir` set, JSON lines also go to a
/// daily rolling file; keep the returned guard alive until shutdown.
pub fn init_telemetry(app_name: &str, log_dir: Option<&str>) -> Result<Option<WorkerGuard>, AppError> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, format!("{app_name}.log"));
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json())
                .with(fmt::layer().json().with_writer(writer))
                .try_init()
                .map_err(|e| AppError::TelemetryError(e.to_string()))?;
            tracing::info!(app = app_name, log_dir = dir, "Telemetry initialized");
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json())
                .try_init()
                .map_err(|e| AppError::TelemetryError(e.to_string()))?;
            tracing::info!(app = app_name, "Telemetry initialized");
            Ok(None)
        }
    }
}
