//! Tracing subscriber installation

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{LogFormat, LoggingConfig};

/// Targets that are noisy at `debug` and only useful when asked for explicitly
const QUIET_TARGETS: &[&str] = &["sqlx::query=warn", "hyper=info", "tower_http=info"];

/// Install the global subscriber.
///
/// `RUST_LOG` wins over the configured level. Fails when the level directive
/// is malformed or a subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    let filter = build_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref(), &config.level)?;
    let registry = tracing_subscriber::registry().with(filter);

    match config.format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_current_span(false)
                    .with_span_list(false),
            )
            .try_init()?,
        LogFormat::Pretty => registry.with(fmt::layer().pretty().with_target(true)).try_init()?,
    }

    tracing::info!(level = %config.level, format = ?config.format, "Logging initialized");
    Ok(())
}

/// Directive set from `RUST_LOG` when present, else the configured level with
/// chatty dependency targets capped
fn build_filter(env_directives: Option<&str>, level: &str) -> anyhow::Result<EnvFilter> {
    if let Some(directives) = env_directives.filter(|d| !d.trim().is_empty()) {
        return Ok(EnvFilter::try_new(directives)?);
    }

    let mut directives = vec![level.to_string()];
    directives.extend(QUIET_TARGETS.iter().map(|t| t.to_string()));
    Ok(EnvFilter::try_new(directives.join(","))?)
}
