use std::io;

use anyhow::Result;
use once_cell::sync::OnceCell;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::{config::AppConfig, infrastructure::directories::ResolvedPaths};

const LOG_FILE_PREFIX: &str = "server.log";

static INIT: OnceCell<()> = OnceCell::new();
static GUARD: OnceCell<tracing_appender::non_blocking::WorkerGuard> = OnceCell::new();

/// Installs the console + daily rolling file subscriber. Safe to call twice.
pub fn init_tracing(config: &AppConfig, paths: &ResolvedPaths) -> Result<()> {
    INIT.get_or_try_init::<_, anyhow::Error>(|| {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| filter_for_level(&config.logging.level));

        let file_appender = tracing_appender::rolling::daily(&paths.logs_dir, LOG_FILE_PREFIX);
        let (file_writer, guard) = tracing_appender::non_blocking(file_appender);
        let _ = GUARD.set(guard);

        let console_layer = fmt::layer()
            .with_writer(io::stdout)
            .with_target(true)
            .with_ansi(true);

        let file_layer = fmt::layer()
            .with_writer(file_writer)
            .with_target(true)
            .with_ansi(false);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(console_layer)
            .with(file_layer)
            .try_init()?;

        tracing::info!(
            target: "server",
            logs = %paths.logs_dir.display(),
            file = LOG_FILE_PREFIX,
            "tracing initialized"
        );
        Ok(())
    })?;
    Ok(())
}

/// `LOG_LEVEL` applies to the service; request spans from `TraceLayer` are
/// emitted at debug, so they are lifted to stay visible at the default level.
fn filter_for_level(level: &str) -> EnvFilter {
    EnvFilter::try_new(format!("{level},tower_http=debug"))
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"))
}
