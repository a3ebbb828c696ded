use crate::Environment;
use tracing::{debug, info};
use tracing_subscriber::{prelude::*, EnvFilter};

/// Install color-eyre with a project-standard configuration.
///
/// Safe to call multiple times.
pub fn install_color_eyre() {
    let _ = color_eyre::config::HookBuilder::default()
        .display_location_section(true)
        .display_env_section(false)
        .install();
}

/// Register the process-wide log sink that RPC log records are written into.
///
/// Call this once at startup, before the first stub is assembled. Records
/// emitted by the logging decorators use the `grpc_client::rpc` target at
/// DEBUG level, so the development default filter shows them while the
/// production default hides them unless `RUST_LOG` asks for them.
///
/// - **Production** (`APP_ENV=production`): JSON lines, targets hidden,
///   default filter `warn`.
/// - **Development** (default): pretty output, default filter
///   `info,grpc_client=debug`.
///
/// Both variants install `tracing_error::ErrorLayer` so span traces are
/// captured into errors. Re-initialization is ignored, which keeps this safe
/// in tests. Tests that assert on log output should not use this; they scope
/// a capturing subscriber with `tracing::subscriber::set_default` instead.
pub fn init_tracing(environment: &Environment) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(environment)));

    let result = if environment.is_production() {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .flatten_event(true),
            )
            .with(tracing_error::ErrorLayer::default())
            .with(filter)
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_file(false)
                    .with_line_number(false)
                    .pretty(),
            )
            .with(tracing_error::ErrorLayer::default())
            .with(filter)
            .try_init()
    };

    match result {
        Ok(()) => info!(?environment, "Log sink registered"),
        Err(_) => debug!("Log sink already registered, skipping re-initialization"),
    }
}

/// Filter used when `RUST_LOG` is unset.
pub fn default_directives(environment: &Environment) -> &'static str {
    match environment {
        Environment::Production => "warn",
        Environment::Development => "info,grpc_client=debug",
    }
}
