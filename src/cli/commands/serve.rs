//! Serve command: run the HTTP server until Ctrl-C.

use crate::api::{AppState, build_router};
use crate::cli::ServeArgs;
use crate::config::{self, CliOverrides, ServerConfig};
use crate::error::{BoardError, Result};
use std::future::Future;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Execute the serve command.
///
/// # Errors
///
/// Returns an error if configuration is invalid, the runtime cannot start,
/// or the listener cannot bind.
pub fn execute(args: &ServeArgs, cli: &CliOverrides) -> Result<()> {
    let overrides = CliOverrides {
        bind: args.bind.clone().or_else(|| cli.bind.clone()),
        cors: if args.no_cors { Some(false) } else { cli.cors },
        config_path: cli.config_path.clone(),
    };
    let config = config::load_config(&overrides)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(run_with_shutdown(config, AppState::default(), shutdown_signal()))
}

/// Serve `state` on the configured address until `shutdown` resolves.
///
/// # Errors
///
/// Returns `BoardError::Bind` if the address is unavailable, or an I/O
/// error if the server fails while running.
pub async fn run_with_shutdown<F>(config: ServerConfig, state: AppState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = config.bind_addr;
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| BoardError::Bind { addr, source })?;
    let local_addr = listener.local_addr()?;
    info!(addr = %local_addr, cors = config.cors, "issue board listening");

    let app = build_router(state, &config);
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("issue board stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "Ctrl-C handler unavailable; serving until killed");
        std::future::pending::<()>().await;
    }
}
