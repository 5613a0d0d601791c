// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use devconnect_server::{
    api::router,
    auth::{AuthError, TokenCodec},
    config::{Config, ConfigError},
    logging::init_tracing,
    state::AppState,
    storage::{DocumentStore, StorageError, StoragePaths},
};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("storage: {0}")]
    Storage(#[from] StorageError),
    #[error("token codec: {0}")]
    Auth(#[from] AuthError),
    #[error("server: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    let config = Config::from_env()?;
    init_tracing(config.log_format);
    tracing::info!(?config, "Starting DevConnect server");

    let mut store = DocumentStore::new(StoragePaths::new(&config.data_dir));
    store.initialize()?;
    let tokens = TokenCodec::new(&config.jwt_secret, config.token_ttl_secs)?;

    let app = router(AppState::new(store, tokens));

    let addr = config.bind_addr();
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "DevConnect server listening (docs at /docs)");

    let shutdown = CancellationToken::new();
    tokio::spawn(wait_for_signal(shutdown.clone()));

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Cancel `shutdown` on Ctrl-C or SIGTERM.
async fn wait_for_signal(shutdown: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections");
    shutdown.cancel();
}
