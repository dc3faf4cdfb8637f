use axum::Router;
use std::net::SocketAddr;
use tokio::{net::TcpListener, signal};

use crate::{activities::routes, config::ServiceConfig, state::AppState};

use super::get_router;

pub struct HttpService {
    config: ServiceConfig,
    state: AppState,
}

impl HttpService {
    pub fn new(config: ServiceConfig, state: AppState) -> Self {
        Self { config, state }
    }

    pub fn router(&self) -> Router {
        get_router(
            &self.config,
            self.state.clone(),
            routes(self.state.clone()),
        )
    }

    pub async fn run(self) -> Result<(), std::io::Error> {
        let router = self.router();
        let listener = TcpListener::bind(self.config.socket_addr()).await?;
        tracing::info!(addr = %listener.local_addr()?, "server started");
        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal())
        .await
    }
}

pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(%err, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(%err, "failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
        tracing::info!("shutdown gracefully from ctrl-c");
        },
        _ = terminate => {
        tracing::info!("shutdown gracefully from signal");
        },
    }
}
