//! Server startup, binding and graceful shutdown

use std::future::{Future, IntoFuture};
use std::io;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use infra_config::ServerSettings;
use multgen_core::Solve;
use tokio::net::TcpListener;
use tokio::signal;
use tokio::sync::oneshot;

use crate::routes;

/// Server instance that can be started
pub struct Server {
    /// Listener settings
    settings: ServerSettings,
    /// The built router
    router: Router,
}

impl Server {
    /// Create a new server instance serving draws from `solver`
    pub fn new(settings: ServerSettings, solver: Arc<dyn Solve>) -> Self {
        let router = routes::build_router(solver);
        Self { settings, router }
    }

    /// Get the address the server will bind to
    pub fn socket_addr(&self) -> String {
        self.settings.socket_addr()
    }

    /// Get the listener settings
    pub fn settings(&self) -> &ServerSettings {
        &self.settings
    }

    /// Run the server until Ctrl-C or SIGTERM
    ///
    /// In-flight requests are drained before returning, for at most
    /// `shutdown_timeout_secs`.
    pub async fn run(self) -> Result<(), io::Error> {
        let listener = TcpListener::bind(self.socket_addr()).await?;
        self.run_with_listener(listener, shutdown_signal()).await
    }

    /// Run the server on an existing listener until `shutdown` completes
    ///
    /// # Errors
    ///
    /// Returns `TimedOut` if in-flight requests are still running
    /// `shutdown_timeout_secs` after `shutdown` completed.
    pub async fn run_with_listener<F>(
        self,
        listener: TcpListener,
        shutdown: F,
    ) -> Result<(), io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        let timeout = Duration::from_secs(self.settings.shutdown_timeout_secs);
        tracing::info!(%addr, "server listening");

        let (draining_tx, draining_rx) = oneshot::channel::<()>();
        let serve = axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.await;
                let _ = draining_tx.send(());
            })
            .into_future();

        let deadline = async move {
            if draining_rx.await.is_ok() {
                tokio::time::sleep(timeout).await;
            } else {
                std::future::pending::<()>().await;
            }
        };

        tokio::select! {
            result = serve => result?,
            _ = deadline => {
                tracing::warn!(?timeout, "graceful shutdown timeout");
                return Err(io::Error::new(
                    io::ErrorKind::TimedOut,
                    "graceful shutdown timeout",
                ));
            }
        }

        tracing::info!("server stopped");
        Ok(())
    }
}

/// Completes on Ctrl-C or, on Unix, SIGTERM
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
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

    tracing::info!("shutdown signal received");
}
