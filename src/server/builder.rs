//! ServerBuilder for fluent API to build HTTP servers

use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

use super::router::build_router;
use super::state::AppState;
use crate::config::ServiceConfig;
use crate::core::error::PayvalResult;
use crate::reference::{CachedReferenceDataProvider, HttpReferenceDataClient, ReferenceDataClient};

/// Builder for the validation HTTP server
///
/// # Example
///
/// ```ignore
/// let config = ServiceConfig::from_yaml_file("payval.yaml")?;
/// ServerBuilder::new(config).serve().await?;
/// ```
pub struct ServerBuilder {
    config: ServiceConfig,
    client: Option<Arc<dyn ReferenceDataClient>>,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            config,
            client: None,
            custom_routes: Vec::new(),
        }
    }

    /// Use this client instead of an HTTP client built from the config
    pub fn with_reference_client(mut self, client: Arc<dyn ReferenceDataClient>) -> Self {
        self.client = Some(client);
        self
    }

    /// Add custom routes to the server
    ///
    /// Custom routes are merged after the built-in ones and do not share
    /// their state.
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the shared handler state
    ///
    /// The reference data client comes from [`with_reference_client`](Self::with_reference_client)
    /// or, failing that, is built from `reference_data` in the config.
    pub fn build_state(&mut self) -> PayvalResult<AppState> {
        let client: Arc<dyn ReferenceDataClient> = match self.client.take() {
            Some(client) => client,
            None => Arc::new(HttpReferenceDataClient::new(
                &self.config.reference_data.base_url,
                self.config.reference_data.timeout(),
            )?),
        };

        let provider = CachedReferenceDataProvider::new(client, self.config.expiration_policy());
        Ok(AppState::new(Arc::new(provider)))
    }

    /// Build the final router
    pub fn build(mut self) -> Result<Router> {
        let state = self.build_state()?;
        let mut app = build_router(state);

        for custom_router in std::mem::take(&mut self.custom_routes) {
            app = app.merge(custom_router);
        }

        Ok(app)
    }

    /// Serve the application with graceful shutdown
    ///
    /// Binds to `server.listen_addr` and stops on SIGTERM or Ctrl+C.
    pub async fn serve(self) -> Result<()> {
        let addr = self.config.listen_addr()?;
        let base_url = self.config.reference_data.base_url.clone();
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!(%addr, reference_data = %base_url, "Server listening");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::warn!(error = %err, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::{PayvalError, ReferenceDataError};

    #[test]
    fn test_build_with_default_config() {
        let result = ServerBuilder::new(ServiceConfig::default()).build();
        assert!(result.is_ok(), "default config should build");
    }

    #[test]
    fn test_bad_base_url_fails_state() {
        let mut config = ServiceConfig::default();
        config.reference_data.base_url = "not a url".to_string();

        let err = ServerBuilder::new(config).build_state().err().unwrap();
        assert!(matches!(
            err,
            PayvalError::ReferenceData(ReferenceDataError::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn test_custom_routes_are_merged() {
        let extra = Router::new().route("/ping", axum::routing::get(|| async { "pong" }));
        let result = ServerBuilder::new(ServiceConfig::default())
            .with_custom_routes(extra)
            .build();
        assert!(result.is_ok());
    }
}
