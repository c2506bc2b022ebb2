//! HTTP server implementation.
//

use anyhow::{Context, Result};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::timeout::TimeoutLayer;
use tracing::{error, info};

use crate::config::{Config, ConfigTrait};
use crate::controller::Controller;
use crate::middleware::Middleware;

/// Server trait for HTTP server operations.
#[async_trait::async_trait]
pub trait Server: Send + Sync {
    /// Starts the server (blocking).
    async fn listen_and_serve(&self) -> Result<()>;
}

/// HTTP server serving every mounted controller.
pub struct HttpServer {
    shutdown_token: CancellationToken,
    config: Config,
    router: Router,
}

impl HttpServer {
    pub fn new(
        shutdown_token: CancellationToken,
        config: Config,
        controllers: Vec<Box<dyn Controller>>,
        middlewares: Vec<Box<dyn Middleware>>,
    ) -> Result<Arc<Self>> {
        let router = Self::build_router(controllers);
        let router = Self::merge_middlewares(&config, router, middlewares);

        Ok(Arc::new(Self {
            shutdown_token,
            config,
            router,
        }))
    }

    /// Fully layered router, usable without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Binds `0.0.0.0` on the configured port and serves until shutdown.
    pub async fn listen_and_serve(&self) -> Result<()> {
        let port = self.config.port();
        let addr: SocketAddr = format!("0.0.0.0{}", port)
            .parse()
            .context("failed to parse server address")?;

        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("failed to bind TCP listener on {addr}"))?;

        self.serve(listener).await
    }

    /// Serves on an already bound listener until the shutdown token fires.
    pub async fn serve(&self, listener: TcpListener) -> Result<()> {
        let name = self.config.api_name().to_string();
        let addr = listener
            .local_addr()
            .context("failed to read listener address")?;

        info!(
            component = "server",
            event = "started",
            name = %name,
            addr = %addr,
            request_timeout = %humantime::format_duration(self.config.request_timeout()),
            "server started"
        );

        let shutdown_token = self.shutdown_token.clone();
        let serve_future =
            axum::serve(listener, self.router.clone()).with_graceful_shutdown(async move {
                shutdown_token.cancelled().await;
            });

        if let Err(e) = serve_future.await {
            error!(
                component = "server",
                event = "listen_and_serve_failed",
                name = %name,
                addr = %addr,
                error = %e,
                "server failed to listen and serve"
            );
            return Err(e.into());
        }

        info!(
            component = "server",
            event = "stopped",
            name = %name,
            addr = %addr,
            "server stopped"
        );

        Ok(())
    }

    fn build_router(controllers: Vec<Box<dyn Controller>>) -> Router {
        let mut router = Router::new();
        for controller in controllers {
            router = controller.add_route(router);
        }
        router
    }

    /// Applies middlewares so that the first one listed runs outermost.
    fn merge_middlewares(
        config: &Config,
        router: Router,
        middlewares: Vec<Box<dyn Middleware>>,
    ) -> Router {
        let mut result = router.layer(TimeoutLayer::new(config.request_timeout()));
        for middleware in middlewares.iter().rev() {
            result = middleware.apply(result);
        }
        result
    }
}

#[async_trait::async_trait]
impl Server for HttpServer {
    async fn listen_and_serve(&self) -> Result<()> {
        HttpServer::listen_and_serve(self).await
    }
}
