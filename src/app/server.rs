// HTTP server of the application: controllers plus middlewares.

use anyhow::Result;
use axum::Router;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::http::{Controller, Middleware};
use crate::middleware::{PanicRecoverMiddleware, TraceMiddleware};

/// Lifecycle of the application's HTTP server.
#[async_trait::async_trait]
pub trait Http: Send + Sync {
    async fn listen_and_serve(&self) -> Result<()>;
    async fn serve(&self, listener: TcpListener) -> Result<()>;
    fn router(&self) -> Router;
    fn is_alive(&self) -> bool;
}

/// Wraps the generic server and tracks whether it is running.
pub struct HttpServer {
    server: Arc<crate::http::HttpServer>,
    is_server_alive: Arc<AtomicBool>,
}

impl HttpServer {
    pub fn new(
        ctx: CancellationToken,
        cfg: &Config,
        controllers: Vec<Box<dyn Controller>>,
    ) -> Result<Self> {
        let server = crate::http::HttpServer::new(ctx, cfg.clone(), controllers, Self::middlewares())?;
        Ok(Self {
            server,
            is_server_alive: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Request middlewares, the first one runs outermost.
    fn middlewares() -> Vec<Box<dyn Middleware>> {
        vec![
            // Exec first - request span
            Box::new(TraceMiddleware::new()),
            // Exec second - panic recovery
            Box::new(PanicRecoverMiddleware::new()),
        ]
    }

    async fn track<F>(&self, serving: F) -> Result<()>
    where
        F: std::future::Future<Output = Result<()>>,
    {
        self.is_server_alive.store(true, Ordering::Relaxed);
        let result = serving.await;
        self.is_server_alive.store(false, Ordering::Relaxed);
        result
    }
}

#[async_trait::async_trait]
impl Http for HttpServer {
    async fn listen_and_serve(&self) -> Result<()> {
        self.track(self.server.listen_and_serve()).await
    }

    async fn serve(&self, listener: TcpListener) -> Result<()> {
        self.track(self.server.serve(listener)).await
    }

    fn router(&self) -> Router {
        self.server.router()
    }

    fn is_alive(&self) -> bool {
        self.is_server_alive.load(Ordering::Relaxed)
    }
}
