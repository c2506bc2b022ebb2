// Application: system controller, user controllers and the HTTP server.

use anyhow::{Context, Result};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::config::{Config, ConfigTrait};
use crate::controller::{system_controller, Controller, ControllerRegistry};
use crate::shutdown::GracefulShutdown;

use super::server::{Http, HttpServer};

/// Encapsulates the running application.
#[derive(Clone)]
pub struct App {
    cfg: Config,
    shutdown_token: CancellationToken,
    server: Arc<dyn Http>,
}

impl App {
    /// Builds the application. `registry` lists the classes behind
    /// `controllers` so the system endpoints can describe them.
    pub fn new(
        shutdown_token: CancellationToken,
        cfg: Config,
        registry: ControllerRegistry,
        controllers: Vec<Box<dyn Controller>>,
    ) -> Result<Self> {
        let system = system_controller(cfg.clone(), registry)
            .context("failed to build the system controller")?;

        let mut all: Vec<Box<dyn Controller>> = Vec::with_capacity(controllers.len() + 1);
        all.push(Box::new(system));
        all.extend(controllers);

        let server = HttpServer::new(shutdown_token.clone(), &cfg, all)?;

        info!(
            component = "app",
            event = "initialized",
            name = cfg.api_name(),
            env = %cfg.routable.env,
            "application initialized"
        );

        Ok(Self {
            cfg,
            shutdown_token,
            server: Arc::new(server),
        })
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// The application router with every middleware applied.
    pub fn router(&self) -> Router {
        self.server.router()
    }

    /// Starts serving on the configured port in the background.
    pub async fn serve(&self, gsh: Arc<GracefulShutdown>) -> Result<()> {
        let app = self.clone();
        tokio::task::spawn(async move {
            if let Err(e) = app.server.listen_and_serve().await {
                error!(
                    component = "app",
                    scope = "server",
                    event = "serve_failed",
                    error = %e,
                    "server failed to serve"
                );
            }
            app.close();
            gsh.done();
        });

        info!(component = "app", event = "started", "application lifecycle");
        Ok(())
    }

    /// Serves on `listener` until the shutdown token is cancelled.
    pub async fn serve_on(&self, listener: TcpListener) -> Result<()> {
        let result = self.server.serve(listener).await;
        self.close();
        result
    }

    pub fn is_alive(&self) -> bool {
        if !self.server.is_alive() {
            warn!(
                component = "app",
                scope = "http_server",
                event = "gone_away",
                "http server has gone away"
            );
            return false;
        }
        true
    }

    /// Cancels everything still bound to the shutdown token.
    pub fn close(&self) {
        self.shutdown_token.cancel();
        info!(component = "app", event = "stopped", "application lifecycle");
    }
}
