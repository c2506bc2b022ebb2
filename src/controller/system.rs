// Built-in system controller: health, config and the route listing.

use axum::{extract::Path, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

use super::class::{CompiledClass, ControllerClass, RoutingDefaults};
use super::instance::Routable;
use super::registry::ControllerRegistry;
use crate::config::{Config, ConfigTrait};
use crate::inject::This;
use crate::middleware::recover_middleware::panics_counter;
use crate::route::{get, Model, ResponseClass, RouteInfo, RoutingResult};

pub const SYSTEM_CONTROLLER: &str = "System";
const SYSTEM_MODULE: &str = "Routable";
const SYSTEM_TEMPLATE: &str = "/{module}/{user_path}";

/// State shared by the system endpoints.
pub struct System {
    cfg: Config,
    registry: Arc<ControllerRegistry>,
}

impl System {
    pub fn registry(&self) -> &ControllerRegistry {
        &self.registry
    }
}

async fn health(This(system): This<System>) -> impl IntoResponse {
    Json(json!({
        "status": 200,
        "message": "ok",
        "controllers": system.registry.len(),
        "panics": panics_counter(),
    }))
}

async fn routes(This(system): This<System>) -> impl IntoResponse {
    Json(system.registry.route_table())
}

async fn controller_routes(
    This(system): This<System>,
    Path(name): Path<String>,
) -> impl IntoResponse {
    match system.registry.info(&name) {
        Some(info) => (StatusCode::OK, Json(json!(info.route_table()))),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "status": 404, "message": format!("controller {name} is not registered") })),
        ),
    }
}

async fn subclasses(This(system): This<System>, Path(name): Path<String>) -> impl IntoResponse {
    Json(system.registry.subclasses_of(&name))
}

async fn show_config(This(system): This<System>) -> impl IntoResponse {
    Json(json!({
        "env": system.cfg.routable.env,
        "api": { "name": system.cfg.api_name(), "port": system.cfg.port() },
        "routing": system.cfg.routing(),
    }))
}

/// The system controller class.
pub fn system_class(defaults: &RoutingDefaults) -> RoutingResult<Arc<CompiledClass<System>>> {
    ControllerClass::<System>::new(SYSTEM_CONTROLLER)
        .module(SYSTEM_MODULE)
        .base_template(SYSTEM_TEMPLATE)
        .tags(["system"])
        .endpoint(
            "health",
            get("health", health)
                .summary("Liveness of the routing layer")
                .response_class(ResponseClass::Json),
        )
        .endpoint(
            "routes",
            get("routes", routes)
                .summary("Routes of every registered controller")
                .response_model(Model::of::<Vec<RouteInfo>>()),
        )
        .endpoint(
            "controller_routes",
            get("routes/{name}", controller_routes).summary("Routes of one controller"),
        )
        .endpoint(
            "subclasses",
            get("subclasses/{name}", subclasses).summary("Registered subclasses of a controller"),
        )
        .endpoint(
            "config",
            get("config", show_config).summary("Effective configuration"),
        )
        .build_with(defaults)
}

/// Registers the system class into `registry` and binds it.
pub fn system_controller(cfg: Config, mut registry: ControllerRegistry) -> RoutingResult<Routable<System>> {
    let class = system_class(&cfg.routing_defaults())?;
    registry.register(&class)?;
    Routable::new(
        &class,
        System {
            cfg,
            registry: Arc::new(registry),
        },
    )
}
