#[path = "shared/naming/mod.rs"]
pub mod naming;
#[cfg(test)]
mod tests;

#[cfg(test)]
pub use tests::support;

pub mod app;
pub mod config;
pub mod controller;
pub mod http;
pub mod inject;
pub mod middleware;
pub mod route;
pub mod shutdown;

pub use controller::{
    CompiledClass, Controller, ControllerClass, ControllerRegistry, Routable, RoutingDefaults,
    Stateless,
};
pub use inject::{Dep, Depends, Injected, Scope, This};
pub use route::{
    delete, get, patch, post, put, route, Endpoint, EndpointDescriptor, Model, ModulePolicy,
    PathResolver, ResponseClass, RouteArgs, RoutingError, RoutingResult,
};
