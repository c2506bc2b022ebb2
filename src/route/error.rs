//! Errors raised while building controller classes and their routers.

use thiserror::Error;

/// Configuration errors. All of them surface when a class or a router is
/// built, never while a request is being served.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoutingError {
    #[error("controller {controller}: template {template:?} uses {{module}} but NAME_MODULE is empty; set a module name or drop the placeholder")]
    MissingModule { controller: String, template: String },

    #[error("controller {controller}: base template {template:?} has no {{user_path}} placeholder for relative path {path:?}")]
    MissingUserPath {
        controller: String,
        template: String,
        path: String,
    },

    #[error("controller {controller}: invalid path {path:?}: {reason}")]
    InvalidPath {
        controller: String,
        path: String,
        reason: String,
    },

    #[error("controller {controller}: endpoint {method} declares no HTTP methods")]
    NoHttpMethods { controller: String, method: String },

    #[error("controller {controller}: HTTP method {method} cannot be routed")]
    UnsupportedMethod { controller: String, method: String },

    #[error("controller {controller}: generic parameter {param} matched {matches} declared parameters, expected exactly one")]
    AmbiguousGeneric {
        controller: String,
        param: String,
        matches: usize,
    },

    #[error("controller {controller}: base {base} takes {expected} generic arguments, got {got}")]
    GenericArity {
        controller: String,
        base: String,
        expected: usize,
        got: usize,
    },

    #[error("controller {controller}: cannot override {method}, no base declares it")]
    UnknownMethod { controller: String, method: String },

    #[error("controller {controller}: {method} {path} is registered more than once")]
    DuplicateRoute {
        controller: String,
        method: String,
        path: String,
    },

    #[error("controller {controller}: {path:?} conflicts with {other:?}, parameter names differ")]
    ConflictingRoute {
        controller: String,
        path: String,
        other: String,
    },

    #[error("controller {controller} has no constructor, stateless routes need `init`")]
    MissingConstructor { controller: String },

    #[error("controller {controller}: dependency {dependency} is not available")]
    MissingDependency {
        controller: String,
        dependency: String,
    },

    #[error("controller {name} is already registered")]
    DuplicateController { name: String },
}

/// Result alias for routing construction.
pub type RoutingResult<T> = Result<T, RoutingError>;
