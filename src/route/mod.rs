//! Endpoint definitions, path templates and inheritance merging.

pub mod args;
pub mod endpoint;
pub mod error;
pub mod generics;
pub mod marker;
pub(crate) mod merge;
pub mod template;

#[cfg(test)]
mod template_test;

pub use args::{DependencyRef, Model, ResponseClass, RouteArgs};
pub use endpoint::{Endpoint, EndpointDescriptor, EndpointMap, RouteInfo, Segments};
pub use error::{RoutingError, RoutingResult};
pub use generics::Bindings;
pub use marker::{delete, get, patch, post, put, route};
pub use template::{resolve, ModulePolicy, PathResolver, ResolvedPath, DEFAULT_BASE_TEMPLATE, DEFAULT_VERSION};
