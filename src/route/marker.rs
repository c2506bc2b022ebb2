//! Per-verb endpoint constructors.
//!
//! ```rust,ignore
//! ControllerClass::<Users>::new("UserRoutes")
//!     .endpoint("get", get("{id}", get_user).summary("Fetch a user"))
//!     .endpoint("create", post("", create_user).status_code(StatusCode::CREATED));
//! ```

use axum::handler::Handler;
use axum::http::Method;

use super::endpoint::Endpoint;

/// Endpoint answering any of `methods`.
pub fn route<S, H, T>(methods: impl IntoIterator<Item = Method>, path: impl Into<String>, handler: H) -> Endpoint<S>
where
    H: Handler<T, ()> + Sync,
    T: 'static,
{
    Endpoint::new(methods.into_iter().collect(), path, handler)
}

pub fn get<S, H, T>(path: impl Into<String>, handler: H) -> Endpoint<S>
where
    H: Handler<T, ()> + Sync,
    T: 'static,
{
    route([Method::GET], path, handler)
}

pub fn post<S, H, T>(path: impl Into<String>, handler: H) -> Endpoint<S>
where
    H: Handler<T, ()> + Sync,
    T: 'static,
{
    route([Method::POST], path, handler)
}

pub fn put<S, H, T>(path: impl Into<String>, handler: H) -> Endpoint<S>
where
    H: Handler<T, ()> + Sync,
    T: 'static,
{
    route([Method::PUT], path, handler)
}

pub fn patch<S, H, T>(path: impl Into<String>, handler: H) -> Endpoint<S>
where
    H: Handler<T, ()> + Sync,
    T: 'static,
{
    route([Method::PATCH], path, handler)
}

pub fn delete<S, H, T>(path: impl Into<String>, handler: H) -> Endpoint<S>
where
    H: Handler<T, ()> + Sync,
    T: 'static,
{
    route([Method::DELETE], path, handler)
}
