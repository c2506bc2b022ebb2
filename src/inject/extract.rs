//! Request extractors for controller state and dependencies.

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
};
use std::any::type_name;
use std::ops::Deref;
use std::sync::Arc;
use tracing::error;

use super::depends::Scope;

/// The controller instance serving the current request.
///
/// Routers built from a controller class put the instance into the request
/// extensions; a handler takes it as its first argument:
///
/// ```rust,ignore
/// async fn get_user(This(users): This<Users>, Path(id): Path<u64>) -> String {
///     users.name(id)
/// }
/// ```
pub struct This<S>(pub Arc<S>);

impl<S> Deref for This<S> {
    type Target = S;

    fn deref(&self) -> &S {
        &self.0
    }
}

impl<S> Clone for This<S> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

#[async_trait::async_trait]
impl<S, St> FromRequestParts<St> for This<S>
where
    S: Send + Sync + 'static,
    St: Send + Sync,
{
    type Rejection = ExtractRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &St) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Arc<S>>()
            .cloned()
            .map(This)
            .ok_or(ExtractRejection::Instance(type_name::<S>()))
    }
}

/// A method-level dependency, read from the request's [`Scope`].
///
/// The value is the one the controller constructor received, if it asked
/// for the same type.
pub struct Dep<T>(pub T);

impl<T> Deref for Dep<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

#[async_trait::async_trait]
impl<T, St> FromRequestParts<St> for Dep<T>
where
    T: Clone + Send + 'static,
    St: Send + Sync,
{
    type Rejection = ExtractRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &St) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Scope>()
            .and_then(|scope| scope.get::<T>())
            .map(Dep)
            .ok_or(ExtractRejection::Dependency(type_name::<T>()))
    }
}

/// A router was mounted without what a handler asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractRejection {
    Instance(&'static str),
    Dependency(&'static str),
}

impl IntoResponse for ExtractRejection {
    fn into_response(self) -> Response {
        let (kind, name) = match self {
            ExtractRejection::Instance(name) => ("controller instance", name),
            ExtractRejection::Dependency(name) => ("dependency", name),
        };
        error!(
            component = "inject",
            event = "extract_failed",
            kind = kind,
            type_name = name,
            "request extension missing"
        );
        (StatusCode::INTERNAL_SERVER_ERROR, format!("{kind} {name} is not available")).into_response()
    }
}
