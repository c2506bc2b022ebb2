// Instance-bound controllers: one router per controller instance.

use axum::{Extension, Router};
use std::sync::Arc;

use super::class::CompiledClass;
use super::controller::Controller;
use super::router::mount;
use crate::inject::Depends;
use crate::route::RoutingResult;

/// A controller instance with the router of its class bound to it.
///
/// Every handler of the class sees this instance through
/// [`This`](crate::inject::This). Two instances of the same class get
/// independent routers.
pub struct Routable<S> {
    class: Arc<CompiledClass<S>>,
    instance: Arc<S>,
    router: Router,
}

impl<S: Send + Sync + 'static> Routable<S> {
    pub fn new(class: &Arc<CompiledClass<S>>, instance: S) -> RoutingResult<Self> {
        Self::bind(class, Arc::new(instance), None)
    }

    /// Like [`Routable::new`], with providers for `Dep<T>` extractors and
    /// route-level dependencies.
    pub fn with_depends(
        class: &Arc<CompiledClass<S>>,
        instance: S,
        depends: impl Into<Arc<Depends>>,
    ) -> RoutingResult<Self> {
        Self::bind(class, Arc::new(instance), Some(depends.into()))
    }

    pub fn from_arc(class: &Arc<CompiledClass<S>>, instance: Arc<S>) -> RoutingResult<Self> {
        Self::bind(class, instance, None)
    }

    fn bind(
        class: &Arc<CompiledClass<S>>,
        instance: Arc<S>,
        depends: Option<Arc<Depends>>,
    ) -> RoutingResult<Self> {
        let router = mount(class, depends.as_ref())?.layer(Extension(instance.clone()));
        Ok(Self {
            class: class.clone(),
            instance,
            router,
        })
    }

    pub fn class(&self) -> &Arc<CompiledClass<S>> {
        &self.class
    }

    pub fn instance(&self) -> &Arc<S> {
        &self.instance
    }

    /// The bound router, ready to merge into an application.
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}

impl<S: Send + Sync + 'static> Controller for Routable<S> {
    fn add_route(&self, router: Router) -> Router {
        router.merge(self.router.clone())
    }
}
