// Stateless controllers: a fresh instance per request.

use axum::{
    extract::Request,
    http::StatusCode,
    middleware::{from_fn, Next},
    response::{IntoResponse, Response},
    Router,
};
use std::sync::Arc;
use tracing::{error, info};

use super::class::CompiledClass;
use super::controller::Controller;
use super::router::mount;
use crate::inject::{Depends, Scope};
use crate::route::{RoutingError, RoutingResult};

/// Router of a class whose handlers get a newly constructed instance on
/// every request.
pub struct Stateless<S> {
    class: Arc<CompiledClass<S>>,
    router: Router,
}

impl<S: Send + Sync + 'static> Stateless<S> {
    /// Checks the constructor and every provider up front, so a request can
    /// only fail if the constructor itself does.
    pub fn new(class: &Arc<CompiledClass<S>>, depends: impl Into<Arc<Depends>>) -> RoutingResult<Self> {
        let depends: Arc<Depends> = depends.into();
        if !class.has_constructor() {
            return Err(RoutingError::MissingConstructor {
                controller: class.name().to_string(),
            });
        }
        depends.ensure(class.name(), class.dependencies())?;

        let factory = class.clone();
        let providers = depends.clone();
        let router = mount(class, Some(&depends))?.layer(from_fn(
            move |mut request: Request, next: Next| {
                let class = factory.clone();
                let depends = providers.clone();
                async move {
                    let scope = Scope::of(&mut request, &depends);
                    match class.construct_in(&scope) {
                        Ok(instance) => {
                            request.extensions_mut().insert(Arc::new(instance));
                            next.run(request).await
                        }
                        Err(err) => construct_failed(class.name(), err),
                    }
                }
            },
        ));

        Ok(Self {
            class: class.clone(),
            router,
        })
    }

    /// Like [`Stateless::new`], then builds one instance as a trial.
    ///
    /// Catches a constructor that takes a type the class never declared,
    /// which `new` can only see on the first request. The providers run once
    /// here.
    pub fn verified(class: &Arc<CompiledClass<S>>, depends: impl Into<Arc<Depends>>) -> RoutingResult<Self> {
        let depends: Arc<Depends> = depends.into();
        let stateless = Self::new(class, depends.clone())?;
        class.construct(&depends)?;
        info!(
            component = "routing",
            event = "constructor_verified",
            controller = class.name(),
            "trial construction succeeded"
        );
        Ok(stateless)
    }

    pub fn class(&self) -> &Arc<CompiledClass<S>> {
        &self.class
    }

    pub fn router(&self) -> Router {
        self.router.clone()
    }
}

fn construct_failed(controller: &str, err: RoutingError) -> Response {
    error!(
        component = "routing",
        event = "construct_failed",
        controller = controller,
        error = %err,
        "controller construction failed"
    );
    (StatusCode::INTERNAL_SERVER_ERROR, "controller construction failed").into_response()
}

impl<S: Send + Sync + 'static> Controller for Stateless<S> {
    fn add_route(&self, router: Router) -> Router {
        router.merge(self.router.clone())
    }
}

impl<S: Send + Sync + 'static> CompiledClass<S> {
    /// Router that builds a fresh instance per request from `depends`.
    pub fn routes(self: &Arc<Self>, depends: impl Into<Arc<Depends>>) -> RoutingResult<Router> {
        Stateless::new(self, depends).map(|stateless| stateless.router)
    }
}
