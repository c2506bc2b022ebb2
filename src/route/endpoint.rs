//! Endpoint definitions and the resolved descriptors a class stores.

use axum::handler::Handler;
use axum::http::{Method, StatusCode};
use axum::routing::{MethodFilter, MethodRouter};
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use super::args::{DependencyRef, Model, ResponseClass, RouteArgs};

/// Type-erased handler factory; yields a method router for the given verb filter.
pub(crate) type BoxedHandler = Arc<dyn Fn(MethodFilter) -> MethodRouter + Send + Sync>;

/// A handler plus its routing options, as produced by the markers in
/// [`marker`](super::marker). `S` is the controller state the handler reads
/// through [`This`](crate::inject::This).
pub struct Endpoint<S> {
    pub(crate) args: RouteArgs,
    pub(crate) handler: BoxedHandler,
    _state: PhantomData<fn() -> S>,
}

impl<S> Clone for Endpoint<S> {
    fn clone(&self) -> Self {
        Self {
            args: self.args.clone(),
            handler: self.handler.clone(),
            _state: PhantomData,
        }
    }
}

impl<S> fmt::Debug for Endpoint<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint").field("args", &self.args).finish_non_exhaustive()
    }
}

pub(crate) fn erase<H, T>(handler: H) -> BoxedHandler
where
    H: Handler<T, ()> + Sync,
    T: 'static,
{
    Arc::new(move |filter| axum::routing::on(filter, handler.clone()))
}

impl<S> Endpoint<S> {
    pub(crate) fn new<H, T>(methods: Vec<Method>, path: impl Into<String>, handler: H) -> Self
    where
        H: Handler<T, ()> + Sync,
        T: 'static,
    {
        Self {
            args: RouteArgs::new(path, methods),
            handler: erase(handler),
            _state: PhantomData,
        }
    }

    pub fn args(&self) -> &RouteArgs {
        &self.args
    }

    /// Replaces the handler, keeping every option.
    pub(crate) fn with_handler(mut self, handler: BoxedHandler) -> Self {
        self.handler = handler;
        self
    }

    pub fn response_model(mut self, model: Model) -> Self {
        self.args.response_model = Some(model);
        self
    }

    pub fn request_model(mut self, model: Model) -> Self {
        self.args.request_model = Some(model);
        self
    }

    /// Status code applied to successful responses.
    pub fn status_code(mut self, status: StatusCode) -> Self {
        self.args.status_code = Some(status);
        self
    }

    /// Explicit tags; these win over the class tags.
    pub fn tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.args.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    /// Route-level dependency, resolved and run on every request.
    pub fn dependency<T: Send + Sync + 'static>(mut self) -> Self {
        let dep = DependencyRef::of::<T>();
        if !self.args.dependencies.contains(&dep) {
            self.args.dependencies.push(dep);
        }
        self
    }

    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.args.summary = Some(summary.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.args.description = Some(description.into());
        self
    }

    pub fn response_description(mut self, description: impl Into<String>) -> Self {
        self.args.response_description = description.into();
        self
    }

    pub fn response(mut self, status: u16, doc: serde_json::Value) -> Self {
        self.args.responses.insert(status, doc);
        self
    }

    pub fn deprecated(mut self, deprecated: bool) -> Self {
        self.args.deprecated = Some(deprecated);
        self
    }

    pub fn operation_id(mut self, id: impl Into<String>) -> Self {
        self.args.operation_id = Some(id.into());
        self
    }

    pub fn include_in_schema(mut self, include: bool) -> Self {
        self.args.include_in_schema = include;
        self
    }

    pub fn response_class(mut self, class: ResponseClass) -> Self {
        self.args.response_class = class;
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.args.name = Some(name.into());
        self
    }

    pub fn callback(mut self, callback: impl Into<String>) -> Self {
        self.args.callbacks.push(callback.into());
        self
    }

    pub fn openapi_extra(mut self, extra: serde_json::Value) -> Self {
        self.args.openapi_extra = Some(extra);
        self
    }
}

/// Raw names substituted for `{module}`, `{controller}` and `{version}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Segments {
    pub module: String,
    pub controller: String,
    pub version: String,
}

impl Segments {
    pub fn new(
        module: impl Into<String>,
        controller: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            module: module.into(),
            controller: controller.into(),
            version: version.into(),
        }
    }
}

/// An endpoint after path resolution, as stored in a class's [`EndpointMap`].
pub struct EndpointDescriptor<S> {
    pub(crate) method_name: String,
    pub(crate) owner: String,
    pub(crate) endpoint: Endpoint<S>,
    /// Template after `{user_path}` substitution, before module elision.
    pub(crate) expanded_template: String,
    pub(crate) template_path: String,
    pub(crate) final_path: String,
    pub(crate) segments: Segments,
    pub(crate) tags: Vec<String>,
}

impl<S> Clone for EndpointDescriptor<S> {
    fn clone(&self) -> Self {
        Self {
            method_name: self.method_name.clone(),
            owner: self.owner.clone(),
            endpoint: self.endpoint.clone(),
            expanded_template: self.expanded_template.clone(),
            template_path: self.template_path.clone(),
            final_path: self.final_path.clone(),
            segments: self.segments.clone(),
            tags: self.tags.clone(),
        }
    }
}

impl<S> fmt::Debug for EndpointDescriptor<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EndpointDescriptor")
            .field("method_name", &self.method_name)
            .field("owner", &self.owner)
            .field("template_path", &self.template_path)
            .field("final_path", &self.final_path)
            .field("segments", &self.segments)
            .field("tags", &self.tags)
            .finish_non_exhaustive()
    }
}

impl<S> EndpointDescriptor<S> {
    pub fn method_name(&self) -> &str {
        &self.method_name
    }

    /// Name of the class that declared (or last overrode) this endpoint.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn args(&self) -> &RouteArgs {
        &self.endpoint.args
    }

    pub fn methods(&self) -> &[Method] {
        &self.endpoint.args.methods
    }

    pub fn raw_path(&self) -> &str {
        &self.endpoint.args.path
    }

    pub fn template_path(&self) -> &str {
        &self.template_path
    }

    pub fn final_path(&self) -> &str {
        &self.final_path
    }

    pub fn segments(&self) -> &Segments {
        &self.segments
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn response_model(&self) -> Option<&Model> {
        self.endpoint.args.response_model.as_ref()
    }

    pub fn request_model(&self) -> Option<&Model> {
        self.endpoint.args.request_model.as_ref()
    }

    pub fn info(&self) -> RouteInfo {
        let args = &self.endpoint.args;
        RouteInfo {
            method_name: self.method_name.clone(),
            methods: args.methods.iter().map(|m| m.as_str().to_string()).collect(),
            path: self.final_path.clone(),
            template_path: self.template_path.clone(),
            tags: self.tags.clone(),
            summary: args.summary.clone(),
            name: args.name.clone(),
            status_code: args.status_code.map(|s| s.as_u16()),
            response_model: args.response_model.as_ref().map(|m| m.to_string()),
            request_model: args.request_model.as_ref().map(|m| m.to_string()),
            response_class: args.response_class,
            dependencies: args.dependencies.clone(),
            include_in_schema: args.include_in_schema,
            deprecated: args.deprecated.unwrap_or(false),
            owner: self.owner.clone(),
        }
    }
}

/// Insertion-ordered map from method name to descriptor.
pub type EndpointMap<S> = IndexMap<String, EndpointDescriptor<S>>;

/// Serializable view of one registered route.
#[derive(Debug, Clone, Serialize)]
pub struct RouteInfo {
    pub method_name: String,
    pub methods: Vec<String>,
    pub path: String,
    pub template_path: String,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_model: Option<String>,
    pub response_class: ResponseClass,
    pub dependencies: Vec<DependencyRef>,
    pub include_in_schema: bool,
    pub deprecated: bool,
    pub owner: String,
}
