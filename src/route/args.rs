//! Routing options attached to an endpoint.

use axum::http::{header::HeaderValue, Method, StatusCode};
use serde::Serialize;
use std::any::{type_name, TypeId};
use std::collections::BTreeMap;
use std::fmt;

/// Default description of a successful response.
pub const SUCCESSFUL_RESPONSE: &str = "Successful Response";

/// A request or response model referenced by an endpoint.
///
/// `Param` names a generic parameter of the declaring controller class and
/// is replaced by a concrete model when a subclass binds that parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    Type(&'static str),
    Param(String),
}

impl Model {
    /// Model for the Rust type `T`.
    pub fn of<T: ?Sized + 'static>() -> Self {
        Model::Type(type_name::<T>())
    }

    /// Model bound later through the class's generic parameter `name`.
    pub fn param(name: impl Into<String>) -> Self {
        Model::Param(name.into())
    }

    pub fn is_param(&self) -> bool {
        matches!(self, Model::Param(_))
    }

    pub fn name(&self) -> &str {
        match self {
            Model::Type(name) => name,
            Model::Param(name) => name,
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// How a successful response body is labelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseClass {
    /// Keep whatever content type the handler produced.
    #[default]
    Default,
    Json,
    PlainText,
    Html,
}

impl ResponseClass {
    pub(crate) fn content_type(&self) -> Option<HeaderValue> {
        match self {
            ResponseClass::Default => None,
            ResponseClass::Json => Some(HeaderValue::from_static("application/json")),
            ResponseClass::PlainText => Some(HeaderValue::from_static("text/plain; charset=utf-8")),
            ResponseClass::Html => Some(HeaderValue::from_static("text/html; charset=utf-8")),
        }
    }
}

/// A dependency identified by the type its provider yields.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DependencyRef {
    #[serde(skip)]
    pub(crate) type_id: TypeId,
    #[serde(rename = "type")]
    pub(crate) type_name: &'static str,
}

impl DependencyRef {
    pub fn of<T: 'static>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl PartialEq for DependencyRef {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for DependencyRef {}

/// The options a route is registered with.
///
/// `path` is the template exactly as authored; the resolved forms live on
/// the [`EndpointDescriptor`](super::EndpointDescriptor).
#[derive(Debug, Clone)]
pub struct RouteArgs {
    pub path: String,
    pub methods: Vec<Method>,
    pub response_model: Option<Model>,
    pub request_model: Option<Model>,
    pub status_code: Option<StatusCode>,
    pub tags: Option<Vec<String>>,
    pub dependencies: Vec<DependencyRef>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub response_description: String,
    pub responses: BTreeMap<u16, serde_json::Value>,
    pub deprecated: Option<bool>,
    pub operation_id: Option<String>,
    pub include_in_schema: bool,
    pub response_class: ResponseClass,
    pub name: Option<String>,
    pub callbacks: Vec<String>,
    pub openapi_extra: Option<serde_json::Value>,
}

impl RouteArgs {
    pub fn new(path: impl Into<String>, methods: Vec<Method>) -> Self {
        Self {
            path: path.into(),
            methods,
            response_model: None,
            request_model: None,
            status_code: None,
            tags: None,
            dependencies: Vec::new(),
            summary: None,
            description: None,
            response_description: SUCCESSFUL_RESPONSE.to_string(),
            responses: BTreeMap::new(),
            deprecated: None,
            operation_id: None,
            include_in_schema: true,
            response_class: ResponseClass::Default,
            name: None,
            callbacks: Vec::new(),
            openapi_extra: None,
        }
    }

    /// True when successful responses need rewriting before they leave the route.
    pub(crate) fn shapes_response(&self) -> bool {
        self.status_code.is_some() || self.response_class != ResponseClass::Default
    }
}
