// Controller classes: declaration, inheritance and one-time route compilation.

use axum::handler::Handler;
use indexmap::IndexMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, info};

use crate::inject::{Depends, Injected, Scope};
use crate::naming::DEFAULT_SEPARATOR;
use crate::route::endpoint::{erase, BoxedHandler};
use crate::route::generics::{self, Bindings};
use crate::route::merge::{self, ChildContext};
use crate::route::template::{ModulePolicy, PathResolver, DEFAULT_BASE_TEMPLATE, DEFAULT_VERSION};
use crate::route::{
    DependencyRef, Endpoint, EndpointDescriptor, EndpointMap, Model, RouteInfo, RoutingError,
    RoutingResult,
};

/// Builds a controller instance from its resolved dependencies.
pub type Constructor<S> = Arc<dyn Fn(&mut Injected) -> RoutingResult<S> + Send + Sync>;

/// Values used when no class in a chain sets an attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingDefaults {
    pub base_template: String,
    pub version: String,
    pub module_policy: ModulePolicy,
    pub separator: char,
}

impl Default for RoutingDefaults {
    fn default() -> Self {
        Self {
            base_template: DEFAULT_BASE_TEMPLATE.to_string(),
            version: DEFAULT_VERSION.to_string(),
            module_policy: ModulePolicy::default(),
            separator: DEFAULT_SEPARATOR,
        }
    }
}

/// Class-level routing attributes. `None` means "not set here".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Attributes {
    module: Option<String>,
    version: Option<String>,
    base_template: Option<String>,
    tags: Option<Vec<String>>,
}

impl Attributes {
    /// Own value, else the first base that has one.
    fn inherit<'a>(&self, bases: impl Iterator<Item = &'a Attributes> + Clone) -> Attributes {
        fn pick<'a, T: Clone + 'a>(
            own: &Option<T>,
            mut bases: impl Iterator<Item = &'a Option<T>>,
        ) -> Option<T> {
            own.clone().or_else(|| bases.find_map(|b| b.clone()))
        }
        Attributes {
            module: pick(&self.module, bases.clone().map(|b| &b.module)),
            version: pick(&self.version, bases.clone().map(|b| &b.version)),
            base_template: pick(&self.base_template, bases.clone().map(|b| &b.base_template)),
            tags: pick(&self.tags, bases.map(|b| &b.tags)),
        }
    }
}

struct BaseEdge<S> {
    class: Arc<CompiledClass<S>>,
    bindings: Option<Vec<Model>>,
}

/// Declaration of a controller class.
///
/// ```rust,ignore
/// let parent = ControllerClass::<Users>::new("UserRoutes")
///     .module("Accounts")
///     .endpoint("get", get("{id}", get_user))
///     .build()?;
///
/// let child = ControllerClass::<Users>::new("AdminRoutes")
///     .extends(&parent)
///     .version("2.0")
///     .build()?;
/// ```
pub struct ControllerClass<S> {
    name: String,
    attrs: Attributes,
    generics: Vec<String>,
    bases: Vec<BaseEdge<S>>,
    endpoints: IndexMap<String, Endpoint<S>>,
    overrides: Vec<(String, BoxedHandler)>,
    dependencies: Vec<DependencyRef>,
    init: Option<Constructor<S>>,
}

impl<S> fmt::Debug for ControllerClass<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControllerClass")
            .field("name", &self.name)
            .field("attrs", &self.attrs)
            .field("endpoints", &self.endpoints.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl<S: Send + Sync + 'static> ControllerClass<S> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: Attributes::default(),
            generics: Vec::new(),
            bases: Vec::new(),
            endpoints: IndexMap::new(),
            overrides: Vec::new(),
            dependencies: Vec::new(),
            init: None,
        }
    }

    /// Module name; an empty string elides the module segment.
    pub fn module(mut self, module: impl Into<String>) -> Self {
        self.attrs.module = Some(module.into());
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.attrs.version = Some(version.into());
        self
    }

    pub fn base_template(mut self, template: impl Into<String>) -> Self {
        self.attrs.base_template = Some(template.into());
        self
    }

    /// Class tags, applied to every endpoint without explicit tags.
    pub fn tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.attrs.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    /// Inherits from `base`, keeping its generic parameters open.
    pub fn extends(mut self, base: &Arc<CompiledClass<S>>) -> Self {
        self.bases.push(BaseEdge {
            class: base.clone(),
            bindings: None,
        });
        self
    }

    /// Inherits from `base`, binding its generic parameters in order.
    pub fn extends_generic(
        mut self,
        base: &Arc<CompiledClass<S>>,
        models: impl IntoIterator<Item = Model>,
    ) -> Self {
        self.bases.push(BaseEdge {
            class: base.clone(),
            bindings: Some(models.into_iter().collect()),
        });
        self
    }

    /// Declares a generic model parameter.
    pub fn generic(mut self, name: impl Into<String>) -> Self {
        self.generics.push(name.into());
        self
    }

    /// Declares (or redefines) the endpoint `method`.
    pub fn endpoint(mut self, method: impl Into<String>, endpoint: Endpoint<S>) -> Self {
        self.endpoints.insert(method.into(), endpoint);
        self
    }

    /// Replaces the handler of an inherited endpoint, keeping its options.
    pub fn override_method<H, T>(mut self, method: impl Into<String>, handler: H) -> Self
    where
        H: Handler<T, ()> + Sync,
        T: 'static,
    {
        self.overrides.push((method.into(), erase(handler)));
        self
    }

    /// Declares a constructor dependency.
    pub fn depends<T: Send + Sync + 'static>(mut self) -> Self {
        let dep = DependencyRef::of::<T>();
        if !self.dependencies.contains(&dep) {
            self.dependencies.push(dep);
        }
        self
    }

    /// Constructor used by stateless routers.
    pub fn init<F>(mut self, init: F) -> Self
    where
        F: Fn(&mut Injected) -> RoutingResult<S> + Send + Sync + 'static,
    {
        self.init = Some(Arc::new(init));
        self
    }

    pub fn build(self) -> RoutingResult<Arc<CompiledClass<S>>> {
        self.build_with(&RoutingDefaults::default())
    }

    /// Resolves every endpoint of the class once and freezes the result.
    pub fn build_with(self, defaults: &RoutingDefaults) -> RoutingResult<Arc<CompiledClass<S>>> {
        let ControllerClass {
            name,
            attrs,
            generics: own_generics,
            bases,
            endpoints: own_endpoints,
            overrides,
            dependencies: own_dependencies,
            init,
        } = self;

        let effective = attrs.inherit(bases.iter().map(|edge| &edge.class.effective));
        let module = effective.module.clone().unwrap_or_default();
        let version = effective
            .version
            .clone()
            .unwrap_or_else(|| defaults.version.clone());
        let resolver = PathResolver::new(
            effective
                .base_template
                .clone()
                .unwrap_or_else(|| defaults.base_template.clone()),
        )
        .with_policy(defaults.module_policy)
        .with_separator(defaults.separator);

        let mut visible = own_generics.clone();
        for edge in bases.iter().filter(|edge| edge.bindings.is_none()) {
            visible.extend(edge.class.generics.iter().cloned());
        }
        let mut bindings = Vec::with_capacity(bases.len());
        for edge in &bases {
            match &edge.bindings {
                Some(models) => {
                    for model in models {
                        generics::check(&name, model, &visible)?;
                    }
                    bindings.push(Bindings::bind(
                        &name,
                        &edge.class.name,
                        &edge.class.generics,
                        models,
                    )?);
                }
                None => bindings.push(Bindings::default()),
            }
        }

        let ctx = ChildContext {
            name: &name,
            own_module: attrs.module.as_deref(),
            own_version: attrs.version.as_deref(),
            module: &module,
            version: &version,
            tags: effective.tags.as_deref(),
            generics: &visible,
            resolver: &resolver,
        };
        let mut endpoints = merge::merge_bases(
            &ctx,
            bases
                .iter()
                .zip(bindings.iter())
                .map(|(edge, bindings)| (&edge.class.endpoints, bindings)),
        )?;
        for (method, handler) in overrides {
            merge::override_handler(&mut endpoints, &ctx, &method, handler)?;
        }
        merge::overlay(&mut endpoints, &ctx, &own_endpoints)?;

        let mut dependencies: Vec<DependencyRef> = Vec::new();
        for dep in bases
            .iter()
            .flat_map(|edge| edge.class.dependencies.iter())
            .chain(own_dependencies.iter())
        {
            if !dependencies.contains(dep) {
                dependencies.push(*dep);
            }
        }

        let init = init.or_else(|| bases.iter().find_map(|edge| edge.class.init.clone()));

        let mut ancestors: Vec<String> = Vec::new();
        for edge in &bases {
            for ancestor in std::iter::once(&edge.class.name).chain(edge.class.ancestors.iter()) {
                if !ancestors.contains(ancestor) {
                    ancestors.push(ancestor.clone());
                }
            }
        }
        let base_names: Vec<String> = bases.iter().map(|edge| edge.class.name.clone()).collect();

        for descriptor in endpoints.values() {
            debug!(
                component = "routing",
                event = "endpoint_resolved",
                controller = %name,
                method = descriptor.method_name(),
                owner = descriptor.owner(),
                template = descriptor.template_path(),
                path = descriptor.final_path(),
                "endpoint resolved"
            );
        }
        info!(
            component = "routing",
            event = "controller_built",
            controller = %name,
            module = %module,
            version = %version,
            bases = ?base_names,
            endpoints = endpoints.len(),
            "controller class built"
        );

        Ok(Arc::new(CompiledClass {
            name,
            bases: base_names,
            ancestors,
            attrs,
            effective,
            module,
            version,
            resolver,
            generics: visible,
            endpoints,
            dependencies,
            init,
            _state: PhantomData,
        }))
    }
}

/// A built controller class. Immutable; shared through `Arc`.
pub struct CompiledClass<S> {
    name: String,
    bases: Vec<String>,
    ancestors: Vec<String>,
    attrs: Attributes,
    effective: Attributes,
    module: String,
    version: String,
    resolver: PathResolver,
    generics: Vec<String>,
    endpoints: EndpointMap<S>,
    dependencies: Vec<DependencyRef>,
    init: Option<Constructor<S>>,
    _state: PhantomData<fn() -> S>,
}

impl<S> fmt::Debug for CompiledClass<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledClass")
            .field("name", &self.name)
            .field("bases", &self.bases)
            .field("module", &self.module)
            .field("version", &self.version)
            .field("endpoints", &self.endpoints)
            .finish_non_exhaustive()
    }
}

impl<S> CompiledClass<S> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Direct bases in listing order.
    pub fn bases(&self) -> &[String] {
        &self.bases
    }

    /// Every ancestor, nearest first.
    pub fn ancestors(&self) -> &[String] {
        &self.ancestors
    }

    pub fn is_subclass_of(&self, name: &str) -> bool {
        self.ancestors.iter().any(|a| a == name)
    }

    /// Module the class sets itself, if any.
    pub fn own_module(&self) -> Option<&str> {
        self.attrs.module.as_deref()
    }

    pub fn own_version(&self) -> Option<&str> {
        self.attrs.version.as_deref()
    }

    /// Effective module; empty when no class in the chain sets one.
    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn base_template(&self) -> &str {
        self.resolver.base_template()
    }

    /// Effective class tags, if any class in the chain sets them.
    pub fn tags(&self) -> Option<&[String]> {
        self.effective.tags.as_deref()
    }

    /// Generic parameters still open on this class.
    pub fn generics(&self) -> &[String] {
        &self.generics
    }

    pub fn endpoints(&self) -> &EndpointMap<S> {
        &self.endpoints
    }

    pub fn endpoint(&self, method: &str) -> Option<&EndpointDescriptor<S>> {
        self.endpoints.get(method)
    }

    pub fn dependencies(&self) -> &[DependencyRef] {
        &self.dependencies
    }

    pub fn has_constructor(&self) -> bool {
        self.init.is_some()
    }

    pub fn route_table(&self) -> Vec<RouteInfo> {
        self.endpoints.values().map(EndpointDescriptor::info).collect()
    }

    /// Builds one instance from `depends` with the class constructor.
    pub fn construct(&self, depends: &Depends) -> RoutingResult<S> {
        self.construct_in(&Scope::new(Arc::new(depends.clone())))
    }

    /// Builds one instance from the values already resolved in `scope`.
    pub fn construct_in(&self, scope: &Scope) -> RoutingResult<S> {
        let init = self.init.as_ref().ok_or_else(|| RoutingError::MissingConstructor {
            controller: self.name.clone(),
        })?;
        let mut injected = scope.inject(&self.name, &self.dependencies)?;
        init.as_ref()(&mut injected)
    }
}
