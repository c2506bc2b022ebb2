//! Inheritance merge of endpoint maps.
//!
//! Base maps are cloned and folded in listing order, later bases replacing
//! earlier ones for the same method name. Each inherited descriptor is
//! re-derived for the child from its expanded template: the controller span
//! always takes the child's name, while module and version spans change only
//! when the child sets them. Undecorated overrides and the child's own
//! declarations are applied on top.

use indexmap::IndexMap;
use tracing::debug;

use super::endpoint::{BoxedHandler, Endpoint, EndpointDescriptor, EndpointMap, Segments};
use super::error::{RoutingError, RoutingResult};
use super::generics::{self, Bindings};
use super::template::PathResolver;

/// Naming context of the class whose map is being built.
#[derive(Debug, Clone)]
pub(crate) struct ChildContext<'a> {
    pub name: &'a str,
    /// Module and version the class sets itself.
    pub own_module: Option<&'a str>,
    pub own_version: Option<&'a str>,
    /// Effective module and version, inherited or defaulted.
    pub module: &'a str,
    pub version: &'a str,
    pub tags: Option<&'a [String]>,
    pub generics: &'a [String],
    pub resolver: &'a PathResolver,
}

impl ChildContext<'_> {
    fn tags_for(&self, explicit: Option<&Vec<String>>) -> Vec<String> {
        match (explicit, self.tags) {
            (Some(tags), _) => tags.clone(),
            (None, Some(tags)) => tags.to_vec(),
            (None, None) => vec![self.name.to_string()],
        }
    }

    fn check_models<S>(&self, endpoint: &Endpoint<S>) -> RoutingResult<()> {
        let args = endpoint.args();
        for model in args.response_model.iter().chain(args.request_model.iter()) {
            generics::check(self.name, model, self.generics)?;
        }
        Ok(())
    }
}

/// Re-derives one inherited descriptor for the child.
pub(crate) fn rebase<S>(
    inherited: &EndpointDescriptor<S>,
    child: &ChildContext<'_>,
    bindings: &Bindings,
) -> RoutingResult<EndpointDescriptor<S>> {
    let mut endpoint = inherited.endpoint.clone();
    if !bindings.is_empty() {
        let args = &mut endpoint.args;
        args.response_model = args.response_model.as_ref().map(|m| bindings.substitute(m));
        args.request_model = args.request_model.as_ref().map(|m| bindings.substitute(m));
    }
    child.check_models(&endpoint)?;

    let segments = Segments {
        module: child
            .own_module
            .map_or_else(|| inherited.segments.module.clone(), str::to_string),
        controller: child.name.to_string(),
        version: child
            .own_version
            .map_or_else(|| inherited.segments.version.clone(), str::to_string),
    };
    let resolved = child
        .resolver
        .finish(inherited.expanded_template.clone(), &segments)?;

    let tags = child.tags_for(endpoint.args.tags.as_ref());
    Ok(EndpointDescriptor {
        method_name: inherited.method_name.clone(),
        owner: inherited.owner.clone(),
        endpoint,
        expanded_template: resolved.expanded_template,
        template_path: resolved.template_path,
        final_path: resolved.final_path,
        segments: resolved.segments,
        tags,
    })
}

/// Folds base maps in listing order.
pub(crate) fn merge_bases<'m, S: 'm>(
    child: &ChildContext<'_>,
    edges: impl IntoIterator<Item = (&'m EndpointMap<S>, &'m Bindings)>,
) -> RoutingResult<EndpointMap<S>> {
    let mut merged = EndpointMap::new();
    for (base, bindings) in edges {
        for (name, inherited) in base {
            let descriptor = rebase(inherited, child, bindings)?;
            debug!(
                component = "routing",
                event = "endpoint_inherited",
                controller = child.name,
                method = %name,
                from = %inherited.final_path,
                to = %descriptor.final_path,
                "endpoint inherited"
            );
            merged.insert(name.clone(), descriptor);
        }
    }
    Ok(merged)
}

/// Swaps the handler of an inherited method, keeping its options and path.
pub(crate) fn override_handler<S>(
    map: &mut EndpointMap<S>,
    child: &ChildContext<'_>,
    method: &str,
    handler: BoxedHandler,
) -> RoutingResult<()> {
    let descriptor = map.get_mut(method).ok_or_else(|| RoutingError::UnknownMethod {
        controller: child.name.to_string(),
        method: method.to_string(),
    })?;
    descriptor.endpoint = descriptor.endpoint.clone().with_handler(handler);
    descriptor.owner = child.name.to_string();
    Ok(())
}

/// Resolves an endpoint the child declares itself.
pub(crate) fn declare<S>(
    child: &ChildContext<'_>,
    method: &str,
    endpoint: Endpoint<S>,
) -> RoutingResult<EndpointDescriptor<S>> {
    if endpoint.args().methods.is_empty() {
        return Err(RoutingError::NoHttpMethods {
            controller: child.name.to_string(),
            method: method.to_string(),
        });
    }
    child.check_models(&endpoint)?;

    let segments = Segments::new(child.module, child.name, child.version);
    let resolved = child.resolver.resolve(&endpoint.args().path, &segments)?;
    let tags = child.tags_for(endpoint.args().tags.as_ref());

    Ok(EndpointDescriptor {
        method_name: method.to_string(),
        owner: child.name.to_string(),
        endpoint,
        expanded_template: resolved.expanded_template,
        template_path: resolved.template_path,
        final_path: resolved.final_path,
        segments: resolved.segments,
        tags,
    })
}

/// Overlays the child's own endpoints; a redefinition keeps the inherited slot.
pub(crate) fn overlay<S>(
    map: &mut EndpointMap<S>,
    child: &ChildContext<'_>,
    own: &IndexMap<String, Endpoint<S>>,
) -> RoutingResult<()> {
    for (name, endpoint) in own {
        let descriptor = declare(child, name, endpoint.clone())?;
        map.insert(name.clone(), descriptor);
    }
    Ok(())
}
