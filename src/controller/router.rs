// Registration of a compiled class's endpoints into an axum router.

use axum::{
    extract::Request,
    http::{header::CONTENT_TYPE, Method},
    middleware::{from_fn, map_response, Next},
    response::Response,
    routing::{MethodFilter, MethodRouter},
    Router,
};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::info;

use super::class::CompiledClass;
use crate::inject::{Depends, Scope};
use crate::route::template::{scan, Piece};
use crate::route::{EndpointDescriptor, RoutingError, RoutingResult};

/// Converts `{name}` and `{name:conv}` parameters to axum's `:name`; a
/// `path` converter becomes the catch-all `*name`.
///
/// Other converters (`int`, `uuid`, ...) are not matched by the router: a
/// segment of the wrong shape reaches the handler and its `Path<T>`
/// extractor answers 400, not 404.
pub fn axum_path(path: &str) -> Result<String, String> {
    let mut out = String::with_capacity(path.len());
    for piece in scan(path)? {
        match piece {
            Piece::Literal(text) => out.push_str(text),
            Piece::Param(param) => {
                let (name, conv) = param.split_once(':').unwrap_or((param, ""));
                out.push(if conv.trim() == "path" { '*' } else { ':' });
                out.push_str(name.trim());
            }
        }
    }
    Ok(out)
}

#[derive(Debug, PartialEq, Eq)]
enum Token<'a> {
    Char(char),
    Param(&'a str),
    CatchAll(&'a str),
}

fn tokens(axum_path: &str) -> Vec<Token<'_>> {
    let mut out = Vec::with_capacity(axum_path.len());
    let mut rest = axum_path;
    while let Some(c) = rest.chars().next() {
        let tail = &rest[c.len_utf8()..];
        match c {
            ':' | '*' => {
                let end = tail.find('/').unwrap_or(tail.len());
                let name = &tail[..end];
                out.push(if c == ':' { Token::Param(name) } else { Token::CatchAll(name) });
                rest = &tail[end..];
            }
            _ => {
                out.push(Token::Char(c));
                rest = tail;
            }
        }
    }
    out
}

/// Two distinct paths that axum refuses to hold together: after a shared
/// prefix, both continue with a parameter or catch-all that is not the same
/// one. A literal next to a parameter is fine.
fn conflicts(left: &str, right: &str) -> bool {
    let (left, right) = (tokens(left), tokens(right));
    for (l, r) in left.iter().zip(right.iter()) {
        if l == r {
            continue;
        }
        return !matches!(l, Token::Char(_)) && !matches!(r, Token::Char(_));
    }
    false
}

fn method_filter(controller: &str, methods: &[Method]) -> RoutingResult<MethodFilter> {
    let mut filters = methods.iter().map(|method| {
        MethodFilter::try_from(method.clone()).map_err(|_| RoutingError::UnsupportedMethod {
            controller: controller.to_string(),
            method: method.to_string(),
        })
    });
    let first = filters.next().ok_or_else(|| RoutingError::NoHttpMethods {
        controller: controller.to_string(),
        method: String::new(),
    })??;
    filters.try_fold(first, |acc, filter| Ok(acc.or(filter?)))
}

/// Wraps one endpoint's method router with its per-route behavior.
fn method_router<S>(
    descriptor: &EndpointDescriptor<S>,
    filter: MethodFilter,
    depends: Option<&Arc<Depends>>,
) -> MethodRouter {
    let args = descriptor.args();
    let mut route = descriptor.endpoint.handler.as_ref()(filter);

    if args.shapes_response() {
        let status = args.status_code;
        let content_type = args.response_class.content_type();
        route = route.layer(map_response(move |mut response: Response| {
            let content_type = content_type.clone();
            async move {
                if response.status().is_success() {
                    if let Some(status) = status {
                        *response.status_mut() = status;
                    }
                    if let Some(value) = content_type {
                        response.headers_mut().insert(CONTENT_TYPE, value);
                    }
                }
                response
            }
        }));
    }

    if let Some(depends) = depends.filter(|_| !args.dependencies.is_empty()) {
        let deps = Arc::new(args.dependencies.clone());
        let depends = depends.clone();
        route = route.layer(from_fn(move |mut request: Request, next: Next| {
            let deps = deps.clone();
            let depends = depends.clone();
            async move {
                Scope::of(&mut request, &depends).load(&deps);
                next.run(request).await
            }
        }));
    }

    route
}

/// Registers every endpoint of `class` into a fresh router.
///
/// Fails on verbs axum cannot route, on a (verb, path) pair registered twice
/// and on paths axum would refuse to hold together, such as `/items/{id}`
/// next to `/items/{name}` or `/files/{rest:path}`.
pub(crate) fn mount<S: Send + Sync + 'static>(
    class: &CompiledClass<S>,
    depends: Option<&Arc<Depends>>,
) -> RoutingResult<Router> {
    let controller = class.name();
    let mut router = Router::new();
    let mut paths: Vec<String> = Vec::new();
    let mut seen: HashSet<(Method, String)> = HashSet::new();

    for descriptor in class.endpoints().values() {
        let args = descriptor.args();
        let path = axum_path(descriptor.final_path()).map_err(|reason| RoutingError::InvalidPath {
            controller: controller.to_string(),
            path: descriptor.final_path().to_string(),
            reason,
        })?;

        if let Some(other) = paths.iter().find(|other| **other != path && conflicts(other, &path)) {
            return Err(RoutingError::ConflictingRoute {
                controller: controller.to_string(),
                path,
                other: other.clone(),
            });
        }
        for method in &args.methods {
            if !seen.insert((method.clone(), path.clone())) {
                return Err(RoutingError::DuplicateRoute {
                    controller: controller.to_string(),
                    method: method.to_string(),
                    path: descriptor.final_path().to_string(),
                });
            }
        }
        if !paths.contains(&path) {
            paths.push(path.clone());
        }

        if !args.dependencies.is_empty() {
            match depends {
                Some(depends) => depends.ensure(controller, &args.dependencies)?,
                None => {
                    return Err(RoutingError::MissingDependency {
                        controller: controller.to_string(),
                        dependency: args.dependencies[0].type_name().to_string(),
                    })
                }
            }
        }

        let filter = method_filter(controller, &args.methods)?;
        router = router.route(&path, method_router(descriptor, filter, depends));
    }

    if let Some(depends) = depends {
        let depends = depends.clone();
        router = router.layer(from_fn(move |mut request: Request, next: Next| {
            let depends = depends.clone();
            async move {
                Scope::of(&mut request, &depends);
                next.run(request).await
            }
        }));
    }

    info!(
        component = "routing",
        event = "router_built",
        controller = controller,
        routes = class.endpoints().len(),
        "router built"
    );

    Ok(router)
}
