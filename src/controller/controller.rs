// HTTP controller trait for route registration.

use axum::Router;

/// Anything that contributes routes to the HTTP server.
pub trait Controller: Send + Sync {
    /// Adds routes to the router.
    ///
    /// Class-based controllers build their router up front and merge it here:
    /// ```rust,ignore
    /// let users = Routable::new(&users_class, Users::default())?;
    /// let router = users.add_route(Router::new());
    /// ```
    fn add_route(&self, router: Router) -> Router;
}
