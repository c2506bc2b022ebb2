//! Panic recovery middleware.
//

use axum::{
    http::{header::CONTENT_TYPE, StatusCode},
    response::{IntoResponse, Response},
    Router,
};
use std::any::Any;
use std::sync::atomic::{AtomicU64, Ordering};
use tower_http::catch_panic::CatchPanicLayer;
use tracing::error;

use super::middleware::Middleware;

/// Global panic counter.
static PANICS_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Gets the current panic counter value.
pub fn panics_counter() -> u64 {
    PANICS_COUNTER.load(Ordering::Relaxed)
}

fn inc_panics() {
    PANICS_COUNTER.fetch_add(1, Ordering::Relaxed);
}

/// Turns a handler panic into a 500 response.
fn recover(panic: Box<dyn Any + Send + 'static>) -> Response {
    inc_panics();

    let message = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!(
        component = "http",
        event = "panic_recovered",
        panic = message,
        "handler panicked"
    );

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        [(CONTENT_TYPE, "application/json; charset=utf-8")],
        r#"{"status":500,"message":"internal server error"}"#,
    )
        .into_response()
}

/// PanicRecoverMiddleware recovers from panics in HTTP handlers.
#[derive(Debug, Default, Clone, Copy)]
pub struct PanicRecoverMiddleware;

impl PanicRecoverMiddleware {
    pub fn new() -> Self {
        Self
    }
}

impl Middleware for PanicRecoverMiddleware {
    fn apply(&self, router: Router) -> Router {
        router.layer(CatchPanicLayer::custom(recover))
    }
}
