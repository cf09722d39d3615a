//! Handler and hook function types.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::request::HttpRequest;
use crate::response::{HttpResponse, StatusCode};
use crate::server::Error;
use crate::server::router::{PathParams, RoutePattern};

/// Type alias for a boxed future that returns a Result<HttpResponse, Error>.
pub type HandlerFuture = Pin<Box<dyn Future<Output = Result<HttpResponse, Error>> + Send>>;

/// Type alias for a route handler: takes the request and the extracted path
/// parameters, returns a [`HandlerFuture`].
pub type HandlerFn = Arc<dyn Fn(HttpRequest, PathParams) -> HandlerFuture + Send + Sync>;

/// Future returned by a before-request hook.
pub type BeforeHookFuture = Pin<Box<dyn Future<Output = Option<HttpResponse>> + Send>>;

/// A hook that runs before dispatch. Returning `Some(response)` short-circuits
/// the request: the handler and the after-hooks are skipped.
pub type BeforeHookFn = Arc<dyn Fn(HttpRequest) -> BeforeHookFuture + Send + Sync>;

/// Future returned by an after-request hook.
pub type AfterHookFuture = Pin<Box<dyn Future<Output = HttpResponse> + Send>>;

/// A hook that runs after the handler, mapping the response it produced.
pub type AfterHookFn = Arc<dyn Fn(HttpRequest, HttpResponse) -> AfterHookFuture + Send + Sync>;

/// A custom page for a status code the server emits itself (400, 404, 500).
pub type StatusHandlerFn = Arc<dyn Fn(StatusCode) -> HttpResponse + Send + Sync>;

/// Represents a route in the HTTP server.
pub struct Route {
    /// The compiled path pattern to match.
    pub pattern: RoutePattern,
    /// The handler function.
    pub handler: HandlerFn,
}
