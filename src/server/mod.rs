//! HTTP server module.
//!
//! This module provides the web server: route registration with exact and
//! dynamic path matching, request hooks, status pages and the async accept
//! loop.

mod config;
mod error;
mod handler;
mod router;
mod web_server;

// Re-export public items
pub use config::ServerConfig;
pub use error::Error;
pub use handler::{
    AfterHookFn, AfterHookFuture, BeforeHookFn, BeforeHookFuture, HandlerFn, HandlerFuture, Route,
    StatusHandlerFn,
};
pub use router::{ParamValue, PathParams, RoutePattern};
pub use web_server::WebServer;
