//! A lightweight HTTP framework.
//!
//! maya provides the pieces a small web application needs and nothing more:
//! an HTTP/1.1 request parser, a response builder, cookie management and an
//! async server with routing.
//!
//! # Features
//!
//! - Parse HTTP requests from byte slices into immutable request values
//! - Routes with exact paths or typed dynamic segments (`/users/<int:id>`)
//! - Response builders and render shorthands (`render_from_string`,
//!   `render_json`, `redirect`, `render_file`)
//! - Cookies on both sides: the `Cookie` request header parsed into a map,
//!   `Set-Cookie` response headers built from [`cookies::Cookie`] values
//! - Before/after request hooks and custom status pages
//! - Task-per-connection accept loop with graceful shutdown
//!
//! # Examples
//!
//! ## Parsing a request
//!
//! ```
//! use maya::parse_request;
//!
//! let request_bytes = b"GET /index.html HTTP/1.1\r\nHost: example.com\r\n\r\n";
//!
//! match parse_request(request_bytes) {
//!     Ok(request) => {
//!         println!("Method: {}", request.method);
//!         println!("Path: {}", request.path);
//!         println!("Headers: {:?}", request.headers);
//!     },
//!     Err(err) => {
//!         println!("Error parsing request: {}", err);
//!     }
//! }
//! ```
//!
//! ## Running a server
//!
//! ```no_run
//! use maya::{ServerConfig, WebServer, render_from_string};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let app = WebServer::new(ServerConfig::default());
//!
//!     app.add_route("/", |_req, _params| async {
//!         Ok(render_from_string("Hello, world!"))
//!     }).await?;
//!
//!     app.run().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Setting a cookie
//!
//! ```
//! use maya::cookies::{Cookie, SameSite};
//! use maya::render_from_string;
//!
//! let response = render_from_string("<h1>Welcome back</h1>")
//!     .with_cookie(&Cookie::new("session", "abc123")
//!         .with_path("/")
//!         .with_http_only()
//!         .with_same_site(SameSite::Lax));
//!
//! assert_eq!(response.header("Set-Cookie"), Some("session=abc123; Path=/; HttpOnly; SameSite=Lax"));
//! ```
//!
//! See the `demos` directory for complete runnable servers.

// Export the request module
pub mod request;

// Export the response module
pub mod response;

// Export the cookies module
pub mod cookies;

// Export the server module
pub mod server;

// Re-export commonly used items for convenience
pub use request::{Error as ParseError, HttpRequest, HttpVersion, Method, parse_request};
pub use response::{
    HttpResponse, StatusCode, redirect, render_file, render_from_string, render_http_message,
    render_json,
};
pub use cookies::{Cookie, CookieJar, SameSite, parse_cookie_header};
pub use server::{Error as ServerError, ParamValue, PathParams, ServerConfig, WebServer};
