//! Cookie management module.
//!
//! Cookies travel in two directions: the `Cookie` request header is parsed
//! into a plain name/value map, and response-side [`Cookie`] values carry
//! the attributes serialized into `Set-Cookie` header lines.

mod cookie;
mod jar;
mod error;

// Re-export public items
pub use cookie::{Cookie, SameSite};
pub use jar::{CookieJar, parse_cookie_header};
pub use error::Error;
