//! Shorthand constructors for common responses.

use std::path::Path;

use serde::Serialize;

use crate::response::error::Error;
use crate::response::mime::content_type_for;
use crate::response::response::HttpResponse;
use crate::response::status::StatusCode;

/// Build a 200 HTML response from a string.
///
/// The body is sent verbatim; no template expansion takes place.
///
/// ```
/// use maya::response::render_from_string;
///
/// let response = render_from_string("Hello, world!");
/// assert_eq!(response.body, b"Hello, world!");
/// assert_eq!(response.header("Content-Length"), Some("13"));
/// ```
pub fn render_from_string(content: impl Into<String>) -> HttpResponse {
    HttpResponse::new(StatusCode::Ok)
        .with_content_type("text/html; charset=UTF-8")
        .with_header("Connection", "close")
        .with_body_string(content)
}

/// Build a 200 JSON response from a serializable value.
pub fn render_json<T: Serialize>(value: &T) -> Result<HttpResponse, Error> {
    Ok(HttpResponse::new(StatusCode::Ok)
        .with_header("Connection", "close")
        .with_json(value)?)
}

/// Build a 200 `message/http` response, as used for TRACE echoes.
pub fn render_http_message(data: impl Into<String>) -> HttpResponse {
    HttpResponse::new(StatusCode::Ok)
        .with_content_type("message/http")
        .with_header("Connection", "close")
        .with_body_string(data)
}

/// Build a 302 redirect to the given location.
pub fn redirect(location: impl Into<String>) -> HttpResponse {
    HttpResponse::new(StatusCode::Found).with_header("Location", location)
}

/// Build a 200 response from a file on disk.
///
/// The content type is derived from the file extension.
pub async fn render_file(path: impl AsRef<Path>) -> Result<HttpResponse, Error> {
    let path = path.as_ref();
    let body = tokio::fs::read(path).await?;
    let content_type = content_type_for(path.extension().and_then(|e| e.to_str()));

    Ok(HttpResponse::new(StatusCode::Ok)
        .with_content_type(content_type)
        .with_header("Connection", "close")
        .with_body_bytes(body))
}
