//! HTTP request parsing and representation.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;

use crate::cookies::parse_cookie_header;
use crate::request::error::Error;
use crate::request::method::Method;
use crate::request::version::HttpVersion;

/// Represents an HTTP request.
///
/// A request is immutable after parsing: the server creates one per accepted
/// connection, hands it to the matched handler and discards it afterwards.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// The HTTP method (GET, POST, etc.)
    pub method: Method,
    /// The request path, including any query string
    pub path: String,
    /// The HTTP version
    pub version: HttpVersion,
    /// The HTTP headers
    pub headers: HashMap<String, String>,
    /// The request body
    pub body: Vec<u8>,
    /// Query parameters parsed from the path, values kept raw
    pub query_params: HashMap<String, String>,
    /// Cookies parsed from the `Cookie` header
    pub cookies: HashMap<String, String>,
}

impl HttpRequest {
    /// Create a new HTTP request with an empty body.
    ///
    /// Query parameters and cookies are derived from the path and the
    /// `Cookie` header respectively.
    pub fn new(method: Method, path: String, version: HttpVersion, headers: HashMap<String, String>) -> Self {
        // Parse query parameters from the path
        let query_params: HashMap<String, String> = path
            .split_once('?')
            .map(|(_, query)| query
                .split('&')
                .filter(|s| !s.is_empty())
                .map(|pair| {
                    if let Some((k, v)) = pair.split_once('=') {
                        (k.to_string(), v.to_string())
                    } else {
                        (pair.to_string(), String::new())
                    }
                })
                .collect())
            .unwrap_or_default();

        let cookies = headers
            .iter()
            .find_map(|(k, v)| k.eq_ignore_ascii_case("Cookie").then(|| parse_cookie_header(v)))
            .unwrap_or_default();

        Self {
            method,
            path,
            version,
            headers,
            body: Vec::new(),
            query_params,
            cookies,
        }
    }

    /// Create a new HTTP request with a body.
    pub fn with_body(method: Method, path: String, version: HttpVersion, headers: HashMap<String, String>, body: Vec<u8>) -> Self {
        let mut request = Self::new(method, path, version, headers);
        request.body = body;
        request
    }

    /// Get a header value.
    ///
    /// # Arguments
    ///
    /// * `name` - The header name
    ///
    /// # Returns
    ///
    /// The header value, if it exists
    pub fn get_header(&self, name: &str) -> Option<&String> {
        // Headers are case-insensitive, so we need to do a case-insensitive lookup
        self.headers.iter().find_map(|(k, v)| {
            if k.eq_ignore_ascii_case(name) {
                Some(v)
            } else {
                None
            }
        })
    }

    /// Check if a header exists.
    pub fn has_header(&self, name: &str) -> bool {
        self.get_header(name).is_some()
    }

    /// Get a cookie value sent by the client.
    pub fn cookie(&self, name: &str) -> Option<&String> {
        self.cookies.get(name)
    }

    /// Check if the client sent a cookie with the given name.
    pub fn has_cookie(&self, name: &str) -> bool {
        self.cookies.contains_key(name)
    }

    /// Parse the request body as JSON.
    ///
    /// # Returns
    ///
    /// The parsed JSON value, or an error if the body is not valid JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, Error> {
        // Check if the Content-Type header is application/json
        if !self.is_json() {
            return Err(Error::MissingHeader("Content-Type: application/json".to_string()));
        }

        // Parse the body as JSON
        let json = serde_json::from_slice(&self.body)?;
        Ok(json)
    }

    /// Check if the request has a JSON body.
    pub fn is_json(&self) -> bool {
        if let Some(content_type) = self.get_header("Content-Type") {
            content_type.starts_with("application/json")
        } else {
            false
        }
    }

    /// Parse the request body as an `application/x-www-form-urlencoded` form.
    ///
    /// Keys and values are percent-decoded. Repeated keys keep the last value.
    pub fn form_params(&self) -> Result<HashMap<String, String>, Error> {
        if !self.is_form() {
            return Err(Error::MissingHeader("Content-Type: application/x-www-form-urlencoded".to_string()));
        }

        Ok(url::form_urlencoded::parse(&self.body)
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect())
    }

    /// Check if the request has a form-encoded body.
    pub fn is_form(&self) -> bool {
        self.get_header("Content-Type")
            .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"))
    }

    /// Get a query parameter value.
    pub fn get_query_param(&self, name: &str) -> Option<&String> {
        self.query_params.get(name)
    }

    /// Check if a query parameter exists.
    pub fn has_query_param(&self, name: &str) -> bool {
        self.query_params.contains_key(name)
    }
}

impl fmt::Display for HttpRequest {
    /// Renders the request head in `message/http` form, as echoed by TRACE.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}\r\n", self.method, self.path, self.version)?;
        for (name, value) in &self.headers {
            write!(f, "{name}: {value}\r\n")?;
        }
        Ok(())
    }
}

/// Locate the blank line separating the request head from the body.
fn find_head_end(input: &[u8]) -> Option<usize> {
    input.windows(4).position(|w| w == b"\r\n\r\n")
}

/// Parse an HTTP request from a byte slice.
///
/// The head (request line and headers) must be valid UTF-8; the body is kept
/// as raw bytes and truncated to `Content-Length` when that header carries a
/// usable value.
///
/// # Arguments
///
/// * `input` - A byte slice containing the HTTP request to parse
///
/// # Returns
///
/// The parsed HTTP request, or an error if the request is invalid
pub fn parse_request(input: &[u8]) -> Result<HttpRequest, Error> {
    if input.is_empty() {
        return Err(Error::EmptyRequest);
    }

    // Split the head from the body at the first blank line
    let (head, body) = match find_head_end(input) {
        Some(pos) => (&input[..pos], &input[pos + 4..]),
        None => (input, &[][..]),
    };

    let head_str = std::str::from_utf8(head).map_err(|_| Error::InvalidEncoding)?;

    // Split the head into lines
    let mut lines = head_str.lines();

    // Parse the request line
    let request_line = match lines.next() {
        Some(line) => line,
        None => return Err(Error::EmptyRequest),
    };

    // Split the request line into method, path, and version
    let parts: Vec<&str> = request_line.split_whitespace().collect();
    if parts.len() != 3 {
        return Err(Error::MalformedRequestLine(request_line.to_string()));
    }

    // Parse the method
    let method = Method::from_str(parts[0])?;

    // Parse the path
    let path = parts[1].to_string();
    if !path.starts_with('/') {
        return Err(Error::InvalidPath);
    }

    // Parse the version
    let version = HttpVersion::from_str(parts[2])?;

    // Parse the headers
    let mut headers = HashMap::new();
    for line in lines {
        // Empty line indicates the end of headers
        if line.is_empty() {
            break;
        }

        // Split the line into name and value
        let parts: Vec<&str> = line.splitn(2, ':').collect();
        if parts.len() != 2 {
            return Err(Error::InvalidHeaderFormat);
        }

        // Trim whitespace from the name and value
        let name = parts[0].trim().to_string();
        let value = parts[1].trim().to_string();

        // Add the header to the map
        headers.insert(name, value);
    }

    // Check for required headers
    if version == HttpVersion::Http11 && !headers.iter().any(|(k, _)| k.eq_ignore_ascii_case("Host")) {
        return Err(Error::MissingHeader("Host".to_string()));
    }

    // The read loop may hand over more bytes than the declared body length;
    // trust Content-Length when it is usable.
    let mut body = body.to_vec();
    if let Some(len) = headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("Content-Length"))
        .and_then(|(_, v)| v.parse::<usize>().ok())
    {
        if len < body.len() {
            body.truncate(len);
        }
    }

    Ok(HttpRequest::with_body(method, path, version, headers, body))
}
