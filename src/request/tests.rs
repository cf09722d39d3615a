//! Tests for HTTP request parsing.

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use serde::{Deserialize, Serialize};

    use crate::request::{Error, HttpRequest, HttpVersion, Method, parse_request};

    #[test]
    fn test_parse_simple_get_request() {
        let request = b"GET /index.html HTTP/1.1\r\nHost: example.com\r\n\r\n";
        let result = parse_request(request).unwrap();
        assert_eq!(result.method, Method::GET);
        assert_eq!(result.path, "/index.html");
        assert_eq!(result.version, HttpVersion::Http11);
        assert_eq!(result.headers.get("Host").unwrap(), "example.com");
        assert!(result.body.is_empty());
    }

    #[test]
    fn test_parse_request_with_multiple_headers() {
        let request = b"GET /index.html HTTP/1.1\r\nHost: example.com\r\nUser-Agent: test\r\nAccept: */*\r\n\r\n";
        let result = parse_request(request).unwrap();
        assert_eq!(result.headers.get("Host").unwrap(), "example.com");
        assert_eq!(result.headers.get("User-Agent").unwrap(), "test");
        assert_eq!(result.headers.get("Accept").unwrap(), "*/*");
    }

    #[test]
    fn test_case_insensitive_headers() {
        let request = b"GET /index.html HTTP/1.1\r\nHost: example.com\r\n\r\n";
        let result = parse_request(request).unwrap();
        assert!(result.has_header("host"));
        assert!(result.has_header("HOST"));
        assert!(result.has_header("Host"));
    }

    #[test]
    fn test_missing_host_header() {
        let request = b"GET /index.html HTTP/1.1\r\n\r\n";
        let result = parse_request(request);
        assert!(matches!(result, Err(Error::MissingHeader(ref h)) if h == "Host"));
    }

    #[test]
    fn test_invalid_method() {
        let request = b"INVALID /index.html HTTP/1.1\r\nHost: example.com\r\n\r\n";
        let result = parse_request(request);
        assert!(matches!(result, Err(Error::InvalidMethod(ref m)) if m == "INVALID"));
    }

    #[test]
    fn test_invalid_http_version() {
        let request = b"GET /index.html HTTP/9.9\r\nHost: example.com\r\n\r\n";
        let result = parse_request(request);
        assert!(matches!(result, Err(Error::InvalidVersion(ref v)) if v == "HTTP/9.9"));
    }

    #[test]
    fn test_http2_version_rejected() {
        let request = b"GET /index.html HTTP/2\r\nHost: example.com\r\n\r\n";
        let result = parse_request(request);
        assert!(matches!(result, Err(Error::InvalidVersion(ref v)) if v == "HTTP/2"));
    }

    #[test]
    fn test_invalid_header_format() {
        let request = b"GET /index.html HTTP/1.1\r\nInvalidHeader\r\n\r\n";
        let result = parse_request(request);
        assert!(matches!(result, Err(Error::InvalidHeaderFormat)));
    }

    #[test]
    fn test_empty_request() {
        let request = b"";
        let result = parse_request(request);
        assert!(matches!(result, Err(Error::EmptyRequest)));
    }

    #[test]
    fn test_incomplete_request_line() {
        let request = b"GET\r\n";
        let result = parse_request(request);
        assert!(matches!(result, Err(Error::MalformedRequestLine(_))));
    }

    #[test]
    fn test_path_without_leading_slash() {
        let request = b"GET index.html HTTP/1.1\r\nHost: example.com\r\n\r\n";
        let result = parse_request(request);
        assert!(matches!(result, Err(Error::InvalidPath)));
    }

    #[test]
    fn test_all_methods() {
        let methods = vec![
            (b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n".to_vec(), Method::GET),
            (b"POST / HTTP/1.1\r\nHost: example.com\r\n\r\n".to_vec(), Method::POST),
            (b"PUT / HTTP/1.1\r\nHost: example.com\r\n\r\n".to_vec(), Method::PUT),
            (b"DELETE / HTTP/1.1\r\nHost: example.com\r\n\r\n".to_vec(), Method::DELETE),
            (b"HEAD / HTTP/1.1\r\nHost: example.com\r\n\r\n".to_vec(), Method::HEAD),
            (b"OPTIONS / HTTP/1.1\r\nHost: example.com\r\n\r\n".to_vec(), Method::OPTIONS),
            (b"PATCH / HTTP/1.1\r\nHost: example.com\r\n\r\n".to_vec(), Method::PATCH),
            (b"TRACE / HTTP/1.1\r\nHost: example.com\r\n\r\n".to_vec(), Method::TRACE),
        ];

        for (request, expected_method) in methods {
            let result = parse_request(&request).unwrap();
            assert_eq!(result.method, expected_method);
        }
    }

    #[test]
    fn test_headers_with_multiple_colons() {
        let request = b"GET /index.html HTTP/1.1\r\nHost: example.com\r\nX-Test: value:with:colons\r\n\r\n";
        let result = parse_request(request).unwrap();
        assert_eq!(result.headers.get("X-Test").unwrap(), "value:with:colons");
    }

    #[test]
    fn test_http10_without_host() {
        // HTTP/1.0 doesn't require a Host header
        let request = b"GET /index.html HTTP/1.0\r\n\r\n";
        let result = parse_request(request).unwrap();
        assert_eq!(result.method, Method::GET);
        assert_eq!(result.version, HttpVersion::Http10);
        assert!(result.headers.is_empty());
    }

    #[test]
    fn test_method_display() {
        assert_eq!(Method::GET.to_string(), "GET");
        assert_eq!(Method::POST.to_string(), "POST");
        assert_eq!(Method::TRACE.to_string(), "TRACE");
    }

    #[test]
    fn test_http_version_display() {
        assert_eq!(HttpVersion::Http10.to_string(), "HTTP/1.0");
        assert_eq!(HttpVersion::Http11.to_string(), "HTTP/1.1");
    }

    #[test]
    fn test_headers_with_trailing_whitespace() {
        let request = b"GET /index.html HTTP/1.1\r\nHost: example.com  \r\nUser-Agent:  test  \r\n\r\n";
        let result = parse_request(request).unwrap();
        assert_eq!(result.headers.get("Host").unwrap(), "example.com");
        assert_eq!(result.headers.get("User-Agent").unwrap(), "test");
    }

    #[test]
    fn test_mixed_line_endings() {
        let request = b"GET /index.html HTTP/1.1\r\nHost: example.com\nUser-Agent: test\r\n\r\n";
        let result = parse_request(request).unwrap();
        assert_eq!(result.headers.get("Host").unwrap(), "example.com");
        assert_eq!(result.headers.get("User-Agent").unwrap(), "test");
    }

    #[test]
    fn test_request_line_with_extra_whitespace() {
        let request = b"GET  /index.html  HTTP/1.1\r\nHost: example.com\r\n\r\n";
        let result = parse_request(request).unwrap();
        assert_eq!(result.method, Method::GET);
        assert_eq!(result.path, "/index.html");
    }

    #[test]
    fn test_missing_path() {
        let request = b"GET  HTTP/1.1\r\nHost: example.com\r\n\r\n";
        let result = parse_request(request);
        assert!(matches!(result, Err(Error::MalformedRequestLine(_))));
    }

    #[test]
    fn test_path_with_query_parameters() {
        let request = b"GET /search?q=test&page=1 HTTP/1.1\r\nHost: example.com\r\n\r\n";
        let result = parse_request(request).unwrap();
        assert_eq!(result.path, "/search?q=test&page=1");
        assert_eq!(result.query_params.get("q").unwrap(), "test");
        assert_eq!(result.query_params.get("page").unwrap(), "1");
    }

    #[test]
    fn test_query_parameters_without_values() {
        let request = b"GET /search?q=test&flag&empty= HTTP/1.1\r\nHost: example.com\r\n\r\n";
        let result = parse_request(request).unwrap();
        assert_eq!(result.query_params.get("q").unwrap(), "test");
        assert_eq!(result.query_params.get("flag").unwrap(), "");
        assert_eq!(result.query_params.get("empty").unwrap(), "");
    }

    #[test]
    fn test_malformed_utf8_in_head() {
        let request = b"GET /index.html HTTP/1.1\r\nHost: example.com\r\nX-Test: \xFF\xFF\xFF\r\n\r\n";
        let result = parse_request(request);
        assert!(matches!(result, Err(Error::InvalidEncoding)));
    }

    #[test]
    fn test_empty_header_value() {
        let request = b"GET /index.html HTTP/1.1\r\nHost: example.com\r\nX-Empty:\r\n\r\n";
        let result = parse_request(request).unwrap();
        assert_eq!(result.headers.get("X-Empty").unwrap(), "");
    }

    #[test]
    fn test_duplicate_headers() {
        let request = b"GET /index.html HTTP/1.1\r\nHost: example.com\r\nX-Test: value1\r\nX-Test: value2\r\n\r\n";
        let result = parse_request(request).unwrap();
        // The second value should overwrite the first
        assert_eq!(result.headers.get("X-Test").unwrap(), "value2");
    }

    #[test]
    fn test_cookies_parsed_from_header() {
        let request = b"GET / HTTP/1.1\r\nHost: example.com\r\nCookie: session=abc123; theme=dark\r\n\r\n";
        let result = parse_request(request).unwrap();
        assert_eq!(result.cookie("session").unwrap(), "abc123");
        assert_eq!(result.cookie("theme").unwrap(), "dark");
        assert!(result.has_cookie("session"));
        assert!(!result.has_cookie("missing"));
    }

    #[test]
    fn test_no_cookie_header_means_no_cookies() {
        let request = b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";
        let result = parse_request(request).unwrap();
        assert!(result.cookies.is_empty());
    }

    #[test]
    fn test_body_extracted_after_blank_line() {
        let request = b"POST /submit HTTP/1.1\r\nHost: example.com\r\nContent-Length: 11\r\n\r\nhello world";
        let result = parse_request(request).unwrap();
        assert_eq!(result.body, b"hello world");
    }

    #[test]
    fn test_body_truncated_to_content_length() {
        let request = b"POST /submit HTTP/1.1\r\nHost: example.com\r\nContent-Length: 5\r\n\r\nhelloEXTRA";
        let result = parse_request(request).unwrap();
        assert_eq!(result.body, b"hello");
    }

    #[test]
    fn test_binary_body_is_preserved() {
        let mut request = b"POST /upload HTTP/1.1\r\nHost: example.com\r\nContent-Length: 4\r\n\r\n".to_vec();
        request.extend_from_slice(&[0xDE, 0xAD, 0xBE, 0xEF]);
        let result = parse_request(&request).unwrap();
        assert_eq!(result.body, vec![0xDE, 0xAD, 0xBE, 0xEF]);
    }

    #[test]
    fn test_display_renders_request_head() {
        let request = b"GET /index.html HTTP/1.1\r\nHost: example.com\r\n\r\n";
        let result = parse_request(request).unwrap();
        let message = result.to_string();
        assert!(message.starts_with("GET /index.html HTTP/1.1\r\n"));
        assert!(message.contains("Host: example.com\r\n"));
    }

    #[test]
    fn test_http_request_accessors() {
        let mut headers = HashMap::new();
        headers.insert("Host".to_string(), "example.com".to_string());
        headers.insert("Content-Type".to_string(), "application/json".to_string());

        let request = HttpRequest::new(Method::GET, "/index.html".to_string(), HttpVersion::Http11, headers.clone());

        assert_eq!(request.get_header("Host").unwrap(), "example.com");
        assert_eq!(request.get_header("host").unwrap(), "example.com");
        assert!(request.get_header("X-Test").is_none());
        assert!(request.has_header("HOST"));
        assert!(request.is_json());

        let body = b"{\"key\":\"value\"}".to_vec();
        let request_with_body = HttpRequest::with_body(Method::POST, "/api".to_string(), HttpVersion::Http11, headers, body);
        assert_eq!(request_with_body.body, b"{\"key\":\"value\"}".to_vec());
    }

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct TestUser {
        name: String,
        email: String,
    }

    #[test]
    fn test_json_parsing() {
        let mut headers = HashMap::new();
        headers.insert("Host".to_string(), "example.com".to_string());
        headers.insert("Content-Type".to_string(), "application/json".to_string());

        let body = r#"{"name":"John Doe","email":"john@example.com"}"#.as_bytes().to_vec();
        let request = HttpRequest::with_body(Method::POST, "/api/users".to_string(), HttpVersion::Http11, headers.clone(), body.clone());

        let user: TestUser = request.json().unwrap();
        assert_eq!(user.name, "John Doe");
        assert_eq!(user.email, "john@example.com");

        // Wrong content type is rejected before the body is touched
        let mut headers_no_json = headers.clone();
        headers_no_json.insert("Content-Type".to_string(), "text/plain".to_string());
        let request_no_json = HttpRequest::with_body(Method::POST, "/api/users".to_string(), HttpVersion::Http11, headers_no_json, body.clone());
        let result: Result<TestUser, _> = request_no_json.json();
        assert!(matches!(result, Err(Error::MissingHeader(_))));

        // Invalid JSON surfaces the serde error
        let invalid_body = r#"{"name":"John Doe","email":}"#.as_bytes().to_vec();
        let request_invalid_json = HttpRequest::with_body(Method::POST, "/api/users".to_string(), HttpVersion::Http11, headers, invalid_body);
        let result: Result<TestUser, _> = request_invalid_json.json();
        assert!(matches!(result, Err(Error::JsonError(_))));
    }

    #[test]
    fn test_form_parsing() {
        let mut headers = HashMap::new();
        headers.insert("Host".to_string(), "example.com".to_string());
        headers.insert("Content-Type".to_string(), "application/x-www-form-urlencoded".to_string());

        let body = b"name=John+Doe&city=N%C3%BCrnberg".to_vec();
        let request = HttpRequest::with_body(Method::POST, "/submit".to_string(), HttpVersion::Http11, headers.clone(), body);

        let form = request.form_params().unwrap();
        assert_eq!(form.get("name").unwrap(), "John Doe");
        assert_eq!(form.get("city").unwrap(), "Nürnberg");

        // Wrong content type is rejected
        let mut headers_plain = headers;
        headers_plain.insert("Content-Type".to_string(), "text/plain".to_string());
        let request_plain = HttpRequest::with_body(Method::POST, "/submit".to_string(), HttpVersion::Http11, headers_plain, b"name=x".to_vec());
        assert!(matches!(request_plain.form_params(), Err(Error::MissingHeader(_))));
    }

    #[test]
    fn test_complex_request() {
        let request = b"POST /api/users?role=admin HTTP/1.1\r\n\
            Host: example.com\r\n\
            User-Agent: test-client/1.0\r\n\
            Content-Type: application/json\r\n\
            Content-Length: 46\r\n\
            Cookie: session=abc123\r\n\
            \r\n\
            {\"name\":\"John Doe\",\"email\":\"john@example.com\"}";

        let result = parse_request(request).unwrap();
        assert_eq!(result.method, Method::POST);
        assert_eq!(result.path, "/api/users?role=admin");
        assert_eq!(result.version, HttpVersion::Http11);
        assert_eq!(result.headers.get("User-Agent").unwrap(), "test-client/1.0");
        assert_eq!(result.query_params.get("role").unwrap(), "admin");
        assert_eq!(result.cookie("session").unwrap(), "abc123");

        let user: TestUser = result.json().unwrap();
        assert_eq!(user.name, "John Doe");
    }
}
