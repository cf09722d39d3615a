//! HTTP cookie representation and `Set-Cookie` serialization.

use std::fmt;

use chrono::NaiveDateTime;

use crate::cookies::error::Error;

/// Format accepted for the `Expires` attribute, e.g. `Wed, 21 Oct 2026 07:28:00 GMT`.
const EXPIRES_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// The `SameSite` policy of a cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSite {
    Strict,
    Lax,
    None,
}

impl fmt::Display for SameSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SameSite::Strict => write!(f, "Strict"),
            SameSite::Lax => write!(f, "Lax"),
            SameSite::None => write!(f, "None"),
        }
    }
}

/// An HTTP cookie with its optional attributes.
///
/// Built with chainable setters and serialized into a single `Set-Cookie`
/// header line:
///
/// ```
/// use maya::cookies::{Cookie, SameSite};
///
/// let cookie = Cookie::new("session", "abc123")
///     .with_path("/")
///     .with_http_only()
///     .with_same_site(SameSite::Lax);
///
/// assert_eq!(cookie.to_header_value(), "session=abc123; Path=/; HttpOnly; SameSite=Lax");
/// ```
#[derive(Debug, Clone)]
pub struct Cookie {
    /// The cookie name
    pub name: String,
    /// The cookie value
    pub value: String,
    /// Expiration date in `Day, DD Mon YYYY HH:MM:SS GMT` form
    pub expires: Option<String>,
    /// Maximum lifetime in seconds
    pub max_age: Option<i64>,
    /// The path for which the cookie is accessible
    pub path: Option<String>,
    /// The domain for which the cookie is valid
    pub domain: Option<String>,
    /// HttpOnly flag (not accessible from scripts)
    pub http_only: bool,
    /// Secure flag (sent only over HTTPS)
    pub secure: bool,
    /// The SameSite policy
    pub same_site: Option<SameSite>,
}

impl Cookie {
    /// Create a cookie with a name and a value and no attributes.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            expires: None,
            max_age: None,
            path: None,
            domain: None,
            http_only: false,
            secure: false,
            same_site: None,
        }
    }

    /// Set the expiration date.
    ///
    /// The date must be in `Day, DD Mon YYYY HH:MM:SS GMT` form; anything
    /// else is rejected rather than sent to the client.
    pub fn with_expires(mut self, expires: impl Into<String>) -> Result<Self, Error> {
        let expires = expires.into();
        if NaiveDateTime::parse_from_str(&expires, EXPIRES_FORMAT).is_err() {
            return Err(Error::InvalidExpires(expires));
        }
        self.expires = Some(expires);
        Ok(self)
    }

    /// Set the maximum lifetime in seconds.
    pub fn with_max_age(mut self, max_age: i64) -> Self {
        self.max_age = Some(max_age);
        self
    }

    /// Set the path for which the cookie is accessible.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set the domain for which the cookie is valid.
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// Mark the cookie as HttpOnly.
    pub fn with_http_only(mut self) -> Self {
        self.http_only = true;
        self
    }

    /// Mark the cookie as Secure.
    pub fn with_secure(mut self) -> Self {
        self.secure = true;
        self
    }

    /// Set the SameSite policy.
    pub fn with_same_site(mut self, same_site: SameSite) -> Self {
        self.same_site = Some(same_site);
        self
    }

    /// Serialize the cookie into a `Set-Cookie` header value.
    ///
    /// Attributes appear in a fixed order: Expires, Max-Age, Path, Domain,
    /// HttpOnly, Secure, SameSite.
    pub fn to_header_value(&self) -> String {
        let mut data = format!("{}={}", self.name, self.value);

        if let Some(expires) = &self.expires {
            data.push_str(&format!("; Expires={expires}"));
        }
        if let Some(max_age) = self.max_age {
            data.push_str(&format!("; Max-Age={max_age}"));
        }
        if let Some(path) = &self.path {
            data.push_str(&format!("; Path={path}"));
        }
        if let Some(domain) = &self.domain {
            data.push_str(&format!("; Domain={domain}"));
        }
        if self.http_only {
            data.push_str("; HttpOnly");
        }
        if self.secure {
            data.push_str("; Secure");
        }
        if let Some(same_site) = self.same_site {
            data.push_str(&format!("; SameSite={same_site}"));
        }

        data
    }
}
