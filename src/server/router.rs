//! Route patterns and typed path parameters.
//!
//! A route path is a sequence of `/`-separated segments. A segment of the
//! form `<kind:name>` matches a single path segment and converts it to a
//! typed value; everything else matches literally. Supported kinds are
//! `int`, `float`, `str` and `uuid` (version 4 only).

use std::collections::HashMap;
use std::fmt;

use uuid::Uuid;

use crate::server::error::Error;

/// A typed value extracted from a dynamic path segment.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Int(i64),
    Float(f64),
    Str(String),
    Uuid(Uuid),
}

impl ParamValue {
    /// The value as an integer, if it is one.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ParamValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// The value as a float, if it is one.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            ParamValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// The value as a string segment, if it is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Str(v) => Some(v),
            _ => None,
        }
    }

    /// The value as a UUID, if it is one.
    pub fn as_uuid(&self) -> Option<Uuid> {
        match self {
            ParamValue::Uuid(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Int(v) => write!(f, "{v}"),
            ParamValue::Float(v) => write!(f, "{v}"),
            ParamValue::Str(v) => write!(f, "{v}"),
            ParamValue::Uuid(v) => write!(f, "{v}"),
        }
    }
}

/// The parameters extracted from a matched dynamic route.
///
/// Empty for exact-match routes.
#[derive(Debug, Clone, Default)]
pub struct PathParams {
    params: HashMap<String, ParamValue>,
}

impl PathParams {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a parameter by name.
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.params.get(name)
    }

    /// Get an `int` parameter by name.
    pub fn get_int(&self, name: &str) -> Option<i64> {
        self.params.get(name).and_then(ParamValue::as_int)
    }

    /// Get a `float` parameter by name.
    pub fn get_float(&self, name: &str) -> Option<f64> {
        self.params.get(name).and_then(ParamValue::as_float)
    }

    /// Get a `str` parameter by name.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.params.get(name).and_then(ParamValue::as_str)
    }

    /// Get a `uuid` parameter by name.
    pub fn get_uuid(&self, name: &str) -> Option<Uuid> {
        self.params.get(name).and_then(ParamValue::as_uuid)
    }

    /// The number of extracted parameters.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Check whether any parameters were extracted.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    fn insert(&mut self, name: String, value: ParamValue) {
        self.params.insert(name, value);
    }
}

/// The kind of a dynamic segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParamKind {
    Int,
    Float,
    Str,
    Uuid,
}

impl ParamKind {
    fn parse(kind: &str) -> Option<Self> {
        match kind {
            "int" => Some(ParamKind::Int),
            "float" => Some(ParamKind::Float),
            "str" => Some(ParamKind::Str),
            "uuid" => Some(ParamKind::Uuid),
            _ => None,
        }
    }

    fn convert(&self, segment: &str) -> Option<ParamValue> {
        if segment.is_empty() {
            return None;
        }
        match self {
            ParamKind::Int => segment.parse().ok().map(ParamValue::Int),
            ParamKind::Float => segment.parse().ok().map(ParamValue::Float),
            ParamKind::Str => Some(ParamValue::Str(segment.to_string())),
            ParamKind::Uuid => {
                let uuid = Uuid::parse_str(segment).ok()?;
                (uuid.get_version_num() == 4).then_some(ParamValue::Uuid(uuid))
            }
        }
    }
}

/// One segment of a route path.
#[derive(Debug, Clone)]
enum Segment {
    Literal(String),
    Param { name: String, kind: ParamKind },
}

/// A compiled route path.
#[derive(Debug, Clone)]
pub struct RoutePattern {
    raw: String,
    segments: Vec<Segment>,
    dynamic: bool,
}

impl RoutePattern {
    /// Compile a route path.
    ///
    /// Fails when a dynamic segment names an unknown kind or has no name.
    pub fn parse(path: &str) -> Result<Self, Error> {
        if !path.starts_with('/') {
            return Err(Error::InvalidRoutePattern(path.to_string()));
        }

        let mut segments = Vec::new();
        let mut dynamic = false;
        for part in path.split('/') {
            if let Some(inner) = part.strip_prefix('<').and_then(|p| p.strip_suffix('>')) {
                let (kind, name) = inner
                    .split_once(':')
                    .ok_or_else(|| Error::InvalidRoutePattern(path.to_string()))?;
                let kind = ParamKind::parse(kind)
                    .ok_or_else(|| Error::InvalidRoutePattern(path.to_string()))?;
                if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                    return Err(Error::InvalidRoutePattern(path.to_string()));
                }
                segments.push(Segment::Param {
                    name: name.to_string(),
                    kind,
                });
                dynamic = true;
            } else {
                segments.push(Segment::Literal(part.to_string()));
            }
        }

        Ok(Self {
            raw: path.to_string(),
            segments,
            dynamic,
        })
    }

    /// The route path as registered.
    pub fn path(&self) -> &str {
        &self.raw
    }

    /// Match a request path against this pattern.
    ///
    /// The query string is ignored. Returns the extracted parameters on a
    /// match (empty for exact-match routes), `None` otherwise.
    pub fn matches(&self, request_path: &str) -> Option<PathParams> {
        let path = request_path.split('?').next().unwrap_or(request_path);

        if !self.dynamic {
            return (self.raw == path).then(PathParams::new);
        }

        let parts: Vec<&str> = path.split('/').collect();
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = PathParams::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(literal) => {
                    if literal != part {
                        return None;
                    }
                }
                Segment::Param { name, kind } => {
                    let value = kind.convert(part)?;
                    params.insert(name.clone(), value);
                }
            }
        }

        Some(params)
    }
}
