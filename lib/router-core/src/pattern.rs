//! Route path patterns with named dynamic segments

use crate::{Result, RouterError};
use std::collections::BTreeMap;
use std::fmt;

/// Parameter values extracted from (or used to build) a concrete path
pub type RouteParams = BTreeMap<String, String>;

/// Options controlling how concrete paths are compared to patterns
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MatchOptions {
    /// Reject a trailing slash on otherwise matching paths
    pub strict: bool,
    /// Compare static segments case-sensitively
    pub sensitive: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Segment {
    Static(String),
    Param(String),
}

/// A compiled path pattern such as `/` or `/room/:roomId`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoutePattern {
    raw: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    /// Parse and validate a pattern
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.is_empty() {
            return Err(RouterError::Configuration("empty path pattern".to_string()));
        }

        let rest = raw.strip_prefix('/').ok_or_else(|| {
            RouterError::Configuration(format!("path pattern {:?} must start with '/'", raw))
        })?;

        let mut segments = Vec::new();
        if !rest.is_empty() {
            for part in rest.split('/') {
                if part.is_empty() {
                    return Err(RouterError::Configuration(format!(
                        "path pattern {:?} contains an empty segment",
                        raw
                    )));
                }

                if let Some(name) = part.strip_prefix(':') {
                    if name.is_empty()
                        || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
                    {
                        return Err(RouterError::Configuration(format!(
                            "invalid parameter name {:?} in path pattern {:?}",
                            name, raw
                        )));
                    }
                    if segments
                        .iter()
                        .any(|s| matches!(s, Segment::Param(existing) if existing == name))
                    {
                        return Err(RouterError::Configuration(format!(
                            "duplicate parameter {:?} in path pattern {:?}",
                            name, raw
                        )));
                    }
                    segments.push(Segment::Param(name.to_string()));
                } else {
                    if part.contains(&[':', '?', '#'][..]) {
                        return Err(RouterError::Configuration(format!(
                            "invalid segment {:?} in path pattern {:?}",
                            part, raw
                        )));
                    }
                    segments.push(Segment::Static(part.to_string()));
                }
            }
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    /// The pattern as it was registered
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Names of the dynamic segments, in path order
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Static(_) => None,
        })
    }

    /// Match a concrete path, returning the bound parameters on success.
    ///
    /// The path must have exactly as many segments as the pattern; dynamic
    /// segments bind a single non-empty component.
    pub fn matches(&self, path: &str, options: MatchOptions) -> Option<RouteParams> {
        let rest = path.strip_prefix('/')?;
        let rest = match rest.strip_suffix('/') {
            Some(trimmed) if !options.strict && !trimmed.is_empty() => trimmed,
            _ => rest,
        };

        let parts: Vec<&str> = if rest.is_empty() {
            Vec::new()
        } else {
            rest.split('/').collect()
        };
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = RouteParams::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            if part.is_empty() {
                return None;
            }
            match segment {
                Segment::Static(expected) => {
                    if !static_eq(expected, part, options) {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    params.insert(name.clone(), part.to_string());
                }
            }
        }

        Some(params)
    }

    /// Build a concrete path from parameter values
    pub(crate) fn build(&self, route: &str, params: &RouteParams) -> Result<String> {
        if self.segments.is_empty() {
            return Ok("/".to_string());
        }

        let mut path = String::new();
        for segment in &self.segments {
            path.push('/');
            match segment {
                Segment::Static(s) => path.push_str(s),
                Segment::Param(name) => {
                    let value = params.get(name).ok_or_else(|| RouterError::MissingParam {
                        route: route.to_string(),
                        param: name.clone(),
                    })?;
                    if value.is_empty() || value.contains(&['/', '?', '#'][..]) {
                        return Err(RouterError::InvalidParam {
                            param: name.clone(),
                            value: value.clone(),
                        });
                    }
                    path.push_str(value);
                }
            }
        }
        Ok(path)
    }

    /// Whether both patterns match exactly the same set of paths
    pub fn same_shape(&self, other: &RoutePattern, options: MatchOptions) -> bool {
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|pair| match pair {
                    (Segment::Param(_), Segment::Param(_)) => true,
                    (Segment::Static(a), Segment::Static(b)) => static_eq(a, b, options),
                    _ => false,
                })
    }

    /// Whether some concrete path could match both patterns
    pub fn overlaps(&self, other: &RoutePattern, options: MatchOptions) -> bool {
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|pair| match pair {
                    (Segment::Static(a), Segment::Static(b)) => static_eq(a, b, options),
                    _ => true,
                })
    }
}

fn static_eq(a: &str, b: &str, options: MatchOptions) -> bool {
    if options.sensitive {
        a == b
    } else {
        a.eq_ignore_ascii_case(b)
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
