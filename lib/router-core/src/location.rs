//! Locations and the application base path

use std::collections::BTreeMap;
use std::fmt;
use url::form_urlencoded;

/// Decoded query string parameters
pub type Query = BTreeMap<String, String>;

/// Application base path (e.g. `/app`) that prefixes every history entry.
///
/// Stored normalized: a leading `/` and no trailing `/`. The empty string
/// means the application is served from the root.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BasePath(String);

impl BasePath {
    pub fn new(raw: &str) -> Self {
        let trimmed = raw.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Self(String::new());
        }
        if trimmed.starts_with('/') {
            Self(trimmed.to_string())
        } else {
            Self(format!("/{}", trimmed))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Remove the base from a host href, ignoring ASCII case. Hrefs
    /// outside the base are returned unchanged.
    pub fn strip<'a>(&self, href: &'a str) -> &'a str {
        if self.is_root() {
            return href;
        }
        let len = self.0.len();
        match (href.get(..len), href.get(len..)) {
            (Some(prefix), Some(rest))
                if prefix.eq_ignore_ascii_case(&self.0)
                    && (rest.is_empty() || rest.starts_with(&['/', '?', '#'][..])) =>
            {
                rest
            }
            _ => href,
        }
    }

    /// Prefix an application path with the base
    pub fn apply(&self, path: &str) -> String {
        format!("{}{}", self.0, path)
    }
}

impl fmt::Display for BasePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            f.write_str("/")
        } else {
            f.write_str(&self.0)
        }
    }
}

/// An application-relative location split into path, query and hash
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Location {
    pub path: String,
    pub query: Query,
    pub hash: Option<String>,
}

impl Location {
    /// Split `path[?query][#hash]`. An empty path is the root.
    pub fn parse(raw: &str) -> Self {
        let (rest, hash) = match raw.split_once('#') {
            Some((rest, hash)) => (rest, Some(hash.to_string())),
            None => (raw, None),
        };
        let (path, query) = match rest.split_once('?') {
            Some((path, query)) => (path, parse_query(query)),
            None => (rest, Query::new()),
        };

        Self {
            path: if path.is_empty() { "/".to_string() } else { path.to_string() },
            query,
            hash,
        }
    }

    /// Path with the query and hash re-attached
    pub fn full_path(&self) -> String {
        full_path(&self.path, &self.query, self.hash.as_deref())
    }
}

pub(crate) fn full_path(path: &str, query: &Query, hash: Option<&str>) -> String {
    let mut full = path.to_string();
    if !query.is_empty() {
        let encoded = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(query.iter())
            .finish();
        full.push('?');
        full.push_str(&encoded);
    }
    if let Some(hash) = hash {
        full.push('#');
        full.push_str(hash);
    }
    full
}

fn parse_query(query: &str) -> Query {
    form_urlencoded::parse(query.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}
