//! Route table for matching locations to views

use crate::pattern::{MatchOptions, RouteParams, RoutePattern};
use crate::route::{ResolvedRoute, RouteDefinition};
use crate::view::ViewId;
use crate::{Result, RouterError};
use router_api::{RouteSpec, RouterConfig};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// RouteTable holds the ordered, validated route definitions
#[derive(Clone, Debug)]
pub struct RouteTable {
    routes: Vec<Arc<RouteDefinition>>,
    // Map of route name to index in `routes`
    by_name: HashMap<String, usize>,
    options: MatchOptions,
}

impl RouteTable {
    /// Validate the route specs and compile them into a table.
    ///
    /// Fails on empty or malformed patterns, empty view ids, duplicate
    /// names and patterns that match exactly the same paths.
    pub fn register(specs: &[RouteSpec], options: MatchOptions) -> Result<Self> {
        let mut routes: Vec<Arc<RouteDefinition>> = Vec::with_capacity(specs.len());
        let mut by_name = HashMap::new();

        for spec in specs {
            if spec.name.is_empty() {
                return Err(RouterError::Configuration(format!(
                    "route for {:?} has an empty name",
                    spec.path
                )));
            }
            if spec.view.is_empty() {
                return Err(RouterError::Configuration(format!(
                    "route {:?} has an empty view",
                    spec.name
                )));
            }

            let pattern = RoutePattern::parse(&spec.path)?;

            if by_name.contains_key(&spec.name) {
                return Err(RouterError::Configuration(format!(
                    "duplicate route name {:?}",
                    spec.name
                )));
            }

            for existing in &routes {
                if existing.pattern.same_shape(&pattern, options) {
                    return Err(RouterError::Configuration(format!(
                        "route {:?} ({}) duplicates route {:?} ({})",
                        spec.name, pattern, existing.name, existing.pattern
                    )));
                }
                if existing.pattern.overlaps(&pattern, options) {
                    debug!(
                        "Route {} ({}) overlaps {} ({}); {} takes precedence",
                        spec.name, pattern, existing.name, existing.pattern, existing.name
                    );
                }
            }

            by_name.insert(spec.name.clone(), routes.len());
            routes.push(Arc::new(RouteDefinition {
                name: spec.name.clone(),
                pattern,
                view: ViewId::new(spec.view.clone()),
                pass_params_as_props: spec.props,
            }));

            debug!("Registered route: {} -> {}", spec.name, spec.path);
        }

        Ok(Self {
            routes,
            by_name,
            options,
        })
    }

    /// Build the table described by a router configuration
    pub fn from_config(config: &RouterConfig) -> Result<Self> {
        let options = MatchOptions {
            strict: config.strict,
            sensitive: config.sensitive,
        };
        Self::register(&config.routes, options)
    }

    /// Resolve an application path to the first route that matches it.
    /// The path is matched as given: no query or hash handling.
    pub fn resolve(&self, path: &str) -> Result<ResolvedRoute> {
        for route in &self.routes {
            if let Some(params) = route.pattern.matches(path, self.options) {
                debug!("Resolved {} to route {}", path, route.name);
                return Ok(ResolvedRoute::new(route.clone(), path, params));
            }
        }

        debug!("No route matches {}", path);
        Err(RouterError::NotFound(path.to_string()))
    }

    /// Build the application path of a named route
    pub fn url_for(&self, name: &str, params: &RouteParams) -> Result<String> {
        let route = self
            .get(name)
            .ok_or_else(|| RouterError::UnknownRoute(name.to_string()))?;
        route.pattern.build(&route.name, params)
    }

    /// Get a route by name
    pub fn get(&self, name: &str) -> Option<&Arc<RouteDefinition>> {
        self.by_name.get(name).map(|&idx| &self.routes[idx])
    }

    /// Routes in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Arc<RouteDefinition>> {
        self.routes.iter()
    }

    pub fn options(&self) -> MatchOptions {
        self.options
    }

    /// Get count of registered routes
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn default_table() -> RouteTable {
        RouteTable::from_config(&RouterConfig::default()).unwrap()
    }

    fn params(pairs: &[(&str, &str)]) -> RouteParams {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_register_default_table() {
        let table = default_table();
        assert_eq!(table.len(), 2);
        let names: Vec<_> = table.iter().map(|r| r.name().to_string()).collect();
        assert_eq!(names, vec!["home", "room"]);

        let room = table.get("room").unwrap();
        assert_eq!(room.view().as_str(), "RoomView");
        assert!(room.pass_params_as_props());
        assert!(!table.get("home").unwrap().pass_params_as_props());
    }

    #[test]
    fn test_register_duplicate_name() {
        let specs = vec![
            RouteSpec::new("/", "home", "HomeView"),
            RouteSpec::new("/lobby", "home", "LobbyView"),
        ];
        let err = RouteTable::register(&specs, MatchOptions::default()).unwrap_err();
        assert!(matches!(err, RouterError::Configuration(msg) if msg.contains("duplicate route name")));
    }

    #[test]
    fn test_register_duplicate_shape() {
        let specs = vec![
            RouteSpec::new("/room/:roomId", "room", "RoomView"),
            RouteSpec::new("/room/:id", "room2", "RoomView"),
        ];
        let err = RouteTable::register(&specs, MatchOptions::default()).unwrap_err();
        assert!(matches!(err, RouterError::Configuration(_)));
    }

    #[test]
    fn test_register_invalid_specs() {
        let bad = [
            RouteSpec::new("", "empty", "HomeView"),
            RouteSpec::new("room", "relative", "HomeView"),
            RouteSpec::new("/", "", "HomeView"),
            RouteSpec::new("/", "home", ""),
        ];
        for spec in bad {
            let err = RouteTable::register(&[spec.clone()], MatchOptions::default()).unwrap_err();
            assert!(
                matches!(err, RouterError::Configuration(_)),
                "expected configuration error for {:?}",
                spec
            );
        }
    }

    #[test]
    fn test_resolve_root() {
        let resolved = default_table().resolve("/").unwrap();
        assert_eq!(resolved.name(), "home");
        assert!(resolved.params().is_empty());
        assert!(resolved.mount().props.is_empty());
    }

    #[test]
    fn test_resolve_room() {
        let resolved = default_table().resolve("/room/42").unwrap();
        assert_eq!(resolved.name(), "room");
        assert_eq!(resolved.param("roomId"), Some("42"));
        assert_eq!(resolved.path(), "/room/42");

        let mounted = resolved.mount();
        assert_eq!(mounted.view.as_str(), "RoomView");
        assert_eq!(mounted.props, params(&[("roomId", "42")]));
    }

    #[test]
    fn test_resolve_not_found() {
        let table = default_table();
        for path in ["/room/a/b", "/unknown", "/room", "", "room/1"] {
            let err = table.resolve(path).unwrap_err();
            assert_eq!(err, RouterError::NotFound(path.to_string()));
            assert!(err.is_not_found());
        }
    }

    #[test]
    fn test_resolve_is_literal() {
        let resolved = default_table().resolve("/room/a?b#c").unwrap();
        assert_eq!(resolved.param("roomId"), Some("a?b#c"));
        assert!(resolved.query().is_empty());
        assert_eq!(resolved.hash(), None);
    }

    #[test]
    fn test_resolve_idempotent() {
        let table = default_table();
        assert_eq!(table.resolve("/room/7").unwrap(), table.resolve("/room/7").unwrap());
        assert_eq!(table.resolve("/").unwrap(), table.resolve("/").unwrap());
    }

    #[test]
    fn test_overlapping_routes_first_wins() {
        let specs = vec![
            RouteSpec::new("/room/new", "new-room", "NewRoomView"),
            RouteSpec::new("/room/:roomId", "room", "RoomView").with_props(),
        ];
        let table = RouteTable::register(&specs, MatchOptions::default()).unwrap();
        assert_eq!(table.resolve("/room/new").unwrap().name(), "new-room");
        assert_eq!(table.resolve("/room/old").unwrap().name(), "room");
    }

    #[test]
    fn test_url_for_round_trip() {
        let table = default_table();
        let path = table.url_for("room", &params(&[("roomId", "42")])).unwrap();
        assert_eq!(path, "/room/42");
        assert_eq!(table.resolve(&path).unwrap().params(), &params(&[("roomId", "42")]));
        assert_eq!(table.url_for("home", &RouteParams::new()).unwrap(), "/");
    }

    #[test]
    fn test_url_for_errors() {
        let table = default_table();
        assert_eq!(
            table.url_for("lobby", &RouteParams::new()).unwrap_err(),
            RouterError::UnknownRoute("lobby".to_string())
        );
        assert!(matches!(
            table.url_for("room", &RouteParams::new()),
            Err(RouterError::MissingParam { .. })
        ));
        assert!(matches!(
            table.url_for("room", &params(&[("roomId", "a/b")])),
            Err(RouterError::InvalidParam { .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_room_segment_binds_room_id(s in "[^/]{1,24}") {
            let resolved = default_table().resolve(&format!("/room/{}", s)).unwrap();
            prop_assert_eq!(resolved.name(), "room");
            prop_assert_eq!(resolved.params(), &params(&[("roomId", s.as_str())]));
        }

        #[test]
        fn prop_extra_segment_never_matches(a in "[^/]{1,12}", b in "[^/]{1,12}") {
            let err = default_table().resolve(&format!("/room/{}/{}", a, b)).unwrap_err();
            prop_assert!(err.is_not_found());
        }
    }
}
