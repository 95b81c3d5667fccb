//! Router for resolving locations to views and keeping history in sync

use crate::history::History;
use crate::location::{BasePath, Location};
use crate::pattern::RouteParams;
use crate::registry::RouteTable;
use crate::route::ResolvedRoute;
use crate::state::{NavigationEvent, NavigationKind, NavigationState};
use crate::Result;
use router_api::RouterConfig;
use std::sync::Arc;
use tokio::sync::{broadcast, watch};
use tracing::{debug, info};

/// Router is the application's navigation context.
///
/// It is created once with [`Router::start`], which resolves the host's
/// initial location, and is then the only writer of the navigation state
/// and the host history. Every mutating operation takes `&mut self`, so
/// navigations run one at a time and either complete or leave everything
/// untouched.
pub struct Router<H: History> {
    table: RouteTable,
    base: BasePath,
    history: H,
    state: NavigationState,
}

impl<H: History> Router<H> {
    /// Build the route table from configuration and start on the
    /// history's current location
    pub fn start(config: &RouterConfig, history: H) -> Result<Self> {
        let table = RouteTable::from_config(config)?;
        Self::new(table, BasePath::new(&config.base), history)
    }

    /// Create a router over an already registered table
    pub fn new(table: RouteTable, base: BasePath, history: H) -> Result<Self> {
        let initial = resolve_href(&table, &base, history.location())?;
        info!(
            "Router started at {} (route {}, base {})",
            history.location(),
            initial.name(),
            base
        );

        Ok(Self {
            table,
            base,
            history,
            state: NavigationState::new(initial),
        })
    }

    /// Resolve an application path to a route without navigating
    pub fn resolve(&self, path: &str) -> Result<ResolvedRoute> {
        self.table.resolve(path)
    }

    /// Resolve an application location (`path[?query][#hash]`)
    pub fn resolve_location(&self, location: &str) -> Result<ResolvedRoute> {
        resolve_location(&self.table, location)
    }

    /// Resolve a host href, stripping the base path first
    pub fn resolve_href(&self, href: &str) -> Result<ResolvedRoute> {
        resolve_href(&self.table, &self.base, href)
    }

    /// Navigate to an application location, pushing a history entry
    pub fn navigate(&mut self, location: &str) -> Result<Arc<ResolvedRoute>> {
        let resolved = self.resolve_location(location)?;
        let href = self.base.apply(&resolved.full_path());
        self.history.push(&href);
        info!("Navigated to {} (route {})", href, resolved.name());
        Ok(self.state.commit(NavigationKind::Push, resolved))
    }

    /// Navigate to a location, overwriting the current history entry
    pub fn replace(&mut self, location: &str) -> Result<Arc<ResolvedRoute>> {
        let resolved = self.resolve_location(location)?;
        let href = self.base.apply(&resolved.full_path());
        self.history.replace(&href);
        info!("Replaced location with {} (route {})", href, resolved.name());
        Ok(self.state.commit(NavigationKind::Replace, resolved))
    }

    /// Navigate to a named route
    pub fn navigate_named(&mut self, name: &str, params: &RouteParams) -> Result<Arc<ResolvedRoute>> {
        let path = self.url_for(name, params)?;
        self.navigate(&path)
    }

    /// Build the application path of a named route
    pub fn url_for(&self, name: &str, params: &RouteParams) -> Result<String> {
        self.table.url_for(name, params)
    }

    /// Build the full href (base path included) of a named route
    pub fn href_for(&self, name: &str, params: &RouteParams) -> Result<String> {
        Ok(self.base.apply(&self.url_for(name, params)?))
    }

    /// Move through the host history and re-resolve the recorded location.
    ///
    /// Returns `Ok(None)` when the move is out of range. If the recorded
    /// location no longer resolves the history move is undone.
    pub fn go(&mut self, delta: isize) -> Result<Option<Arc<ResolvedRoute>>> {
        let Some(href) = self.history.go(delta) else {
            debug!("History go({}) out of range", delta);
            return Ok(None);
        };

        match resolve_href(&self.table, &self.base, &href) {
            Ok(resolved) => {
                info!("Traversed history to {} (route {})", href, resolved.name());
                Ok(Some(self.state.commit(NavigationKind::Traverse, resolved)))
            }
            Err(e) => {
                self.history.go(-delta);
                Err(e)
            }
        }
    }

    pub fn back(&mut self) -> Result<Option<Arc<ResolvedRoute>>> {
        self.go(-1)
    }

    pub fn forward(&mut self) -> Result<Option<Arc<ResolvedRoute>>> {
        self.go(1)
    }

    /// Get the current route
    pub fn current(&self) -> Arc<ResolvedRoute> {
        self.state.current()
    }

    /// Subscribe to the current route (for the view layer)
    pub fn subscribe(&self) -> watch::Receiver<Arc<ResolvedRoute>> {
        self.state.subscribe()
    }

    /// Subscribe to navigation events
    pub fn events(&self) -> broadcast::Receiver<NavigationEvent> {
        self.state.events()
    }

    /// Get the route table
    pub fn routes(&self) -> &RouteTable {
        &self.table
    }

    pub fn base(&self) -> &BasePath {
        &self.base
    }

    pub fn history(&self) -> &H {
        &self.history
    }
}

fn resolve_location(table: &RouteTable, location: &str) -> Result<ResolvedRoute> {
    let location = Location::parse(location);
    Ok(table
        .resolve(&location.path)?
        .with_location(location.query, location.hash))
}

fn resolve_href(table: &RouteTable, base: &BasePath, href: &str) -> Result<ResolvedRoute> {
    resolve_location(table, base.strip(href))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::MemoryHistory;
    use crate::RouterError;
    use router_api::RouteSpec;

    fn router_at(href: &str) -> Router<MemoryHistory> {
        Router::start(&RouterConfig::default(), MemoryHistory::new(href)).unwrap()
    }

    fn room(id: &str) -> RouteParams {
        let mut params = RouteParams::new();
        params.insert("roomId".to_string(), id.to_string());
        params
    }

    #[test]
    fn test_start_resolves_initial_location() {
        let router = router_at("/room/9");
        assert_eq!(router.current().name(), "room");
        assert_eq!(router.current().param("roomId"), Some("9"));
        assert_eq!(router.history().len(), 1);
    }

    #[test]
    fn test_start_with_unknown_location_fails() {
        let result = Router::start(&RouterConfig::default(), MemoryHistory::new("/nowhere"));
        assert!(matches!(result, Err(RouterError::NotFound(_))));
    }

    #[test]
    fn test_start_with_invalid_table_fails() {
        let mut config = RouterConfig::default();
        config.routes.push(RouteSpec::new("/other", "home", "OtherView"));
        let result = Router::start(&config, MemoryHistory::new("/"));
        assert!(matches!(result, Err(RouterError::Configuration(_))));
    }

    #[test]
    fn test_navigate_updates_state_and_history() {
        let mut router = router_at("/");
        let resolved = router.navigate("/room/42").unwrap();
        assert_eq!(resolved.name(), "room");
        assert_eq!(router.current(), resolved);
        assert_eq!(router.history().len(), 2);
        assert_eq!(router.history().location(), "/room/42");
    }

    #[test]
    fn test_navigate_to_same_location_still_pushes() {
        let mut router = router_at("/");
        router.navigate("/").unwrap();
        assert_eq!(router.history().len(), 2);
    }

    #[test]
    fn test_navigate_not_found_leaves_state_unchanged() {
        let mut router = router_at("/room/1");
        let before = router.current();

        for location in ["/unknown", "/room/a/b"] {
            let err = router.navigate(location).unwrap_err();
            assert!(err.is_not_found());
        }

        assert_eq!(router.current(), before);
        assert_eq!(router.history().len(), 1);
        assert_eq!(router.history().location(), "/room/1");
    }

    #[test]
    fn test_navigate_with_query_and_hash() {
        let mut router = router_at("/");
        let resolved = router.navigate("/room/42?tab=files#msg-7").unwrap();
        assert_eq!(resolved.param("roomId"), Some("42"));
        assert_eq!(resolved.query().get("tab").map(String::as_str), Some("files"));
        assert_eq!(resolved.hash(), Some("msg-7"));
        assert_eq!(router.history().location(), "/room/42?tab=files#msg-7");
        // query values are not props
        assert_eq!(resolved.mount().props, room("42"));
    }

    #[test]
    fn test_replace_overwrites_entry() {
        let mut router = router_at("/");
        router.navigate("/room/1").unwrap();
        router.replace("/room/2").unwrap();
        assert_eq!(router.history().len(), 2);
        assert_eq!(router.history().location(), "/room/2");
        assert_eq!(router.current().param("roomId"), Some("2"));
    }

    #[test]
    fn test_navigate_named() {
        let mut router = router_at("/");
        let resolved = router.navigate_named("room", &room("42")).unwrap();
        assert_eq!(resolved.params(), &room("42"));
        assert!(matches!(
            router.navigate_named("lobby", &RouteParams::new()),
            Err(RouterError::UnknownRoute(_))
        ));
        assert_eq!(router.history().len(), 2);
    }

    #[test]
    fn test_back_and_forward() {
        let mut router = router_at("/");
        router.navigate("/room/1").unwrap();
        router.navigate("/room/2").unwrap();

        let back = router.back().unwrap().unwrap();
        assert_eq!(back.param("roomId"), Some("1"));
        let back = router.back().unwrap().unwrap();
        assert_eq!(back.name(), "home");
        assert!(router.back().unwrap().is_none());
        assert_eq!(router.current().name(), "home");

        let forward = router.forward().unwrap().unwrap();
        assert_eq!(forward.param("roomId"), Some("1"));
        assert_eq!(router.history().len(), 3);
    }

    #[test]
    fn test_unresolvable_history_entry_is_reverted() {
        let mut history = MemoryHistory::new("/");
        history.push("/bogus");
        history.go(-1);
        let mut router = Router::start(&RouterConfig::default(), history).unwrap();
        let before = router.current();

        let err = router.forward().unwrap_err();
        assert_eq!(err, RouterError::NotFound("/bogus".to_string()));
        assert_eq!(router.history().position(), 0);
        assert_eq!(router.history().location(), "/");
        assert_eq!(router.current(), before);

        let err = router.replace("/bogus").unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(router.history().len(), 2);
        assert_eq!(router.history().position(), 0);
        assert_eq!(router.history().location(), "/");
        assert_eq!(router.current(), before);
    }

    #[test]
    fn test_base_path_is_case_insensitive() {
        let config = RouterConfig::default().with_base("/App");
        let router = Router::start(&config, MemoryHistory::new("/app/room/1")).unwrap();
        assert_eq!(router.current().param("roomId"), Some("1"));
    }

    #[test]
    fn test_base_path() {
        let config = RouterConfig::default().with_base("/app/");
        let mut router = Router::start(&config, MemoryHistory::new("/app/room/5")).unwrap();
        assert_eq!(router.current().param("roomId"), Some("5"));

        router.navigate("/room/6").unwrap();
        assert_eq!(router.history().location(), "/app/room/6");
        assert_eq!(router.href_for("room", &room("7")).unwrap(), "/app/room/7");
        assert_eq!(router.url_for("room", &room("7")).unwrap(), "/room/7");

        router.back().unwrap();
        assert_eq!(router.current().param("roomId"), Some("5"));
    }

    #[test]
    fn test_base_path_root_href() {
        let config = RouterConfig::default().with_base("/app");
        let router = Router::start(&config, MemoryHistory::new("/app")).unwrap();
        assert_eq!(router.current().name(), "home");
    }

    #[test]
    fn test_url_for_round_trip() {
        let router = router_at("/");
        let path = router.url_for("room", &room("42")).unwrap();
        assert_eq!(router.resolve(&path).unwrap().params(), &room("42"));
    }

    #[tokio::test]
    async fn test_subscribers_receive_navigation() {
        let mut router = router_at("/");
        let mut current = router.subscribe();
        let mut events = router.events();

        router.navigate("/room/42").unwrap();

        current.changed().await.unwrap();
        let mounted = current.borrow_and_update().mount();
        assert_eq!(mounted.view.as_str(), "RoomView");
        assert_eq!(mounted.props, room("42"));

        let event = events.recv().await.unwrap();
        assert_eq!(event.kind, NavigationKind::Push);
        assert_eq!(event.from.name(), "home");
        assert_eq!(event.to.name(), "room");
    }

    #[tokio::test]
    async fn test_failed_navigation_emits_nothing() {
        let mut router = router_at("/");
        let current = router.subscribe();
        let mut events = router.events();

        assert!(router.navigate("/unknown").is_err());

        assert!(!current.has_changed().unwrap());
        assert!(matches!(
            events.try_recv(),
            Err(broadcast::error::TryRecvError::Empty)
        ));
    }

    #[tokio::test]
    async fn test_traverse_event() {
        let mut router = router_at("/");
        router.navigate("/room/3").unwrap();
        let mut events = router.events();

        router.back().unwrap();

        let event = events.recv().await.unwrap();
        assert_eq!(event.kind, NavigationKind::Traverse);
        assert_eq!(event.from.param("roomId"), Some("3"));
        assert_eq!(event.to.name(), "home");
    }
}
