//! Current route state and change notification

use crate::route::ResolvedRoute;
use std::sync::Arc;
use tokio::sync::{broadcast, watch};

const EVENT_CAPACITY: usize = 64;

/// How a navigation reached its target
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavigationKind {
    /// A new history entry was pushed
    Push,
    /// The current history entry was overwritten
    Replace,
    /// The host moved through existing entries (back/forward)
    Traverse,
}

/// Emitted after every successful navigation
#[derive(Clone, Debug)]
pub struct NavigationEvent {
    pub kind: NavigationKind,
    pub from: Arc<ResolvedRoute>,
    pub to: Arc<ResolvedRoute>,
}

/// NavigationState holds the current resolved route and publishes changes.
///
/// The current route is exposed through a `watch` channel so the view layer
/// can always read the latest value; transitions are broadcast as
/// [`NavigationEvent`]s.
pub struct NavigationState {
    current: watch::Sender<Arc<ResolvedRoute>>,
    events: broadcast::Sender<NavigationEvent>,
}

impl NavigationState {
    /// Create the state, initialized to the route of the initial location
    pub fn new(initial: ResolvedRoute) -> Self {
        let (current, _) = watch::channel(Arc::new(initial));
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self { current, events }
    }

    /// Get the current route
    pub fn current(&self) -> Arc<ResolvedRoute> {
        self.current.borrow().clone()
    }

    /// Subscribe to the current route
    pub fn subscribe(&self) -> watch::Receiver<Arc<ResolvedRoute>> {
        self.current.subscribe()
    }

    /// Subscribe to navigation events
    pub fn events(&self) -> broadcast::Receiver<NavigationEvent> {
        self.events.subscribe()
    }

    /// Get the number of active route subscribers
    pub fn subscriber_count(&self) -> usize {
        self.current.receiver_count()
    }

    /// Make `to` the current route and notify subscribers
    pub(crate) fn commit(&self, kind: NavigationKind, to: ResolvedRoute) -> Arc<ResolvedRoute> {
        let to = Arc::new(to);
        let from = self.current.send_replace(to.clone());
        let _ = self.events.send(NavigationEvent {
            kind,
            from,
            to: to.clone(),
        });
        to
    }
}
