//! Core client-side routing functionality
//!
//! This library provides:
//! - Route table registration and validation
//! - Path matching with named dynamic segments
//! - Navigation with host history synchronisation
//! - Current-route subscription for the view layer

pub mod registry;
pub mod pattern;
pub mod route;
pub mod location;
pub mod history;
pub mod state;
pub mod router;
pub mod view;
pub mod error;

pub use registry::RouteTable;
pub use pattern::{MatchOptions, RouteParams, RoutePattern};
pub use route::{ResolvedRoute, RouteDefinition};
pub use location::{BasePath, Location, Query};
pub use history::{History, HistoryEntry, MemoryHistory};
pub use state::{NavigationEvent, NavigationKind, NavigationState};
pub use router::Router;
pub use view::{MountedView, Props, ViewId};
pub use error::{Result, RouterError};
