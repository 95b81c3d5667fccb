//! Datum Router API types for client-side navigation
//!
//! This library defines the declarative configuration consumed by the router:
//! - RouteSpec: a single path pattern mapped to a view
//! - RouterConfig: the route table plus base path and matching options

pub mod v1alpha1;

pub use v1alpha1::{RouteSpec, RouterConfig};
