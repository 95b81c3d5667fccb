/// API version v1alpha1 for Datum Router configuration

pub mod route;
pub mod router_config;

pub use route::RouteSpec;
pub use router_config::RouterConfig;

/// API group for Datum Router resources
pub const API_GROUP: &str = "router.datum.net";
/// API version for Datum Router resources
pub const API_VERSION: &str = "v1alpha1";
