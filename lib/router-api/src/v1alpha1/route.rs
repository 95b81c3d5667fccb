use serde::{Deserialize, Serialize};

/// RouteSpec maps a URL path pattern to a view of the application
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSpec {
    /// Path pattern to match (e.g., "/room/:roomId")
    pub path: String,

    /// Unique name of this route (used for named navigation)
    pub name: String,

    /// View to mount when this route is active
    pub view: String,

    /// Forward path parameters to the view as props
    #[serde(default)]
    pub props: bool,
}

impl RouteSpec {
    pub fn new(path: impl Into<String>, name: impl Into<String>, view: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            view: view.into(),
            props: false,
        }
    }

    /// Enable forwarding of path parameters as view props
    pub fn with_props(mut self) -> Self {
        self.props = true;
        self
    }
}
