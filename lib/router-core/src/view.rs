//! View mount targets
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Opaque identifier of a view supplied by the view layer
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewId(String);

impl ViewId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Input values handed to a mounted view
pub type Props = BTreeMap<String, String>;

/// What the view layer should mount for the current route
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MountedView {
    pub view: ViewId,
    pub props: Props,
}
