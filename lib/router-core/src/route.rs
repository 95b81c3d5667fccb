//! Route definitions and resolved routes

use crate::location::{self, Query};
use crate::pattern::{RouteParams, RoutePattern};
use crate::view::{MountedView, Props, ViewId};
use std::sync::Arc;

/// One validated entry of the route table. Immutable once registered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteDefinition {
    pub(crate) name: String,
    pub(crate) pattern: RoutePattern,
    pub(crate) view: ViewId,
    pub(crate) pass_params_as_props: bool,
}

impl RouteDefinition {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pattern(&self) -> &RoutePattern {
        &self.pattern
    }

    pub fn view(&self) -> &ViewId {
        &self.view
    }

    pub fn pass_params_as_props(&self) -> bool {
        self.pass_params_as_props
    }
}

/// The route matched for a concrete location plus the extracted values
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedRoute {
    definition: Arc<RouteDefinition>,
    path: String,
    params: RouteParams,
    query: Query,
    hash: Option<String>,
}

impl ResolvedRoute {
    pub(crate) fn new(definition: Arc<RouteDefinition>, path: &str, params: RouteParams) -> Self {
        Self {
            definition,
            path: path.to_string(),
            params,
            query: Query::new(),
            hash: None,
        }
    }

    pub(crate) fn with_location(mut self, query: Query, hash: Option<String>) -> Self {
        self.query = query;
        self.hash = hash;
        self
    }

    pub fn definition(&self) -> &Arc<RouteDefinition> {
        &self.definition
    }

    pub fn name(&self) -> &str {
        &self.definition.name
    }

    pub fn view(&self) -> &ViewId {
        &self.definition.view
    }

    /// The matched path, relative to the base path
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn params(&self) -> &RouteParams {
        &self.params
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn hash(&self) -> Option<&str> {
        self.hash.as_deref()
    }

    /// Path with query and hash, relative to the base path
    pub fn full_path(&self) -> String {
        location::full_path(&self.path, &self.query, self.hash.as_deref())
    }

    /// The view to mount and the props it receives. Params are only
    /// forwarded when the route enables props passing.
    pub fn mount(&self) -> MountedView {
        let props: Props = if self.definition.pass_params_as_props {
            self.params.clone()
        } else {
            Props::new()
        };

        MountedView {
            view: self.definition.view.clone(),
            props,
        }
    }
}
