use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::id::NavigationId;
use crate::route::RouteName;

/// One attempted route transition.
///
/// Created by the route table per attempt and owned by whoever runs the
/// guard for that attempt. Route parameters are opaque; only the target page
/// validates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationRequest {
    id: NavigationId,
    target_route_name: RouteName,
    target_path: String,
    route_params: BTreeMap<String, String>,
}

impl NavigationRequest {
    pub fn new(
        target_route_name: RouteName,
        target_path: impl Into<String>,
        route_params: BTreeMap<String, String>,
    ) -> Self {
        Self {
            id: NavigationId::new(),
            target_route_name,
            target_path: target_path.into(),
            route_params,
        }
    }

    pub fn with_id(mut self, id: NavigationId) -> Self {
        self.id = id;
        self
    }

    pub fn id(&self) -> NavigationId {
        self.id
    }

    pub fn target_route_name(&self) -> RouteName {
        self.target_route_name
    }

    pub fn target_path(&self) -> &str {
        &self.target_path
    }

    pub fn route_params(&self) -> &BTreeMap<String, String> {
        &self.route_params
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.route_params.get(name).map(String::as_str)
    }
}
