//! Static route table of the application.
//!
//! Routes are declared once at startup and matched in declaration order; the
//! first pattern that fits the requested path wins. A pattern is a sequence
//! of `/`-separated segments, where a segment starting with `:` captures the
//! corresponding path segment as a named parameter. Static segments match
//! regardless of ASCII case.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{RouteError, RouteResult};
use crate::request::NavigationRequest;

/// Names of the statically declared routes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RouteName {
    Home,
    License,
    Terms,
    Disclaimer,
    Marketplace,
    Solution,
    SolutionChatflow,
}

impl RouteName {
    pub const ALL: [RouteName; 7] = [
        RouteName::Home,
        RouteName::License,
        RouteName::Terms,
        RouteName::Disclaimer,
        RouteName::Marketplace,
        RouteName::Solution,
        RouteName::SolutionChatflow,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RouteName::Home => "Home",
            RouteName::License => "License",
            RouteName::Terms => "Terms",
            RouteName::Disclaimer => "Disclaimer",
            RouteName::Marketplace => "Marketplace",
            RouteName::Solution => "Solution",
            RouteName::SolutionChatflow => "SolutionChatflow",
        }
    }
}

impl core::fmt::Display for RouteName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for RouteName {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RouteName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| RouteError::unknown_name(s))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Static(String),
    Param(String),
}

/// One declared route: name, path pattern and display metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDef {
    name: RouteName,
    pattern: String,
    icon: &'static str,
    segments: Vec<Segment>,
}

impl RouteDef {
    pub fn new(name: RouteName, pattern: impl Into<String>, icon: &'static str) -> Self {
        let pattern = pattern.into();
        let segments = split_segments(&pattern)
            .map(|s| match s.strip_prefix(':') {
                Some(param) => Segment::Param(param.to_string()),
                None => Segment::Static(s.to_string()),
            })
            .collect();

        Self {
            name,
            pattern,
            icon,
            segments,
        }
    }

    pub fn name(&self) -> RouteName {
        self.name
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn icon(&self) -> &'static str {
        self.icon
    }

    /// Names of the parameters this route captures, in pattern order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(p) => Some(p.as_str()),
            Segment::Static(_) => None,
        })
    }

    /// Try to match a normalized list of path segments.
    ///
    /// Static segments compare ASCII case-insensitively; captured values keep
    /// their original case.
    fn capture(&self, parts: &[&str]) -> Option<BTreeMap<String, String>> {
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = BTreeMap::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Static(s) if s.eq_ignore_ascii_case(part) => {}
                Segment::Static(_) => return None,
                Segment::Param(name) => {
                    params.insert(name.clone(), (*part).to_string());
                }
            }
        }
        Some(params)
    }

    /// Build a concrete path from this route's pattern.
    fn fill(&self, params: &BTreeMap<String, String>) -> RouteResult<String> {
        if self.segments.is_empty() {
            return Ok("/".to_string());
        }

        let mut path = String::new();
        for segment in &self.segments {
            path.push('/');
            match segment {
                Segment::Static(s) => path.push_str(s),
                Segment::Param(name) => {
                    let value = params
                        .get(name)
                        .filter(|v| !v.is_empty() && !v.contains('/'))
                        .ok_or_else(|| {
                            RouteError::invalid_path(format!(
                                "route {} requires parameter '{}'",
                                self.name, name
                            ))
                        })?;
                    path.push_str(value);
                }
            }
        }
        Ok(path)
    }
}

/// The ordered set of routes known to the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    routes: Vec<RouteDef>,
}

impl RouteTable {
    pub fn new(routes: Vec<RouteDef>) -> Self {
        Self { routes }
    }

    /// The marketplace route table.
    ///
    /// `Solution` captures any single segment, so it must stay after every
    /// static single-segment route.
    pub fn standard() -> Self {
        Self::new(vec![
            RouteDef::new(RouteName::Home, "/", "mdi-apps"),
            RouteDef::new(RouteName::License, "/license", "mdi-apps"),
            RouteDef::new(RouteName::Terms, "/terms", "mdi-apps"),
            RouteDef::new(RouteName::Disclaimer, "/disclaimer", "mdi-apps"),
            RouteDef::new(RouteName::Marketplace, "/marketplace", "mdi-tune"),
            RouteDef::new(RouteName::Solution, "/:type", "mdi-apps"),
            RouteDef::new(RouteName::SolutionChatflow, "/solutions/:topic", "mdi-tune"),
        ])
    }

    pub fn routes(&self) -> &[RouteDef] {
        &self.routes
    }

    pub fn get(&self, name: RouteName) -> Option<&RouteDef> {
        self.routes.iter().find(|r| r.name == name)
    }

    /// Path of a parameterless route (e.g. the license page).
    pub fn path_of(&self, name: RouteName) -> RouteResult<String> {
        self.path_for(name, &BTreeMap::new())
    }

    /// Build the path of a named route from its parameters.
    pub fn path_for(&self, name: RouteName, params: &BTreeMap<String, String>) -> RouteResult<String> {
        self.get(name)
            .ok_or_else(|| RouteError::unknown_name(name.as_str()))?
            .fill(params)
    }

    /// Resolve a requested location into a navigation request.
    ///
    /// Query strings are ignored for matching and trailing slashes are
    /// tolerated. The request keeps the path without its query string.
    pub fn resolve(&self, location: &str) -> RouteResult<NavigationRequest> {
        let path = location.split(['?', '#']).next().unwrap_or_default();
        if !path.starts_with('/') {
            return Err(RouteError::invalid_path(format!(
                "'{}' is not an absolute path",
                location
            )));
        }

        let parts: Vec<&str> = split_segments(path).collect();
        for route in &self.routes {
            if let Some(params) = route.capture(&parts) {
                tracing::trace!(route = %route.name, path, "route matched");
                return Ok(NavigationRequest::new(route.name, path, params));
            }
        }

        Err(RouteError::no_match(path))
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::standard()
    }
}

fn split_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}
