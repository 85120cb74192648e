//! Route table compiled from handler definitions at refresh

use std::collections::BTreeMap;
use std::fmt;

use mvc_env::Method;

use crate::{Error, Result};

/// A path pattern segment: static text or a `{name}` variable
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteSegment {
    Static(String),
    Variable(String),
}

/// A parsed path pattern such as `/people/{id}/albums`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    raw: String,
    segments: Vec<RouteSegment>,
}

impl RoutePattern {
    pub fn parse(pattern: &str) -> Result<Self> {
        let segments = pattern
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(|segment| match segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                Some("") => Err(Error::resolution(
                    pattern,
                    "path variables must have a name",
                )),
                Some(name) => Ok(RouteSegment::Variable(name.to_string())),
                None => Ok(RouteSegment::Static(segment.to_string())),
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            raw: pattern.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[RouteSegment] {
        &self.segments
    }

    /// Match a request path, returning captured variables.
    pub fn matches(&self, path: &str) -> Option<BTreeMap<String, String>> {
        let parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut variables = BTreeMap::new();
        for (part, segment) in parts.iter().zip(&self.segments) {
            match segment {
                RouteSegment::Static(expected) => {
                    if part != expected {
                        return None;
                    }
                }
                RouteSegment::Variable(name) => {
                    variables.insert(name.clone(), part.to_string());
                }
            }
        }
        Some(variables)
    }

    /// Number of static segments; more static segments is more specific.
    fn specificity(&self) -> usize {
        self.segments
            .iter()
            .filter(|segment| matches!(segment, RouteSegment::Static(_)))
            .count()
    }

    /// Two patterns claim the same paths when they only differ in variable names.
    fn same_shape(&self, other: &Self) -> bool {
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|pair| match pair {
                    (RouteSegment::Static(a), RouteSegment::Static(b)) => a == b,
                    (RouteSegment::Variable(_), RouteSegment::Variable(_)) => true,
                    _ => false,
                })
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[derive(Debug, Clone)]
struct Route {
    method: Option<Method>,
    pattern: RoutePattern,
    definition_name: String,
}

/// Result of a successful route lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub definition_name: String,
    pub pattern: String,
    pub variables: BTreeMap<String, String>,
}

/// Handler routes of an active context.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a route. A second route with the same method and pattern shape
    /// is a resolution error.
    pub fn insert(&mut self, method: Option<Method>, pattern: &str, definition_name: &str) -> Result<()> {
        let pattern = RoutePattern::parse(pattern)?;

        if let Some(existing) = self
            .routes
            .iter()
            .find(|route| route.method == method && route.pattern.same_shape(&pattern))
        {
            return Err(Error::resolution(
                definition_name,
                format!(
                    "ambiguous mapping: {} {} is already mapped to '{}'",
                    method.map_or("*", |m| m.as_str()),
                    pattern,
                    existing.definition_name
                ),
            ));
        }

        tracing::debug!(
            method = method.map_or("*", |m| m.as_str()),
            pattern = %pattern,
            handler = definition_name,
            "Mapped route"
        );
        self.routes.push(Route {
            method,
            pattern,
            definition_name: definition_name.to_string(),
        });
        Ok(())
    }

    /// Find the best route for a request.
    ///
    /// Among matching routes the one with the most static segments wins, then
    /// a route bound to the exact method beats a method-agnostic one, then
    /// registration order.
    pub fn resolve(&self, method: Method, path: &str) -> Option<RouteMatch> {
        let mut best: Option<(&Route, BTreeMap<String, String>, (usize, bool))> = None;

        for route in &self.routes {
            if route.method.is_some_and(|m| m != method) {
                continue;
            }
            let Some(variables) = route.pattern.matches(path) else {
                continue;
            };
            let rank = (route.pattern.specificity(), route.method.is_some());
            if best.as_ref().is_none_or(|(_, _, best_rank)| rank > *best_rank) {
                best = Some((route, variables, rank));
            }
        }

        best.map(|(route, variables, _)| RouteMatch {
            definition_name: route.definition_name.clone(),
            pattern: route.pattern.as_str().to_string(),
            variables,
        })
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
