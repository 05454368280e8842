use serde::Serialize;
use std::{collections::BTreeMap, fmt};
use thiserror::Error;
use tracing::*;

use crate::views::ViewProvider;

/// Declarative description of a navigable entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RouteSpec {
    pub path: &'static str,
    pub name: &'static str,
    pub lazy: bool,
    pub props: bool,
}

/// The application's routes, matched in declaration order.
pub const ROUTE_TABLE: &[RouteSpec] = &[
    RouteSpec {
        path: "/",
        name: "Home",
        lazy: true,
        props: false,
    },
    RouteSpec {
        path: "/player",
        name: "PlayerList",
        lazy: false,
        props: false,
    },
    RouteSpec {
        path: "/player/:name",
        name: "PlayerDetail",
        lazy: false,
        props: true,
    },
    RouteSpec {
        path: "/match",
        name: "MatchList",
        lazy: false,
        props: false,
    },
    RouteSpec {
        path: "/match/:match_id",
        name: "MatchDetail",
        lazy: true,
        props: false,
    },
    RouteSpec {
        path: "/team",
        name: "TeamList",
        lazy: true,
        props: false,
    },
    RouteSpec {
        path: "/team/:team_name",
        name: "TeamDetail",
        lazy: true,
        props: true,
    },
    RouteSpec {
        path: "/hero",
        name: "HeroList",
        lazy: true,
        props: false,
    },
    RouteSpec {
        path: "/hero/:hero_name",
        name: "HeroDetail",
        lazy: true,
        props: true,
    },
];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    #[error("Duplicate route name '{0}'")]
    DuplicateName(String),
    #[error("Invalid route pattern '{path}': {reason}")]
    InvalidPattern { path: String, reason: String },
    #[error("Unknown route '{0}'")]
    UnknownRoute(String),
    #[error("Route '{route}' requires parameter '{param}'")]
    MissingParam { route: String, param: String },
}

/// Decoded values of a route's dynamic segments, keyed by parameter name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Params(BTreeMap<String, String>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: &str, value: &str) {
        self.0.insert(name.to_owned(), value.to_owned());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(|v| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Static(String),
    Param(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PathPattern {
    segments: Vec<Segment>,
}

impl PathPattern {
    fn parse(path: &str) -> Result<Self, RouteError> {
        let invalid = |reason: &str| RouteError::InvalidPattern {
            path: path.to_owned(),
            reason: reason.to_owned(),
        };

        let Some(rest) = path.strip_prefix('/') else {
            return Err(invalid("must start with '/'"));
        };

        let mut segments = Vec::new();
        if rest.is_empty() {
            return Ok(Self { segments });
        }

        for part in rest.split('/') {
            match part.strip_prefix(':') {
                _ if part.is_empty() => return Err(invalid("empty segment")),
                Some("") => return Err(invalid("empty parameter name")),
                Some(name) => {
                    let taken = segments
                        .iter()
                        .any(|s| matches!(s, Segment::Param(existing) if existing == name));
                    if taken {
                        return Err(invalid("duplicate parameter name"));
                    }
                    segments.push(Segment::Param(name.to_owned()));
                }
                None => segments.push(Segment::Static(part.to_owned())),
            }
        }

        Ok(Self { segments })
    }

    fn matches(&self, path: &str) -> Option<Params> {
        let parts = split_path(path)?;
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = Params::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Static(expected) => {
                    if !expected.eq_ignore_ascii_case(part) {
                        return None;
                    }
                }
                Segment::Param(name) => params.insert(name, &decode_segment(part)),
            }
        }

        Some(params)
    }

    /// Builds a concrete path, or returns the name of the first missing parameter.
    fn render<'p>(&'p self, params: &Params) -> Result<String, &'p str> {
        if self.segments.is_empty() {
            return Ok("/".to_owned());
        }

        let mut path = String::new();
        for segment in &self.segments {
            path.push('/');
            match segment {
                Segment::Static(value) => path.push_str(value),
                Segment::Param(name) => match params.get(name) {
                    Some(value) if !value.is_empty() => path.push_str(&urlencoding::encode(value)),
                    _ => return Err(name.as_str()),
                },
            }
        }

        Ok(path)
    }
}

fn strip_location(location: &str) -> &str {
    match location.find(|c: char| c == '?' || c == '#') {
        Some(i) => &location[..i],
        None => location,
    }
}

fn split_path(path: &str) -> Option<Vec<&str>> {
    let rest = path.strip_prefix('/')?;
    let mut parts: Vec<&str> = rest.split('/').collect();
    // One trailing slash is tolerated.
    if parts.last() == Some(&"") {
        parts.pop();
    }
    if parts.iter().any(|p| p.is_empty()) {
        return None;
    }
    Some(parts)
}

fn decode_segment(part: &str) -> String {
    match urlencoding::decode(part) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => {
            warn!(segment = part, "undecodable path segment, keeping raw");
            part.to_owned()
        }
    }
}

pub struct Route<V> {
    spec: RouteSpec,
    pattern: PathPattern,
    view: ViewProvider<V>,
}

impl<V> Route<V> {
    pub fn name(&self) -> &'static str {
        self.spec.name
    }

    pub fn spec(&self) -> &RouteSpec {
        &self.spec
    }

    pub fn view(&self) -> &ViewProvider<V> {
        &self.view
    }

    pub fn forwards_props(&self) -> bool {
        self.spec.props
    }
}

impl<V> fmt::Debug for Route<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("name", &self.spec.name)
            .field("path", &self.spec.path)
            .field("lazy", &self.view.is_lazy())
            .field("props", &self.spec.props)
            .finish()
    }
}

/// A route selected for a location along with its extracted parameters.
#[derive(Debug)]
pub struct Matched<'a, V> {
    route: &'a Route<V>,
    params: Params,
}

impl<'a, V> Matched<'a, V> {
    pub fn route(&self) -> &'a Route<V> {
        self.route
    }

    pub fn name(&self) -> &'static str {
        self.route.name()
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Parameters forwarded to the view as inputs, only for routes that ask for them.
    pub fn props(&self) -> Option<&Params> {
        if self.route.forwards_props() {
            Some(&self.params)
        } else {
            None
        }
    }

    pub fn into_params(self) -> Params {
        self.params
    }
}

#[derive(Debug)]
pub struct Router<V> {
    routes: Vec<Route<V>>,
}

impl<V> Router<V> {
    pub fn build<F>(table: &[RouteSpec], mut bind: F) -> Result<Self, RouteError>
    where
        F: FnMut(&RouteSpec) -> ViewProvider<V>,
    {
        let mut routes: Vec<Route<V>> = Vec::with_capacity(table.len());

        for spec in table {
            if routes.iter().any(|r| r.name() == spec.name) {
                return Err(RouteError::DuplicateName(spec.name.to_owned()));
            }

            let pattern = PathPattern::parse(spec.path)?;
            let view = bind(spec);

            routes.push(Route {
                spec: *spec,
                pattern,
                view,
            });
        }

        debug!(routes = routes.len(), "router ready");

        Ok(Self { routes })
    }

    pub fn routes(&self) -> &[Route<V>] {
        &self.routes
    }

    pub fn find(&self, name: &str) -> Option<&Route<V>> {
        self.routes.iter().find(|r| r.name() == name)
    }

    /// First route, in declaration order, whose pattern matches the location.
    pub fn resolve(&self, location: &str) -> Option<Matched<'_, V>> {
        let path = strip_location(location);

        let matched = self.routes.iter().find_map(|route| {
            route
                .pattern
                .matches(path)
                .map(|params| Matched { route, params })
        });

        match &matched {
            Some(m) => trace!(path, route = m.name(), "resolved"),
            None => debug!(path, "no matching route"),
        }

        matched
    }

    pub fn href(&self, name: &str, params: &Params) -> Result<String, RouteError> {
        let route = self
            .find(name)
            .ok_or_else(|| RouteError::UnknownRoute(name.to_owned()))?;

        route
            .pattern
            .render(params)
            .map_err(|param| RouteError::MissingParam {
                route: name.to_owned(),
                param: param.to_owned(),
            })
    }
}
