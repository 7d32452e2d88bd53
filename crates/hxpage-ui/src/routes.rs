//! Named routes and path reversal.
//!
//! Handlers and templates refer to routes by name and let [`Routes::reverse`]
//! produce the concrete path, so URL layouts can change in one place.

use std::collections::HashMap;
use std::fmt::Display;

use axum::Router;
use axum::routing::MethodRouter;
use tracing::warn;

/// Route name → path pattern registry.
///
/// Patterns use axum's syntax: `{param}` captures one segment and
/// `{*rest}` captures the remainder of the path.
#[derive(Debug, Clone, Default)]
pub struct Routes {
    patterns: HashMap<String, String>,
}

impl Routes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a pattern under `name`, returning the pattern it replaced.
    pub fn insert(&mut self, name: impl Into<String>, pattern: impl Into<String>) -> Option<String> {
        self.patterns.insert(name.into(), pattern.into())
    }

    pub fn pattern(&self, name: &str) -> Option<&str> {
        self.patterns.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Build the path for a named route.
    ///
    /// `params` fill the pattern's placeholders left to right, including ones
    /// that share a segment with literal text (`/files/{name}.json`). Extra
    /// params are ignored and placeholders without a param stay as written.
    /// Returns `None` when no route has that name.
    pub fn reverse(&self, name: &str, params: &[&dyn Display]) -> Option<String> {
        let pattern = self.patterns.get(name)?;
        Some(fill_pattern(pattern, params))
    }
}

fn fill_pattern(pattern: &str, params: &[&dyn Display]) -> String {
    let mut params = params.iter();
    let mut out = String::with_capacity(pattern.len());
    let mut rest = pattern;

    while let Some(start) = rest.find(['{', '}']) {
        out.push_str(&rest[..start]);
        rest = &rest[start..];

        // `{{` and `}}` are escaped literal braces.
        if rest.starts_with("{{") || rest.starts_with("}}") {
            out.push_str(&rest[..2]);
            rest = &rest[2..];
            continue;
        }
        if rest.starts_with('}') {
            out.push('}');
            rest = &rest[1..];
            continue;
        }

        let Some(end) = rest.find('}') else {
            break;
        };
        match params.next() {
            Some(param) => out.push_str(&param.to_string()),
            None => out.push_str(&rest[..=end]),
        }
        rest = &rest[end + 1..];
    }

    out.push_str(rest);
    out
}

/// An axum [`Router`] that records route names as routes are added.
pub struct NamedRouter<S = ()> {
    router: Router<S>,
    routes: Routes,
}

impl<S> NamedRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            router: Router::new(),
            routes: Routes::new(),
        }
    }

    /// Add a route and register its path under `name`.
    pub fn route(mut self, name: &str, path: &str, method_router: MethodRouter<S>) -> Self {
        if let Some(previous) = self.routes.insert(name, path) {
            warn!("Route name '{name}' re-registered ({previous} -> {path})");
        }
        self.router = self.router.route(path, method_router);
        self
    }

    /// Add a route that cannot be reversed.
    pub fn route_unnamed(mut self, path: &str, method_router: MethodRouter<S>) -> Self {
        self.router = self.router.route(path, method_router);
        self
    }

    pub fn routes(&self) -> &Routes {
        &self.routes
    }

    pub fn into_parts(self) -> (Router<S>, Routes) {
        (self.router, self.routes)
    }
}

impl<S> Default for NamedRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
