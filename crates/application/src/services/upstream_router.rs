//! Upstream route table
//!
//! Maps request paths to backend base URLs by longest-first declaration
//! order: the first declared prefix that matches wins, mirroring a
//! first-match proxy route table.

/// One backend behind the gateway
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendRoute {
    /// Path prefix served by this backend (`/users`)
    pub prefix: String,
    /// Base URL requests are forwarded to (`http://localhost:9001`)
    pub upstream_url: String,
}

impl BackendRoute {
    /// Create a route entry
    pub fn new(prefix: impl Into<String>, upstream_url: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            upstream_url: upstream_url.into(),
        }
    }
}

/// First-match prefix router over the configured backends
#[derive(Debug, Clone, Default)]
pub struct UpstreamRouter {
    routes: Vec<BackendRoute>,
}

impl UpstreamRouter {
    /// Build a router from backend routes, preserving declaration order
    pub fn new(routes: Vec<BackendRoute>) -> Self {
        Self { routes }
    }

    /// Resolve a request path to its backend, if any prefix matches
    pub fn resolve(&self, path: &str) -> Option<&BackendRoute> {
        self.routes
            .iter()
            .find(|route| path.starts_with(&route.prefix))
    }

    /// The configured routes in declaration order
    pub fn routes(&self) -> &[BackendRoute] {
        &self.routes
    }
}
