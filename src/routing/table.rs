//! Route table: path-prefix bindings resolved by longest-prefix match.

use std::fmt;
use std::path::PathBuf;

use axum::http::uri::{Authority, Scheme};
use thiserror::Error;

use crate::config::schema::ServeConfig;

/// Reserved prefix for the fixed redirect route.
pub const REDIRECT_PREFIX: &str = "/redirect";

/// Error type for origin URL parsing. Construction-time only; a malformed
/// origin never reaches the request path.
#[derive(Debug, Error)]
pub enum TargetParseError {
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("unsupported scheme {0:?} (expected http or https)")]
    UnsupportedScheme(String),

    #[error("origin URL has no host")]
    MissingHost,

    #[error("invalid authority: {0}")]
    Authority(#[from] axum::http::uri::InvalidUri),
}

/// A proxy origin, parsed once at startup.
#[derive(Debug, Clone)]
pub struct ProxyTarget {
    pub scheme: Scheme,
    pub authority: Authority,
}

impl ProxyTarget {
    /// Parse an absolute origin URL into its scheme and authority.
    pub fn parse(raw: &str) -> Result<Self, TargetParseError> {
        let parsed = url::Url::parse(raw)?;

        let scheme = match parsed.scheme() {
            "http" => Scheme::HTTP,
            "https" => Scheme::HTTPS,
            other => return Err(TargetParseError::UnsupportedScheme(other.to_string())),
        };

        let host = parsed.host_str().ok_or(TargetParseError::MissingHost)?;
        let authority: Authority = match parsed.port() {
            Some(port) => format!("{host}:{port}").parse()?,
            None => host.parse()?,
        };

        Ok(Self { scheme, authority })
    }
}

impl fmt::Display for ProxyTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.scheme, self.authority)
    }
}

/// The behavior bound to a matched prefix.
#[derive(Debug, Clone)]
pub enum RouteKind {
    /// Forward to a fixed upstream origin.
    Proxy(ProxyTarget),
    /// Issue a 302 to this target URI.
    Redirect(String),
    /// Serve files from this directory root.
    Static(PathBuf),
}

/// One path-prefix binding.
#[derive(Debug, Clone)]
pub struct Route {
    pub prefix: String,
    pub kind: RouteKind,
}

impl Route {
    /// Strip this route's prefix from a request path.
    ///
    /// Only meaningful for the static route, where files are resolved
    /// relative to the configured root rather than a subdirectory named
    /// after the prefix.
    pub fn strip_prefix<'a>(&self, path: &'a str) -> &'a str {
        path.strip_prefix(self.prefix.as_str()).unwrap_or(path)
    }
}

/// Immutable set of routes, checked longest prefix first.
#[derive(Debug, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    /// Compile the table from validated configuration.
    ///
    /// Origin URLs are parsed here; a malformed one is a startup error.
    /// Registration order is proxies, then the redirect (only when a target
    /// is configured), then the static route — but precedence comes from
    /// prefix length, not order.
    pub fn from_config(config: &ServeConfig) -> Result<Self, TargetParseError> {
        let mut routes = Vec::with_capacity(config.proxies.len() + 2);

        for proxy in &config.proxies {
            routes.push(Route {
                prefix: proxy.path.clone(),
                kind: RouteKind::Proxy(ProxyTarget::parse(&proxy.url)?),
            });
        }

        if !config.redirects.redirect_uri.is_empty() {
            routes.push(Route {
                prefix: REDIRECT_PREFIX.to_string(),
                kind: RouteKind::Redirect(config.redirects.redirect_uri.clone()),
            });
        }

        routes.push(Route {
            prefix: config.static_site.url.clone(),
            kind: RouteKind::Static(PathBuf::from(&config.static_site.path)),
        });

        // Stable sort: equal-length prefixes keep registration order.
        routes.sort_by(|a, b| b.prefix.len().cmp(&a.prefix.len()));

        Ok(Self { routes })
    }

    /// Resolve a request path to the most specific matching route.
    pub fn resolve(&self, path: &str) -> Option<&Route> {
        self.routes
            .iter()
            .find(|route| path.starts_with(route.prefix.as_str()))
    }

    /// All routes, longest prefix first.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }
}
