//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the edge
//! server. All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the edge server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServeConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Static site root and mount prefix.
    pub static_site: StaticSiteConfig,

    /// Reverse-proxy route definitions, checked in order of prefix length.
    pub proxies: Vec<ProxyRouteConfig>,

    /// Redirect configuration for the reserved `/redirect` prefix.
    pub redirects: RedirectConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8090").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8090".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 15 }
    }
}

/// Static site configuration: which directory to serve, and at which prefix.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StaticSiteConfig {
    /// Filesystem directory holding the site (and its `index.html` fallback).
    pub path: String,

    /// URL prefix the site is mounted at. Stripped before file lookup.
    pub url: String,
}

impl Default for StaticSiteConfig {
    fn default() -> Self {
        Self {
            path: "./public".to_string(),
            url: "/".to_string(),
        }
    }
}

/// A single reverse-proxy route: requests under `path` go to origin `url`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProxyRouteConfig {
    /// URL path prefix to match (e.g., "/api/").
    pub path: String,

    /// Absolute origin URL to forward to (e.g., "http://localhost:3000").
    pub url: String,
}

/// Redirect configuration.
///
/// An empty `redirect_uri` means the reserved prefix is not registered at all.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RedirectConfig {
    /// Target URI for the fixed redirect route.
    pub redirect_uri: String,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
