//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Compilation (at startup):
//!     ServeConfig
//!     → parse proxy origins (fail fast on malformed URLs)
//!     → collect {Proxy, Redirect, Static} bindings
//!     → sort by prefix length, longest first
//!     → freeze as immutable RouteTable
//!
//! Per request:
//!     request path → table.resolve() → matched Route (or None → 404)
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - Longest prefix wins, independent of registration order
//! - No regex in the hot path (prefix matching only)
//! - Explicit no-match rather than a silent default

pub mod table;

pub use table::{ProxyTarget, Route, RouteKind, RouteTable, TargetParseError, REDIRECT_PREFIX};
