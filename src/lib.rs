//! Single-port HTTP edge server: static SPA hosting with index-fallback,
//! reverse proxying by path prefix, and a fixed redirect route.

pub mod config;
pub mod http;
pub mod observability;
pub mod routing;
pub mod spa;

pub use config::ServeConfig;
pub use http::EdgeServer;
