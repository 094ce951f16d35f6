//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, catch-all dispatch)
//!     → routing table resolves the handler
//!     → proxy.rs | redirect.rs | spa handlers produce the response
//!     → Send to client
//! ```

pub mod proxy;
pub mod redirect;
pub mod server;

pub use server::EdgeServer;
