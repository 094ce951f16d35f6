//! Observability subsystem.
//!
//! # Design Decisions
//! - Structured logging via `tracing`
//! - Level comes from config, overridable with `RUST_LOG`
//! - No metrics endpoint; logs are the observable surface

pub mod logging;
