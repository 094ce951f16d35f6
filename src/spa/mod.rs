//! Static SPA serving with not-found interception.
//!
//! # Data Flow
//! ```text
//! prefix-stripped request path
//!     → static_files.rs (resolve under root, write status + bytes to sink)
//!     → interceptor.rs (404 suppressed, everything else passed through)
//!     → on 404: fallback index.html substituted at finalization
//!     → BufferedResponse → hyper response
//! ```
//!
//! # Design Decisions
//! - The interceptor is an explicit per-request state machine
//!   (Pending / PassThrough / Substituting), not implicit buffering
//! - The real sink's status is written at most once, after the final
//!   pass-through-vs-substitute decision
//! - A missing fallback document is an error surfaced to the dispatch layer,
//!   never a silent 404 or empty 200

pub mod interceptor;
pub mod sniff;
pub mod static_files;

pub use interceptor::{BufferedResponse, NotFoundInterceptor, ResponseSink};
pub use static_files::FALLBACK_FILE;
