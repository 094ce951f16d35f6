//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Origin URLs must be absolute and parseable (startup-fatal otherwise)
//! - Route prefixes must be well-formed and unambiguous
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: ServeConfig → Result<(), Vec<ValidationError>>
//! - Runs before the config is accepted into the system

use axum::http::HeaderValue;
use thiserror::Error;

use crate::config::schema::ServeConfig;
use crate::routing::ProxyTarget;
use crate::routing::REDIRECT_PREFIX;

/// A single semantic problem found in the configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("proxy route {path:?}: invalid origin URL {url:?}: {reason}")]
    InvalidOriginUrl {
        path: String,
        url: String,
        reason: String,
    },

    #[error("route prefix {0:?} must start with '/'")]
    BadPrefix(String),

    #[error("duplicate route prefix {0:?}")]
    DuplicatePrefix(String),

    #[error("redirect_uri {0:?} is not usable as a Location header value")]
    InvalidRedirectUri(String),
}

/// Check everything serde cannot.
pub fn validate_config(config: &ServeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let mut prefixes: Vec<&str> = Vec::new();

    for route in &config.proxies {
        if !route.path.starts_with('/') {
            errors.push(ValidationError::BadPrefix(route.path.clone()));
        }
        if let Err(err) = ProxyTarget::parse(&route.url) {
            errors.push(ValidationError::InvalidOriginUrl {
                path: route.path.clone(),
                url: route.url.clone(),
                reason: err.to_string(),
            });
        }
        prefixes.push(&route.path);
    }

    if !config.redirects.redirect_uri.is_empty() {
        if HeaderValue::from_str(&config.redirects.redirect_uri).is_err() {
            errors.push(ValidationError::InvalidRedirectUri(
                config.redirects.redirect_uri.clone(),
            ));
        }
        prefixes.push(REDIRECT_PREFIX);
    }

    if !config.static_site.url.starts_with('/') {
        errors.push(ValidationError::BadPrefix(config.static_site.url.clone()));
    }
    prefixes.push(&config.static_site.url);

    let mut seen: Vec<&str> = Vec::new();
    for prefix in prefixes {
        if seen.contains(&prefix) {
            errors.push(ValidationError::DuplicatePrefix(prefix.to_string()));
        } else {
            seen.push(prefix);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
