//! Reverse proxying to a fixed upstream origin.
//!
//! # Responsibilities
//! - Rewrite the inbound request's URI and Host to the origin
//! - Forward method and body untouched (body streamed, never buffered)
//! - Relay the origin's status, headers, and body back verbatim
//! - Answer transport failures with a 502 carrying the error text
//!
//! # Design Decisions
//! - One origin call per inbound request; no retries
//! - Header cloning is count-based: a name with exactly one value is
//!   inserted (overwriting), a name with several values has each appended,
//!   so multi-value headers like Set-Cookie are never collapsed

use axum::body::Body;
use axum::http::uri::PathAndQuery;
use axum::http::{header, HeaderMap, HeaderValue, Request, Response, StatusCode, Uri};
use hyper::body::Incoming;
use hyper_util::client::legacy::{connect::HttpConnector, Client};

use crate::routing::ProxyTarget;

/// Pooled outbound HTTP client, shared by all proxy routes.
pub type HttpClient = Client<HttpConnector, Body>;

/// Forward `request` to `target` and relay the origin's response.
pub async fn forward(
    client: &HttpClient,
    target: &ProxyTarget,
    mut request: Request<Body>,
) -> Response<Body> {
    let origin_uri = match rewrite_uri(request.uri(), target) {
        Ok(uri) => uri,
        Err(err) => {
            // Unreachable with a validated target, but never panic for it.
            tracing::error!(origin = %target, error = %err, "Failed to build origin URI");
            return error_response(StatusCode::BAD_GATEWAY, &err.to_string());
        }
    };
    *request.uri_mut() = origin_uri;

    // The Host header must name the origin, not this server.
    if let Ok(host) = HeaderValue::from_str(target.authority.as_str()) {
        request.headers_mut().insert(header::HOST, host);
    }

    match client.request(request).await {
        Ok(origin_response) => relay(origin_response),
        Err(err) => {
            tracing::error!(origin = %target, error = %err, "Origin request failed");
            error_response(StatusCode::BAD_GATEWAY, &err.to_string())
        }
    }
}

/// Swap scheme and authority for the origin's, keeping path and query.
fn rewrite_uri(
    inbound: &Uri,
    target: &ProxyTarget,
) -> Result<Uri, axum::http::uri::InvalidUriParts> {
    let mut parts = inbound.clone().into_parts();
    parts.scheme = Some(target.scheme.clone());
    parts.authority = Some(target.authority.clone());
    if parts.path_and_query.is_none() {
        parts.path_and_query = Some(PathAndQuery::from_static("/"));
    }
    Uri::from_parts(parts)
}

/// Turn the origin response into the outbound one: status and body stream
/// carried over as-is, headers cloned under the count-based policy.
fn relay(origin_response: hyper::Response<Incoming>) -> Response<Body> {
    let (parts, body) = origin_response.into_parts();
    let mut response = Response::new(Body::new(body));
    *response.status_mut() = parts.status;
    clone_headers(&parts.headers, response.headers_mut());
    response
}

/// Count-based header cloning: single value → insert, multiple → append each.
pub fn clone_headers(origin: &HeaderMap, outbound: &mut HeaderMap) {
    for name in origin.keys() {
        let mut values = origin.get_all(name).iter();
        let Some(first) = values.next() else { continue };
        if values.next().is_none() {
            outbound.insert(name.clone(), first.clone());
        } else {
            for value in origin.get_all(name) {
                outbound.append(name.clone(), value.clone());
            }
        }
    }
}

fn error_response(status: StatusCode, message: &str) -> Response<Body> {
    let mut response = Response::new(Body::from(message.to_string()));
    *response.status_mut() = status;
    response
}
