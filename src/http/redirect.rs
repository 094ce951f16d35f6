//! Fixed redirect route.

use axum::body::Body;
use axum::http::{header, HeaderValue, Response, StatusCode};

/// Build a 302 Found pointing at `target`, for any path under the reserved
/// prefix. The target was checked at config validation; an unusable value
/// here degrades to a bare 302 rather than panicking.
pub fn redirect_response(target: &str) -> Response<Body> {
    let mut response = Response::new(Body::empty());
    *response.status_mut() = StatusCode::FOUND;
    if let Ok(location) = HeaderValue::from_str(target) {
        response.headers_mut().insert(header::LOCATION, location);
    }
    response
}
