//! Not-found interception over a streaming response sink.
//!
//! Client-side routers expect the server to answer any unknown path with the
//! SPA's `index.html` rather than a 404. The file handler underneath knows
//! nothing about that: it writes a 404 like any other response. This module
//! wraps the sink it writes into and defers status finalization until the
//! handler is done, so a 404 can still be turned into a 200 carrying the
//! fallback document. Mirrors the `try_files`-style behavior of common edge
//! servers.

use std::io;
use std::path::PathBuf;

use axum::body::Body;
use axum::http::{header, HeaderMap, HeaderName, HeaderValue, Response, StatusCode};

use crate::spa::sniff;
use crate::spa::static_files::FALLBACK_FILE;

/// A streaming response destination: status, headers, body bytes.
///
/// Header writes are map operations and may happen at any point before
/// finalization; the status write is final for implementors.
pub trait ResponseSink {
    fn write_status(&mut self, status: StatusCode);
    fn insert_header(&mut self, name: HeaderName, value: HeaderValue);
    fn write_body(&mut self, chunk: &[u8]) -> io::Result<usize>;
}

/// Sink that buffers into response parts, for handing to the transport.
#[derive(Debug, Default)]
pub struct BufferedResponse {
    status: Option<StatusCode>,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl BufferedResponse {
    pub fn new() -> Self {
        Self::default()
    }

    /// The status observed so far, if any.
    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Convert into a transport response. A sink that never saw a status
    /// defaults to 200, matching standard response-writer behavior.
    pub fn into_response(self) -> Response<Body> {
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = self.status.unwrap_or(StatusCode::OK);
        *response.headers_mut() = self.headers;
        response
    }
}

impl ResponseSink for BufferedResponse {
    fn write_status(&mut self, status: StatusCode) {
        // First write wins; the status is final once set.
        if self.status.is_none() {
            self.status = Some(status);
        }
    }

    fn insert_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers.insert(name, value);
    }

    fn write_body(&mut self, chunk: &[u8]) -> io::Result<usize> {
        self.body.extend_from_slice(chunk);
        Ok(chunk.len())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InterceptState {
    /// No status observed yet.
    Pending,
    /// Non-404 status forwarded; all writes go straight through.
    PassThrough,
    /// 404 suppressed; body writes discarded until substitution at finish.
    Substituting,
}

/// Wraps a [`ResponseSink`] and rewrites a 404 into the fallback document.
pub struct NotFoundInterceptor<S> {
    inner: S,
    static_root: PathBuf,
    state: InterceptState,
}

impl<S: ResponseSink> NotFoundInterceptor<S> {
    pub fn new(inner: S, static_root: impl Into<PathBuf>) -> Self {
        Self {
            inner,
            static_root: static_root.into(),
            state: InterceptState::Pending,
        }
    }

    /// Finalize the response.
    ///
    /// In the substituting state this reads `index.html` under the static
    /// root, writes a 200 with the sniffed content type, and the fallback
    /// bytes as the body. A read failure propagates without touching the
    /// inner sink: no status, no body.
    pub async fn finish(mut self) -> io::Result<S> {
        if self.state == InterceptState::Substituting {
            let fallback = self.static_root.join(FALLBACK_FILE);
            let contents = match tokio::fs::read(&fallback).await {
                Ok(contents) => contents,
                Err(err) => {
                    tracing::error!(
                        path = %fallback.display(),
                        error = %err,
                        "Failed to read fallback document"
                    );
                    return Err(err);
                }
            };

            self.inner.insert_header(
                header::CONTENT_TYPE,
                HeaderValue::from_static(sniff::detect(&contents)),
            );
            self.inner.write_status(StatusCode::OK);
            self.inner.write_body(&contents)?;
        }
        Ok(self.inner)
    }
}

impl<S: ResponseSink> ResponseSink for NotFoundInterceptor<S> {
    fn write_status(&mut self, status: StatusCode) {
        if self.state != InterceptState::Pending {
            return;
        }
        if status == StatusCode::NOT_FOUND {
            self.state = InterceptState::Substituting;
        } else {
            self.state = InterceptState::PassThrough;
            self.inner.write_status(status);
        }
    }

    fn insert_header(&mut self, name: HeaderName, value: HeaderValue) {
        // Map operations pass through; substitution overwrites content-type.
        self.inner.insert_header(name, value);
    }

    fn write_body(&mut self, chunk: &[u8]) -> io::Result<usize> {
        match self.state {
            InterceptState::Pending => {
                // Body bytes before any status imply a 200.
                self.state = InterceptState::PassThrough;
                self.inner.write_status(StatusCode::OK);
                self.inner.write_body(chunk)
            }
            InterceptState::PassThrough => self.inner.write_body(chunk),
            InterceptState::Substituting => Ok(chunk.len()),
        }
    }
}
