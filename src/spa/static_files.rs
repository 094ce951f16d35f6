//! Static file serving into a response sink.
//!
//! The handler never decides about fallbacks itself: a missing file becomes
//! a plain 404 written to the sink, and the interceptor wrapping that sink
//! decides what the client actually sees.

use std::io;
use std::path::{Component, Path, PathBuf};

use axum::http::{header, HeaderValue, StatusCode};
use percent_encoding::percent_decode_str;
use tokio::fs;

use crate::spa::interceptor::ResponseSink;

/// Fixed name of the fallback document under the static root.
pub const FALLBACK_FILE: &str = "index.html";

const NOT_FOUND_BODY: &[u8] = b"404 page not found";

/// Serve the file at `request_path` (already prefix-stripped) from `root`.
///
/// The path arrives percent-encoded off the wire and is decoded before any
/// other handling, so encoded traversal sequences face the same sanitization
/// as literal ones. Directory paths fall back to their own `index.html`.
/// IO errors other than a missing file surface as a 500 so they are never
/// masked by fallback substitution.
pub async fn serve<S: ResponseSink>(
    root: &Path,
    request_path: &str,
    sink: &mut S,
) -> io::Result<()> {
    let Ok(decoded) = percent_decode_str(request_path).decode_utf8() else {
        tracing::warn!(path = %request_path, "Rejected path with invalid percent-encoding");
        return respond_not_found(sink);
    };

    let Some(relative) = sanitize(&decoded) else {
        tracing::warn!(path = %request_path, "Rejected path with traversal components");
        return respond_not_found(sink);
    };

    let mut file_path = root.join(&relative);
    if relative.as_os_str().is_empty() || is_dir(&file_path).await {
        file_path.push(FALLBACK_FILE);
    }

    match fs::read(&file_path).await {
        Ok(contents) => {
            let content_type = mime_guess::from_path(&file_path).first_or_octet_stream();
            if let Ok(value) = HeaderValue::from_str(content_type.as_ref()) {
                sink.insert_header(header::CONTENT_TYPE, value);
            }
            sink.write_status(StatusCode::OK);
            sink.write_body(&contents)?;
            Ok(())
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => respond_not_found(sink),
        Err(err) => {
            tracing::error!(
                path = %file_path.display(),
                error = %err,
                "Failed to read static file"
            );
            sink.write_status(StatusCode::INTERNAL_SERVER_ERROR);
            sink.write_body(err.to_string().as_bytes())?;
            Ok(())
        }
    }
}

fn respond_not_found<S: ResponseSink>(sink: &mut S) -> io::Result<()> {
    sink.write_status(StatusCode::NOT_FOUND);
    sink.write_body(NOT_FOUND_BODY)?;
    Ok(())
}

/// Normalize a request path into a relative filesystem path.
///
/// Returns `None` when the path steps outside the root (`..`, absolute
/// components). `.` segments are dropped.
fn sanitize(request_path: &str) -> Option<PathBuf> {
    let trimmed = request_path.trim_start_matches('/');
    let mut clean = PathBuf::new();
    for component in Path::new(trimmed).components() {
        match component {
            Component::Normal(segment) => clean.push(segment),
            Component::CurDir => {}
            _ => return None,
        }
    }
    Some(clean)
}

async fn is_dir(path: &Path) -> bool {
    fs::metadata(path)
        .await
        .map(|meta| meta.is_dir())
        .unwrap_or(false)
}
