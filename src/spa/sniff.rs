//! Content-type sniffing for the fallback document.
//!
//! The fallback file has a fixed name but not a guaranteed content: a built
//! SPA ships an HTML shell, but nothing stops a deployment from pointing the
//! root at something else. The type is decided from the leading bytes, the
//! way general-purpose servers sniff unidentified content.

const MAX_SNIFF: usize = 512;

/// Detect a content type from the first bytes of `data`.
pub fn detect(data: &[u8]) -> &'static str {
    let data = &data[..data.len().min(MAX_SNIFF)];
    let trimmed = trim_leading_whitespace(data);

    for tag in [
        "<!DOCTYPE HTML",
        "<HTML",
        "<HEAD",
        "<SCRIPT",
        "<IFRAME",
        "<BODY",
        "<DIV",
        "<P",
        "<!--",
    ] {
        if starts_with_tag(trimmed, tag) {
            return "text/html; charset=utf-8";
        }
    }

    if data.starts_with(b"\x89PNG\r\n\x1a\n") {
        return "image/png";
    }
    if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
        return "image/gif";
    }
    if data.starts_with(b"\xff\xd8\xff") {
        return "image/jpeg";
    }
    if data.starts_with(b"%PDF-") {
        return "application/pdf";
    }

    if looks_textual(data) {
        "text/plain; charset=utf-8"
    } else {
        "application/octet-stream"
    }
}

fn trim_leading_whitespace(data: &[u8]) -> &[u8] {
    let start = data
        .iter()
        .position(|b| !matches!(b, b'\t' | b'\n' | b'\x0c' | b'\r' | b' '))
        .unwrap_or(data.len());
    &data[start..]
}

/// Case-insensitive tag match, requiring a tag-terminating byte after it.
fn starts_with_tag(data: &[u8], tag: &str) -> bool {
    let tag = tag.as_bytes();
    if data.len() < tag.len() + 1 {
        return false;
    }
    if !data[..tag.len()].eq_ignore_ascii_case(tag) {
        return false;
    }
    // Comments carry no terminator requirement.
    tag == b"<!--".as_slice()
        || matches!(data[tag.len()], b' ' | b'>' | b'\n' | b'\r' | b'\t')
}

fn looks_textual(data: &[u8]) -> bool {
    !data
        .iter()
        .any(|&b| b < 0x09 || ((0x0e..0x20).contains(&b) && b != 0x1b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_shell_is_html() {
        assert_eq!(
            detect(b"<!DOCTYPE html>\n<html><head></head></html>"),
            "text/html; charset=utf-8"
        );
        assert_eq!(
            detect(b"  \n\t<html lang=\"en\">"),
            "text/html; charset=utf-8"
        );
    }

    #[test]
    fn html_match_is_case_insensitive() {
        assert_eq!(detect(b"<HTML>"), "text/html; charset=utf-8");
    }

    #[test]
    fn plain_text_is_text() {
        assert_eq!(detect(b"hello, world\n"), "text/plain; charset=utf-8");
    }

    #[test]
    fn png_magic_is_png() {
        assert_eq!(detect(b"\x89PNG\r\n\x1a\nrest"), "image/png");
    }

    #[test]
    fn binary_garbage_is_octet_stream() {
        assert_eq!(detect(b"\x00\x01\x02\x03"), "application/octet-stream");
    }

    #[test]
    fn html_without_terminator_is_not_html() {
        // "<htmlish" must not match the "<html" tag.
        assert_eq!(detect(b"<htmlish text"), "text/plain; charset=utf-8");
    }
}
