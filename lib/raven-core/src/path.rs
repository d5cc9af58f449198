//! Escaping of caller-supplied names inside request paths.
//!
//! Keys, names, index names, collections and the database all end up as path segments. Each
//! segment is percent-encoded so that `?`, `#`, `%` and `\` stay part of the name, and the
//! `.`/`..` segments a URL parser would resolve are refused.

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

use crate::{Error, Result};

/// Escaped inside a segment: controls, space, `" # < > ` ? { } / \ %`.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'?')
    .add(b'{')
    .add(b'}')
    .add(b'/')
    .add(b'\\')
    .add(b'%');

/// Encode `segment` as a single path segment; a `/` inside it is escaped.
///
/// `what` names the value in error messages (e.g. `"database name"`).
///
/// # Errors
///
/// [`Error::Validation`] when the segment is empty, `.` or `..`.
///
/// # Example
///
/// ```
/// use raven_core::encode_segment;
///
/// assert_eq!(encode_segment("report#1", "key")?, "report%231");
/// assert!(encode_segment("..", "key").is_err());
/// # Ok::<(), raven_core::Error>(())
/// ```
pub fn encode_segment(segment: &str, what: &str) -> Result<String> {
    match segment {
        "" => Err(Error::validation(format!("expected a {what}"))),
        "." | ".." => Err(Error::validation(format!(
            "'{segment}' is not a valid {what} segment"
        ))),
        _ => Ok(utf8_percent_encode(segment, PATH_SEGMENT).to_string()),
    }
}

/// Encode a `/`-separated path, segment by segment; the separators are kept.
///
/// # Errors
///
/// [`Error::Validation`] when the path is empty or any segment is empty, `.` or `..`.
pub fn encode_path(path: &str, what: &str) -> Result<String> {
    let segments = path
        .split('/')
        .map(|segment| encode_segment(segment, what))
        .collect::<Result<Vec<_>>>()?;
    Ok(segments.join("/"))
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};

    use super::*;

    #[test]
    fn plain_segment_is_unchanged() {
        check!(encode_segment("Northwind", "database name").expect("segment") == "Northwind");
        check!(encode_segment("v1.2-final_~", "key").expect("segment") == "v1.2-final_~");
    }

    #[test]
    fn reserved_characters_are_escaped() {
        check!(encode_segment("a?b#c", "key").expect("segment") == "a%3Fb%23c");
        check!(encode_segment("50%", "key").expect("segment") == "50%25");
        check!(encode_segment("a/b\\c", "key").expect("segment") == "a%2Fb%5Cc");
        check!(encode_segment("Full Name", "key").expect("segment") == "Full%20Name");
    }

    #[test]
    fn dot_segments_are_refused() {
        for segment in ["", ".", ".."] {
            let_assert!(Err(err) = encode_segment(segment, "key"));
            check!(err.is_validation());
        }
    }

    #[test]
    fn path_keeps_separators() {
        let encoded = encode_path("images/2026/logo #1.png", "attachment key").expect("path");
        check!(encoded == "images/2026/logo%20%231.png");
    }

    #[test]
    fn path_refuses_traversal_and_empty_segments() {
        for path in ["", "../../docs/Raven/Databases/Northwind", "a/./b", "a//b", "a/"] {
            let_assert!(Err(err) = encode_path(path, "attachment key"));
            check!(err.is_validation());
        }
    }
}
