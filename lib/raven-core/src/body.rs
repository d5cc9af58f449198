//! Body and query-string serialization utilities.

use bytes::Bytes;

use crate::Result;

/// Content type for request bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    /// JSON documents (`application/json`).
    Json,
    /// Opaque attachment payloads (`application/octet-stream`).
    OctetStream,
}

impl ContentType {
    /// Get the MIME type string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::OctetStream => "application/octet-stream",
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Serialize a value to JSON bytes.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn to_json<T: serde::Serialize>(value: &T) -> Result<Bytes> {
    serde_json::to_vec(value)
        .map(Bytes::from)
        .map_err(Into::into)
}

/// Serialize a value to a query string.
///
/// Sequences become repeated keys (`fetch=a&fetch=b`), and fields skipped by serde are
/// omitted entirely.
///
/// # Errors
///
/// Returns an error if query serialization fails.
///
/// # Example
///
/// ```
/// use raven_core::to_query_string;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Paging {
///     #[serde(skip_serializing_if = "Option::is_none")]
///     start: Option<u32>,
///     #[serde(rename = "pageSize")]
///     page_size: u32,
/// }
///
/// let query = to_query_string(&Paging { start: None, page_size: 25 }).expect("serialize");
/// assert_eq!(query, "pageSize=25");
/// ```
pub fn to_query_string<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_html_form::to_string(value).map_err(Into::into)
}

/// Deserialize JSON bytes to a value with path-aware error messages.
///
/// # Errors
///
/// Returns an error if JSON deserialization fails; the message names the path of the
/// offending field (e.g. `Results[2].Name`).
pub fn from_json<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
        crate::Error::json_deserialization(e.path().to_string(), e.inner().to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_display() {
        assert_eq!(ContentType::Json.to_string(), "application/json");
        assert_eq!(
            ContentType::OctetStream.to_string(),
            "application/octet-stream"
        );
    }

    #[test]
    fn query_string_repeats_sequences() {
        #[derive(serde::Serialize)]
        struct Projection {
            fetch: Vec<String>,
        }

        let projection = Projection {
            fetch: vec!["Name".to_string(), "Age".to_string()],
        };

        let query = to_query_string(&projection).expect("serialize");
        assert_eq!(query, "fetch=Name&fetch=Age");
    }

    #[test]
    fn from_json_reports_path() {
        #[derive(Debug, serde::Deserialize)]
        struct Row {
            #[allow(dead_code)]
            #[serde(rename = "Name")]
            name: String,
        }

        #[derive(Debug, serde::Deserialize)]
        struct Page {
            #[allow(dead_code)]
            #[serde(rename = "Results")]
            results: Vec<Row>,
        }

        let bytes = br#"{"Results":[{"Name":"a"},{"Name":3}]}"#;
        let err = from_json::<Page>(bytes).expect_err("should fail");
        let msg = err.to_string();
        assert!(msg.contains("Results[1].Name"), "missing path in: {msg}");
    }

    #[test]
    fn from_json_syntax_error() {
        let err = from_json::<serde_json::Value>(b"not json").expect_err("should fail");
        assert!(err.to_string().contains("JSON deserialization error"));
    }
}
