//! HTTP verbs used against the REST surface.

use derive_more::Display;

/// HTTP request method.
///
/// Only the verbs the database endpoints answer to are modelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Method {
    /// Read a document, attachment, listing or query result.
    #[display("GET")]
    Get,
    /// Create or replace a document or attachment.
    #[display("PUT")]
    Put,
    /// Remove a document or attachment.
    #[display("DELETE")]
    Delete,
    /// Commands and batch endpoints.
    #[display("POST")]
    Post,
}

impl From<Method> for http::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => Self::GET,
            Method::Put => Self::PUT,
            Method::Delete => Self::DELETE,
            Method::Post => Self::POST,
        }
    }
}
