//! The transport seam.
//!
//! Everything above this trait builds [`Request`]s and interprets [`Response`]s; everything
//! below it moves bytes. `raven` ships a hyper-based implementation, and tests plug in
//! recording mocks.

use std::future::Future;

use bytes::Bytes;

use crate::{Request, Response, Result};

/// Core HTTP client trait.
///
/// Implementations perform exactly one exchange per call and must not retry: the status code
/// of whatever the server answered is handed back untouched, and only failures to obtain a
/// response at all become errors.
pub trait HttpClient: Send + Sync {
    /// Execute an HTTP request and return the response.
    ///
    /// # Errors
    ///
    /// Returns an error when no response was obtained (connection, TLS, timeout).
    fn execute(
        &self,
        request: Request<Bytes>,
    ) -> impl Future<Output = Result<Response<Bytes>>> + Send;
}

impl<T: HttpClient> HttpClient for &T {
    fn execute(
        &self,
        request: Request<Bytes>,
    ) -> impl Future<Output = Result<Response<Bytes>>> + Send {
        (**self).execute(request)
    }
}

impl<T: HttpClient> HttpClient for std::sync::Arc<T> {
    fn execute(
        &self,
        request: Request<Bytes>,
    ) -> impl Future<Output = Result<Response<Bytes>>> + Send {
        (**self).execute(request)
    }
}
