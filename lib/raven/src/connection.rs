//! Verb plumbing shared by every request type.

use bytes::Bytes;
use tracing::debug;

use crate::{ConnectionSettings, HttpClient, Method, Request, RequestBuilder, Response, Result};

/// A transport bound to [`ConnectionSettings`].
///
/// Each `send_*` call resolves a relative path against the host (and the database, when one
/// is selected), performs exactly one exchange and hands back the raw response: interpreting
/// the status is the caller's job. Transport errors are returned as they are.
#[derive(Debug, Clone)]
pub struct Connection<C> {
    client: C,
    settings: ConnectionSettings,
}

impl<C> Connection<C> {
    /// Bind a transport to settings.
    #[must_use]
    pub fn new(client: C, settings: ConnectionSettings) -> Self {
        Self { client, settings }
    }

    /// The settings requests resolve against.
    #[must_use]
    pub fn settings(&self) -> &ConnectionSettings {
        &self.settings
    }

    /// The underlying transport.
    #[must_use]
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Same transport, server-level settings.
    #[must_use]
    pub fn without_database(self) -> Self {
        Self {
            client: self.client,
            settings: self.settings.without_database(),
        }
    }

    /// Start a request for `path`, relative to the connection root.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidUrl`] if the composed URL does not parse.
    pub fn request(&self, method: Method, path: &str) -> Result<RequestBuilder<Bytes>> {
        let url = self.settings.url_for(path)?;
        Ok(Request::builder(method, url))
    }
}

impl<C: HttpClient> Connection<C> {
    /// Dispatch a prepared request.
    ///
    /// # Errors
    ///
    /// Returns the transport error, if any; the status is not inspected.
    pub async fn execute(&self, request: Request<Bytes>) -> Result<Response<Bytes>> {
        debug!(method = %request.method(), url = %request.url(), "dispatching");
        self.client.execute(request).await
    }

    /// GET `path`.
    ///
    /// # Errors
    ///
    /// Returns the transport error, if any; the status is not inspected.
    pub async fn send_get(&self, path: &str) -> Result<Response<Bytes>> {
        let request = self.request(Method::Get, path)?.build();
        self.execute(request).await
    }

    /// PUT `body` to `path`.
    ///
    /// # Errors
    ///
    /// Returns the transport error, if any; the status is not inspected.
    pub async fn send_put(&self, path: &str, body: Bytes) -> Result<Response<Bytes>> {
        let request = self.request(Method::Put, path)?.body(body).build();
        self.execute(request).await
    }

    /// DELETE `path`.
    ///
    /// # Errors
    ///
    /// Returns the transport error, if any; the status is not inspected.
    pub async fn send_delete(&self, path: &str) -> Result<Response<Bytes>> {
        let request = self.request(Method::Delete, path)?.build();
        self.execute(request).await
    }

    /// POST `body` to `path`.
    ///
    /// # Errors
    ///
    /// Returns the transport error, if any; the status is not inspected.
    pub async fn send_post(&self, path: &str, body: Bytes) -> Result<Response<Bytes>> {
        let request = self.request(Method::Post, path)?.body(body).build();
        self.execute(request).await
    }
}
