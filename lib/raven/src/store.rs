//! Entry point handing out request builders over a shared transport.

use crate::{
    AttachmentRequests, Connection, ConnectionSettings, DatabaseRequests, HttpTransport,
    QueryRequest, Result,
};

/// Client for one server (and optionally one database on it).
///
/// Cloning is cheap when the transport is: [`HttpTransport`] shares its connection pool.
///
/// # Example
///
/// ```ignore
/// use raven::{ConnectionSettings, RavenClient};
///
/// let client = RavenClient::connect(ConnectionSettings::from_env()?);
/// client.databases().ensure_exists("Northwind").await?;
/// let orders: serde_json::Value = client
///     .query()
///     .collection("Orders")?
///     .take(10)
///     .results()
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct RavenClient<C = HttpTransport> {
    connection: Connection<C>,
}

impl RavenClient<HttpTransport> {
    /// Client over a default [`HttpTransport`].
    #[must_use]
    pub fn connect(settings: ConnectionSettings) -> Self {
        Self::new(HttpTransport::new(), settings)
    }

    /// Client configured from `RAVEN_HOST` / `RAVEN_DATABASE`.
    ///
    /// # Errors
    ///
    /// Fails when `RAVEN_HOST` is unset or invalid.
    pub fn from_env() -> Result<Self> {
        ConnectionSettings::from_env().map(Self::connect)
    }
}

impl<C> RavenClient<C> {
    /// Client over any transport.
    #[must_use]
    pub fn new(client: C, settings: ConnectionSettings) -> Self {
        Self {
            connection: Connection::new(client, settings),
        }
    }

    /// Settings in use.
    #[must_use]
    pub fn settings(&self) -> &ConnectionSettings {
        self.connection.settings()
    }
}

impl<C: Clone> RavenClient<C> {
    /// The same transport scoped to another database.
    #[must_use]
    pub fn with_database(&self, database: impl Into<String>) -> Self {
        Self::new(
            self.connection.client().clone(),
            self.settings().clone().with_database(database),
        )
    }

    /// A dynamic query.
    #[must_use]
    pub fn query(&self) -> QueryRequest<C> {
        QueryRequest::dynamic(self.connection.clone())
    }

    /// A query against index `name`.
    #[must_use]
    pub fn query_index(&self, name: impl Into<String>) -> QueryRequest<C> {
        QueryRequest::index(name, self.connection.clone())
    }

    /// Server-level database administration.
    #[must_use]
    pub fn databases(&self) -> DatabaseRequests<C> {
        DatabaseRequests::new(self.connection.clone())
    }

    /// Attachments of the selected database.
    #[must_use]
    pub fn attachments(&self) -> AttachmentRequests<C> {
        AttachmentRequests::new(self.connection.clone())
    }
}

#[cfg(test)]
mod tests {
    use assert2::check;

    use super::*;

    #[test]
    fn databases_drop_the_database_scope() {
        let settings = ConnectionSettings::new("http://localhost:8080")
            .expect("settings")
            .with_database("Northwind");
        let client = RavenClient::new((), settings);

        check!(client.settings().database() == Some("Northwind"));
        check!(client.databases().connection().settings().database() == None);
    }

    #[test]
    fn with_database_rescopes() {
        let settings = ConnectionSettings::new("http://localhost:8080").expect("settings");
        let client = RavenClient::new((), settings).with_database("Orders");

        check!(client.settings().database() == Some("Orders"));
    }

    #[test]
    fn query_index_targets_index() {
        let settings = ConnectionSettings::new("http://localhost:8080").expect("settings");
        let query = RavenClient::new((), settings).query_index("Orders/Totals");

        check!(query.compile().expect("compile").path() == "indexes/Orders/Totals");
    }
}
