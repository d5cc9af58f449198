//! Database administration: existence, creation, removal, listing.
//!
//! These endpoints live at the server root, so a [`DatabaseRequests`] never carries a
//! database segment, whatever the connection it was built from.

use serde::Serialize;
use tracing::debug;

use crate::records::{DATA_DIR_SETTING, DATABASE_DOCUMENT_PREFIX};
use crate::{Connection, DatabaseInfo, Error, HttpClient, Result, StatusCode, encode_segment};

/// Path of the database listing.
const LISTING_PATH: &str = "databases";

/// Database-level requests.
#[derive(Debug, Clone)]
pub struct DatabaseRequests<C> {
    connection: Connection<C>,
}

#[derive(Serialize)]
struct DatabaseDocument {
    #[serde(rename = "Settings")]
    settings: std::collections::BTreeMap<&'static str, String>,
}

impl DatabaseDocument {
    fn for_database(name: &str) -> Self {
        Self {
            settings: [(DATA_DIR_SETTING, format!("~/Tenants/{name}"))]
                .into_iter()
                .collect(),
        }
    }
}

fn document_path(name: &str) -> Result<String> {
    let name = encode_segment(name, "database name")?;
    Ok(format!("docs/{DATABASE_DOCUMENT_PREFIX}/{name}"))
}

impl<C> DatabaseRequests<C> {
    /// Database requests over `connection`, with its database scope stripped.
    #[must_use]
    pub fn new(connection: Connection<C>) -> Self {
        Self {
            connection: connection.without_database(),
        }
    }

    /// The (server-level) connection in use.
    #[must_use]
    pub fn connection(&self) -> &Connection<C> {
        &self.connection
    }
}

impl<C: HttpClient> DatabaseRequests<C> {
    /// Whether database `name` exists: 200 means yes, 404 means no.
    ///
    /// # Errors
    ///
    /// Fails on an empty name, a transport failure, or any other status.
    pub async fn exists(&self, name: &str) -> Result<bool> {
        let path = document_path(name)?;
        let response = self.connection.send_get(&path).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(false);
        }
        response.expect_status(StatusCode::OK.as_u16(), "failed to check database existence")?;
        Ok(true)
    }

    /// Create database `name`, refusing if it already exists.
    ///
    /// The existence check completes before the PUT is considered; when the database is
    /// there, no write is issued.
    ///
    /// # Errors
    ///
    /// [`Error::AlreadyExists`] when the database exists, otherwise any error of
    /// [`DatabaseRequests::exists`] or a non-201 answer to the PUT.
    pub async fn create(&self, name: &str) -> Result<()> {
        let path = document_path(name)?;
        if self.exists(name).await? {
            return Err(Error::already_exists(name));
        }
        self.put_document(name, &path).await
    }

    /// Delete database `name`; 204 is the only success.
    ///
    /// # Errors
    ///
    /// Fails on an empty name, a transport failure, or any other status.
    pub async fn remove(&self, name: &str) -> Result<()> {
        let path = document_path(name)?;
        self.connection
            .send_delete(&path)
            .await?
            .expect_status(StatusCode::NO_CONTENT.as_u16(), "failed to delete database")?;
        Ok(())
    }

    /// Create database `name` unless it exists. Calling it again is a no-op.
    ///
    /// # Errors
    ///
    /// Any error of [`DatabaseRequests::exists`], or a non-201 answer to the PUT.
    pub async fn ensure_exists(&self, name: &str) -> Result<()> {
        let path = document_path(name)?;
        if self.exists(name).await? {
            debug!(database = name, "database already exists, skipping create");
            return Ok(());
        }
        self.put_document(name, &path).await
    }

    /// List the databases of the server.
    ///
    /// # Errors
    ///
    /// Fails on a transport failure, a non-200 status (no partial results), or a body that
    /// is not a list of database documents.
    pub async fn list(&self) -> Result<Vec<DatabaseInfo>> {
        let response = self
            .connection
            .send_get(LISTING_PATH)
            .await?
            .expect_status(StatusCode::OK.as_u16(), "failed to list databases")?;
        raven_core::parse_database_list(response.body())
    }

    async fn put_document(&self, name: &str, path: &str) -> Result<()> {
        debug!(database = name, "creating database");
        let request = self
            .connection
            .request(crate::Method::Put, path)?
            .json(&DatabaseDocument::for_database(name))?
            .build();
        self.connection
            .execute(request)
            .await?
            .expect_status(StatusCode::CREATED.as_u16(), "failed to create database")?;
        Ok(())
    }
}
