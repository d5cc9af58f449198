//! Async client for a document database's HTTP REST surface.
//!
//! Build queries fluently, administer databases and store attachments over a pooled
//! hyper transport that composes with Tower middleware.
//!
//! # Example
//!
//! ```ignore
//! use raven::prelude::*;
//!
//! #[derive(Debug, Deserialize)]
//! #[serde(rename_all = "PascalCase")]
//! pub struct User {
//!     name: String,
//!     age: u32,
//! }
//!
//! let client = RavenClient::from_env()?;
//! client.databases().ensure_exists("Northwind").await?;
//!
//! let users: QueryResult<User> = client
//!     .with_database("Northwind")
//!     .query()
//!     .collection("Users")?
//!     .filter("Name", "Ayende")
//!     .take(10)
//!     .results()
//!     .await?;
//! ```

mod attachments;
mod config;
mod connection;
mod databases;
pub mod middleware;
pub mod prelude;
mod query;
mod store;
mod transport;

pub use attachments::{Attachment, AttachmentRequests, SaveAttachment};
pub use config::{
    DEFAULT_CONNECT_TIMEOUT, DEFAULT_TIMEOUT, TransportConfig, TransportConfigBuilder,
};
pub use connection::Connection;
pub use databases::DatabaseRequests;
pub use query::{QueryRequest, QueryResult};
pub use store::RavenClient;
pub use transport::{BoxedService, HttpTransport, HttpTransportBuilder, ServiceFuture};

// Re-export tower for middleware composition
pub use tower;

// Re-export core types
pub use raven_core::{
    CompiledQuery, ConnectionSettings, ContentType, DATABASE_ENV, DatabaseInfo, Error, HOST_ENV,
    HttpClient, Method, QueryState, Request, RequestBuilder, Response, Result, SelectField,
    StatusCode, encode_path, encode_segment, from_json, records, to_json,
};
