//! Core types for the raven document-database REST client.
//!
//! This crate holds everything that does not touch the network:
//! - [`Method`], [`Request`], [`RequestBuilder`], [`Response`] - HTTP exchange types
//! - [`Error`] and [`Result`] - error handling
//! - [`HttpClient`] - the transport trait
//! - [`ConnectionSettings`] - host and optional database
//! - [`encode_segment`] and [`encode_path`] - escaping of names inside request paths
//! - [`QueryState`] and [`CompiledQuery`] - the query compiler
//! - [`DatabaseInfo`] - normalized database listing records
//!
//! The `raven` crate builds the request types on top of these.

mod body;
mod client;
mod error;
mod method;
mod path;
pub mod prelude;
pub mod query;
pub mod records;
mod request;
mod response;
mod settings;

pub use body::{ContentType, from_json, to_json, to_query_string};
pub use client::HttpClient;
pub use error::{Error, Result};
pub use method::Method;
pub use path::{encode_path, encode_segment};
pub use query::{CompiledQuery, QueryState, SelectField};
pub use records::{DatabaseInfo, DatabaseRecord, DocumentMetadata, parse_database_list};
pub use request::{Request, RequestBuilder};
pub use response::Response;
pub use settings::{ConnectionSettings, DATABASE_ENV, HOST_ENV};

// Re-export http crate types for status codes
pub use http::StatusCode;
