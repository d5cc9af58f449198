//! Prelude module for convenient imports.
//!
//! ```ignore
//! use raven::prelude::*;
//! ```

pub use crate::{
    Attachment, ConnectionSettings, DatabaseInfo, Error, HttpClient, HttpTransport, QueryRequest,
    QueryResult, RavenClient, Result, SaveAttachment, SelectField,
};

pub use serde::{Deserialize, Serialize};
