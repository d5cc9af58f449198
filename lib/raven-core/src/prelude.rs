//! Prelude module for convenient imports.
//!
//! ```ignore
//! use raven_core::prelude::*;
//! ```

pub use crate::{
    CompiledQuery, ConnectionSettings, ContentType, DatabaseInfo, Error, HttpClient, Method,
    QueryState, Request, RequestBuilder, Response, Result, SelectField, from_json, to_json,
};
