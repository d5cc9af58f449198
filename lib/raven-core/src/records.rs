//! Database listing records.
//!
//! The server lists databases as raw documents:
//!
//! ```json
//! {
//!   "@metadata": { "@id": "Raven/Databases/Northwind", "@etag": "0000-000-001" },
//!   "Last-Modified": "2012-06-16T04:12:35.9130000",
//!   "Settings": { "Raven/DataDir": "~/Tenants/Northwind" }
//! }
//! ```
//!
//! [`DatabaseRecord`] mirrors that shape and [`DatabaseInfo`] is its normalized form.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::Result;

/// Document id prefix of database documents.
pub const DATABASE_DOCUMENT_PREFIX: &str = "Raven/Databases";

/// Settings key holding the data directory of a database.
pub const DATA_DIR_SETTING: &str = "Raven/DataDir";

/// Raw database document as returned by the listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DatabaseRecord {
    /// Document metadata.
    #[serde(rename = "@metadata")]
    pub metadata: DocumentMetadata,
    /// Last modification timestamp, as sent by the server.
    #[serde(rename = "Last-Modified", default)]
    pub last_modified: Option<String>,
    /// Database settings.
    #[serde(rename = "Settings", default)]
    pub settings: HashMap<String, String>,
}

/// The `@metadata` block of a document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DocumentMetadata {
    /// Full document id.
    #[serde(rename = "@id")]
    pub id: String,
    /// Document etag.
    #[serde(rename = "@etag", default)]
    pub etag: Option<String>,
}

/// A database, as listed by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseInfo {
    /// Full document id, e.g. `Raven/Databases/Northwind`.
    pub id: String,
    /// Database name: the last segment of the id.
    pub name: String,
    /// Last modification timestamp.
    pub last_modified: Option<String>,
    /// Data directory from the database settings.
    pub data_directory: Option<String>,
    /// Document etag.
    pub etag: Option<String>,
}

impl From<DatabaseRecord> for DatabaseInfo {
    fn from(record: DatabaseRecord) -> Self {
        let DatabaseRecord {
            metadata,
            last_modified,
            mut settings,
        } = record;
        let name = metadata
            .id
            .rsplit_once('/')
            .map_or(metadata.id.as_str(), |(_, name)| name)
            .to_string();

        Self {
            id: metadata.id,
            name,
            last_modified,
            data_directory: settings.remove(DATA_DIR_SETTING),
            etag: metadata.etag,
        }
    }
}

/// Parse a listing body (a JSON array of database documents).
///
/// # Errors
///
/// Returns an error if the body is not an array of database documents.
pub fn parse_database_list(body: &[u8]) -> Result<Vec<DatabaseInfo>> {
    let records: Vec<DatabaseRecord> = crate::from_json(body)?;
    Ok(records.into_iter().map(DatabaseInfo::from).collect())
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};

    use super::*;

    const LISTING: &str = r#"[
        {
            "@metadata": { "@id": "Raven/Databases/abc", "@etag": "0000-000-001" },
            "Last-Modified": "2012-06-16T04:12:35.9130000",
            "Settings": { "Raven/DataDir": "~/Tennants/Test" }
        },
        {
            "@metadata": { "@id": "Raven/Databases/def", "@etag": "0000-000-002" },
            "Last-Modified": "2012-06-16T04:12:35.9130000",
            "Settings": { "Raven/DataDir": "~/Tennants/Def" }
        }
    ]"#;

    #[test]
    fn parses_listing() {
        let databases = parse_database_list(LISTING.as_bytes()).expect("parse");

        check!(databases.len() == 2);
        let_assert!([abc, def] = databases.as_slice());
        check!(abc.id == "Raven/Databases/abc");
        check!(abc.name == "abc");
        check!(abc.last_modified.as_deref() == Some("2012-06-16T04:12:35.9130000"));
        check!(abc.data_directory.as_deref() == Some("~/Tennants/Test"));
        check!(abc.etag.as_deref() == Some("0000-000-001"));
        check!(def.name == "def");
        check!(def.data_directory.as_deref() == Some("~/Tennants/Def"));
    }

    #[test]
    fn tolerates_missing_optional_fields() {
        let body = br#"[{ "@metadata": { "@id": "System" } }]"#;
        let databases = parse_database_list(body).expect("parse");

        let_assert!([system] = databases.as_slice());
        check!(system.name == "System");
        check!(system.last_modified == None);
        check!(system.data_directory == None);
    }

    #[test]
    fn rejects_non_array() {
        let_assert!(Err(err) = parse_database_list(br#"{"Results":[]}"#));
        check!(err.to_string().contains("JSON deserialization error"));
    }
}
