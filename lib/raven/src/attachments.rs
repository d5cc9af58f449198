//! Attachments: opaque blobs stored under `static/<key>`.

use std::collections::HashMap;

use bytes::Bytes;

use crate::{Connection, ContentType, HttpClient, Method, Result, StatusCode, encode_path};

const CONTENT_TYPE: &str = "content-type";

/// Response headers that are transport noise rather than attachment metadata.
const TRANSPORT_HEADERS: &[&str] = &[
    "content-length",
    "connection",
    "date",
    "server",
    "transfer-encoding",
];

/// An attachment as read back from the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// Raw content.
    pub data: Bytes,
    /// Metadata headers returned with the content (lower-cased names).
    pub metadata: HashMap<String, String>,
}

/// What to store under a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveAttachment {
    buffer: Bytes,
    metadata: HashMap<String, String>,
}

impl SaveAttachment {
    /// Content to upload; may be empty.
    #[must_use]
    pub fn new(buffer: impl Into<Bytes>) -> Self {
        Self {
            buffer: buffer.into(),
            metadata: HashMap::new(),
        }
    }

    /// Attach a metadata header, sent along with the content.
    ///
    /// Names are case-insensitive; a `content-type` entry replaces the default
    /// `application/octet-stream`.
    #[must_use]
    pub fn with_metadata(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.metadata
            .insert(name.as_ref().to_ascii_lowercase(), value.into());
        self
    }

    /// Content to upload.
    #[must_use]
    pub fn buffer(&self) -> &Bytes {
        &self.buffer
    }

    fn into_parts(self) -> (HashMap<String, String>, Bytes) {
        let mut headers = HashMap::from([(
            CONTENT_TYPE.to_string(),
            ContentType::OctetStream.as_str().to_string(),
        )]);
        headers.extend(self.metadata);
        (headers, self.buffer)
    }
}

fn attachment_path(key: &str) -> Result<String> {
    let key = encode_path(key, "attachment key")?;
    Ok(format!("static/{key}"))
}

/// Attachment requests of one database.
#[derive(Debug, Clone)]
pub struct AttachmentRequests<C> {
    connection: Connection<C>,
}

impl<C> AttachmentRequests<C> {
    /// Attachment requests over `connection`.
    #[must_use]
    pub fn new(connection: Connection<C>) -> Self {
        Self { connection }
    }
}

impl<C: HttpClient> AttachmentRequests<C> {
    /// Fetch the attachment stored under `key`; 200 is the only success.
    ///
    /// # Errors
    ///
    /// Fails on an empty key, a transport failure, or any other status (404 included).
    pub async fn get(&self, key: &str) -> Result<Attachment> {
        let path = attachment_path(key)?;
        let response = self
            .connection
            .send_get(&path)
            .await?
            .expect_status(StatusCode::OK.as_u16(), "failed to get attachment")?;

        let (_, headers, data) = response.into_parts();
        let metadata = headers
            .into_iter()
            .filter(|(name, _)| !TRANSPORT_HEADERS.contains(&name.to_lowercase().as_str()))
            .collect();
        Ok(Attachment { data, metadata })
    }

    /// Store `attachment` under `key`; 201 is the only success.
    ///
    /// # Errors
    ///
    /// Fails on an empty key, a transport failure, or any other status.
    pub async fn save(&self, key: &str, attachment: SaveAttachment) -> Result<()> {
        let path = attachment_path(key)?;
        let (headers, buffer) = attachment.into_parts();
        let request = self
            .connection
            .request(Method::Put, &path)?
            .headers(headers)
            .body(buffer)
            .build();

        self.connection
            .execute(request)
            .await?
            .expect_status(StatusCode::CREATED.as_u16(), "failed to save attachment")?;
        Ok(())
    }

    /// Delete the attachment stored under `key`; 204 is the only success.
    ///
    /// # Errors
    ///
    /// Fails on an empty key, a transport failure, or any other status.
    pub async fn remove(&self, key: &str) -> Result<()> {
        let path = attachment_path(key)?;
        self.connection
            .send_delete(&path)
            .await?
            .expect_status(StatusCode::NO_CONTENT.as_u16(), "failed to delete attachment")?;
        Ok(())
    }
}
