//! Connection settings: which server, and optionally which database on it.

use url::Url;

use crate::{Error, Result, encode_segment};

/// Environment variable holding the server URL.
pub const HOST_ENV: &str = "RAVEN_HOST";

/// Environment variable holding the default database name.
pub const DATABASE_ENV: &str = "RAVEN_DATABASE";

/// Where requests go.
///
/// Relative request paths resolve against the host root, or against
/// `databases/<database>/` when a database is set.
///
/// # Example
///
/// ```
/// use raven_core::ConnectionSettings;
///
/// let settings = ConnectionSettings::new("http://localhost:8080")?.with_database("Northwind");
/// let url = settings.url_for("indexes/dynamic/Orders")?;
/// assert_eq!(
///     url.as_str(),
///     "http://localhost:8080/databases/Northwind/indexes/dynamic/Orders"
/// );
/// # Ok::<(), raven_core::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionSettings {
    host: Url,
    database: Option<String>,
}

impl ConnectionSettings {
    /// Settings for the server root, with no database selected.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] when `host` is not an absolute `http`/`https` URL.
    pub fn new(host: impl AsRef<str>) -> Result<Self> {
        let host = host.as_ref();
        let url = Url::parse(host)
            .map_err(|e| Error::configuration(format!("invalid host '{host}': {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::configuration(format!(
                "invalid host '{host}': expected an http or https URL"
            )));
        }
        Ok(Self {
            host: url,
            database: None,
        })
    }

    /// Read settings from `RAVEN_HOST` and `RAVEN_DATABASE`.
    ///
    /// An empty `RAVEN_DATABASE` means no database.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] when `RAVEN_HOST` is unset or invalid.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let host =
            lookup(HOST_ENV).ok_or_else(|| Error::configuration(format!("{HOST_ENV} is not set")))?;
        let settings = Self::new(host)?;
        Ok(match lookup(DATABASE_ENV) {
            Some(database) if !database.is_empty() => settings.with_database(database),
            _ => settings,
        })
    }

    /// Scope requests to a database.
    #[must_use]
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    /// Drop the database scope (server-level endpoints).
    #[must_use]
    pub fn without_database(mut self) -> Self {
        self.database = None;
        self
    }

    /// Server URL.
    #[must_use]
    pub fn host(&self) -> &Url {
        &self.host
    }

    /// Selected database, if any.
    #[must_use]
    pub fn database(&self) -> Option<&str> {
        self.database.as_deref()
    }

    /// Resolve a relative path (which may carry a `?query`) to an absolute URL.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the database name is `.` or `..`, and
    /// [`Error::InvalidUrl`] if the composed URL does not parse.
    pub fn url_for(&self, path: &str) -> Result<Url> {
        let root = self.host.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        let composed = match &self.database {
            Some(database) => {
                let database = encode_segment(database, "database name")?;
                format!("{root}/databases/{database}/{path}")
            }
            None => format!("{root}/{path}"),
        };
        Url::parse(&composed).map_err(Into::into)
    }
}
