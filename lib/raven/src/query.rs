//! Fluent queries against indexes and dynamic collections.
//!
//! ```ignore
//! let page: QueryResult<User> = client
//!     .query()
//!     .collection("Users")?
//!     .filter("Name", "Ayende")
//!     .and("Age", "30")?
//!     .order_by_descending("LastLogin")
//!     .take(10)
//!     .results()
//!     .await?;
//! ```

use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{CompiledQuery, Connection, HttpClient, QueryState, Result, SelectField, StatusCode};

/// A query under construction.
///
/// Mutators consume and return the builder; those that can be misused return
/// [`Result`] and fail before anything is sent. [`QueryRequest::results`] compiles the
/// accumulated state and issues a single GET; it can be called again to repeat the exact same
/// request.
#[derive(Debug, Clone)]
pub struct QueryRequest<C> {
    connection: Connection<C>,
    state: QueryState,
}

impl<C> QueryRequest<C> {
    /// A dynamic query, optionally narrowed with [`QueryRequest::collection`].
    #[must_use]
    pub fn dynamic(connection: Connection<C>) -> Self {
        Self {
            connection,
            state: QueryState::dynamic(),
        }
    }

    /// A query answered by the index `name`.
    #[must_use]
    pub fn index(name: impl Into<String>, connection: Connection<C>) -> Self {
        Self {
            connection,
            state: QueryState::index(name),
        }
    }

    /// Accumulated state.
    #[must_use]
    pub fn state(&self) -> &QueryState {
        &self.state
    }

    /// Restrict a dynamic query to one collection.
    ///
    /// # Errors
    ///
    /// Fails when the query targets an index.
    pub fn collection(mut self, name: impl Into<String>) -> Result<Self> {
        self.state.set_collection(name)?;
        Ok(self)
    }

    /// Require `field` to equal `value`. A later filter on the same field replaces it.
    #[doc(alias = "where")]
    #[must_use]
    pub fn filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.state.add_predicate(field, value);
        self
    }

    /// Add a further equality to the predicate opened by [`QueryRequest::filter`].
    ///
    /// # Errors
    ///
    /// Fails when no filter was set before.
    pub fn and(mut self, field: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        self.state.and_predicate(field, value)?;
        Ok(self)
    }

    /// Project the results onto `fields`, replacing any earlier projection.
    ///
    /// # Errors
    ///
    /// Fails when `fields` is empty.
    pub fn select<I>(mut self, fields: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<SelectField>,
    {
        self.state.set_select(fields)?;
        Ok(self)
    }

    /// Sort ascending by `field`.
    #[must_use]
    pub fn order_by(mut self, field: impl Into<String>) -> Self {
        self.state.set_order_by(field);
        self
    }

    /// Sort descending by `field`.
    #[must_use]
    pub fn order_by_descending(mut self, field: impl AsRef<str>) -> Self {
        self.state.set_order_by_descending(field);
        self
    }

    /// Skip the first `count` results. Zero leaves the parameter out.
    #[must_use]
    pub fn skip(mut self, count: u32) -> Self {
        self.state.set_skip(count);
        self
    }

    /// Return at most `count` results. Zero leaves the parameter out.
    #[must_use]
    pub fn take(mut self, count: u32) -> Self {
        self.state.set_take(count);
        self
    }

    /// The request path this query compiles to.
    ///
    /// # Errors
    ///
    /// Fails on an unscoped dynamic query.
    pub fn compile(&self) -> Result<CompiledQuery> {
        self.state.compile()
    }
}

impl<C: HttpClient> QueryRequest<C> {
    /// Run the query and parse the body as `T`.
    ///
    /// Only a 200 answer is a success; any other status becomes [`crate::Error::Http`]
    /// carrying the raw body.
    ///
    /// # Errors
    ///
    /// Fails without a network call on an unscoped dynamic query, and with a request error
    /// when the transport fails, the status is not 200 or the body does not parse as `T`.
    pub async fn results<T: DeserializeOwned>(&self) -> Result<T> {
        let compiled = self.compile()?;
        debug!(query = %compiled, "running query");

        let response = self
            .connection
            .send_get(&compiled.to_string())
            .await?
            .expect_status(StatusCode::OK.as_u16(), "failed to get results")?;
        response.json()
    }
}

/// The envelope the server wraps query results in.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct QueryResult<T> {
    /// Matching documents (or projections).
    pub results: Vec<T>,
    /// Total number of matches, ignoring paging.
    #[serde(default)]
    pub total_results: u64,
    /// Results skipped by the server (duplicates removed by projections).
    #[serde(default)]
    pub skipped_results: u64,
    /// Index that answered; dynamic queries report the index created for them.
    #[serde(default)]
    pub index_name: Option<String>,
    /// Whether the index was still catching up when it answered.
    #[serde(default)]
    pub is_stale: bool,
}
