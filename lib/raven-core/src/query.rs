//! Query state and its compilation to a request path.
//!
//! [`QueryState`] is the accumulated intent of a query builder: which index (or which
//! collection of a dynamic query), equality predicates, projection, sort and paging.
//! [`QueryState::compile`] is a pure projection of that state onto the wire:
//!
//! ```text
//! indexes/<index>[?<params>]
//! indexes/dynamic[/<collection>][?<params>]
//! ```
//!
//! where `<params>` is built from the optional keys `query`, `fetch`, `sort`, `start` and
//! `pageSize`, each omitted when empty.

use std::fmt;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Serialize;

use crate::{Error, Result, encode_path, encode_segment};

/// Characters escaped inside predicate terms: everything but `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
const TERM: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const PREDICATE_SEPARATOR: &str = " AND ";

/// A projected field name.
///
/// Built from strings or integers; integers are rendered in decimal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SelectField(String);

impl SelectField {
    /// The field name as sent on the wire.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SelectField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SelectField {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for SelectField {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&String> for SelectField {
    fn from(value: &String) -> Self {
        Self(value.clone())
    }
}

macro_rules! select_field_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for SelectField {
                fn from(value: $ty) -> Self {
                    Self(value.to_string())
                }
            }
        )*
    };
}

select_field_from_number!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize, f32, f64);

/// Accumulated query intent.
///
/// `index_name` and `collection` are mutually exclusive; the setters enforce it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryState {
    index_name: Option<String>,
    collection: Option<String>,
    predicates: Option<Vec<(String, String)>>,
    select: Option<Vec<String>>,
    order_by: Option<String>,
    skip: Option<u32>,
    take: Option<u32>,
}

impl QueryState {
    /// State of a dynamic query (no index).
    #[must_use]
    pub fn dynamic() -> Self {
        Self::default()
    }

    /// State of a query against a named index. An empty name gives a dynamic query.
    #[must_use]
    pub fn index(name: impl Into<String>) -> Self {
        Self {
            index_name: Some(name.into()).filter(|name| !name.is_empty()),
            ..Self::default()
        }
    }

    /// Index name, when the query is index-scoped.
    #[must_use]
    pub fn index_name(&self) -> Option<&str> {
        self.index_name.as_deref()
    }

    /// Collection of a dynamic query.
    #[must_use]
    pub fn collection(&self) -> Option<&str> {
        self.collection.as_deref()
    }

    /// Predicates in insertion order.
    #[must_use]
    pub fn predicates(&self) -> Option<&[(String, String)]> {
        self.predicates.as_deref()
    }

    /// Projected fields.
    #[must_use]
    pub fn select(&self) -> Option<&[String]> {
        self.select.as_deref()
    }

    /// Sort key, `-` prefixed when descending.
    #[must_use]
    pub fn order_by(&self) -> Option<&str> {
        self.order_by.as_deref()
    }

    /// Restrict a dynamic query to a collection.
    ///
    /// # Errors
    ///
    /// Fails when the query already targets an index.
    pub fn set_collection(&mut self, name: impl Into<String>) -> Result<()> {
        if self.index_name.is_some() {
            return Err(Error::validation(
                "cannot specify both an index and a collection to query",
            ));
        }
        self.collection = Some(name.into());
        Ok(())
    }

    /// Start (or extend) the predicate map with `field = value`.
    pub fn add_predicate(&mut self, field: impl Into<String>, value: impl Into<String>) {
        let predicates = self.predicates.get_or_insert_with(Vec::new);
        upsert(predicates, field.into(), value.into());
    }

    /// Extend an existing predicate map with `field = value`.
    ///
    /// # Errors
    ///
    /// Fails when no predicate was added before.
    pub fn and_predicate(
        &mut self,
        field: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<()> {
        let Some(predicates) = self.predicates.as_mut() else {
            return Err(Error::validation(
                "call filter() before calling and(): and() cannot open a predicate",
            ));
        };
        upsert(predicates, field.into(), value.into());
        Ok(())
    }

    /// Replace the projection.
    ///
    /// # Errors
    ///
    /// Fails when `fields` is empty.
    pub fn set_select<I>(&mut self, fields: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<SelectField>,
    {
        let fields: Vec<String> = fields.into_iter().map(|f| f.into().0).collect();
        if fields.is_empty() {
            return Err(Error::validation("expected at least one field to select"));
        }
        self.select = Some(fields);
        Ok(())
    }

    /// Sort ascending by `field`.
    pub fn set_order_by(&mut self, field: impl Into<String>) {
        self.order_by = Some(field.into());
    }

    /// Sort descending by `field`.
    pub fn set_order_by_descending(&mut self, field: impl AsRef<str>) {
        self.order_by = Some(format!("-{}", field.as_ref()));
    }

    /// Number of records to skip.
    pub fn set_skip(&mut self, count: u32) {
        self.skip = Some(count);
    }

    /// Number of records to return.
    pub fn set_take(&mut self, count: u32) {
        self.take = Some(count);
    }

    /// The predicate as sent in the `query` parameter, e.g. `Name:Ayende AND Age:30`.
    #[must_use]
    pub fn predicate(&self) -> Option<String> {
        let predicates = self.predicates.as_ref()?;
        let terms: Vec<String> = predicates
            .iter()
            .map(|(field, value)| {
                format!(
                    "{}:{}",
                    utf8_percent_encode(field, TERM),
                    utf8_percent_encode(value, TERM)
                )
            })
            .collect();
        let joined = terms.join(PREDICATE_SEPARATOR);
        (!joined.is_empty()).then_some(joined)
    }

    /// Compile to the relative path and query string of the GET.
    ///
    /// # Errors
    ///
    /// Fails when a dynamic query has neither a collection nor any parameter, when the index
    /// name or collection has a `.`/`..` or empty segment, and when the parameters cannot be
    /// serialized.
    pub fn compile(&self) -> Result<CompiledQuery> {
        let predicate = self.predicate();
        let params = QueryParams {
            query: predicate.as_deref(),
            fetch: self.select.as_deref().unwrap_or_default(),
            sort: self.order_by.as_deref().filter(|s| !s.is_empty()),
            start: self.skip.filter(|n| *n > 0),
            page_size: self.take.filter(|n| *n > 0),
        };
        let query = crate::to_query_string(&params)?;
        let query = (!query.is_empty()).then_some(query);

        let path = match (self.index_name.as_deref(), self.collection.as_deref()) {
            (Some(index), _) => format!("indexes/{}", encode_path(index, "index name")?),
            (None, Some(collection)) if !collection.is_empty() => {
                format!("indexes/dynamic/{}", encode_segment(collection, "collection")?)
            }
            (None, _) if query.is_none() => {
                return Err(Error::validation(
                    "a dynamic query needs a collection or at least one filter",
                ));
            }
            (None, _) => "indexes/dynamic".to_string(),
        };

        Ok(CompiledQuery { path, query })
    }
}

fn upsert(predicates: &mut Vec<(String, String)>, field: String, value: String) {
    match predicates.iter_mut().find(|(existing, _)| *existing == field) {
        Some(entry) => entry.1 = value,
        None => predicates.push((field, value)),
    }
}

#[derive(Serialize)]
struct QueryParams<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    query: Option<&'a str>,
    #[serde(skip_serializing_if = "no_fields")]
    fetch: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    sort: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    start: Option<u32>,
    #[serde(rename = "pageSize", skip_serializing_if = "Option::is_none")]
    page_size: Option<u32>,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn no_fields(fields: &&[String]) -> bool {
    fields.is_empty()
}

/// A query compiled to its wire form. Never mutated, recomputed on every terminal call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledQuery {
    path: String,
    query: Option<String>,
}

impl CompiledQuery {
    /// Path relative to the database root (`indexes/...`).
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Serialized query string, without the leading `?`.
    #[must_use]
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }
}

impl fmt::Display for CompiledQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.query {
            Some(query) => write!(f, "{}?{query}", self.path),
            None => f.write_str(&self.path),
        }
    }
}
