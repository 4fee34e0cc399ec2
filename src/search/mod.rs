//! Activity search facade
//!
//! Shapes a free-text request into a boosted, filtered Tantivy query, runs it
//! inside a scoped [`Searcher`] session and returns either raw stored records
//! or activities resolved through an [`ActivityResolver`].
//!
//! [`ActivityResolver`]: crate::activity::ActivityResolver

mod collector;
mod filter;
mod request;
mod results;
mod searcher;

pub use collector::TimeLimitCollector;
pub use filter::{build_filter, FilterExpr, FilterField, FilterTerm};
pub use request::SearchRequest;
pub use results::{record_key, RawRecord, SearchResults};
pub use searcher::Searcher;

use std::time::Duration;

use crate::activity::{KeyError, ResolveError};
use crate::index::IndexError;

/// Errors that can occur during a search
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error(transparent)]
    Index(#[from] IndexError),
    #[error("Search failed: {0}")]
    Engine(#[from] tantivy::TantivyError),
    #[error("Query syntax error: {0}")]
    QuerySyntax(#[from] tantivy::query::QueryParserError),
    #[error("Unknown field: {0}")]
    UnknownField(String),
    #[error("Search exceeded time limit of {0:?}")]
    Timeout(Duration),
    #[error(transparent)]
    Key(#[from] KeyError),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}
