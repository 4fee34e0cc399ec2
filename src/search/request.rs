//! Search request builder

use std::time::Duration;

use super::filter::{build_filter, FilterExpr, FilterField};

/// A free-text query with optional limit, facet, filters and time budget
///
/// Filter keywords are kept verbatim; only those naming a [`FilterField`]
/// take effect.
#[derive(Debug, Clone, Default)]
pub struct SearchRequest {
    pub query: String,
    /// `None` uses the session's default limit
    pub limit: Option<usize>,
    /// Group hits by this stored field
    pub facet: Option<String>,
    pub filters: Vec<(String, String)>,
    /// Overrides the session's time budget
    pub max_duration: Option<Duration>,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn facet(mut self, field: impl Into<String>) -> Self {
        self.facet = Some(field.into());
        self
    }

    pub fn filter(mut self, keyword: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push((keyword.into(), value.into()));
        self
    }

    pub fn max_duration(mut self, budget: Duration) -> Self {
        self.max_duration = Some(budget);
        self
    }

    pub fn filter_expr(&self) -> FilterExpr {
        build_filter(
            self.filters
                .iter()
                .map(|(keyword, value)| (keyword.as_str(), value.as_str())),
        )
    }

    /// Filter keywords that will be ignored
    pub fn ignored_filters(&self) -> impl Iterator<Item = &str> {
        self.filters
            .iter()
            .map(|(keyword, _)| keyword.as_str())
            .filter(|keyword| FilterField::from_keyword(keyword).is_none())
    }
}
