//! Filter construction from keyword arguments
//!
//! Pure and engine-independent: keyword pairs go in, a tagged expression
//! comes out. Turning the expression into a Tantivy query is the searcher's
//! job.

use std::fmt;

/// Fields a search may be filtered on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    Name,
    Product,
    Location,
    Database,
}

impl FilterField {
    pub const ALL: [FilterField; 4] = [
        FilterField::Name,
        FilterField::Product,
        FilterField::Location,
        FilterField::Database,
    ];

    /// Map a keyword to a filter field; unknown keywords yield `None`
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "name" => Some(FilterField::Name),
            "product" => Some(FilterField::Product),
            "location" => Some(FilterField::Location),
            "database" => Some(FilterField::Database),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterField::Name => "name",
            FilterField::Product => "product",
            FilterField::Location => "location",
            FilterField::Database => "database",
        }
    }
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Equality on one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterTerm {
    pub field: FilterField,
    pub value: String,
}

impl FilterTerm {
    pub fn new(field: FilterField, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FilterExpr {
    /// No filtering
    #[default]
    None,
    Term(FilterTerm),
    /// All terms must hold
    And(Vec<FilterTerm>),
}

impl FilterExpr {
    pub fn is_none(&self) -> bool {
        matches!(self, FilterExpr::None)
    }

    pub fn terms(&self) -> &[FilterTerm] {
        match self {
            FilterExpr::None => &[],
            FilterExpr::Term(term) => std::slice::from_ref(term),
            FilterExpr::And(terms) => terms,
        }
    }
}

/// Build a conjunctive filter from keyword pairs
///
/// Keywords outside {name, product, location, database} are ignored. A
/// repeated keyword keeps its first position and takes the last value.
pub fn build_filter<I, K, V>(keywords: I) -> FilterExpr
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<String>,
{
    let mut terms: Vec<FilterTerm> = Vec::new();
    for (keyword, value) in keywords {
        let Some(field) = FilterField::from_keyword(keyword.as_ref()) else {
            continue;
        };
        let value = value.into();
        match terms.iter_mut().find(|t| t.field == field) {
            Some(existing) => existing.value = value,
            None => terms.push(FilterTerm { field, value }),
        }
    }

    match terms.len() {
        0 => FilterExpr::None,
        1 => FilterExpr::Term(terms.remove(0)),
        _ => FilterExpr::And(terms),
    }
}
