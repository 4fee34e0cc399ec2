//! Search result shapes

use std::collections::BTreeMap;

use super::SearchError;
use crate::activity::{ActivityKey, ActivityResolver, KeyError};
use crate::index::schema::KEY;

/// Stored fields of one hit, keyed by field name
pub type RawRecord = BTreeMap<String, String>;

/// Ranked hits, or hits grouped by a facet value
#[derive(Debug, Clone, PartialEq)]
pub enum SearchResults<T> {
    Ranked(Vec<T>),
    Grouped(BTreeMap<String, Vec<T>>),
}

impl<T> SearchResults<T> {
    /// Total number of records across all groups
    pub fn len(&self) -> usize {
        match self {
            SearchResults::Ranked(items) => items.len(),
            SearchResults::Grouped(groups) => groups.values().map(Vec::len).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_ranked(self) -> Option<Vec<T>> {
        match self {
            SearchResults::Ranked(items) => Some(items),
            SearchResults::Grouped(_) => None,
        }
    }

    pub fn into_grouped(self) -> Option<BTreeMap<String, Vec<T>>> {
        match self {
            SearchResults::Grouped(groups) => Some(groups),
            SearchResults::Ranked(_) => None,
        }
    }

    /// Map every record, keeping order and grouping; stops at the first error
    pub fn try_map<U, E, F>(self, mut f: F) -> Result<SearchResults<U>, E>
    where
        F: FnMut(T) -> Result<U, E>,
    {
        Ok(match self {
            SearchResults::Ranked(items) => {
                SearchResults::Ranked(items.into_iter().map(&mut f).collect::<Result<_, _>>()?)
            }
            SearchResults::Grouped(groups) => {
                let mut mapped = BTreeMap::new();
                for (group, items) in groups {
                    let items = items.into_iter().map(&mut f).collect::<Result<_, _>>()?;
                    mapped.insert(group, items);
                }
                SearchResults::Grouped(mapped)
            }
        })
    }
}

impl SearchResults<RawRecord> {
    /// Resolve every record's stored key into a domain activity
    pub fn resolve<R>(self, resolver: &R) -> Result<SearchResults<R::Activity>, SearchError>
    where
        R: ActivityResolver + ?Sized,
    {
        self.try_map(|record| -> Result<R::Activity, SearchError> {
            let key = record_key(&record)?;
            Ok(resolver.get_activity(&key)?)
        })
    }
}

/// Composite key of a raw record
pub fn record_key(record: &RawRecord) -> Result<ActivityKey, KeyError> {
    let encoded = record.get(KEY).ok_or(KeyError::Missing)?;
    ActivityKey::split(encoded)
}
