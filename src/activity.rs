//! Activity keys and the domain resolver seam
//!
//! The index stores each activity's composite key as one string; the
//! resolver turns that key back into a full domain record.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// Separator between database name and code in an encoded key
pub const KEY_SEPARATOR: &str = "⊡";

/// A (database, code) pair uniquely identifying an activity
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActivityKey {
    pub database: String,
    pub code: String,
}

impl ActivityKey {
    pub fn new(database: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            code: code.into(),
        }
    }

    /// Encode as a single stored string
    pub fn join(&self) -> String {
        format!("{}{}{}", self.database, KEY_SEPARATOR, self.code)
    }

    /// Decode a stored key; it must contain exactly one separator
    pub fn split(encoded: &str) -> Result<Self, KeyError> {
        let mut parts = encoded.split(KEY_SEPARATOR);
        match (parts.next(), parts.next(), parts.next()) {
            (Some(database), Some(code), None) => Ok(Self::new(database, code)),
            _ => Err(KeyError::Malformed(encoded.to_string())),
        }
    }
}

impl fmt::Display for ActivityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.database, self.code)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    #[error("Malformed activity key: {0:?}")]
    Malformed(String),
    #[error("Record has no stored key")]
    Missing,
}

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("Activity not found: {0}")]
    NotFound(ActivityKey),
}

/// Looks up domain activities by key
pub trait ActivityResolver {
    type Activity;

    fn get_activity(&self, key: &ActivityKey) -> Result<Self::Activity, ResolveError>;
}

/// A resolved activity from the in-memory store
#[derive(Debug, Clone, PartialEq)]
pub struct Activity {
    pub key: ActivityKey,
    pub dataset: Value,
}

impl Activity {
    pub fn name(&self) -> Option<&str> {
        self.dataset.get("name").and_then(Value::as_str)
    }

    pub fn location(&self) -> Option<&str> {
        self.dataset.get("location").and_then(Value::as_str)
    }
}

/// `HashMap`-backed resolver over raw datasets
#[derive(Debug, Default)]
pub struct InMemoryActivityStore {
    datasets: HashMap<ActivityKey, Value>,
}

impl InMemoryActivityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a dataset, replacing any previous one with the same key
    pub fn insert(&mut self, key: ActivityKey, dataset: Value) {
        self.datasets.insert(key, dataset);
    }

    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }
}

impl ActivityResolver for InMemoryActivityStore {
    type Activity = Activity;

    fn get_activity(&self, key: &ActivityKey) -> Result<Activity, ResolveError> {
        self.datasets
            .get(key)
            .map(|dataset| Activity {
                key: key.clone(),
                dataset: dataset.clone(),
            })
            .ok_or_else(|| ResolveError::NotFound(key.clone()))
    }
}

impl<R: ActivityResolver + ?Sized> ActivityResolver for &R {
    type Activity = R::Activity;

    fn get_activity(&self, key: &ActivityKey) -> Result<Self::Activity, ResolveError> {
        (**self).get_activity(key)
    }
}
