//! Edit-distance typo detection against controlled vocabularies
//!
//! Findings are advisory: each one is logged with `tracing::warn!` and
//! returned to the caller, but nothing is ever rejected.

use serde_json::Value;
use std::fmt;
use std::sync::LazyLock;

use super::vocabulary::{Vocabulary, ACTIVITY_KEYS, ACTIVITY_TYPES, EXCHANGE_KEYS, EXCHANGE_TYPES};
use super::RecordKind;

/// Suggestions are only made below this distance
const MAX_DISTANCE_EXCLUSIVE: usize = 2;

type DistanceFn = fn(&str, &str) -> usize;

/// Resolved once per process; `None` turns every check into a no-op
static EDIT_DISTANCE: LazyLock<Option<DistanceFn>> = LazyLock::new(resolve_edit_distance);

#[cfg(feature = "levenshtein")]
fn resolve_edit_distance() -> Option<DistanceFn> {
    Some(strsim::levenshtein)
}

#[cfg(not(feature = "levenshtein"))]
fn resolve_edit_distance() -> Option<DistanceFn> {
    tracing::info!("No Levenshtein implementation available; skipping typo checks");
    None
}

/// Whether the edit-distance backend is compiled in
pub fn edit_distance_available() -> bool {
    EDIT_DISTANCE.is_some()
}

// =============================================================================
// FINDINGS
// =============================================================================

/// What part of the record looked misspelled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypoTarget {
    /// The record's `type` value
    Type,
    /// A dictionary key of the record
    Key,
}

/// A near-miss of a vocabulary entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypoWarning {
    pub kind: RecordKind,
    pub target: TypoTarget,
    /// The value or key as given
    pub given: String,
    /// Closest vocabulary entry
    pub suggestion: &'static str,
    pub distance: usize,
}

impl fmt::Display for TypoWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.target {
            TypoTarget::Type => write!(
                f,
                "Possible typo found: Given {} type `{}` but `{}` is more common",
                self.kind, self.given, self.suggestion
            ),
            TypoTarget::Key => write!(
                f,
                "Possible incorrect {} key found: Given `{}` but `{}` is more common",
                self.kind, self.given, self.suggestion
            ),
        }
    }
}

fn emit(warning: TypoWarning) -> TypoWarning {
    tracing::warn!(
        kind = %warning.kind,
        given = %warning.given,
        suggestion = warning.suggestion,
        distance = warning.distance,
        "{}",
        warning
    );
    warning
}

/// Closest entry by edit distance; the first entry wins among equals
fn nearest(
    distance: DistanceFn,
    value: &str,
    vocabulary: &Vocabulary,
) -> Option<(usize, &'static str)> {
    let mut best: Option<(usize, &'static str)> = None;
    for entry in vocabulary.iter() {
        let d = distance(value, entry);
        match best {
            Some((best_d, _)) if best_d <= d => {}
            _ => best = Some((d, entry)),
        }
    }
    best
}

// =============================================================================
// CHECKS
// =============================================================================

/// Check a type value against a vocabulary
///
/// Returns a warning when `value` is not in the vocabulary but is one edit
/// away from an entry. Empty values and exact matches are skipped.
pub fn check_type(value: &str, vocabulary: &Vocabulary) -> Option<TypoWarning> {
    let distance = (*EDIT_DISTANCE)?;

    if value.is_empty() || vocabulary.contains(value) {
        return None;
    }

    let (d, suggestion) = nearest(distance, value, vocabulary)?;
    if d >= MAX_DISTANCE_EXCLUSIVE {
        return None;
    }

    Some(emit(TypoWarning {
        kind: vocabulary.kind,
        target: TypoTarget::Type,
        given: value.to_string(),
        suggestion,
        distance: d,
    }))
}

/// Check an untyped type value; anything that is not a string is ignored
pub fn check_type_value(value: &Value, vocabulary: &Vocabulary) -> Option<TypoWarning> {
    value.as_str().and_then(|s| check_type(s, vocabulary))
}

/// Check every key against a vocabulary
///
/// Same policy as [`check_type`], except a suggestion must also be strictly
/// longer than the key it would replace.
pub fn check_keys<I, K>(keys: I, vocabulary: &Vocabulary) -> Vec<TypoWarning>
where
    I: IntoIterator<Item = K>,
    K: AsRef<str>,
{
    let Some(distance) = *EDIT_DISTANCE else {
        return Vec::new();
    };

    let mut warnings = Vec::new();
    for key in keys {
        let key = key.as_ref();
        if vocabulary.contains(key) {
            continue;
        }
        let Some((d, suggestion)) = nearest(distance, key, vocabulary) else {
            continue;
        };
        if d < MAX_DISTANCE_EXCLUSIVE && suggestion.len() > key.len() {
            warnings.push(emit(TypoWarning {
                kind: vocabulary.kind,
                target: TypoTarget::Key,
                given: key.to_string(),
                suggestion,
                distance: d,
            }));
        }
    }
    warnings
}

pub fn check_activity_type(value: &str) -> Option<TypoWarning> {
    check_type(value, &ACTIVITY_TYPES)
}

pub fn check_exchange_type(value: &str) -> Option<TypoWarning> {
    check_type(value, &EXCHANGE_TYPES)
}

pub fn check_activity_keys<I, K>(keys: I) -> Vec<TypoWarning>
where
    I: IntoIterator<Item = K>,
    K: AsRef<str>,
{
    check_keys(keys, &ACTIVITY_KEYS)
}

pub fn check_exchange_keys<I, K>(keys: I) -> Vec<TypoWarning>
where
    I: IntoIterator<Item = K>,
    K: AsRef<str>,
{
    check_keys(keys, &EXCHANGE_KEYS)
}

/// Run all checks on a dataset and each of its exchanges
///
/// Non-object datasets and exchanges are skipped.
pub fn lint_dataset(dataset: &Value) -> Vec<TypoWarning> {
    let Some(obj) = dataset.as_object() else {
        return Vec::new();
    };

    let mut warnings = Vec::new();
    if let Some(w) = obj
        .get("type")
        .and_then(|t| check_type_value(t, &ACTIVITY_TYPES))
    {
        warnings.push(w);
    }
    warnings.extend(check_activity_keys(obj.keys()));

    let exchanges = obj.get("exchanges").and_then(Value::as_array);
    for exchange in exchanges.into_iter().flatten() {
        let Some(exc) = exchange.as_object() else {
            continue;
        };
        if let Some(w) = exc
            .get("type")
            .and_then(|t| check_type_value(t, &EXCHANGE_TYPES))
        {
            warnings.push(w);
        }
        warnings.extend(check_exchange_keys(exc.keys()));
    }

    warnings
}
