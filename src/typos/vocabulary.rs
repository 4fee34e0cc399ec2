//! Controlled vocabularies for activity and exchange records
//!
//! Entry order matters: when two entries are equally close to a typo, the
//! one listed first is suggested.

use std::fmt;

/// Which kind of record a vocabulary describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Activity,
    Exchange,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Activity => "activity",
            RecordKind::Exchange => "exchange",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fixed, ordered list of valid strings for one record kind
#[derive(Debug, Clone, Copy)]
pub struct Vocabulary {
    pub kind: RecordKind,
    pub entries: &'static [&'static str],
}

impl Vocabulary {
    pub const fn new(kind: RecordKind, entries: &'static [&'static str]) -> Self {
        Self { kind, entries }
    }

    /// Exact membership test
    pub fn contains(&self, value: &str) -> bool {
        self.entries.iter().any(|entry| *entry == value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().copied()
    }
}

// =============================================================================
// VOCABULARIES
// =============================================================================

pub const VALID_ACTIVITY_TYPES: &[&str] = &[
    "process",
    "emission",
    "natural resource",
    "product",
    "economic",
    "inventory indicator",
];

pub const VALID_EXCHANGE_TYPES: &[&str] = &[
    "biosphere",
    "production",
    "substitution",
    "generic production",
    "technosphere",
    "generic consumption",
];

pub const VALID_ACTIVITY_KEYS: &[&str] = &[
    "CAS number",
    "activity",
    "activity type",
    "authors",
    "categories",
    "classifications",
    "code",
    "comment",
    "database",
    "exchanges",
    "filename",
    "flow",
    "id",
    "location",
    "name",
    "parameters",
    "production amount",
    "reference product",
    "synonyms",
    "type",
    "unit",
];

pub const VALID_EXCHANGE_KEYS: &[&str] = &[
    "activity",
    "amount",
    "classifications",
    "comment",
    "flow",
    "input",
    "loc",
    "maximum",
    "minimum",
    "name",
    "output",
    "pedigree",
    "production volume",
    "properties",
    "scale",
    "scale without pedigree",
    "shape",
    "temporal_distribution",
    "type",
    "uncertainty type",
    "uncertainty_type",
    "unit",
];

pub static ACTIVITY_TYPES: Vocabulary = Vocabulary::new(RecordKind::Activity, VALID_ACTIVITY_TYPES);
pub static EXCHANGE_TYPES: Vocabulary = Vocabulary::new(RecordKind::Exchange, VALID_EXCHANGE_TYPES);
pub static ACTIVITY_KEYS: Vocabulary = Vocabulary::new(RecordKind::Activity, VALID_ACTIVITY_KEYS);
pub static EXCHANGE_KEYS: Vocabulary = Vocabulary::new(RecordKind::Exchange, VALID_EXCHANGE_KEYS);
