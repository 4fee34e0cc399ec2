//! Possible-typo checks for activity and exchange records
//!
//! Imported datasets are user-curated, so a misspelled `type` such as
//! `"proces"` or a key such as `"locaton"` is flagged as a warning and the
//! record is kept as-is.

mod checker;
mod vocabulary;

pub use checker::{
    check_activity_keys, check_activity_type, check_exchange_keys, check_exchange_type,
    check_keys, check_type, check_type_value, edit_distance_available, lint_dataset, TypoTarget,
    TypoWarning,
};
pub use vocabulary::{
    RecordKind, Vocabulary, ACTIVITY_KEYS, ACTIVITY_TYPES, EXCHANGE_KEYS, EXCHANGE_TYPES,
    VALID_ACTIVITY_KEYS, VALID_ACTIVITY_TYPES, VALID_EXCHANGE_KEYS, VALID_EXCHANGE_TYPES,
};
