//! LCA Search - Vocabulary linting and activity search
//!
//! Two independent helpers for life-cycle-assessment inventory databases:
//!
//! - [`typos`] warns when an activity or exchange carries a type label or a
//!   dictionary key that is one edit away from the controlled vocabulary.
//! - [`search`] wraps a Tantivy index of activities, turning a free-text query
//!   (with optional field filters and grouping) into ranked index records or
//!   resolved domain activities.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  Consumers: importers, database writers, search UIs             │
//! └─────────────────────────────────────────────────────────────────┘
//!            │                                   │
//!            ▼                                   ▼
//! ┌──────────────────────┐     ┌────────────────────────────────────┐
//! │   Typo Checker       │     │  Searcher (scoped session)         │
//! │  vocabulary + strsim │     │  filter -> parse -> collect        │
//! └──────────────────────┘     └────────────────────────────────────┘
//!                                    │                    │
//!                                    ▼                    ▼
//!                    ┌──────────────────────┐  ┌──────────────────────┐
//!                    │  IndexManager        │  │  ActivityResolver    │
//!                    │  (Tantivy index)     │  │  key -> activity     │
//!                    └──────────────────────┘  └──────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use lca_search::{IndexManager, SearchConfig, SearchRequest, Searcher};
//!
//! let config = SearchConfig::from_file("config/search.yaml")?;
//! let manager = IndexManager::open(&config.index)?;
//! manager.add_datasets(&datasets)?;
//!
//! let searcher = Searcher::with_options(&manager, &config.search)?;
//! let hits = searcher.search_activities(
//!     &SearchRequest::new("steel").filter("location", "CH"),
//!     &store,
//! )?;
//! ```

pub mod activity;
pub mod config;
pub mod diagnostics;
pub mod index;
pub mod search;
pub mod typos;

// Re-export main types
pub use activity::{
    Activity, ActivityKey, ActivityResolver, InMemoryActivityStore, KeyError, ResolveError,
};
pub use config::{ConfigError, FieldBoosts, IndexConfig, SearchConfig, SearchOptions};
pub use diagnostics::open_file_count;
pub use index::{ActivityDocument, IndexError, IndexHandle, IndexManager};
pub use search::{
    build_filter, FilterExpr, FilterField, FilterTerm, RawRecord, SearchError, SearchRequest,
    SearchResults, Searcher,
};
pub use typos::{
    check_activity_keys, check_activity_type, check_exchange_keys, check_exchange_type,
    check_keys, check_type, check_type_value, lint_dataset, RecordKind, TypoWarning, Vocabulary,
};
