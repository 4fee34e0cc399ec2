//! End-to-end search tests against an in-RAM activity index

mod helpers;

use std::collections::BTreeSet;
use std::time::Duration;

use lca_search::{
    ActivityKey, ActivityResolver, IndexConfig, IndexManager, RawRecord, ResolveError,
    SearchError, SearchOptions, SearchRequest, Searcher,
};
use pretty_assertions::assert_eq;

fn codes(records: &[RawRecord]) -> Vec<String> {
    records
        .iter()
        .map(|r| ActivityKey::split(&r["key"]).unwrap().code)
        .collect()
}

fn code_set(records: &[RawRecord]) -> BTreeSet<String> {
    codes(records).into_iter().collect()
}

#[test]
fn test_name_matches_outrank_comment_matches() {
    let manager = helpers::populated_index();
    let searcher = Searcher::open(&manager).unwrap();

    let hits = searcher
        .search(&SearchRequest::new("steel"))
        .unwrap()
        .into_ranked()
        .unwrap();

    let found = codes(&hits);
    assert_eq!(found.len(), 5);
    // copper mining only mentions steel in its comment
    assert_eq!(found.last().map(String::as_str), Some("c1"));
}

#[test]
fn test_limit_bounds_results() {
    let manager = helpers::populated_index();
    let searcher = Searcher::open(&manager).unwrap();

    let hits = searcher.search(&SearchRequest::new("steel").limit(2)).unwrap();
    assert_eq!(hits.len(), 2);

    let none = searcher.search(&SearchRequest::new("steel").limit(0)).unwrap();
    assert!(none.is_empty());
}

#[test]
fn test_default_limit_from_options() {
    let manager = helpers::populated_index();
    let options = SearchOptions {
        default_limit: 3,
        ..SearchOptions::default()
    };
    let searcher = Searcher::with_options(&manager, &options).unwrap();

    assert_eq!(searcher.search(&SearchRequest::new("steel")).unwrap().len(), 3);
}

#[test]
fn test_filters_narrow_results() {
    let manager = helpers::populated_index();
    let searcher = Searcher::open(&manager).unwrap();

    let unfiltered = searcher
        .search(&SearchRequest::new("steel"))
        .unwrap()
        .into_ranked()
        .unwrap();
    assert_eq!(
        code_set(&unfiltered),
        BTreeSet::from(["c1", "s1", "s2", "s3", "s4"].map(String::from))
    );

    let swiss = searcher
        .search(&SearchRequest::new("steel").filter("location", "CH"))
        .unwrap()
        .into_ranked()
        .unwrap();
    assert_eq!(code_set(&swiss), BTreeSet::from(["s1", "s4"].map(String::from)));

    let swiss_ecoinvent = searcher
        .search(
            &SearchRequest::new("steel")
                .filter("location", "CH")
                .filter("database", "ecoinvent"),
        )
        .unwrap()
        .into_ranked()
        .unwrap();
    assert_eq!(codes(&swiss_ecoinvent), vec!["s1"]);
}

#[test]
fn test_multi_word_filter_matches_phrase_only() {
    let manager = helpers::populated_index();
    let searcher = Searcher::open(&manager).unwrap();

    let phrase = searcher
        .search(&SearchRequest::new("steel").filter("name", "steel production"))
        .unwrap()
        .into_ranked()
        .unwrap();
    assert_eq!(code_set(&phrase), BTreeSet::from(["s1", "s2"].map(String::from)));

    let reversed = searcher
        .search(&SearchRequest::new("steel").filter("name", "production steel"))
        .unwrap();
    assert!(reversed.is_empty());
}

#[test]
fn test_unknown_filter_keyword_is_ignored() {
    let manager = helpers::populated_index();
    let searcher = Searcher::open(&manager).unwrap();

    let hits = searcher
        .search(&SearchRequest::new("steel").filter("unit", "ton"))
        .unwrap();
    assert_eq!(hits.len(), 5);
}

#[test]
fn test_filter_keeps_relevance_order() {
    let manager = helpers::populated_index();
    let searcher = Searcher::open(&manager).unwrap();

    let all = searcher
        .search(&SearchRequest::new("steel"))
        .unwrap()
        .into_ranked()
        .unwrap();
    let swiss = searcher
        .search(&SearchRequest::new("steel").filter("location", "CH"))
        .unwrap()
        .into_ranked()
        .unwrap();

    let expected: Vec<String> = codes(&all)
        .into_iter()
        .filter(|c| c == "s1" || c == "s4")
        .collect();
    assert_eq!(codes(&swiss), expected);
}

#[test]
fn test_facet_groups_raw_records() {
    let manager = helpers::populated_index();
    let searcher = Searcher::open(&manager).unwrap();

    let groups = searcher
        .search(&SearchRequest::new("steel").facet("location"))
        .unwrap()
        .into_grouped()
        .unwrap();

    assert_eq!(
        groups.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["CH", "CL", "DE", "GLO"]
    );
    assert_eq!(code_set(&groups["CH"]), BTreeSet::from(["s1", "s4"].map(String::from)));
    assert!(groups["DE"].iter().all(|r| r["location"] == "DE"));
}

#[test]
fn test_facet_resolves_activities() {
    let manager = helpers::populated_index();
    let store = helpers::store();
    let searcher = Searcher::open(&manager).unwrap();

    let groups = searcher
        .search_activities(&SearchRequest::new("steel").facet("location"), &store)
        .unwrap()
        .into_grouped()
        .unwrap();

    assert_eq!(groups.len(), 4);
    for (location, activities) in &groups {
        for activity in activities {
            assert_eq!(activity.location(), Some(location.as_str()));
        }
    }
}

#[test]
fn test_facet_ignores_limit() {
    let manager = helpers::populated_index();
    let searcher = Searcher::open(&manager).unwrap();

    let grouped = searcher
        .search(&SearchRequest::new("steel").facet("database").limit(1))
        .unwrap();
    assert_eq!(grouped.len(), 5);
}

#[test]
fn test_unknown_facet_field() {
    let manager = helpers::populated_index();
    let searcher = Searcher::open(&manager).unwrap();

    let err = searcher
        .search(&SearchRequest::new("steel").facet("unit"))
        .unwrap_err();
    assert!(matches!(err, SearchError::UnknownField(f) if f == "unit"));
}

#[test]
fn test_proxy_preserves_order() {
    let manager = helpers::populated_index();
    let store = helpers::store();
    let searcher = Searcher::open(&manager).unwrap();
    let request = SearchRequest::new("steel production");

    let raw = searcher.search(&request).unwrap().into_ranked().unwrap();
    let resolved = searcher
        .search_activities(&request, &store)
        .unwrap()
        .into_ranked()
        .unwrap();

    let resolved_codes: Vec<String> = resolved.iter().map(|a| a.key.code.clone()).collect();
    assert_eq!(resolved_codes, codes(&raw));
    assert_eq!(resolved[0].name().map(|n| n.starts_with("steel production")), Some(true));
}

#[test]
fn test_every_stored_key_resolves() {
    let manager = helpers::populated_index();
    let store = helpers::store();
    let searcher = Searcher::open(&manager).unwrap();

    let hits = searcher
        .search(&SearchRequest::new("steel OR dioxide").limit(100))
        .unwrap()
        .into_ranked()
        .unwrap();
    assert_eq!(hits.len(), 6);
    for record in &hits {
        let key = ActivityKey::split(&record["key"]).unwrap();
        assert_eq!(key.database, record["database"]);
        assert!(store.get_activity(&key).is_ok());
    }
}

#[test]
fn test_missing_activity_propagates() {
    let manager = helpers::populated_index();
    let mut store = lca_search::InMemoryActivityStore::new();
    for ds in helpers::datasets() {
        if ds["code"] != "s4" {
            store.insert(helpers::key_of(&ds), ds);
        }
    }
    let searcher = Searcher::open(&manager).unwrap();

    let err = searcher
        .search_activities(&SearchRequest::new("recycling"), &store)
        .unwrap_err();
    assert!(
        matches!(err, SearchError::Resolve(ResolveError::NotFound(ref k)) if k.code == "s4"),
        "unexpected error: {err}"
    );
}

#[test]
fn test_query_syntax_error() {
    let manager = helpers::populated_index();
    let searcher = Searcher::open(&manager).unwrap();

    let err = searcher
        .search(&SearchRequest::new("nosuchfield:steel"))
        .unwrap_err();
    assert!(matches!(err, SearchError::QuerySyntax(_)));
}

#[test]
fn test_handle_released_on_error_path() {
    fn failing_search(manager: &IndexManager) -> Result<usize, SearchError> {
        let searcher = Searcher::open(manager)?;
        let hits = searcher.search(&SearchRequest::new("nosuchfield:steel"))?;
        Ok(hits.len())
    }

    let manager = helpers::populated_index();
    assert!(failing_search(&manager).is_err());
    assert_eq!(manager.open_handles(), 0);
}

#[test]
fn test_zero_time_budget_times_out() {
    let manager = helpers::populated_index();
    let searcher = Searcher::open(&manager).unwrap();

    let err = searcher
        .search(&SearchRequest::new("steel").max_duration(Duration::ZERO))
        .unwrap_err();
    assert!(matches!(err, SearchError::Timeout(d) if d == Duration::ZERO));

    let err = searcher
        .search(
            &SearchRequest::new("steel")
                .facet("location")
                .max_duration(Duration::ZERO),
        )
        .unwrap_err();
    assert!(matches!(err, SearchError::Timeout(_)));
}

#[test]
fn test_generous_time_budget_completes() {
    let manager = helpers::populated_index();
    let options = SearchOptions {
        max_duration_ms: Some(60_000),
        ..SearchOptions::default()
    };
    let searcher = Searcher::with_options(&manager, &options).unwrap();

    assert_eq!(searcher.search(&SearchRequest::new("steel")).unwrap().len(), 5);
}

#[test]
fn test_updates_visible_to_new_sessions() {
    let manager = helpers::populated_index();

    let before = Searcher::open(&manager).unwrap();
    manager
        .update_dataset(&serde_json::json!({
            "database": "recycling",
            "code": "s4",
            "name": "aluminium recycling",
            "location": "CH"
        }))
        .unwrap();

    // an open session keeps its snapshot
    assert_eq!(before.search(&SearchRequest::new("steel")).unwrap().len(), 5);
    before.close();

    let after = Searcher::open(&manager).unwrap();
    assert_eq!(after.search(&SearchRequest::new("steel")).unwrap().len(), 4);
    assert_eq!(after.search(&SearchRequest::new("aluminium")).unwrap().len(), 1);
}

#[test]
fn test_on_disk_index_survives_reopen() {
    helpers::init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let config = IndexConfig::in_dir(dir.path().join("search-index"));

    {
        let manager = IndexManager::open(&config).unwrap();
        manager.add_datasets(&helpers::datasets()).unwrap();
    }

    let manager = IndexManager::open(&config).unwrap();
    let searcher = Searcher::open(&manager).unwrap();
    let hits = searcher
        .search(&SearchRequest::new("steel").filter("database", "recycling"))
        .unwrap()
        .into_ranked()
        .unwrap();
    assert_eq!(codes(&hits), vec!["s4"]);
}
