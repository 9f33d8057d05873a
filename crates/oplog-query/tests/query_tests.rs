//! Composed-query contract tests.
//!
//! The emitted query string is an external interface (operators copy/paste
//! it), so clause ordering and escaping are pinned byte-exact here.

use oplog_query::{ACCELERATOR_FIELD, FilterSet, QueryBuilder};

fn build(filters: FilterSet) -> String {
    QueryBuilder::new(filters).build().to_query()
}

#[test]
fn no_accelerator_selects_the_production_job_only() {
    let query = build(FilterSet::new());
    assert!(query.starts_with(r#"{job="accelerator"} "#));
    assert!(!query.contains("accelerator-dev"));
}

#[test]
fn single_non_dev_accelerator_still_selects_production() {
    let mut filters = FilterSet::new();
    filters.add(ACCELERATOR_FIELD, "LCLS");
    let query = build(filters);
    assert!(query.starts_with(r#"{job="accelerator"} "#));
    assert!(!query.contains("accelerator-dev"));
}

#[test]
fn exactly_dev_selects_the_dev_job_only() {
    let mut filters = FilterSet::new();
    filters.add(ACCELERATOR_FIELD, "DEV");
    let query = build(filters);
    assert!(query.starts_with(r#"{job="accelerator-dev"} "#));
    assert!(!query.contains("job=~"));
}

#[test]
fn dev_plus_others_selects_both_jobs_via_alternation() {
    let mut filters = FilterSet::new();
    filters.add(ACCELERATOR_FIELD, "LCLS");
    filters.add(ACCELERATOR_FIELD, "DEV");
    let query = build(filters);
    assert!(query.starts_with(r#"{job=~"accelerator|accelerator-dev"} "#));
}

#[test]
fn accelerator_is_also_filtered_as_its_own_field() {
    let mut filters = FilterSet::new();
    filters.add(ACCELERATOR_FIELD, "LCLS");
    let query = build(filters);
    assert!(query.contains(r#"|= "\"accelerator\": \"LCLS\"""#));
}

#[test]
fn multi_value_field_emits_an_alternation_and_no_exact_match() {
    let mut filters = FilterSet::new();
    filters.add("facility", "CRYO");
    filters.add("facility", "rf");
    let query = build(filters);
    assert!(query.contains(r#"|~ "\"facility\": \"(CRYO|rf)\"""#));
    assert!(!query.contains(r#"|= "\"facility\""#));
}

#[test]
fn default_query_carries_all_three_suppressions_last() {
    let query = build(FilterSet::new());
    assert_eq!(
        query,
        concat!(
            r#"{job="accelerator"}"#,
            r#" !~ "[A-Z]{2,4}:\\S+ changed from""#,
            r#" != "F2:WATCHER""#,
            r#" !~ "new=\\S+ old=""#,
        )
    );
}

#[test]
fn changelog_opt_in_keeps_exactly_the_other_two_suppressions() {
    let query = QueryBuilder::new(FilterSet::new())
        .show_changelog(true)
        .build()
        .to_query();
    assert!(!query.contains("changed from"));
    assert!(query.contains(r#"!= "F2:WATCHER""#));
    assert!(query.contains(r#"!~ "new=\\S+ old=""#));
}

#[test]
fn full_composition_preserves_clause_ordering() {
    let mut filters = FilterSet::new();
    filters.add("facility", "CRYO");
    filters.add("origin", "MCC");
    let query = QueryBuilder::new(filters)
        .include(Some("quench".to_string()))
        .exclude(Some("heartbeat".to_string()))
        .build()
        .to_query();

    assert_eq!(
        query,
        concat!(
            r#"{job="accelerator"}"#,
            r#" |= "\"facility\": \"CRYO\"""#,
            r#" |= "\"origin\": \"MCC\"""#,
            r#" |~ "quench""#,
            r#" !~ "heartbeat""#,
            r#" !~ "[A-Z]{2,4}:\\S+ changed from""#,
            r#" != "F2:WATCHER""#,
            r#" !~ "new=\\S+ old=""#,
        )
    );
}
