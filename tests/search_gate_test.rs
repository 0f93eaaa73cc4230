//! Search gating and classification
//!
//! Two invariants feed the coordinator: an empty query list with no active
//! filter short-circuits (no request is built at all), and the temporal
//! flag is purely a function of the non-empty query count.

use frametui::logic::search;
use frametui::model::{Filters, QueryList, SearchParams};

#[test]
fn test_blank_queries_and_no_filters_short_circuit() {
    let mut queries = QueryList::new();
    let first = queries.items()[0].id;
    queries.update(first, "   ".to_string());
    let blank = queries.add();
    queries.update(blank, String::new());

    let filters = Filters::default();
    assert!(!search::should_search(&queries.active_texts(), &filters));
}

#[test]
fn test_active_filter_forces_search_without_queries() {
    let queries = QueryList::new();
    let filters = Filters {
        packs: vec!["pack-a".to_string()],
        ..Default::default()
    };
    assert!(search::should_search(&queries.active_texts(), &filters));
}

#[test]
fn test_temporal_iff_more_than_one_nonempty_query() {
    let mut queries = QueryList::new();
    let first = queries.items()[0].id;

    queries.update(first, "a dog".to_string());
    assert!(!search::is_temporal(&queries.active_texts()));

    // a second row that is blank does not make the search temporal
    let blank = queries.add();
    assert!(!search::is_temporal(&queries.active_texts()));

    queries.update(blank, "the dog runs away".to_string());
    assert!(search::is_temporal(&queries.active_texts()));
}

#[test]
fn test_request_payload_shape() {
    let mut queries = QueryList::new();
    let first = queries.items()[0].id;
    queries.update(first, "  a dog playing fetch ".to_string());

    let mut params = SearchParams::new();
    params.set_top_k_per_query(25);
    params.set_top_k(200);

    let mut filters = Filters {
        keyword: "park".to_string(),
        free_text: "công viên".to_string(),
        ..Default::default()
    };
    filters.exclude_video("L01_V002");

    let request = search::build_request(queries.active_texts(), &params, &filters);
    assert_eq!(request.queries, vec!["a dog playing fetch"]);
    assert_eq!(request.retriever, "clip");
    assert_eq!(request.top_k_per_query, 25);
    assert_eq!(request.top_k, 200);
    assert_eq!(request.filters.excluded_videos, vec!["L01_V002"]);
    assert_eq!(request.filters.free_text, "công viên");

    let json = serde_json::to_value(&request).unwrap();
    assert!(json.get("queries").is_some());
    assert!(json["filters"].get("excluded_videos").is_some());
    // the free-text filter keeps its backend wire name
    assert_eq!(json["filters"]["vietnamese_query"], "công viên");
    assert!(json["filters"].get("free_text").is_none());
}
