//! Search request construction and classification

use crate::api::{SearchFilters, SearchRequest};
use crate::model::{Filters, SearchParams};

/// A search is only worth a network call when there is at least one
/// non-empty query or an active filter; otherwise results are just cleared.
pub fn should_search(queries: &[String], filters: &Filters) -> bool {
    !queries.is_empty() || filters.is_active()
}

/// More than one non-empty query makes the search temporal
pub fn is_temporal(queries: &[String]) -> bool {
    queries.len() > 1
}

pub fn build_request(queries: Vec<String>, params: &SearchParams, filters: &Filters) -> SearchRequest {
    SearchRequest {
        queries,
        retriever: params.retriever.as_str().to_string(),
        filters: SearchFilters {
            keyword: filters.keyword.trim().to_string(),
            object: filters.object.trim().to_string(),
            packs: filters.packs.clone(),
            videos: filters.videos.clone(),
            excluded_videos: filters.excluded_videos.clone(),
            free_text: filters.free_text.trim().to_string(),
        },
        top_k_per_query: params.top_k_per_query,
        top_k: params.top_k,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_queries_no_filters_skips() {
        let filters = Filters::default();
        assert!(!should_search(&[], &filters));
    }

    #[test]
    fn test_filters_alone_allow_search() {
        let filters = Filters {
            keyword: "park".to_string(),
            ..Default::default()
        };
        assert!(should_search(&[], &filters));
    }

    #[test]
    fn test_temporal_classification() {
        assert!(!is_temporal(&[]));
        assert!(!is_temporal(&["a".to_string()]));
        assert!(is_temporal(&["a".to_string(), "b".to_string()]));
    }

    #[test]
    fn test_request_carries_params() {
        let params = SearchParams::new();
        let filters = Filters {
            keyword: " park ".to_string(),
            ..Default::default()
        };
        let req = build_request(vec!["a dog".to_string()], &params, &filters);
        assert_eq!(req.retriever, "clip");
        assert_eq!(req.top_k_per_query, 10);
        assert_eq!(req.filters.keyword, "park");
    }
}
