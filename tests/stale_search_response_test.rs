//! Test for the stale search response race
//!
//! Scenario: the user fires a search, then immediately fires another while
//! the first is still in flight. The first (now stale) response arrives
//! LAST because the backend happened to answer out of order.
//!
//! Without a guard the stale response overwrites the newer result set and
//! the user sees results for a query they already abandoned. The fix tags
//! every request with a monotonic sequence number issued by
//! `ResultsModel::begin_search`; a response is applied only when its
//! sequence is still the latest issued.

use frametui::model::{ResultCard, ResultsModel};

fn card(video: &str, frame: u32) -> ResultCard {
    ResultCard {
        video_id: video.to_string(),
        keyframe_id: format!("{:04}", frame),
        frame_index: frame,
        image_url: format!("http://h/static/keyframes/{}/{:04}.jpg", video, frame),
        video_url: format!("http://h/api/video/{}", video),
    }
}

#[test]
fn test_stale_response_is_discarded() {
    let mut results = ResultsModel::new();

    let first = results.begin_search();
    let second = results.begin_search();

    // the newer response lands first and is applied
    assert!(results.accepts(second));
    results.finish(second);
    results.set_single(vec![card("new", 1)]);

    // the stale response arrives afterwards; the guard rejects it before
    // any state is touched
    assert!(!results.accepts(first));

    assert_eq!(results.flat.len(), 1);
    assert_eq!(results.flat[0].video_id, "new");
    assert!(!results.is_searching());
}

#[test]
fn test_stale_finish_does_not_reenable_search_control() {
    let mut results = ResultsModel::new();

    let first = results.begin_search();
    let second = results.begin_search();

    // a stale completion must not clear the in-flight flag of the newer
    // request, or the user could start a third search mid-flight
    results.finish(first);
    assert!(results.is_searching());

    results.finish(second);
    assert!(!results.is_searching());
}

#[test]
fn test_interleaved_shapes_cannot_cross() {
    // a stale temporal response must not overwrite newer single results,
    // and vice versa; the guard is shape-agnostic
    let mut results = ResultsModel::new();

    let temporal_seq = results.begin_search();
    let single_seq = results.begin_search();

    assert!(results.accepts(single_seq));
    results.finish(single_seq);
    results.set_single(vec![card("v1", 5)]);

    assert!(!results.accepts(temporal_seq));
    assert!(!results.is_temporal);
    assert_eq!(results.flat.len(), 1);
}
