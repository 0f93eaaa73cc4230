//! Excluded-videos filtering
//!
//! Exclusion is applied before grouping/rendering and before the "has any
//! results" check, for flat, grouped, and temporal views alike. Excluding
//! an already-excluded id is a no-op.

use frametui::logic::results;
use frametui::model::{
    Filters, ResultCard, TemporalKeyframe, TemporalQuerySection, TemporalVideoCard,
};

fn card(video: &str, frame: u32) -> ResultCard {
    ResultCard {
        video_id: video.to_string(),
        keyframe_id: format!("{:04}", frame),
        frame_index: frame,
        image_url: String::new(),
        video_url: String::new(),
    }
}

fn temporal_card(video: &str, frames: &[u32]) -> TemporalVideoCard {
    TemporalVideoCard {
        video_id: video.to_string(),
        video_url: String::new(),
        query_results: vec![TemporalQuerySection {
            query: "q".to_string(),
            keyframes: frames
                .iter()
                .map(|f| TemporalKeyframe {
                    keyframe_id: format!("{:04}", f),
                    frame_index: *f,
                    image_url: String::new(),
                })
                .collect(),
        }],
    }
}

#[test]
fn test_exclusion_hits_flat_and_grouped_views() {
    let cards = vec![card("v1", 1), card("v2", 2), card("v1", 3), card("v2", 4)];
    let mut filters = Filters::default();
    filters.exclude_video("v2");

    let visible = results::visible_flat(&cards, &filters.excluded_videos);
    assert_eq!(visible.len(), 2);
    assert!(visible.iter().all(|c| c.video_id != "v2"));

    let groups = results::group_by_video(&visible);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].0, "v1");
}

#[test]
fn test_exclusion_hits_temporal_view() {
    let cards = vec![temporal_card("v1", &[1, 2]), temporal_card("v2", &[3])];
    let excluded = vec!["v2".to_string()];

    let visible = results::visible_temporal(&cards, &excluded);
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].video_id, "v1");

    let frames = results::selectable_from_temporal(&visible);
    assert_eq!(frames.len(), 2);
}

#[test]
fn test_double_exclusion_equals_single() {
    let cards = vec![card("v1", 1), card("v2", 2)];
    let mut filters = Filters::default();

    filters.exclude_video("v2");
    let once = results::visible_flat(&cards, &filters.excluded_videos);

    filters.exclude_video("v2");
    let twice = results::visible_flat(&cards, &filters.excluded_videos);

    assert_eq!(once, twice);
    assert_eq!(filters.excluded_videos.len(), 1);
}

#[test]
fn test_excluding_everything_empties_the_view() {
    // the "has any results" check runs on the post-exclusion view, so a
    // fully excluded result set reads as no results
    let cards = vec![card("v1", 1), card("v1", 2)];
    let excluded = vec!["v1".to_string()];
    assert!(results::visible_flat(&cards, &excluded).is_empty());
}

#[test]
fn test_reinclusion_restores_entries() {
    let cards = vec![card("v1", 1), card("v2", 2)];
    let mut filters = Filters::default();
    filters.exclude_video("v2");
    filters.include_video("v2");
    assert_eq!(
        results::visible_flat(&cards, &filters.excluded_videos).len(),
        2
    );
}
