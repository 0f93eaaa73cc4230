//! Result post-processing: media URL derivation, exclusion, grouping
//!
//! URLs are derived exactly once per response; everything downstream is a
//! pure function of the stored cards.

use crate::api::{SearchHit, TemporalVideoHit};
use crate::model::{
    ResultCard, TemporalKeyframe, TemporalQuerySection, TemporalVideoCard,
};

pub fn image_url(keyframe_base: &str, video_id: &str, keyframe_id: &str) -> String {
    format!("{}/{}/{}.jpg", keyframe_base, video_id, keyframe_id)
}

pub fn video_url(api_base: &str, video_id: &str) -> String {
    format!("{}/api/video/{}", api_base, video_id)
}

pub fn single_cards(hits: Vec<SearchHit>, api_base: &str, keyframe_base: &str) -> Vec<ResultCard> {
    hits.into_iter()
        .map(|hit| ResultCard {
            image_url: image_url(keyframe_base, &hit.video_id, &hit.keyframe_id),
            video_url: video_url(api_base, &hit.video_id),
            video_id: hit.video_id,
            keyframe_id: hit.keyframe_id,
            frame_index: hit.frame_index,
        })
        .collect()
}

pub fn temporal_cards(
    hits: Vec<TemporalVideoHit>,
    api_base: &str,
    keyframe_base: &str,
) -> Vec<TemporalVideoCard> {
    hits.into_iter()
        .map(|hit| TemporalVideoCard {
            video_url: video_url(api_base, &hit.video_id),
            query_results: hit
                .query_results
                .into_iter()
                .map(|qr| TemporalQuerySection {
                    query: qr.query,
                    keyframes: qr
                        .keyframes
                        .into_iter()
                        .map(|kf| TemporalKeyframe {
                            image_url: image_url(keyframe_base, &hit.video_id, &kf.keyframe_id),
                            keyframe_id: kf.keyframe_id,
                            frame_index: kf.frame_index,
                        })
                        .collect(),
                })
                .collect(),
            video_id: hit.video_id,
        })
        .collect()
}

/// Flat view with excluded videos removed; applied before grouping and
/// before any "has results" check
pub fn visible_flat(cards: &[ResultCard], excluded: &[String]) -> Vec<ResultCard> {
    cards
        .iter()
        .filter(|card| !excluded.iter().any(|v| v == &card.video_id))
        .cloned()
        .collect()
}

pub fn visible_temporal(
    cards: &[TemporalVideoCard],
    excluded: &[String],
) -> Vec<TemporalVideoCard> {
    cards
        .iter()
        .filter(|card| !excluded.iter().any(|v| v == &card.video_id))
        .cloned()
        .collect()
}

/// Partition by video id: groups keep first-seen order, items keep their
/// original order within a group
pub fn group_by_video(cards: &[ResultCard]) -> Vec<(String, Vec<ResultCard>)> {
    let mut groups: Vec<(String, Vec<ResultCard>)> = Vec::new();
    for card in cards {
        match groups.iter_mut().find(|(id, _)| id == &card.video_id) {
            Some((_, items)) => items.push(card.clone()),
            None => groups.push((card.video_id.clone(), vec![card.clone()])),
        }
    }
    groups
}

/// One actionable frame of the results view, in navigation order. Both the
/// flat and temporal views flatten to this so selection and key handling
/// are uniform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectableFrame {
    pub video_id: String,
    pub keyframe_id: String,
    pub frame_index: u32,
    pub image_url: String,
    pub video_url: String,
}

pub fn selectable_from_flat(cards: &[ResultCard]) -> Vec<SelectableFrame> {
    cards
        .iter()
        .map(|card| SelectableFrame {
            video_id: card.video_id.clone(),
            keyframe_id: card.keyframe_id.clone(),
            frame_index: card.frame_index,
            image_url: card.image_url.clone(),
            video_url: card.video_url.clone(),
        })
        .collect()
}

pub fn selectable_from_temporal(cards: &[TemporalVideoCard]) -> Vec<SelectableFrame> {
    let mut frames = Vec::new();
    for card in cards {
        for section in &card.query_results {
            for kf in &section.keyframes {
                frames.push(SelectableFrame {
                    video_id: card.video_id.clone(),
                    keyframe_id: kf.keyframe_id.clone(),
                    frame_index: kf.frame_index,
                    image_url: kf.image_url.clone(),
                    video_url: card.video_url.clone(),
                });
            }
        }
    }
    frames
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(video: &str, frame: u32) -> ResultCard {
        ResultCard {
            video_id: video.to_string(),
            keyframe_id: format!("{:04}", frame),
            frame_index: frame,
            image_url: String::new(),
            video_url: String::new(),
        }
    }

    #[test]
    fn test_url_derivation() {
        assert_eq!(
            image_url("http://h/static/keyframes", "L01_V001", "0042"),
            "http://h/static/keyframes/L01_V001/0042.jpg"
        );
        assert_eq!(
            video_url("http://h", "L01_V001"),
            "http://h/api/video/L01_V001"
        );
    }

    #[test]
    fn test_exclusion_removes_all_entries() {
        let cards = vec![card("v1", 1), card("v2", 2), card("v1", 3), card("v2", 4)];
        let excluded = vec!["v2".to_string()];
        let visible = visible_flat(&cards, &excluded);
        assert_eq!(visible.len(), 2);
        assert!(visible.iter().all(|c| c.video_id == "v1"));

        // double exclusion has the same effect as one
        let excluded_twice = vec!["v2".to_string(), "v2".to_string()];
        assert_eq!(visible_flat(&cards, &excluded_twice), visible);
    }

    #[test]
    fn test_grouping_preserves_first_seen_order() {
        let cards = vec![card("v2", 1), card("v1", 2), card("v2", 3), card("v1", 4)];
        let groups = group_by_video(&cards);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "v2");
        assert_eq!(groups[1].0, "v1");
        assert_eq!(
            groups[0].1.iter().map(|c| c.frame_index).collect::<Vec<_>>(),
            vec![1, 3]
        );
    }

    #[test]
    fn test_temporal_flatten_order() {
        let cards = vec![TemporalVideoCard {
            video_id: "v1".to_string(),
            video_url: "u".to_string(),
            query_results: vec![
                TemporalQuerySection {
                    query: "first".to_string(),
                    keyframes: vec![TemporalKeyframe {
                        keyframe_id: "a".to_string(),
                        frame_index: 10,
                        image_url: String::new(),
                    }],
                },
                TemporalQuerySection {
                    query: "second".to_string(),
                    keyframes: vec![TemporalKeyframe {
                        keyframe_id: "b".to_string(),
                        frame_index: 20,
                        image_url: String::new(),
                    }],
                },
            ],
        }];
        let frames = selectable_from_temporal(&cards);
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].frame_index, 10);
        assert_eq!(frames[1].frame_index, 20);
    }
}
