//! Search result state
//!
//! Holds the current result set (single or temporal shape) and the monotonic
//! search sequence used to discard stale responses: a response is only
//! accepted when its sequence matches the latest issued request.

/// One rendered keyframe hit with derived media URLs.
/// URL fields are computed once per response and never mutated after.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultCard {
    pub video_id: String,
    pub keyframe_id: String,
    pub frame_index: u32,
    pub image_url: String,
    pub video_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemporalKeyframe {
    pub keyframe_id: String,
    pub frame_index: u32,
    pub image_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemporalQuerySection {
    pub query: String,
    pub keyframes: Vec<TemporalKeyframe>,
}

/// One video across all sub-queries of a temporal search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemporalVideoCard {
    pub video_id: String,
    pub video_url: String,
    pub query_results: Vec<TemporalQuerySection>,
}

#[derive(Debug, Clone, Default)]
pub struct ResultsModel {
    pub flat: Vec<ResultCard>,
    pub temporal: Vec<TemporalVideoCard>,
    pub is_temporal: bool,
    seq: u64,
    in_flight: bool,
}

impl ResultsModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new search attempt, returning its sequence number
    pub fn begin_search(&mut self) -> u64 {
        self.seq += 1;
        self.in_flight = true;
        self.seq
    }

    /// Whether a response tagged with `seq` is still the latest request
    pub fn accepts(&self, seq: u64) -> bool {
        seq == self.seq
    }

    pub fn is_searching(&self) -> bool {
        self.in_flight
    }

    /// Mark the attempt with this sequence finished (stale ones are ignored)
    pub fn finish(&mut self, seq: u64) {
        if seq == self.seq {
            self.in_flight = false;
        }
    }

    pub fn set_single(&mut self, cards: Vec<ResultCard>) {
        self.flat = cards;
        self.temporal.clear();
        self.is_temporal = false;
    }

    pub fn set_temporal(&mut self, cards: Vec<TemporalVideoCard>) {
        self.temporal = cards;
        self.flat.clear();
        self.is_temporal = true;
    }

    /// Clear both result sets (failed search, or nothing to search for)
    pub fn clear(&mut self) {
        self.flat.clear();
        self.temporal.clear();
    }
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
    fn test_sequence_accepts_only_latest() {
        let mut results = ResultsModel::new();
        let first = results.begin_search();
        let second = results.begin_search();

        assert!(!results.accepts(first));
        assert!(results.accepts(second));
    }

    #[test]
    fn test_stale_finish_keeps_in_flight() {
        let mut results = ResultsModel::new();
        let first = results.begin_search();
        let second = results.begin_search();

        results.finish(first);
        assert!(results.is_searching());

        results.finish(second);
        assert!(!results.is_searching());
    }

    #[test]
    fn test_set_single_clears_temporal() {
        let mut results = ResultsModel::new();
        results.set_temporal(vec![TemporalVideoCard {
            video_id: "v1".to_string(),
            video_url: String::new(),
            query_results: vec![],
        }]);
        assert!(results.is_temporal);

        results.set_single(vec![card("v1", 5)]);
        assert!(!results.is_temporal);
        assert!(results.temporal.is_empty());
        assert_eq!(results.flat.len(), 1);
    }
}
