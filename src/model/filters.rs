//! Filter Model
//!
//! Independent filter values combined into a single search request, plus the
//! backend-fetched catalogs the user picks them from. No persistence; values
//! reset only on explicit clearing.

#[derive(Debug, Clone, Default)]
pub struct Filters {
    pub keyword: String,
    /// Comma-joined object tags, e.g. "dog>0.8, cat"
    pub object: String,
    pub free_text: String,
    pub packs: Vec<String>,
    pub videos: Vec<String>,
    pub excluded_videos: Vec<String>,
}

impl Filters {
    /// True when any filter value would affect a search
    pub fn is_active(&self) -> bool {
        !self.keyword.trim().is_empty()
            || !self.object.trim().is_empty()
            || !self.free_text.trim().is_empty()
            || !self.packs.is_empty()
            || !self.videos.is_empty()
            || !self.excluded_videos.is_empty()
    }

    pub fn toggle_pack(&mut self, pack: &str) {
        if let Some(pos) = self.packs.iter().position(|p| p == pack) {
            self.packs.remove(pos);
        } else {
            self.packs.push(pack.to_string());
        }
    }

    pub fn toggle_video(&mut self, video: &str) {
        if let Some(pos) = self.videos.iter().position(|v| v == video) {
            self.videos.remove(pos);
        } else {
            self.videos.push(video.to_string());
        }
    }

    /// Toggle a tag in the comma-joined object string
    pub fn toggle_object_tag(&mut self, tag: &str) {
        let mut tags: Vec<String> = self
            .object
            .split(',')
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();

        if let Some(pos) = tags.iter().position(|t| t == tag) {
            tags.remove(pos);
        } else {
            tags.push(tag.to_string());
        }
        self.object = tags.join(", ");
    }

    pub fn object_tags(&self) -> Vec<&str> {
        self.object
            .split(',')
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .collect()
    }

    /// Idempotent: excluding an already-excluded video is a no-op
    pub fn exclude_video(&mut self, video_id: &str) {
        if !self.is_excluded(video_id) {
            self.excluded_videos.push(video_id.to_string());
        }
    }

    pub fn include_video(&mut self, video_id: &str) {
        self.excluded_videos.retain(|v| v != video_id);
    }

    pub fn is_excluded(&self, video_id: &str) -> bool {
        self.excluded_videos.iter().any(|v| v == video_id)
    }

    pub fn clear_excluded(&mut self) {
        self.excluded_videos.clear();
    }

    pub fn clear_packs(&mut self) {
        self.packs.clear();
        self.videos.clear();
    }
}

/// Backend-fetched pick lists for the filter panel
#[derive(Debug, Clone, Default)]
pub struct FilterCatalogs {
    pub objects: Vec<String>,
    pub packs: Vec<String>,
    /// Videos contained in the currently selected packs
    pub videos: Vec<String>,
    pub videos_loading: bool,
    /// Client-side substring filter over the objects catalog
    pub object_search: String,
}

impl FilterCatalogs {
    pub fn matching_objects(&self) -> Vec<&String> {
        if self.object_search.trim().is_empty() {
            return self.objects.iter().collect();
        }
        let needle = self.object_search.to_lowercase();
        self.objects
            .iter()
            .filter(|obj| obj.to_lowercase().contains(&needle))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filters_inactive() {
        let filters = Filters::default();
        assert!(!filters.is_active());
    }

    #[test]
    fn test_whitespace_only_is_inactive() {
        let filters = Filters {
            keyword: "   ".to_string(),
            ..Default::default()
        };
        assert!(!filters.is_active());
    }

    #[test]
    fn test_exclusion_is_idempotent() {
        let mut filters = Filters::default();
        filters.exclude_video("L01_V002");
        filters.exclude_video("L01_V002");
        assert_eq!(filters.excluded_videos.len(), 1);

        filters.include_video("L01_V002");
        assert!(filters.excluded_videos.is_empty());
    }

    #[test]
    fn test_object_tag_toggle_round_trip() {
        let mut filters = Filters::default();
        filters.toggle_object_tag("dog");
        filters.toggle_object_tag("cat");
        assert_eq!(filters.object, "dog, cat");

        filters.toggle_object_tag("dog");
        assert_eq!(filters.object, "cat");
    }

    #[test]
    fn test_matching_objects_is_case_insensitive() {
        let catalogs = FilterCatalogs {
            objects: vec!["Dog".to_string(), "cat".to_string(), "doghouse".to_string()],
            object_search: "dog".to_string(),
            ..Default::default()
        };
        assert_eq!(catalogs.matching_objects().len(), 2);
    }
}
