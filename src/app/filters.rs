//! Filter panel actions: catalogs, pack/video selection, exclusions

use crate::model::{PickerKind, PickerState};
use crate::services::api::ApiRequest;
use crate::App;

impl App {
    /// Fetch the pick-list catalogs and probe backend readiness at startup
    pub(crate) fn request_startup_data(&mut self) {
        let _ = self.api_tx.send(ApiRequest::GetObjects);
        let _ = self.api_tx.send(ApiRequest::GetPacks);
        let _ = self.api_tx.send(ApiRequest::GetHealth);
    }

    pub(crate) fn open_picker(&mut self, kind: PickerKind) {
        self.model.ui.picker = Some(PickerState { kind, selected: 0 });
    }

    pub(crate) fn close_picker(&mut self) {
        self.model.ui.picker = None;
    }

    /// Items the open picker chooses from
    pub(crate) fn picker_items(&self) -> Vec<String> {
        match self.model.ui.picker.as_ref().map(|p| p.kind) {
            Some(PickerKind::Objects) => self
                .model
                .catalogs
                .matching_objects()
                .into_iter()
                .cloned()
                .collect(),
            Some(PickerKind::Packs) => self.model.catalogs.packs.clone(),
            Some(PickerKind::Videos) => self.model.catalogs.videos.clone(),
            Some(PickerKind::ExcludedVideos) => self.model.filters.excluded_videos.clone(),
            None => Vec::new(),
        }
    }

    /// Toggle the highlighted picker entry in/out of its filter
    pub(crate) fn picker_toggle_selected(&mut self) {
        let Some(picker) = self.model.ui.picker.clone() else {
            return;
        };
        let items = self.picker_items();
        let Some(item) = items.get(picker.selected).cloned() else {
            return;
        };

        match picker.kind {
            PickerKind::Objects => self.model.filters.toggle_object_tag(&item),
            PickerKind::Packs => {
                self.model.filters.toggle_pack(&item);
                self.on_packs_changed();
            }
            PickerKind::Videos => self.model.filters.toggle_video(&item),
            PickerKind::ExcludedVideos => {
                // Enter on an excluded video re-includes it
                self.model.filters.include_video(&item);
                if let Some(p) = self.model.ui.picker.as_mut() {
                    p.selected = p.selected.saturating_sub(1);
                }
            }
        }
    }

    /// Clear everything the open picker manages
    pub(crate) fn picker_clear_all(&mut self) {
        match self.model.ui.picker.as_ref().map(|p| p.kind) {
            Some(PickerKind::Objects) => self.model.filters.object.clear(),
            Some(PickerKind::Packs) => {
                self.model.filters.clear_packs();
                self.on_packs_changed();
            }
            Some(PickerKind::Videos) => self.model.filters.videos.clear(),
            Some(PickerKind::ExcludedVideos) => self.model.filters.clear_excluded(),
            None => {}
        }
        if let Some(p) = self.model.ui.picker.as_mut() {
            p.selected = 0;
        }
    }

    /// Pack selection drives the videos-in-packs catalog: refetch on change,
    /// clear both catalog and selection when no pack remains
    pub(crate) fn on_packs_changed(&mut self) {
        if self.model.filters.packs.is_empty() {
            self.model.catalogs.videos.clear();
            self.model.filters.videos.clear();
            self.model.catalogs.videos_loading = false;
            return;
        }
        self.model.catalogs.videos_loading = true;
        let _ = self.api_tx.send(ApiRequest::GetVideosInPacks {
            packs: self.model.filters.packs.clone(),
        });
    }

    /// Exclude the video of the currently selected result. Idempotent, and
    /// applied to both flat and temporal views at render time.
    pub(crate) fn exclude_selected_video(&mut self) {
        let Some(frame) = self.selected_frame() else {
            return;
        };
        self.model.filters.exclude_video(&frame.video_id);

        // selection may now point past the shrunk list
        let count = self.visible_frames().len();
        if count == 0 {
            self.model.ui.results_selected = 0;
        } else if self.model.ui.results_selected >= count {
            self.model.ui.results_selected = count - 1;
        }
    }
}
