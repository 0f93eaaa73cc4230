//! Result-view helpers: the flattened selection model and thumbnail prefetch

use crate::logic;
use crate::logic::results::SelectableFrame;
use crate::App;

impl App {
    /// Every actionable frame of the current view in navigation order, with
    /// excluded videos already removed. Both flat and temporal views flatten
    /// to this so selection and key handling are uniform.
    pub(crate) fn visible_frames(&self) -> Vec<SelectableFrame> {
        let excluded = &self.model.filters.excluded_videos;
        if self.model.results.is_temporal {
            let visible = logic::results::visible_temporal(&self.model.results.temporal, excluded);
            logic::results::selectable_from_temporal(&visible)
        } else {
            let visible = logic::results::visible_flat(&self.model.results.flat, excluded);
            if self.model.ui.group_by_video {
                // navigation order follows the grouped rendering order
                let grouped = logic::results::group_by_video(&visible);
                let flattened: Vec<_> =
                    grouped.into_iter().flat_map(|(_, items)| items).collect();
                logic::results::selectable_from_flat(&flattened)
            } else {
                logic::results::selectable_from_flat(&visible)
            }
        }
    }

    pub(crate) fn selected_frame(&self) -> Option<SelectableFrame> {
        let frames = self.visible_frames();
        frames.get(self.model.ui.results_selected).cloned()
    }

    /// Move the result selection by `delta` flattened positions and keep it
    /// scrolled into view
    pub(crate) fn move_result_selection(&mut self, delta: i32) {
        let count = self.visible_frames().len();
        if count == 0 {
            self.model.ui.results_selected = 0;
            return;
        }
        let current = self.model.ui.results_selected as i32;
        let next = (current + delta).clamp(0, count as i32 - 1) as usize;
        self.model.ui.results_selected = next;

        let ui = &mut self.model.ui;
        ui.results_scroll_row = logic::layout::scroll_for_selection(
            next,
            ui.grid_cols,
            ui.results_scroll_row,
            ui.viewport_rows,
        );
        self.ensure_result_images();
    }

    /// Clamp selection after the result set changed
    pub(crate) fn reset_result_selection(&mut self) {
        self.model.ui.results_selected = 0;
        self.model.ui.results_scroll_row = 0;
        self.ensure_result_images();
    }

    /// Queue thumbnail fetches for the frames around the current viewport.
    /// Fetching is lazy so a 1000-hit result set does not stampede the
    /// backend; scrolling tops the window up.
    pub(crate) fn ensure_result_images(&mut self) {
        let frames = self.visible_frames();
        let cols = self.model.ui.grid_cols.max(1) as usize;
        let start = self.model.ui.results_scroll_row * cols;
        let rows = self.model.ui.viewport_rows + 1;
        let window = frames.iter().skip(start).take(cols * rows.max(2));

        let urls: Vec<String> = window.map(|f| f.image_url.clone()).collect();
        for url in urls {
            self.request_image(url);
        }
    }
}
