//! Modal stack management and overlay data loading

use crate::model::{KeyframeBrowser, Modal, PlayerState};
use crate::services::api::{ApiRequest, KeyframePurpose};
use crate::services::images::{spawn_image_fetch, ImageState};
use crate::App;

impl App {
    pub(crate) fn open_image(&mut self, url: String) {
        self.request_image(url.clone());
        self.model.modals.push(Modal::Image { url });
    }

    /// Open the frame scrubber for one video, seeked to `start_frame` once
    /// fps arrives. The modal staging area is primed with the launching
    /// card's identifiers.
    pub(crate) fn open_video(&mut self, video_id: String, video_url: String, start_frame: u32) {
        self.pause_player();

        self.model.submission.modal_staged.video_id = video_id.clone();
        self.model.submission.modal_staged.frame_spec = start_frame.to_string();
        self.model.submission.modal_staged.note.clear();

        self.model.modals.push(Modal::Video(PlayerState::new(
            video_id.clone(),
            video_url,
            start_frame,
        )));

        let _ = self.api_tx.send(ApiRequest::GetVideoInfo {
            video_id: video_id.clone(),
        });
        let _ = self.api_tx.send(ApiRequest::GetVideoKeyframes {
            video_id,
            purpose: KeyframePurpose::Player,
        });
    }

    /// Open the full keyframe browser for one video with cleared staging
    pub(crate) fn open_keyframes(&mut self, video_id: String) {
        self.pause_player();
        self.model.submission.modal_staged.clear();

        self.model
            .modals
            .push(Modal::Keyframes(KeyframeBrowser::new(video_id.clone())));
        let _ = self.api_tx.send(ApiRequest::GetVideoKeyframes {
            video_id,
            purpose: KeyframePurpose::Browser,
        });
    }

    /// Pop the top overlay; the parent underneath keeps its state. Closing
    /// a video overlay always releases the playback poll.
    pub(crate) fn close_top_modal(&mut self) {
        if let Some(Modal::Video(_)) = self.model.modals.top() {
            self.stop_player_poll();
        }
        self.model.modals.pop();
    }

    /// Queue a thumbnail fetch unless it is already loading or loaded
    pub(crate) fn request_image(&mut self, url: String) {
        let Some(picker) = self.image_picker.clone() else {
            return; // previews disabled or terminal without graphics support
        };
        if self.image_state_map.contains_key(&url) {
            return;
        }
        self.image_state_map.insert(url.clone(), ImageState::Loading);
        spawn_image_fetch(self.client.clone(), url, picker, self.image_tx.clone());
    }

    /// Queue thumbnails for the browser window around the selection
    pub(crate) fn ensure_browser_images(&mut self) {
        let Some(browser) = self.model.modals.browser() else {
            return;
        };
        let window = crate::ui::keyframe_modal::BROWSER_COLS as usize * 8;
        let start = browser.selected.saturating_sub(window / 2);

        let urls: Vec<String> = browser
            .keyframes
            .iter()
            .skip(start)
            .take(window)
            .map(|kf| {
                crate::logic::results::image_url(&self.keyframe_base, &browser.video_id, &kf.keyframe_id)
            })
            .collect();
        for url in urls {
            self.request_image(url);
        }
    }
}
