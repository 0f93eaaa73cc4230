//! Frame scrubber control
//!
//! Native sources preview the keyframe nearest the playhead; embed sources
//! run the same contract against a simulated clock. Either way playback is
//! driven by a cancellable poll whose guard lives exactly as long as
//! playback (dropped on pause, close, or end of video).

use std::time::Duration;

use crate::logic::player;
use crate::services::poll::spawn_player_poll;
use crate::App;

/// Embedded-player position poll cadence
pub const PLAYER_POLL_INTERVAL: Duration = Duration::from_millis(250);

impl App {
    pub(crate) fn toggle_playback(&mut self) {
        let now_playing = match self.model.modals.player_mut() {
            Some(state) if state.can_step() => {
                state.playing = !state.playing;
                Some(state.playing)
            }
            _ => None,
        };
        match now_playing {
            Some(true) => {
                self.player_poll = Some(spawn_player_poll(
                    self.player_tick_tx.clone(),
                    PLAYER_POLL_INTERVAL,
                ));
            }
            Some(false) => self.stop_player_poll(),
            None => {}
        }
    }

    /// Frame-accurate stepping always pauses first
    pub(crate) fn step_player(&mut self, direction: i32) {
        self.pause_player();
        let Some(state) = self.model.modals.player_mut() else {
            return;
        };
        let Some(fps) = state.fps else {
            return;
        };
        let duration = state.duration();
        state.current_time = player::step_time(state.current_time, fps, duration, direction);
        self.ensure_player_image();
    }

    /// `floor(current_time * fps)` into the modal staging area
    pub(crate) fn select_current_frame(&mut self) {
        let Some(state) = self.model.modals.player() else {
            return;
        };
        if state.fps.is_none() {
            return;
        }
        let video_id = state.video_id.clone();
        let frame = state.current_frame().to_string();
        self.model.submission.populate_modal(&video_id, &frame);
    }

    pub(crate) fn pause_player(&mut self) {
        if let Some(state) = self.model.modals.player_mut() {
            state.playing = false;
        }
        self.stop_player_poll();
    }

    /// Drop the poll guard, aborting the interval task
    pub(crate) fn stop_player_poll(&mut self) {
        self.player_poll = None;
    }

    /// One poll tick of simulated playback: advance the clock, stop at the
    /// end, keep the preview frame current
    pub(crate) fn handle_player_tick(&mut self, elapsed: f64) {
        let mut finished = false;
        {
            let Some(state) = self.model.modals.player_mut() else {
                // overlay closed between tick and delivery
                self.stop_player_poll();
                return;
            };
            if !state.playing {
                return;
            }
            let duration = state.duration();
            state.current_time = player::advance_time(state.current_time, elapsed, duration);
            if duration > 0.0 && state.current_time >= duration {
                state.playing = false;
                finished = true;
            }
        }
        if finished {
            self.stop_player_poll();
        }
        self.ensure_player_image();
    }

    /// Queue the thumbnail for the keyframe under the playhead
    pub(crate) fn ensure_player_image(&mut self) {
        let Some(state) = self.model.modals.player() else {
            return;
        };
        let Some(kf) = state.nearest_keyframe() else {
            return;
        };
        let url = crate::logic::results::image_url(
            &self.keyframe_base,
            &state.video_id,
            &kf.keyframe_id,
        );
        self.request_image(url);
    }
}
