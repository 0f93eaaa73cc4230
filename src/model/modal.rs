//! Modal stack and overlay state
//!
//! A true LIFO stack: push on open, pop on close, only the top overlay is
//! rendered and interactive, and a parent overlay's state survives untouched
//! beneath the top.

use crate::api::KeyframeRef;
use crate::logic::player;

/// Where the scrubber's frames come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerSource {
    /// Backend-streamed video; frames are previewed via the keyframe nearest
    /// to the playhead
    Native { stream_url: String },
    /// External platform embed; playback is approximated by a polled clock
    Embed { watch_id: String },
    /// Metadata arrived but was unusable (e.g. unparseable watch URL)
    Failed { error: String },
}

/// Frame-accurate scrubber state for one video
#[derive(Debug, Clone)]
pub struct PlayerState {
    pub video_id: String,
    pub video_url: String,
    /// Frame the overlay was opened on; seeked to once fps is known
    pub start_frame: u32,
    pub fps: Option<f64>,
    pub source: Option<PlayerSource>,
    pub keyframes: Vec<KeyframeRef>,
    pub current_time: f64,
    pub playing: bool,
    pub loading: bool,
}

impl PlayerState {
    pub fn new(video_id: String, video_url: String, start_frame: u32) -> Self {
        Self {
            video_id,
            video_url,
            start_frame,
            fps: None,
            source: None,
            keyframes: Vec::new(),
            current_time: 0.0,
            playing: false,
            loading: true,
        }
    }

    /// Estimated from the last keyframe index; 0 until metadata arrives
    pub fn duration(&self) -> f64 {
        match self.fps {
            Some(fps) => player::duration_from_keyframes(&self.keyframes, fps),
            None => 0.0,
        }
    }

    pub fn current_frame(&self) -> u32 {
        player::frame_at(self.current_time, self.fps.unwrap_or(0.0))
    }

    pub fn nearest_keyframe(&self) -> Option<&KeyframeRef> {
        player::nearest_keyframe(&self.keyframes, self.current_frame())
    }

    /// Stepping is only meaningful once fps is known and the source loaded
    pub fn can_step(&self) -> bool {
        self.fps.is_some() && !matches!(self.source, Some(PlayerSource::Failed { .. }))
    }
}

/// Full keyframe list browser for one video
#[derive(Debug, Clone)]
pub struct KeyframeBrowser {
    pub video_id: String,
    pub keyframes: Vec<KeyframeRef>,
    pub loading: bool,
    pub error: Option<String>,
    pub selected: usize,
}

impl KeyframeBrowser {
    pub fn new(video_id: String) -> Self {
        Self {
            video_id,
            keyframes: Vec::new(),
            loading: true,
            error: None,
            selected: 0,
        }
    }

    pub fn selected_keyframe(&self) -> Option<&KeyframeRef> {
        self.keyframes.get(self.selected)
    }
}

#[derive(Debug, Clone)]
pub enum Modal {
    Image { url: String },
    Video(PlayerState),
    Keyframes(KeyframeBrowser),
}

#[derive(Debug, Clone, Default)]
pub struct ModalStack {
    stack: Vec<Modal>,
}

impl ModalStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        !self.stack.is_empty()
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn push(&mut self, modal: Modal) {
        self.stack.push(modal);
    }

    pub fn pop(&mut self) -> Option<Modal> {
        self.stack.pop()
    }

    pub fn top(&self) -> Option<&Modal> {
        self.stack.last()
    }

    pub fn top_mut(&mut self) -> Option<&mut Modal> {
        self.stack.last_mut()
    }

    /// The top overlay's player, when the top is a video scrubber
    pub fn player_mut(&mut self) -> Option<&mut PlayerState> {
        match self.stack.last_mut() {
            Some(Modal::Video(player)) => Some(player),
            _ => None,
        }
    }

    pub fn player(&self) -> Option<&PlayerState> {
        match self.stack.last() {
            Some(Modal::Video(player)) => Some(player),
            _ => None,
        }
    }

    pub fn browser_mut(&mut self) -> Option<&mut KeyframeBrowser> {
        match self.stack.last_mut() {
            Some(Modal::Keyframes(browser)) => Some(browser),
            _ => None,
        }
    }

    pub fn browser(&self) -> Option<&KeyframeBrowser> {
        match self.stack.last() {
            Some(Modal::Keyframes(browser)) => Some(browser),
            _ => None,
        }
    }

    /// Any player for this video, top or buried: metadata responses still
    /// apply when another overlay was pushed on top in the meantime
    pub fn find_player_mut(&mut self, video_id: &str) -> Option<&mut PlayerState> {
        self.stack.iter_mut().rev().find_map(|modal| match modal {
            Modal::Video(player) if player.video_id == video_id => Some(player),
            _ => None,
        })
    }

    pub fn find_browser_mut(&mut self, video_id: &str) -> Option<&mut KeyframeBrowser> {
        self.stack.iter_mut().rev().find_map(|modal| match modal {
            Modal::Keyframes(browser) if browser.video_id == video_id => Some(browser),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stack_is_lifo() {
        let mut stack = ModalStack::new();
        stack.push(Modal::Keyframes(KeyframeBrowser::new("v1".to_string())));
        stack.push(Modal::Image {
            url: "http://x/kf.jpg".to_string(),
        });

        assert!(matches!(stack.top(), Some(Modal::Image { .. })));
        stack.pop();
        assert!(matches!(stack.top(), Some(Modal::Keyframes(_))));
        stack.pop();
        assert!(!stack.is_open());
    }

    #[test]
    fn test_parent_state_survives_child() {
        let mut stack = ModalStack::new();
        let mut browser = KeyframeBrowser::new("v1".to_string());
        browser.selected = 7;
        stack.push(Modal::Keyframes(browser));
        stack.push(Modal::Image {
            url: "http://x/kf.jpg".to_string(),
        });

        // browser accessors only see the top
        assert!(stack.browser().is_none());

        stack.pop();
        assert_eq!(stack.browser().map(|b| b.selected), Some(7));
    }

    #[test]
    fn test_player_accessor_is_top_only() {
        let mut stack = ModalStack::new();
        stack.push(Modal::Video(PlayerState::new(
            "v1".to_string(),
            "http://x/api/video/v1".to_string(),
            0,
        )));
        stack.push(Modal::Image {
            url: "http://x/kf.jpg".to_string(),
        });
        assert!(stack.player_mut().is_none());
    }
}
