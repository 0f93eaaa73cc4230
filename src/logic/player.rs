//! Frame/time arithmetic for the video scrubber and embed-clock player

use anyhow::{anyhow, Result};

use crate::api::KeyframeRef;

/// Step one frame in either direction, clamped to [0, duration]
pub fn step_time(current: f64, fps: f64, duration: f64, direction: i32) -> f64 {
    if fps <= 0.0 {
        return current;
    }
    let next = current + direction as f64 / fps;
    next.clamp(0.0, duration.max(0.0))
}

/// Advance a simulated playback clock, clamped to duration
pub fn advance_time(current: f64, elapsed: f64, duration: f64) -> f64 {
    (current + elapsed).clamp(0.0, duration.max(0.0))
}

/// The frame under the playhead
pub fn frame_at(current: f64, fps: f64) -> u32 {
    if fps <= 0.0 {
        return 0;
    }
    (current * fps).floor() as u32
}

pub fn time_for_frame(frame_index: u32, fps: f64) -> f64 {
    if fps <= 0.0 {
        return 0.0;
    }
    frame_index as f64 / fps
}

/// Duration estimated from the last keyframe index. The backend exposes no
/// duration; for clamping a keyframe scrubber this is close enough.
pub fn duration_from_keyframes(keyframes: &[KeyframeRef], fps: f64) -> f64 {
    keyframes
        .iter()
        .map(|kf| kf.frame_index)
        .max()
        .map(|last| time_for_frame(last, fps))
        .unwrap_or(0.0)
}

/// Last keyframe at or before `frame`, falling back to the first
pub fn nearest_keyframe(keyframes: &[KeyframeRef], frame: u32) -> Option<&KeyframeRef> {
    keyframes
        .iter()
        .filter(|kf| kf.frame_index <= frame)
        .max_by_key(|kf| kf.frame_index)
        .or_else(|| keyframes.iter().min_by_key(|kf| kf.frame_index))
}

/// Extract the video id from an external platform watch URL.
/// Accepted shapes: `watch?v=ID`, `youtu.be/ID`, `/embed/ID`.
pub fn parse_watch_id(url: &str) -> Result<String> {
    let url = url.trim();
    if url.is_empty() {
        return Err(anyhow!("Empty watch URL"));
    }

    if let Some(idx) = url.find("watch?v=") {
        let rest = &url[idx + "watch?v=".len()..];
        let id: String = rest
            .chars()
            .take_while(|c| *c != '&' && *c != '#')
            .collect();
        if !id.is_empty() {
            return Ok(id);
        }
    }

    for marker in ["youtu.be/", "/embed/"] {
        if let Some(idx) = url.find(marker) {
            let rest = &url[idx + marker.len()..];
            let id: String = rest
                .chars()
                .take_while(|c| *c != '?' && *c != '&' && *c != '/' && *c != '#')
                .collect();
            if !id.is_empty() {
                return Ok(id);
            }
        }
    }

    Err(anyhow!("Unrecognized watch URL: {}", url))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kf(id: &str, frame: u32) -> KeyframeRef {
        serde_json::from_str(&format!(
            r#"{{"keyframe_id": "{}", "frame_index": {}}}"#,
            id, frame
        ))
        .unwrap()
    }

    #[test]
    fn test_step_clamps_to_bounds() {
        assert_eq!(step_time(0.0, 25.0, 10.0, -1), 0.0);
        assert_eq!(step_time(10.0, 25.0, 10.0, 1), 10.0);
        let stepped = step_time(1.0, 25.0, 10.0, 1);
        assert!((stepped - 1.04).abs() < 1e-9);
    }

    #[test]
    fn test_frame_at_floors() {
        assert_eq!(frame_at(1.99, 25.0), 49);
        assert_eq!(frame_at(2.0, 25.0), 50);
        assert_eq!(frame_at(5.0, 0.0), 0);
    }

    #[test]
    fn test_duration_from_keyframes() {
        let kfs = vec![kf("a", 0), kf("b", 250), kf("c", 100)];
        assert_eq!(duration_from_keyframes(&kfs, 25.0), 10.0);
        assert_eq!(duration_from_keyframes(&[], 25.0), 0.0);
    }

    #[test]
    fn test_nearest_keyframe_prefers_at_or_before() {
        let kfs = vec![kf("a", 0), kf("b", 100), kf("c", 200)];
        assert_eq!(nearest_keyframe(&kfs, 150).unwrap().frame_index, 100);
        assert_eq!(nearest_keyframe(&kfs, 200).unwrap().frame_index, 200);
        // before the first keyframe, fall back to it
        let later = vec![kf("b", 100), kf("c", 200)];
        assert_eq!(nearest_keyframe(&later, 50).unwrap().frame_index, 100);
    }

    #[test]
    fn test_parse_watch_id_variants() {
        assert_eq!(
            parse_watch_id("https://www.youtube.com/watch?v=abc123&t=10").unwrap(),
            "abc123"
        );
        assert_eq!(parse_watch_id("https://youtu.be/abc123?t=4").unwrap(), "abc123");
        assert_eq!(
            parse_watch_id("https://www.youtube.com/embed/abc123").unwrap(),
            "abc123"
        );
    }

    #[test]
    fn test_parse_watch_id_rejects_garbage() {
        assert!(parse_watch_id("").is_err());
        assert!(parse_watch_id("not a url").is_err());
        assert!(parse_watch_id("https://example.com/watch?v=").is_err());
    }
}
