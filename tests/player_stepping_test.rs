//! Scrubber arithmetic
//!
//! Frame stepping is time arithmetic: each step moves the playhead by
//! exactly 1/fps, clamped to [0, duration], and the selected frame is
//! floor(current_time * fps). The embed path shares the same contract but
//! gets its time from a simulated clock.

use frametui::api::KeyframeRef;
use frametui::logic::player;

fn kf(id: &str, frame: u32) -> KeyframeRef {
    serde_json::from_str(&format!(
        r#"{{"keyframe_id": "{}", "frame_index": {}}}"#,
        id, frame
    ))
    .unwrap()
}

#[test]
fn test_step_round_trip_is_frame_accurate() {
    let fps = 25.0;
    let duration = 60.0;
    let mut t = player::time_for_frame(100, fps);

    t = player::step_time(t, fps, duration, 1);
    assert_eq!(player::frame_at(t, fps), 101);

    t = player::step_time(t, fps, duration, -1);
    t = player::step_time(t, fps, duration, -1);
    assert_eq!(player::frame_at(t, fps), 99);
}

#[test]
fn test_step_clamps_at_both_ends() {
    let fps = 30.0;
    let duration = 2.0;

    let start = player::step_time(0.0, fps, duration, -1);
    assert_eq!(start, 0.0);

    let mut t = duration;
    t = player::step_time(t, fps, duration, 1);
    assert_eq!(t, duration);
}

#[test]
fn test_simulated_clock_stops_at_duration() {
    let duration = 1.0;
    let mut t = 0.0;
    for _ in 0..10 {
        t = player::advance_time(t, 0.25, duration);
    }
    assert_eq!(t, duration);
}

#[test]
fn test_selected_frame_floors() {
    // 1.999s at 25fps is still frame 49; selecting must not round up
    assert_eq!(player::frame_at(1.999, 25.0), 49);
    assert_eq!(player::frame_at(2.0, 25.0), 50);
}

#[test]
fn test_duration_estimated_from_last_keyframe() {
    let kfs = vec![kf("a", 0), kf("b", 1500), kf("c", 750)];
    assert_eq!(player::duration_from_keyframes(&kfs, 25.0), 60.0);
}

#[test]
fn test_preview_uses_nearest_keyframe_at_or_before() {
    let kfs = vec![kf("a", 0), kf("b", 100), kf("c", 200)];
    assert_eq!(player::nearest_keyframe(&kfs, 199).unwrap().keyframe_id, "b");
    assert_eq!(player::nearest_keyframe(&kfs, 200).unwrap().keyframe_id, "c");
}

#[test]
fn test_unparseable_watch_url_is_an_error_not_a_panic() {
    // the overlay shows this error in place; nothing retries
    assert!(player::parse_watch_id("x-vnd.weird://???").is_err());
    assert!(player::parse_watch_id("").is_err());
    assert_eq!(
        player::parse_watch_id("https://youtu.be/dQw4w9WgXcQ").unwrap(),
        "dQw4w9WgXcQ"
    );
}
