//! Submission builder contract
//!
//! The buffer is the one piece of state mutated from several entry points
//! (top-bar commit, modal commit, direct add), so its invariants get the
//! full treatment: exact line format, verbatim dedupe, temporal frame-spec
//! accumulation, and the rejected-commit path leaving state untouched.

use frametui::model::{CommitResult, SubmissionModel};

#[test]
fn test_commit_v1_5_yields_exact_buffer() {
    let mut sub = SubmissionModel::new();
    sub.populate("v1", "5");
    assert_eq!(sub.commit_staged(), CommitResult::Added);
    assert_eq!(sub.content, "v1,5");

    // committing the identical pair again leaves the buffer unchanged
    sub.populate("v1", "5");
    assert_eq!(sub.commit_staged(), CommitResult::Duplicate);
    assert_eq!(sub.content, "v1,5");
}

#[test]
fn test_rejected_commit_mutates_nothing() {
    let mut sub = SubmissionModel::new();
    sub.staged.note = "only a note".to_string();

    assert_eq!(sub.commit_staged(), CommitResult::MissingFields);
    assert!(sub.content.is_empty());
    // staging survives so the user can fill in the missing field
    assert_eq!(sub.staged.note, "only a note");
}

#[test]
fn test_temporal_populate_numeric_sort() {
    let mut sub = SubmissionModel::new();
    sub.temporal_mode = true;

    sub.populate("v1", "3");
    sub.populate("v1", "1");
    assert_eq!(sub.staged.frame_spec, "1,3");

    // lexical sort would put 100 before 20; numeric sort must not
    sub.populate("v1", "100");
    sub.populate("v1", "20");
    assert_eq!(sub.staged.frame_spec, "1,3,20,100");
}

#[test]
fn test_temporal_populate_different_video_replaces() {
    let mut sub = SubmissionModel::new();
    sub.temporal_mode = true;
    sub.populate("v1", "3");
    sub.populate("v2", "9");
    assert_eq!(sub.staged.video_id, "v2");
    assert_eq!(sub.staged.frame_spec, "9");
}

#[test]
fn test_note_quoting_and_distinctness() {
    let mut sub = SubmissionModel::new();
    sub.populate("v1", "5");
    sub.staged.note = "red car".to_string();
    sub.commit_staged();
    assert_eq!(sub.content, "v1,5,\"red car\"");

    // same pair with a different note is a different line, not a duplicate
    sub.populate("v1", "5");
    sub.staged.note = "blue car".to_string();
    assert_eq!(sub.commit_staged(), CommitResult::Added);
    assert_eq!(sub.content, "v1,5,\"red car\"\nv1,5,\"blue car\"");
}

#[test]
fn test_modal_and_top_bar_staging_are_independent() {
    let mut sub = SubmissionModel::new();
    sub.populate("v1", "5");
    sub.populate_modal("v2", "8");

    assert_eq!(sub.staged.video_id, "v1");
    assert_eq!(sub.modal_staged.video_id, "v2");

    assert_eq!(sub.commit_modal(), CommitResult::Added);
    assert_eq!(sub.content, "v2,8");
    // the top-bar staging is untouched by the modal commit
    assert_eq!(sub.staged.video_id, "v1");
}

#[test]
fn test_direct_add_bypasses_staging() {
    let mut sub = SubmissionModel::new();
    sub.populate("v1", "5");

    assert!(sub.direct_add("v9", 42));
    assert_eq!(sub.content, "v9,42");
    assert_eq!(sub.staged.video_id, "v1");

    assert!(!sub.direct_add("v9", 42));
    assert_eq!(sub.content, "v9,42");
}

#[test]
fn test_buffer_shrinks_only_by_edit_or_clear() {
    let mut sub = SubmissionModel::new();
    sub.direct_add("v1", 1);
    sub.direct_add("v2", 2);
    sub.direct_add("v3", 3);

    sub.remove_line(1);
    assert_eq!(sub.content, "v1,1\nv3,3");

    sub.clear_content();
    assert!(sub.is_empty());

    // after a clear, previously committed lines may be added again
    assert!(sub.direct_add("v1", 1));
}
