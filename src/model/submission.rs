//! Selection/Submission Builder
//!
//! Accumulates deduplicated `video,frame[,"note"]` lines into a text buffer.
//! Two staging areas feed the buffer: one bound to the always-visible top
//! bar, one bound to the open modal's footer. "Direct add" bypasses staging.

use crate::logic::submission;

/// Staged identifiers awaiting commit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Staging {
    pub video_id: String,
    /// One frame index, or an ascending comma-joined set in temporal mode
    pub frame_spec: String,
    pub note: String,
}

impl Staging {
    pub fn clear(&mut self) {
        self.video_id.clear();
        self.frame_spec.clear();
        self.note.clear();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitResult {
    Added,
    /// Exact line already present; staging is still cleared
    Duplicate,
    /// Staged video or frame spec missing; nothing changes
    MissingFields,
}

#[derive(Debug, Clone)]
pub struct SubmissionModel {
    pub filename: String,
    pub content: String,
    pub staged: Staging,
    pub modal_staged: Staging,
    /// Temporal accumulation: populating the same video unions frame indices
    pub temporal_mode: bool,
}

impl SubmissionModel {
    pub fn new() -> Self {
        Self {
            filename: "submission".to_string(),
            content: String::new(),
            staged: Staging::default(),
            modal_staged: Staging::default(),
            temporal_mode: false,
        }
    }

    /// Populate the top-bar staging area from a result card or keyframe
    pub fn populate(&mut self, video_id: &str, frame_index: &str) {
        Self::populate_into(&mut self.staged, self.temporal_mode, video_id, frame_index);
    }

    /// Populate the modal-footer staging area
    pub fn populate_modal(&mut self, video_id: &str, frame_index: &str) {
        Self::populate_into(
            &mut self.modal_staged,
            self.temporal_mode,
            video_id,
            frame_index,
        );
    }

    fn populate_into(staging: &mut Staging, temporal: bool, video_id: &str, frame_index: &str) {
        if temporal && staging.video_id == video_id {
            staging.frame_spec = submission::merge_frame_spec(&staging.frame_spec, frame_index);
        } else {
            staging.video_id = video_id.to_string();
            staging.frame_spec = frame_index.to_string();
        }
    }

    pub fn commit_staged(&mut self) -> CommitResult {
        let staged = self.staged.clone();
        let result = self.commit(&staged);
        if result != CommitResult::MissingFields {
            self.staged.clear();
        }
        result
    }

    pub fn commit_modal(&mut self) -> CommitResult {
        let staged = self.modal_staged.clone();
        let result = self.commit(&staged);
        if result != CommitResult::MissingFields {
            self.modal_staged.clear();
        }
        result
    }

    fn commit(&mut self, staging: &Staging) -> CommitResult {
        if staging.video_id.is_empty() || staging.frame_spec.is_empty() {
            return CommitResult::MissingFields;
        }

        let line = submission::build_line(&staging.video_id, &staging.frame_spec, &staging.note);
        match submission::append_unique(&self.content, &line) {
            Some(updated) => {
                self.content = updated;
                CommitResult::Added
            }
            None => CommitResult::Duplicate,
        }
    }

    /// Append `video,frame` straight into the buffer, no note, no staging
    pub fn direct_add(&mut self, video_id: &str, frame_index: u32) -> bool {
        let line = format!("{},{}", video_id, frame_index);
        match submission::append_unique(&self.content, &line) {
            Some(updated) => {
                self.content = updated;
                true
            }
            None => false,
        }
    }

    pub fn lines(&self) -> Vec<&str> {
        self.content.lines().filter(|l| !l.is_empty()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.lines().is_empty()
    }

    pub fn remove_line(&mut self, index: usize) {
        let lines: Vec<String> = self
            .content
            .lines()
            .filter(|l| !l.is_empty())
            .map(|l| l.to_string())
            .collect();
        if index < lines.len() {
            let mut lines = lines;
            lines.remove(index);
            self.content = lines.join("\n");
        }
    }

    pub fn clear_content(&mut self) {
        self.content.clear();
    }
}

impl Default for SubmissionModel {
    fn default() -> Self {
        Self::new()
    }
}
