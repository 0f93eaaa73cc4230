//! Submission actions: commits, direct adds, CSV export, server save

use std::fs;

use tracing::debug;

use crate::model::CommitResult;
use crate::services::api::ApiRequest;
use crate::utils;
use crate::App;

impl App {
    /// Commit the top-bar staging area into the buffer
    pub(crate) fn commit_staged(&mut self) {
        let result = self.model.submission.commit_staged();
        self.report_commit(result);
    }

    /// Commit the modal-footer staging area into the buffer
    pub(crate) fn commit_modal(&mut self) {
        let result = self.model.submission.commit_modal();
        self.report_commit(result);
    }

    fn report_commit(&mut self, result: CommitResult) {
        match result {
            CommitResult::Added | CommitResult::Duplicate => {}
            CommitResult::MissingFields => {
                self.model
                    .show_toast("Error: populate video and frame first");
            }
        }
    }

    /// Append the selected result straight into the buffer
    pub(crate) fn direct_add_selected(&mut self) {
        let Some(frame) = self.selected_frame() else {
            return;
        };
        self.model
            .submission
            .direct_add(&frame.video_id, frame.frame_index);
    }

    /// Write the buffer as `{export_dir}/{filename}.csv`
    pub(crate) fn download_csv(&mut self) {
        if self.model.submission.is_empty() {
            self.model.show_toast("Error: submission content is empty");
            return;
        }
        let name = utils::sanitize_filename(&self.model.submission.filename);
        let path = self.export_dir.join(format!("{}.csv", name));
        match fs::write(&path, &self.model.submission.content) {
            Ok(()) => {
                self.model.show_toast(format!("Saved {}", path.display()));
            }
            Err(e) => {
                debug!(error = %e, "csv export failed");
                self.model.show_toast(format!("Error: {}", e));
            }
        }
    }

    /// Persist the buffer server-side; the response handler surfaces the
    /// returned path or the backend's error message
    pub(crate) fn save_submission_remote(&mut self) {
        if self.model.submission.is_empty() {
            self.model.show_toast("Error: submission content is empty");
            return;
        }
        let filename = utils::sanitize_filename(&self.model.submission.filename);
        let _ = self.api_tx.send(ApiRequest::SaveSubmission {
            filename,
            content: self.model.submission.content.clone(),
        });
    }
}
