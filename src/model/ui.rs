//! UI state: focus, editing, view toggles, pickers, toasts
//!
//! Pure state only; rendering reads it, the keyboard handler mutates it.

use std::time::Instant;

/// Top-level focus area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Controls,
    Results,
}

/// One selectable row of the control panel. The query rows are dynamic, the
/// rest is fixed; `control_rows` builds the current row list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlRow {
    Query(usize),
    AddQuery,
    Retriever,
    TopKPerQuery,
    TopK,
    Keyword,
    Object,
    FreeText,
    Packs,
    Videos,
    ExcludedVideos,
    Filename,
    Buffer,
}

pub fn control_rows(query_count: usize) -> Vec<ControlRow> {
    let mut rows: Vec<ControlRow> = (0..query_count).map(ControlRow::Query).collect();
    rows.extend([
        ControlRow::AddQuery,
        ControlRow::Retriever,
        ControlRow::TopKPerQuery,
        ControlRow::TopK,
        ControlRow::Keyword,
        ControlRow::Object,
        ControlRow::FreeText,
        ControlRow::Packs,
        ControlRow::Videos,
        ControlRow::ExcludedVideos,
        ControlRow::Filename,
        ControlRow::Buffer,
    ]);
    rows
}

/// Which text field an edit session writes back to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    Query(u64),
    Keyword,
    Object,
    FreeText,
    Filename,
    TopKPerQuery,
    TopK,
    StagedVideo,
    StagedFrame,
    StagedNote,
    ModalNote,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerKind {
    Objects,
    Packs,
    Videos,
    ExcludedVideos,
}

/// Centered pick-list dialog state
#[derive(Debug, Clone)]
pub struct PickerState {
    pub kind: PickerKind,
    pub selected: usize,
}

#[derive(Debug, Clone)]
pub struct UiModel {
    pub focus: Focus,
    /// Index into `control_rows` when the control panel has focus
    pub control_row: usize,
    /// Selected line of the submission buffer (Buffer row editing)
    pub buffer_line: usize,

    /// Active edit session: target, working buffer, char cursor
    pub editing: Option<EditTarget>,
    pub edit_buffer: String,
    pub edit_cursor: usize,

    pub picker: Option<PickerState>,

    /// Result grid column count, 1..=10
    pub grid_cols: u16,
    pub group_by_video: bool,
    /// Control panel width as a percentage of the terminal, clamped
    pub left_percent: u16,

    /// Linear selection over the visible result frames
    pub results_selected: usize,
    pub results_scroll_row: usize,
    /// Grid rows that fit the results viewport; updated during render
    pub viewport_rows: usize,

    pub toast: Option<(String, Instant)>,
    pub backend_ready: Option<bool>,
    pub should_quit: bool,
}

pub const MIN_LEFT_PERCENT: u16 = 20;
pub const MAX_LEFT_PERCENT: u16 = 60;
pub const MAX_GRID_COLS: u16 = 10;

impl UiModel {
    pub fn new() -> Self {
        Self {
            focus: Focus::Controls,
            control_row: 0,
            buffer_line: 0,
            editing: None,
            edit_buffer: String::new(),
            edit_cursor: 0,
            picker: None,
            grid_cols: 3,
            group_by_video: false,
            left_percent: 30,
            results_selected: 0,
            results_scroll_row: 0,
            viewport_rows: 1,
            toast: None,
            backend_ready: None,
            should_quit: false,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn set_grid_cols(&mut self, cols: u16) {
        self.grid_cols = cols.clamp(1, MAX_GRID_COLS);
    }

    pub fn widen_left(&mut self, delta: i16) {
        let next = self.left_percent as i16 + delta;
        self.left_percent = next.clamp(MIN_LEFT_PERCENT as i16, MAX_LEFT_PERCENT as i16) as u16;
    }

    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast = Some((message.into(), Instant::now()));
    }

    pub fn should_dismiss_toast(&self) -> bool {
        self.toast
            .as_ref()
            .map(|(_, at)| at.elapsed().as_millis() >= 2500)
            .unwrap_or(false)
    }

    pub fn begin_edit(&mut self, target: EditTarget, current: &str) {
        self.editing = Some(target);
        self.edit_buffer = current.to_string();
        self.edit_cursor = current.chars().count();
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
        self.edit_buffer.clear();
        self.edit_cursor = 0;
    }

    pub fn edit_insert(&mut self, ch: char) {
        let byte = char_to_byte(&self.edit_buffer, self.edit_cursor);
        self.edit_buffer.insert(byte, ch);
        self.edit_cursor += 1;
    }

    pub fn edit_backspace(&mut self) {
        if self.edit_cursor == 0 {
            return;
        }
        let byte = char_to_byte(&self.edit_buffer, self.edit_cursor - 1);
        self.edit_buffer.remove(byte);
        self.edit_cursor -= 1;
    }

    pub fn edit_delete(&mut self) {
        let count = self.edit_buffer.chars().count();
        if self.edit_cursor >= count {
            return;
        }
        let byte = char_to_byte(&self.edit_buffer, self.edit_cursor);
        self.edit_buffer.remove(byte);
    }

    pub fn edit_move(&mut self, delta: i32) {
        let count = self.edit_buffer.chars().count() as i32;
        self.edit_cursor = (self.edit_cursor as i32 + delta).clamp(0, count) as usize;
    }
}

impl Default for UiModel {
    fn default() -> Self {
        Self::new()
    }
}

fn char_to_byte(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(b, _)| b)
        .unwrap_or(s.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_cols_clamped() {
        let mut ui = UiModel::new();
        ui.set_grid_cols(0);
        assert_eq!(ui.grid_cols, 1);
        ui.set_grid_cols(99);
        assert_eq!(ui.grid_cols, 10);
    }

    #[test]
    fn test_left_percent_clamped() {
        let mut ui = UiModel::new();
        ui.widen_left(-100);
        assert_eq!(ui.left_percent, MIN_LEFT_PERCENT);
        ui.widen_left(100);
        assert_eq!(ui.left_percent, MAX_LEFT_PERCENT);
    }

    #[test]
    fn test_edit_session_multibyte() {
        let mut ui = UiModel::new();
        ui.begin_edit(EditTarget::Keyword, "áo dài");
        ui.edit_insert('s');
        assert_eq!(ui.edit_buffer, "áo dàis");

        ui.edit_backspace();
        ui.edit_move(-3);
        ui.edit_insert('x');
        assert_eq!(ui.edit_buffer, "áo xdài");
    }

    #[test]
    fn test_control_rows_track_query_count() {
        let rows = control_rows(3);
        assert_eq!(rows[0], ControlRow::Query(0));
        assert_eq!(rows[2], ControlRow::Query(2));
        assert_eq!(rows[3], ControlRow::AddQuery);
        assert_eq!(*rows.last().unwrap(), ControlRow::Buffer);
    }
}
