//! Keyboard Input Handler
//!
//! Dispatch order mirrors the interaction layering: an active edit session
//! captures everything, then an open picker, then the top modal, then the
//! focused panel.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::{
    control_rows, ControlRow, EditTarget, Focus, Modal, PickerKind,
};
use crate::ui::keyframe_modal::BROWSER_COLS;
use crate::App;

pub fn handle_key(app: &mut App, key: KeyEvent) -> Result<()> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.model.ui.should_quit = true;
        return Ok(());
    }

    if app.model.ui.is_editing() {
        handle_edit_key(app, key);
        return Ok(());
    }

    if app.model.ui.picker.is_some() {
        handle_picker_key(app, key);
        return Ok(());
    }

    if app.model.modals.is_open() {
        handle_modal_key(app, key);
        return Ok(());
    }

    handle_main_key(app, key);
    Ok(())
}

// ---------------------------------------------------------------------------
// Edit session
// ---------------------------------------------------------------------------

fn handle_edit_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.model.ui.cancel_edit(),
        KeyCode::Enter => commit_edit(app),
        KeyCode::Char(c) => app.model.ui.edit_insert(c),
        KeyCode::Backspace => app.model.ui.edit_backspace(),
        KeyCode::Delete => app.model.ui.edit_delete(),
        KeyCode::Left => app.model.ui.edit_move(-1),
        KeyCode::Right => app.model.ui.edit_move(1),
        KeyCode::Home => app.model.ui.edit_cursor = 0,
        KeyCode::End => {
            app.model.ui.edit_cursor = app.model.ui.edit_buffer.chars().count();
        }
        _ => {}
    }
}

fn commit_edit(app: &mut App) {
    let Some(target) = app.model.ui.editing else {
        return;
    };
    let value = app.model.ui.edit_buffer.clone();
    app.model.ui.cancel_edit();

    match target {
        EditTarget::Query(id) => {
            app.model.queries.update(id, value);
        }
        EditTarget::Keyword => app.model.filters.keyword = value,
        EditTarget::Object => app.model.filters.object = value,
        EditTarget::FreeText => app.model.filters.free_text = value,
        EditTarget::Filename => app.model.submission.filename = value,
        EditTarget::TopKPerQuery => match value.trim().parse() {
            Ok(n) => app.model.params.set_top_k_per_query(n),
            Err(_) => app.model.show_toast("Error: not a number"),
        },
        EditTarget::TopK => match value.trim().parse() {
            Ok(n) => app.model.params.set_top_k(n),
            Err(_) => app.model.show_toast("Error: not a number"),
        },
        EditTarget::StagedVideo => app.model.submission.staged.video_id = value,
        EditTarget::StagedFrame => app.model.submission.staged.frame_spec = value,
        EditTarget::StagedNote => app.model.submission.staged.note = value,
        EditTarget::ModalNote => app.model.submission.modal_staged.note = value,
    }
}

fn begin_edit(app: &mut App, target: EditTarget) {
    let current = match target {
        EditTarget::Query(id) => app
            .model
            .queries
            .get(id)
            .map(|q| q.text.clone())
            .unwrap_or_default(),
        EditTarget::Keyword => app.model.filters.keyword.clone(),
        EditTarget::Object => app.model.filters.object.clone(),
        EditTarget::FreeText => app.model.filters.free_text.clone(),
        EditTarget::Filename => app.model.submission.filename.clone(),
        EditTarget::TopKPerQuery => app.model.params.top_k_per_query.to_string(),
        EditTarget::TopK => app.model.params.top_k.to_string(),
        EditTarget::StagedVideo => app.model.submission.staged.video_id.clone(),
        EditTarget::StagedFrame => app.model.submission.staged.frame_spec.clone(),
        EditTarget::StagedNote => app.model.submission.staged.note.clone(),
        EditTarget::ModalNote => app.model.submission.modal_staged.note.clone(),
    };
    app.model.ui.begin_edit(target, &current);
}

// ---------------------------------------------------------------------------
// Picker dialog
// ---------------------------------------------------------------------------

fn handle_picker_key(app: &mut App, key: KeyEvent) {
    let is_objects = app
        .model
        .ui
        .picker
        .as_ref()
        .map(|p| p.kind == PickerKind::Objects)
        .unwrap_or(false);

    // clear-all works in every picker without clobbering the search box
    if key.code == KeyCode::Char('x') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.picker_clear_all();
        return;
    }

    match key.code {
        KeyCode::Esc => {
            if is_objects {
                app.model.catalogs.object_search.clear();
            }
            app.close_picker();
        }
        KeyCode::Up => move_picker_selection(app, -1),
        KeyCode::Down => move_picker_selection(app, 1),
        KeyCode::Enter | KeyCode::Char(' ') => app.picker_toggle_selected(),
        KeyCode::Backspace if is_objects => {
            app.model.catalogs.object_search.pop();
            clamp_picker_selection(app);
        }
        KeyCode::Char(c) if is_objects => {
            // the objects picker has an incremental search box
            app.model.catalogs.object_search.push(c);
            clamp_picker_selection(app);
        }
        KeyCode::Char('c') => app.picker_clear_all(),
        _ => {}
    }
}

fn move_picker_selection(app: &mut App, delta: i32) {
    let count = app.picker_items().len();
    if let Some(picker) = app.model.ui.picker.as_mut() {
        if count == 0 {
            picker.selected = 0;
        } else {
            let next = picker.selected as i32 + delta;
            picker.selected = next.clamp(0, count as i32 - 1) as usize;
        }
    }
}

fn clamp_picker_selection(app: &mut App) {
    let count = app.picker_items().len();
    if let Some(picker) = app.model.ui.picker.as_mut() {
        picker.selected = picker.selected.min(count.saturating_sub(1));
    }
}

// ---------------------------------------------------------------------------
// Modal overlays
// ---------------------------------------------------------------------------

fn handle_modal_key(app: &mut App, key: KeyEvent) {
    // shared footer actions for video and keyframe overlays
    match key.code {
        KeyCode::Esc => {
            app.close_top_modal();
            return;
        }
        KeyCode::Char('t') => {
            app.model.submission.temporal_mode = !app.model.submission.temporal_mode;
            return;
        }
        KeyCode::Char('n') => {
            if !matches!(app.model.modals.top(), Some(Modal::Image { .. })) {
                begin_edit(app, EditTarget::ModalNote);
            }
            return;
        }
        KeyCode::Char('c') => {
            app.commit_modal();
            return;
        }
        _ => {}
    }

    match app.model.modals.top() {
        Some(Modal::Video(_)) => handle_video_key(app, key),
        Some(Modal::Keyframes(_)) => handle_browser_key(app, key),
        _ => {}
    }
}

fn handle_video_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char(' ') => app.toggle_playback(),
        KeyCode::Left => app.step_player(-1),
        KeyCode::Right => app.step_player(1),
        KeyCode::Enter => app.select_current_frame(),
        _ => {}
    }
}

fn handle_browser_key(app: &mut App, key: KeyEvent) {
    let count = app
        .model
        .modals
        .browser()
        .map(|b| b.keyframes.len())
        .unwrap_or(0);

    let move_by = |app: &mut App, delta: i32| {
        if count == 0 {
            return;
        }
        if let Some(browser) = app.model.modals.browser_mut() {
            let next = browser.selected as i32 + delta;
            browser.selected = next.clamp(0, count as i32 - 1) as usize;
        }
        app.ensure_browser_images();
    };

    match key.code {
        KeyCode::Left => move_by(app, -1),
        KeyCode::Right => move_by(app, 1),
        KeyCode::Up => move_by(app, -(BROWSER_COLS as i32)),
        KeyCode::Down => move_by(app, BROWSER_COLS as i32),
        KeyCode::Enter => {
            if let Some((video_id, frame_index, _)) = selected_browser_keyframe(app) {
                let frame = frame_index.to_string();
                app.model.submission.populate_modal(&video_id, &frame);
            }
        }
        KeyCode::Char('a') => {
            if let Some((video_id, frame_index, _)) = selected_browser_keyframe(app) {
                app.model.submission.direct_add(&video_id, frame_index);
            }
        }
        KeyCode::Char('z') => {
            if let Some((video_id, _, keyframe_id)) = selected_browser_keyframe(app) {
                let url =
                    crate::logic::results::image_url(&app.keyframe_base, &video_id, &keyframe_id);
                app.open_image(url);
            }
        }
        _ => {}
    }
}

fn selected_browser_keyframe(app: &App) -> Option<(String, u32, String)> {
    let browser = app.model.modals.browser()?;
    let kf = browser.selected_keyframe()?;
    Some((browser.video_id.clone(), kf.frame_index, kf.keyframe_id.clone()))
}

// ---------------------------------------------------------------------------
// Main screen
// ---------------------------------------------------------------------------

fn handle_main_key(app: &mut App, key: KeyEvent) {
    // global actions first
    match key.code {
        KeyCode::Char('q') => {
            app.model.ui.should_quit = true;
            return;
        }
        KeyCode::Tab => {
            app.model.ui.focus = match app.model.ui.focus {
                Focus::Controls => Focus::Results,
                Focus::Results => Focus::Controls,
            };
            return;
        }
        KeyCode::Char('s') => {
            app.start_search();
            return;
        }
        KeyCode::Char('t') => {
            app.model.submission.temporal_mode = !app.model.submission.temporal_mode;
            return;
        }
        KeyCode::Char('c') => {
            app.commit_staged();
            return;
        }
        KeyCode::Char('V') => {
            begin_edit(app, EditTarget::StagedVideo);
            return;
        }
        KeyCode::Char('F') => {
            begin_edit(app, EditTarget::StagedFrame);
            return;
        }
        KeyCode::Char('N') => {
            begin_edit(app, EditTarget::StagedNote);
            return;
        }
        KeyCode::Char('D') => {
            app.download_csv();
            return;
        }
        KeyCode::Char('W') => {
            app.save_submission_remote();
            return;
        }
        KeyCode::Char('g') => {
            app.model.ui.group_by_video = !app.model.ui.group_by_video;
            return;
        }
        KeyCode::Char('[') => {
            let cols = app.model.ui.grid_cols;
            app.model.ui.set_grid_cols(cols.saturating_sub(1));
            app.move_result_selection(0);
            return;
        }
        KeyCode::Char(']') => {
            let cols = app.model.ui.grid_cols;
            app.model.ui.set_grid_cols(cols + 1);
            app.move_result_selection(0);
            return;
        }
        KeyCode::Char('<') => {
            app.model.ui.widen_left(-5);
            return;
        }
        KeyCode::Char('>') => {
            app.model.ui.widen_left(5);
            return;
        }
        _ => {}
    }

    match app.model.ui.focus {
        Focus::Controls => handle_controls_key(app, key),
        Focus::Results => handle_results_key(app, key),
    }
}

fn handle_controls_key(app: &mut App, key: KeyEvent) {
    let rows = control_rows(app.model.queries.len());
    let row = rows
        .get(app.model.ui.control_row)
        .copied()
        .unwrap_or(ControlRow::Buffer);

    match key.code {
        KeyCode::Up => {
            app.model.ui.control_row = app.model.ui.control_row.saturating_sub(1);
        }
        KeyCode::Down => {
            app.model.ui.control_row = (app.model.ui.control_row + 1).min(rows.len() - 1);
        }
        KeyCode::Enter => activate_control_row(app, row),
        KeyCode::Left => adjust_control_row(app, row, -1),
        KeyCode::Right => adjust_control_row(app, row, 1),
        KeyCode::Char('x') => match row {
            ControlRow::Query(idx) => {
                // removal of the last remaining query is refused
                if let Some(item) = app.model.queries.items().get(idx) {
                    let id = item.id;
                    app.model.queries.remove(id);
                    let rows = control_rows(app.model.queries.len());
                    app.model.ui.control_row = app.model.ui.control_row.min(rows.len() - 1);
                }
            }
            ControlRow::Buffer => {
                let line = app.model.ui.buffer_line;
                app.model.submission.remove_line(line);
                let count = app.model.submission.lines().len();
                app.model.ui.buffer_line = line.min(count.saturating_sub(1));
            }
            _ => {}
        },
        KeyCode::Char('X') => {
            if row == ControlRow::Buffer {
                app.model.submission.clear_content();
                app.model.ui.buffer_line = 0;
            }
        }
        _ => {}
    }
}

fn activate_control_row(app: &mut App, row: ControlRow) {
    match row {
        ControlRow::Query(idx) => {
            if let Some(item) = app.model.queries.items().get(idx) {
                let id = item.id;
                begin_edit(app, EditTarget::Query(id));
            }
        }
        ControlRow::AddQuery => {
            app.model.queries.add();
            // land on the freshly added row
            app.model.ui.control_row = app.model.queries.len() - 1;
        }
        ControlRow::Retriever => {
            app.model.params.retriever = app.model.params.retriever.toggled();
        }
        ControlRow::TopKPerQuery => begin_edit(app, EditTarget::TopKPerQuery),
        ControlRow::TopK => begin_edit(app, EditTarget::TopK),
        ControlRow::Keyword => begin_edit(app, EditTarget::Keyword),
        ControlRow::Object => begin_edit(app, EditTarget::Object),
        ControlRow::FreeText => begin_edit(app, EditTarget::FreeText),
        ControlRow::Packs => app.open_picker(PickerKind::Packs),
        ControlRow::Videos => {
            if app.model.filters.packs.is_empty() {
                app.model.show_toast("Error: select packs first");
            } else {
                app.open_picker(PickerKind::Videos);
            }
        }
        ControlRow::ExcludedVideos => app.open_picker(PickerKind::ExcludedVideos),
        ControlRow::Filename => begin_edit(app, EditTarget::Filename),
        ControlRow::Buffer => {}
    }
}

fn adjust_control_row(app: &mut App, row: ControlRow, delta: i32) {
    match row {
        ControlRow::TopKPerQuery => {
            let next = app.model.params.top_k_per_query as i64 + delta as i64;
            app.model.params.set_top_k_per_query(next.max(0) as u32);
        }
        ControlRow::TopK => {
            let next = app.model.params.top_k as i64 + delta as i64;
            app.model.params.set_top_k(next.max(0) as u32);
        }
        ControlRow::Buffer => {
            let count = app.model.submission.lines().len();
            if count > 0 {
                let next = app.model.ui.buffer_line as i32 + delta;
                app.model.ui.buffer_line = next.clamp(0, count as i32 - 1) as usize;
            }
        }
        _ => {}
    }
}

fn handle_results_key(app: &mut App, key: KeyEvent) {
    let cols = app.model.ui.grid_cols.max(1) as i32;
    match key.code {
        KeyCode::Left => app.move_result_selection(-1),
        KeyCode::Right => app.move_result_selection(1),
        KeyCode::Up => app.move_result_selection(-cols),
        KeyCode::Down => app.move_result_selection(cols),
        KeyCode::PageUp => {
            let page = cols * app.model.ui.viewport_rows.max(1) as i32;
            app.move_result_selection(-page);
        }
        KeyCode::PageDown => {
            let page = cols * app.model.ui.viewport_rows.max(1) as i32;
            app.move_result_selection(page);
        }
        KeyCode::Enter => {
            if let Some(frame) = app.selected_frame() {
                let spec = frame.frame_index.to_string();
                app.model.submission.populate(&frame.video_id, &spec);
            }
        }
        KeyCode::Char('a') => app.direct_add_selected(),
        KeyCode::Char('z') => {
            if let Some(frame) = app.selected_frame() {
                app.open_image(frame.image_url);
            }
        }
        KeyCode::Char('v') => {
            if let Some(frame) = app.selected_frame() {
                app.open_video(frame.video_id, frame.video_url, frame.frame_index);
            }
        }
        KeyCode::Char('k') => {
            if let Some(frame) = app.selected_frame() {
                app.open_keyframes(frame.video_id);
            }
        }
        KeyCode::Char('x') => app.exclude_selected_video(),
        _ => {}
    }
}
