//! Modal overlay chrome and the image zoom overlay
//!
//! Only the top of the modal stack is rendered; parents stay untouched
//! beneath it and reappear unchanged on close.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::model::{EditTarget, Modal};
use crate::App;

pub fn render(f: &mut Frame, size: Rect, app: &mut App) {
    let Some(top) = app.model.modals.top().cloned() else {
        return;
    };

    let (title, area) = match &top {
        Modal::Image { .. } => (" Keyframe ".to_string(), centered(size, 90, 90)),
        Modal::Video(player) => (format!(" Video {} ", player.video_id), centered(size, 80, 85)),
        Modal::Keyframes(browser) => (
            format!(" Keyframes: {} ", browser.video_id),
            centered(size, 94, 92),
        ),
    };

    f.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    f.render_widget(block, area);

    // footer with the modal staging fields for video/keyframe overlays
    let has_footer = !matches!(top, Modal::Image { .. });
    let content = if has_footer && inner.height > 2 {
        Rect {
            x: inner.x,
            y: inner.y,
            width: inner.width,
            height: inner.height - 2,
        }
    } else {
        inner
    };

    match top {
        Modal::Image { url } => {
            super::render_thumb(f, content, &mut app.image_state_map, &url);
        }
        Modal::Video(player) => {
            super::video_modal::render(f, content, app, &player);
        }
        Modal::Keyframes(browser) => {
            super::keyframe_modal::render(f, content, app, &browser);
        }
    }

    if has_footer && inner.height > 2 {
        let footer_area = Rect {
            x: inner.x,
            y: inner.y + inner.height - 2,
            width: inner.width,
            height: 2,
        };
        render_footer(f, footer_area, app);
    }
}

fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let staged = &app.model.submission.modal_staged;
    let editing_note = app.model.ui.editing == Some(EditTarget::ModalNote);

    let note = if editing_note {
        Span::styled(
            format!("{}█", app.model.ui.edit_buffer),
            Style::default().fg(Color::Yellow),
        )
    } else if staged.note.is_empty() {
        Span::styled("—", Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(staged.note.clone(), Style::default().fg(Color::White))
    };

    let mode = if app.model.submission.temporal_mode {
        Span::styled("TEMPORAL", Style::default().fg(Color::Cyan))
    } else {
        Span::styled("replace", Style::default().fg(Color::Gray))
    };

    let line = Line::from(vec![
        Span::styled("Video: ", Style::default().fg(Color::Gray)),
        Span::styled(
            if staged.video_id.is_empty() {
                "—".to_string()
            } else {
                staged.video_id.clone()
            },
            Style::default().fg(Color::White),
        ),
        Span::raw("  "),
        Span::styled("Frames: ", Style::default().fg(Color::Gray)),
        Span::styled(
            if staged.frame_spec.is_empty() {
                "—".to_string()
            } else {
                staged.frame_spec.clone()
            },
            Style::default().fg(Color::White),
        ),
        Span::raw("  "),
        Span::styled("Note (n): ", Style::default().fg(Color::Gray)),
        note,
        Span::raw("  "),
        Span::styled("Mode (t): ", Style::default().fg(Color::Gray)),
        mode,
        Span::raw("  "),
        Span::styled("[c] add to submission", Style::default().fg(Color::Green)),
    ]);

    let block = Block::default().borders(Borders::TOP);
    f.render_widget(Paragraph::new(vec![line]).block(block), area);
}

/// Center a width/height percentage box inside `size`
pub(crate) fn centered(size: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let width = size.width * percent_x / 100;
    let height = size.height * percent_y / 100;
    Rect {
        x: size.x + (size.width.saturating_sub(width)) / 2,
        y: size.y + (size.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}
