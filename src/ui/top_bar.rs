//! Staging top bar: the always-visible populate/commit strip

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::model::EditTarget;
use crate::App;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let staged = &app.model.submission.staged;
    let temporal = app.model.submission.temporal_mode;

    let field_style = Style::default().fg(Color::White);
    let label_style = Style::default().fg(Color::Gray);
    let editing = app.model.ui.editing;

    let field = |target: EditTarget, value: &str| -> Span<'static> {
        if editing == Some(target) {
            Span::styled(
                format!("{}█", app.model.ui.edit_buffer),
                Style::default().fg(Color::Yellow),
            )
        } else if value.is_empty() {
            Span::styled("—".to_string(), Style::default().fg(Color::DarkGray))
        } else {
            Span::styled(value.to_string(), field_style)
        }
    };

    let mode = if temporal {
        Span::styled(
            "TEMPORAL (append)",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled("replace", Style::default().fg(Color::Gray))
    };

    let line = Line::from(vec![
        Span::styled("Video (V): ", label_style),
        field(EditTarget::StagedVideo, &staged.video_id),
        Span::raw("  "),
        Span::styled("Frames (F): ", label_style),
        field(EditTarget::StagedFrame, &staged.frame_spec),
        Span::raw("  "),
        Span::styled("Note (N): ", label_style),
        field(EditTarget::StagedNote, &staged.note),
        Span::raw("  "),
        Span::styled("Mode (t): ", label_style),
        mode,
        Span::raw("  "),
        Span::styled("[c] add to submission", Style::default().fg(Color::Green)),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Staging ")
        .border_style(Style::default().fg(Color::DarkGray));

    f.render_widget(Paragraph::new(vec![line]).block(block), area);
}
