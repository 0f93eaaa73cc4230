//! Bottom status bar: backend health, search state, view toggles

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::App;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let health = match app.model.ui.backend_ready {
        Some(true) => Span::styled("backend: ready", Style::default().fg(Color::Green)),
        Some(false) => Span::styled("backend: not ready", Style::default().fg(Color::Red)),
        None => Span::styled("backend: …", Style::default().fg(Color::DarkGray)),
    };

    let search = if app.model.results.is_searching() {
        Span::styled(" | searching…", Style::default().fg(Color::Yellow))
    } else if app.model.results.is_temporal {
        Span::styled(" | temporal results", Style::default().fg(Color::Cyan))
    } else {
        Span::raw("")
    };

    let view = Span::styled(
        format!(
            " | cols {} | group {} | excluded {}",
            app.model.ui.grid_cols,
            if app.model.ui.group_by_video { "on" } else { "off" },
            app.model.filters.excluded_videos.len(),
        ),
        Style::default().fg(Color::Gray),
    );

    let buffer = Span::styled(
        format!(" | submission: {} line(s)", app.model.submission.lines().len()),
        Style::default().fg(Color::Gray),
    );

    let line = Line::from(vec![health, search, view, buffer]);
    f.render_widget(Paragraph::new(vec![line]), area);
}
