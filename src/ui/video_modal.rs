//! Frame scrubber overlay
//!
//! Native sources preview the keyframe nearest the playhead; embed sources
//! show the simulated clock. Either way the controls line exposes the
//! frame-accurate stepping contract.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::model::{PlayerSource, PlayerState};
use crate::App;

pub fn render(f: &mut Frame, area: Rect, app: &mut App, player: &PlayerState) {
    if area.height < 3 {
        return;
    }

    let controls_area = Rect {
        x: area.x,
        y: area.y + area.height - 2,
        width: area.width,
        height: 2,
    };
    let preview_area = Rect {
        x: area.x,
        y: area.y,
        width: area.width,
        height: area.height - 2,
    };

    if player.loading {
        center_text(f, preview_area, "Loading video info…", Color::DarkGray);
        render_controls(f, controls_area, player);
        return;
    }

    match &player.source {
        Some(PlayerSource::Failed { error }) => {
            // unplayable source: error stays in the overlay, no retry
            center_text(f, preview_area, &format!("Error: {}", error), Color::Red);
        }
        Some(PlayerSource::Embed { watch_id }) => {
            let notice = format!(
                "External video ({}): simulated playback, frame estimated from reported time",
                watch_id
            );
            let mut notice_area = preview_area;
            notice_area.height = 1;
            f.render_widget(
                Paragraph::new(notice).style(Style::default().fg(Color::Yellow)),
                notice_area,
            );
            render_preview_frame(f, preview_area, app, player, 1);
        }
        Some(PlayerSource::Native { .. }) => {
            render_preview_frame(f, preview_area, app, player, 0);
        }
        None => {
            center_text(f, preview_area, "Loading video info…", Color::DarkGray);
        }
    }

    render_controls(f, controls_area, player);
}

fn render_preview_frame(
    f: &mut Frame,
    area: Rect,
    app: &mut App,
    player: &PlayerState,
    y_offset: u16,
) {
    if area.height <= y_offset {
        return;
    }
    let image_area = Rect {
        x: area.x,
        y: area.y + y_offset,
        width: area.width,
        height: area.height - y_offset,
    };
    match player.nearest_keyframe() {
        Some(kf) => {
            let url = crate::logic::results::image_url(
                &app.keyframe_base,
                &player.video_id,
                &kf.keyframe_id,
            );
            super::render_thumb(f, image_area, &mut app.image_state_map, &url);
        }
        None => center_text(f, image_area, "No keyframes for preview", Color::DarkGray),
    }
}

fn render_controls(f: &mut Frame, area: Rect, player: &PlayerState) {
    let fps_text = match player.fps {
        Some(fps) => format!("{:.2}", fps),
        None => "—".to_string(),
    };
    let play = if player.playing { "▮▮" } else { "▶" };

    let line = Line::from(vec![
        Span::styled("[←] -1 frame  ", Style::default().fg(Color::Gray)),
        Span::styled(
            format!("[space] {}  ", play),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::styled("[→] +1 frame  ", Style::default().fg(Color::Gray)),
        Span::styled(
            format!("Frame: {}  ", player.current_frame()),
            Style::default().fg(Color::Magenta),
        ),
        Span::styled(
            format!(
                "t = {:.2}s / {:.2}s  fps {}  ",
                player.current_time,
                player.duration(),
                fps_text
            ),
            Style::default().fg(Color::Gray),
        ),
        Span::styled("[Enter] select current frame", Style::default().fg(Color::Green)),
    ]);

    f.render_widget(Paragraph::new(vec![line]), area);
}

fn center_text(f: &mut Frame, area: Rect, text: &str, color: Color) {
    if area.height == 0 {
        return;
    }
    let mut line_area = area;
    line_area.y += area.height / 2;
    line_area.height = 1;
    f.render_widget(
        Paragraph::new(text.to_string()).style(Style::default().fg(color)),
        line_area,
    );
}
