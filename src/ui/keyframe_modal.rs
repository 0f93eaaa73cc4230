//! Keyframe browser overlay: the full ordered keyframe grid for one video

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::model::KeyframeBrowser;
use crate::App;

pub const BROWSER_COLS: u16 = 4;
const CELL_HEIGHT: u16 = 10;

pub fn render(f: &mut Frame, area: Rect, app: &mut App, browser: &KeyframeBrowser) {
    if browser.loading {
        center_text(f, area, "Loading keyframes…", Color::DarkGray);
        return;
    }
    if let Some(error) = &browser.error {
        center_text(f, area, &format!("Error: {}", error), Color::Red);
        return;
    }
    if browser.keyframes.is_empty() {
        center_text(f, area, "No keyframes found for this video.", Color::DarkGray);
        return;
    }

    // keep the selected row visible
    let rows = crate::logic::layout::visible_rows(area, CELL_HEIGHT);
    let selected_row = browser.selected / BROWSER_COLS as usize;
    let first_row = selected_row.saturating_sub(rows.saturating_sub(1));

    let cells = crate::logic::layout::grid_cells(
        area,
        BROWSER_COLS,
        CELL_HEIGHT,
        browser.keyframes.len(),
        first_row,
    );

    for (idx, rect) in cells {
        let kf = &browser.keyframes[idx];
        let selected = idx == browser.selected;
        let border_style = if selected {
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::default().borders(Borders::ALL).border_style(border_style);
        let inner = block.inner(rect);
        f.render_widget(block, rect);
        if inner.height == 0 {
            continue;
        }

        let caption_area = Rect {
            x: inner.x,
            y: inner.y + inner.height - 1,
            width: inner.width,
            height: 1,
        };
        f.render_widget(
            Paragraph::new(format!("{}", kf.frame_index)).style(if selected {
                Style::default().fg(Color::White)
            } else {
                Style::default().fg(Color::Gray)
            }),
            caption_area,
        );

        if inner.height > 1 {
            let image_area = Rect {
                x: inner.x,
                y: inner.y,
                width: inner.width,
                height: inner.height - 1,
            };
            let url = crate::logic::results::image_url(
                &app.keyframe_base,
                &browser.video_id,
                &kf.keyframe_id,
            );
            super::render_thumb(f, image_area, &mut app.image_state_map, &url);
        }
    }
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
