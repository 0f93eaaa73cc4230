//! Results pane: flat grid, grouped-by-video, and temporal views
//!
//! All three views are pure functions of result state, the exclusion list,
//! and two toggles (column count, grouping). The flat view scrolls by grid
//! row; the sectioned views pin the selected section to the top.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::logic;
use crate::logic::results::SelectableFrame;
use crate::model::Focus;
use crate::App;

const CELL_HEIGHT_IMAGES: u16 = 10;
const CELL_HEIGHT_TEXT: u16 = 3;

pub fn render(f: &mut Frame, area: Rect, app: &mut App) {
    let focused = app.model.ui.focus == Focus::Results;
    let cell_height = if app.image_picker.is_some() {
        CELL_HEIGHT_IMAGES
    } else {
        CELL_HEIGHT_TEXT
    };

    let frames = app.visible_frames();

    let title = if app.model.results.is_searching() {
        " Results (searching…) ".to_string()
    } else {
        format!(" Results ({}) ", frames.len())
    };
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(border_style);
    let inner = block.inner(area);
    f.render_widget(block, area);

    app.model.ui.viewport_rows = logic::layout::visible_rows(inner, cell_height);

    if frames.is_empty() {
        let message = if app.model.results.is_searching() {
            "Searching…"
        } else {
            "No results to display."
        };
        let empty = Paragraph::new(message).style(Style::default().fg(Color::DarkGray));
        let mut text_area = inner;
        text_area.y += inner.height / 3;
        text_area.height = 1;
        f.render_widget(empty, text_area);
        return;
    }

    if app.model.results.is_temporal {
        render_temporal(f, inner, app, &frames, cell_height, focused);
    } else if app.model.ui.group_by_video {
        render_sections(f, inner, app, &frames, cell_height, focused);
    } else {
        render_flat(f, inner, app, &frames, cell_height, focused);
    }
}

fn render_flat(
    f: &mut Frame,
    inner: Rect,
    app: &mut App,
    frames: &[SelectableFrame],
    cell_height: u16,
    focused: bool,
) {
    let cols = app.model.ui.grid_cols;
    let scroll = app.model.ui.results_scroll_row;
    let selected = app.model.ui.results_selected;

    let cells = logic::layout::grid_cells(inner, cols, cell_height, frames.len(), scroll);
    for (idx, rect) in cells {
        render_cell(f, rect, app, &frames[idx], focused && idx == selected);
    }
}

/// Grouped single-query view: one section per video, first-seen order
fn render_sections(
    f: &mut Frame,
    inner: Rect,
    app: &mut App,
    frames: &[SelectableFrame],
    cell_height: u16,
    focused: bool,
) {
    // consecutive runs of one video id are exactly the groups, because the
    // flattened navigation order is the grouped order
    let mut sections: Vec<(String, usize, usize)> = Vec::new(); // (video, start, len)
    for (idx, frame) in frames.iter().enumerate() {
        match sections.last_mut() {
            Some((video, _, len)) if video == &frame.video_id => *len += 1,
            _ => sections.push((frame.video_id.clone(), idx, 1)),
        }
    }

    let selected = app.model.ui.results_selected;
    let first_section = sections
        .iter()
        .position(|(_, start, len)| selected >= *start && selected < start + len)
        .unwrap_or(0);

    let cols = app.model.ui.grid_cols;
    let mut y = inner.y;
    for (video_id, start, len) in sections.iter().skip(first_section) {
        if y >= inner.y + inner.height {
            break;
        }
        let header = Line::from(vec![
            Span::styled(
                video_id.clone(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  (x excludes)", Style::default().fg(Color::DarkGray)),
        ]);
        f.render_widget(
            Paragraph::new(vec![header]),
            Rect {
                x: inner.x,
                y,
                width: inner.width,
                height: 1,
            },
        );
        y += 1;

        let remaining = Rect {
            x: inner.x,
            y,
            width: inner.width,
            height: (inner.y + inner.height).saturating_sub(y),
        };
        let cells = logic::layout::grid_cells(remaining, cols, cell_height, *len, 0);
        let mut max_y = y;
        for (local_idx, rect) in cells {
            let idx = start + local_idx;
            render_cell(f, rect, app, &frames[idx], focused && idx == selected);
            max_y = max_y.max(rect.y + rect.height);
        }
        y = max_y;
    }
}

/// Temporal view: one card per video, one sub-grid per sub-query
fn render_temporal(
    f: &mut Frame,
    inner: Rect,
    app: &mut App,
    frames: &[SelectableFrame],
    cell_height: u16,
    focused: bool,
) {
    let excluded = app.model.filters.excluded_videos.clone();
    let cards = logic::results::visible_temporal(&app.model.results.temporal, &excluded);
    let selected = app.model.ui.results_selected;
    let cols = app.model.ui.grid_cols;

    // find the card containing the selection to pin it to the top
    let mut offsets = Vec::new();
    let mut offset = 0usize;
    for card in &cards {
        offsets.push(offset);
        offset += card
            .query_results
            .iter()
            .map(|qr| qr.keyframes.len())
            .sum::<usize>();
    }
    let first_card = offsets
        .iter()
        .enumerate()
        .rev()
        .find(|(_, start)| selected >= **start)
        .map(|(i, _)| i)
        .unwrap_or(0);

    let mut y = inner.y;
    for (card_idx, card) in cards.iter().enumerate().skip(first_card) {
        if y >= inner.y + inner.height {
            break;
        }
        let header = Line::from(Span::styled(
            format!("Video: {}", card.video_id),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));
        f.render_widget(
            Paragraph::new(vec![header]),
            Rect {
                x: inner.x,
                y,
                width: inner.width,
                height: 1,
            },
        );
        y += 1;

        let mut idx = offsets[card_idx];
        for section in &card.query_results {
            if y >= inner.y + inner.height {
                break;
            }
            let query_line = Line::from(vec![
                Span::styled("  for: ", Style::default().fg(Color::Gray)),
                Span::styled(
                    format!("\"{}\"", section.query),
                    Style::default().fg(Color::Blue),
                ),
            ]);
            f.render_widget(
                Paragraph::new(vec![query_line]),
                Rect {
                    x: inner.x,
                    y,
                    width: inner.width,
                    height: 1,
                },
            );
            y += 1;

            let remaining = Rect {
                x: inner.x,
                y,
                width: inner.width,
                height: (inner.y + inner.height).saturating_sub(y),
            };
            let cells =
                logic::layout::grid_cells(remaining, cols, cell_height, section.keyframes.len(), 0);
            let mut max_y = y;
            for (local_idx, rect) in cells {
                let frame_idx = idx + local_idx;
                render_cell(f, rect, app, &frames[frame_idx], focused && frame_idx == selected);
                max_y = max_y.max(rect.y + rect.height);
            }
            y = max_y;
            idx += section.keyframes.len();
        }
    }
}

fn render_cell(f: &mut Frame, rect: Rect, app: &mut App, frame: &SelectableFrame, selected: bool) {
    let border_style = if selected {
        Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default().borders(Borders::ALL).border_style(border_style);
    let inner = block.inner(rect);
    f.render_widget(block, rect);

    if inner.height == 0 {
        return;
    }

    let caption_area = Rect {
        x: inner.x,
        y: inner.y + inner.height - 1,
        width: inner.width,
        height: 1,
    };
    let caption = format!("{}/{}", frame.video_id, frame.frame_index);
    let caption_style = if selected {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::Gray)
    };
    f.render_widget(
        Paragraph::new(crate::utils::ellipsize(&caption, inner.width as usize))
            .style(caption_style),
        caption_area,
    );

    if inner.height > 1 {
        let image_area = Rect {
            x: inner.x,
            y: inner.y,
            width: inner.width,
            height: inner.height - 1,
        };
        super::render_thumb(f, image_area, &mut app.image_state_map, &frame.image_url);
    }
}
