//! Control panel: queries, search parameters, filters, submission buffer

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::model::{control_rows, ControlRow, EditTarget, Focus};
use crate::utils;
use crate::App;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let focused = app.model.ui.focus == Focus::Controls;
    let rows = control_rows(app.model.queries.len());
    let selected_row = app.model.ui.control_row.min(rows.len() - 1);

    // (row index for highlight/scroll, line) pairs; headers carry None
    let mut lines: Vec<(Option<usize>, Line)> = Vec::new();
    let header =
        |text: &str| -> Line { Line::from(Span::styled(text.to_string(), header_style())) };

    lines.push((None, header("Queries")));
    for (row_idx, row) in rows.iter().enumerate() {
        let line = match row {
            ControlRow::Query(i) => {
                let item = &app.model.queries.items()[*i];
                let text = field_text(app, EditTarget::Query(item.id), &item.text, "type a query…");
                Line::from(vec![Span::raw(format!("{:>2}. ", i + 1)), text])
            }
            ControlRow::AddQuery => Line::from(Span::raw("  [+] add query")),
            ControlRow::Retriever => Line::from(vec![
                Span::raw("Retriever: "),
                Span::styled(
                    app.model.params.retriever.label().to_string(),
                    value_style(),
                ),
            ]),
            ControlRow::TopKPerQuery => Line::from(vec![
                Span::raw("Max per query: "),
                field_text(
                    app,
                    EditTarget::TopKPerQuery,
                    &app.model.params.top_k_per_query.to_string(),
                    "",
                ),
            ]),
            ControlRow::TopK => Line::from(vec![
                Span::raw("Total results: "),
                field_text(app, EditTarget::TopK, &app.model.params.top_k.to_string(), ""),
            ]),
            ControlRow::Keyword => Line::from(vec![
                Span::raw("Keyword: "),
                field_text(app, EditTarget::Keyword, &app.model.filters.keyword, "any"),
            ]),
            ControlRow::Object => Line::from(vec![
                Span::raw("Objects: "),
                field_text(app, EditTarget::Object, &app.model.filters.object, "any"),
            ]),
            ControlRow::FreeText => Line::from(vec![
                Span::raw("Text: "),
                field_text(app, EditTarget::FreeText, &app.model.filters.free_text, "any"),
            ]),
            ControlRow::Packs => Line::from(vec![
                Span::raw("Packs: "),
                Span::styled(summarize(&app.model.filters.packs, "none"), value_style()),
            ]),
            ControlRow::Videos => {
                let summary = if app.model.catalogs.videos_loading {
                    "loading…".to_string()
                } else {
                    summarize(&app.model.filters.videos, "all")
                };
                Line::from(vec![
                    Span::raw("Videos: "),
                    Span::styled(summary, value_style()),
                ])
            }
            ControlRow::ExcludedVideos => Line::from(vec![
                Span::raw("Excluded: "),
                Span::styled(
                    format!("{}", app.model.filters.excluded_videos.len()),
                    Style::default().fg(Color::Red),
                ),
            ]),
            ControlRow::Filename => Line::from(vec![
                Span::raw("Filename: "),
                field_text(
                    app,
                    EditTarget::Filename,
                    &app.model.submission.filename,
                    "submission",
                ),
            ]),
            ControlRow::Buffer => {
                let count = app.model.submission.lines().len();
                Line::from(vec![
                    Span::raw("Buffer: "),
                    Span::styled(format!("{} line(s)", count), value_style()),
                ])
            }
        };

        let line = if focused && row_idx == selected_row {
            highlight(line)
        } else {
            line
        };
        lines.push((Some(row_idx), line));

        if matches!(row, ControlRow::TopK) {
            lines.push((None, header("Filters")));
        }
        if matches!(row, ControlRow::ExcludedVideos) {
            lines.push((None, header("Submission")));
        }
    }

    // trailing buffer lines so the operator can see (and prune) commits
    let buffer_selected =
        focused && matches!(rows.get(selected_row), Some(ControlRow::Buffer));
    for (i, buf_line) in app.model.submission.lines().iter().enumerate() {
        let style = if buffer_selected && i == app.model.ui.buffer_line {
            Style::default().bg(Color::DarkGray).fg(Color::White)
        } else {
            Style::default().fg(Color::Gray)
        };
        lines.push((
            None,
            Line::from(Span::styled(
                format!("  {}", utils::ellipsize(buf_line, area.width.saturating_sub(4) as usize)),
                style,
            )),
        ));
    }

    // keep the selected row inside the viewport
    let inner_height = area.height.saturating_sub(2) as usize;
    let selected_line = lines
        .iter()
        .position(|(row, _)| *row == Some(selected_row))
        .unwrap_or(0);
    let scroll = selected_line.saturating_sub(inner_height.saturating_sub(1)) as u16;

    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Query Tools ")
        .border_style(border_style);

    let text: Vec<Line> = lines.into_iter().map(|(_, l)| l).collect();
    f.render_widget(
        Paragraph::new(text).block(block).scroll((scroll, 0)),
        area,
    );
}

fn header_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

fn value_style() -> Style {
    Style::default().fg(Color::White)
}

fn field_text(app: &App, target: EditTarget, value: &str, placeholder: &str) -> Span<'static> {
    if app.model.ui.editing == Some(target) {
        Span::styled(
            format!("{}█", app.model.ui.edit_buffer),
            Style::default().fg(Color::Yellow),
        )
    } else if value.is_empty() {
        Span::styled(
            placeholder.to_string(),
            Style::default().fg(Color::DarkGray),
        )
    } else {
        Span::styled(value.to_string(), value_style())
    }
}

fn summarize(items: &[String], empty: &str) -> String {
    if items.is_empty() {
        empty.to_string()
    } else if items.len() <= 3 {
        items.join(", ")
    } else {
        format!("{} +{} more", items[..2].join(", "), items.len() - 2)
    }
}

fn highlight(line: Line) -> Line {
    line.style(Style::default().bg(Color::DarkGray))
}
