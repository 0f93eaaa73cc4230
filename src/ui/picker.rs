//! Centered pick-list dialog for packs, videos, object tags, and the
//! excluded-videos list

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::model::PickerKind;
use crate::App;

pub fn render(f: &mut Frame, size: Rect, app: &App) {
    let Some(picker) = &app.model.ui.picker else {
        return;
    };
    let items = app.picker_items();

    let (title, checked): (&str, Box<dyn Fn(&str) -> bool + '_>) = match picker.kind {
        PickerKind::Objects => (
            " Objects (type to search, Space toggles, Ctrl-X clears) ",
            Box::new(|item: &str| app.model.filters.object_tags().contains(&item)),
        ),
        PickerKind::Packs => (
            " Packs (Space toggles, c clears) ",
            Box::new(|item: &str| app.model.filters.packs.iter().any(|p| p == item)),
        ),
        PickerKind::Videos => (
            " Videos (Space toggles, c clears) ",
            Box::new(|item: &str| app.model.filters.videos.iter().any(|v| v == item)),
        ),
        PickerKind::ExcludedVideos => (
            " Excluded videos (Enter re-includes, c clears) ",
            Box::new(|_| true),
        ),
    };

    let height = (items.len() as u16 + 5).clamp(7, size.height.saturating_sub(4).max(7));
    let width = 64.min(size.width.saturating_sub(4)).max(20);
    let area = Rect {
        x: size.x + (size.width.saturating_sub(width)) / 2,
        y: size.y + (size.height.saturating_sub(height)) / 2,
        width,
        height,
    };

    f.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(Color::Yellow));
    let mut inner = block.inner(area);
    f.render_widget(block, area);

    // the objects picker carries an incremental search line
    if picker.kind == PickerKind::Objects && inner.height > 1 {
        let search_area = Rect {
            x: inner.x,
            y: inner.y,
            width: inner.width,
            height: 1,
        };
        let search = format!(
            "Search: {}█ ({} match)",
            app.model.catalogs.object_search,
            items.len()
        );
        f.render_widget(
            Paragraph::new(search).style(Style::default().fg(Color::Cyan)),
            search_area,
        );
        inner.y += 1;
        inner.height -= 1;
    }

    if items.is_empty() {
        f.render_widget(
            Paragraph::new("(empty)").style(Style::default().fg(Color::DarkGray)),
            inner,
        );
        return;
    }

    let list_items: Vec<ListItem> = items
        .iter()
        .map(|item| {
            let mark = if checked(item) { "[x] " } else { "[ ] " };
            ListItem::new(Span::raw(format!("{}{}", mark, item)))
                .style(Style::default().fg(Color::White))
        })
        .collect();

    let list = List::new(list_items)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("► ");

    let mut state = ListState::default();
    state.select(Some(picker.selected.min(items.len() - 1)));
    f.render_stateful_widget(list, inner, &mut state);
}
