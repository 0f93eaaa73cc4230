//! Screen geometry: the two-panel split and the result grid

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Layout information for rendering
pub struct LayoutInfo {
    /// Staging top bar
    pub top_bar: Rect,
    /// Control panel (queries, filters, submission)
    pub controls: Rect,
    /// Results pane
    pub results: Rect,
    /// Hotkey legend
    pub legend: Rect,
    /// Bottom status bar
    pub status: Rect,
}

/// Calculate the screen layout: top bar, adjustable horizontal split,
/// legend and status bar
pub fn calculate_layout(size: Rect, left_percent: u16) -> LayoutInfo {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // staging top bar
            Constraint::Min(5),    // content
            Constraint::Length(1), // legend
            Constraint::Length(1), // status bar
        ])
        .split(size);

    let left = left_percent.clamp(10, 90);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(left),
            Constraint::Percentage(100 - left),
        ])
        .split(vertical[1]);

    LayoutInfo {
        top_bar: vertical[0],
        controls: horizontal[0],
        results: horizontal[1],
        legend: vertical[2],
        status: vertical[3],
    }
}

/// Rects for the visible window of a grid with exactly `cols` columns.
/// Returns `(item_index, rect)` pairs for items whose row intersects the
/// area, scrolled down by `first_row` grid rows.
pub fn grid_cells(
    area: Rect,
    cols: u16,
    cell_height: u16,
    count: usize,
    first_row: usize,
) -> Vec<(usize, Rect)> {
    if count == 0 || area.width == 0 || area.height == 0 {
        return Vec::new();
    }
    let cols = cols.max(1);
    let cell_width = area.width / cols;
    if cell_width == 0 || cell_height == 0 {
        return Vec::new();
    }
    let visible_rows = (area.height / cell_height).max(1) as usize;

    let mut cells = Vec::new();
    for row in first_row..first_row + visible_rows {
        for col in 0..cols as usize {
            let idx = row * cols as usize + col;
            if idx >= count {
                return cells;
            }
            let rect = Rect {
                x: area.x + col as u16 * cell_width,
                y: area.y + ((row - first_row) as u16) * cell_height,
                width: cell_width,
                height: cell_height,
            };
            cells.push((idx, rect));
        }
    }
    cells
}

/// Grid rows that fit in `area` at the given cell height
pub fn visible_rows(area: Rect, cell_height: u16) -> usize {
    if cell_height == 0 {
        return 1;
    }
    (area.height / cell_height).max(1) as usize
}

/// First row to scroll to so that `selected` stays visible
pub fn scroll_for_selection(selected: usize, cols: u16, first_row: usize, rows: usize) -> usize {
    let row = selected / cols.max(1) as usize;
    if row < first_row {
        row
    } else if row >= first_row + rows {
        row + 1 - rows
    } else {
        first_row
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_has_exactly_n_columns() {
        let area = Rect::new(0, 0, 100, 40);
        for cols in 1..=10u16 {
            let cells = grid_cells(area, cols, 10, 100, 0);
            let mut xs: Vec<u16> = cells.iter().map(|(_, r)| r.x).collect();
            xs.sort_unstable();
            xs.dedup();
            assert_eq!(xs.len(), cols as usize, "cols={}", cols);
        }
    }

    #[test]
    fn test_grid_empty_result_set() {
        let area = Rect::new(0, 0, 100, 40);
        assert!(grid_cells(area, 3, 10, 0, 0).is_empty());
    }

    #[test]
    fn test_grid_fewer_items_than_columns() {
        let area = Rect::new(0, 0, 100, 40);
        let cells = grid_cells(area, 10, 10, 4, 0);
        assert_eq!(cells.len(), 4);
    }

    #[test]
    fn test_grid_scroll_offset() {
        let area = Rect::new(0, 0, 90, 20);
        // 3 cols, cell height 10 -> 2 visible rows
        let cells = grid_cells(area, 3, 10, 100, 2);
        assert_eq!(cells.first().map(|(i, _)| *i), Some(6));
        assert_eq!(cells.len(), 6);
    }

    #[test]
    fn test_scroll_follows_selection() {
        // 3 cols, 2 visible rows
        assert_eq!(scroll_for_selection(0, 3, 5, 2), 0);
        assert_eq!(scroll_for_selection(7, 3, 0, 2), 1); // row 2 -> scroll to 1
        assert_eq!(scroll_for_selection(4, 3, 1, 2), 1); // already visible
    }

    #[test]
    fn test_split_respects_bounds() {
        let info = calculate_layout(Rect::new(0, 0, 120, 40), 30);
        assert_eq!(info.top_bar.height, 3);
        assert_eq!(info.status.height, 1);
        assert!(info.controls.width < info.results.width);
    }
}
