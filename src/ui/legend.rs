//! Context-sensitive hotkey legend

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

use crate::model::{Focus, Modal};
use crate::App;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let text = if app.model.ui.is_editing() {
        "editing: Enter accept | Esc cancel | ←→ move | Home/End".to_string()
    } else if app.model.ui.picker.is_some() {
        "picker: ↑↓ move | Space/Enter toggle | Esc close".to_string()
    } else {
        match app.model.modals.top() {
            Some(Modal::Image { .. }) => "Esc close".to_string(),
            Some(Modal::Video(_)) => {
                "←→ step frame | space play | Enter select frame | n note | t temporal | c add | Esc close"
                    .to_string()
            }
            Some(Modal::Keyframes(_)) => {
                "↑↓←→ move | Enter populate | a direct add | z zoom | c add | Esc close".to_string()
            }
            None => match app.model.ui.focus {
                Focus::Controls => {
                    "↑↓ rows | Enter edit/open | x remove | Tab results | s search | D export | W save | q quit"
                        .to_string()
                }
                Focus::Results => {
                    "↑↓←→ move | Enter populate | a add | z zoom | v video | k keyframes | x exclude | g group | [ ] cols | Tab panel"
                        .to_string()
                }
            },
        }
    };

    f.render_widget(
        Paragraph::new(text).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}
