//! Rendering: pure function of the model (plus the runtime image map)

pub mod controls;
pub mod keyframe_modal;
pub mod legend;
pub mod modals;
pub mod picker;
pub mod results;
pub mod status_bar;
pub mod toast;
pub mod top_bar;
pub mod video_modal;

use std::collections::HashMap;

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};
use ratatui_image::{Resize, StatefulImage};

use crate::logic;
use crate::services::images::ImageState;
use crate::App;

/// Main render function - orchestrates all UI rendering
pub fn render(f: &mut Frame, app: &mut App) {
    let size = f.area();
    let layout = logic::layout::calculate_layout(size, app.model.ui.left_percent);

    top_bar::render(f, layout.top_bar, app);
    controls::render(f, layout.controls, app);
    results::render(f, layout.results, app);
    legend::render(f, layout.legend, app);
    status_bar::render(f, layout.status, app);

    if app.model.modals.is_open() {
        modals::render(f, size, app);
    }

    if app.model.ui.picker.is_some() {
        picker::render(f, size, app);
    }

    if let Some((message, _)) = app.model.ui.toast.clone() {
        toast::render_toast(f, size, &message);
    }
}

/// Draw one thumbnail into `area` from the runtime image map, falling back
/// to a textual placeholder while loading or on failure
pub(crate) fn render_thumb(
    f: &mut Frame,
    area: Rect,
    images: &mut HashMap<String, ImageState>,
    url: &str,
) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    match images.get_mut(url) {
        Some(ImageState::Ready { protocol }) => {
            let widget = StatefulImage::default().resize(Resize::Fit(None));
            f.render_stateful_widget(widget, area, protocol);
        }
        Some(ImageState::Loading) => {
            let placeholder =
                Paragraph::new("loading…").style(Style::default().fg(Color::DarkGray));
            f.render_widget(placeholder, area);
        }
        Some(ImageState::Failed { .. }) => {
            let placeholder =
                Paragraph::new("(no preview)").style(Style::default().fg(Color::DarkGray));
            f.render_widget(placeholder, area);
        }
        None => {
            let placeholder = Paragraph::new("·").style(Style::default().fg(Color::DarkGray));
            f.render_widget(placeholder, area);
        }
    }
}
