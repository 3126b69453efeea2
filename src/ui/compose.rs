//! Create/edit post dialog.

use ratatui::{
    prelude::*,
    widgets::Paragraph,
};

use crate::app::App;
use crate::ui::components::{render_dialog_frame, render_input_field, InputFieldConfig};
use crate::ui::theme::COLOR_DIM;
use crate::view_state::ComposeField;

pub fn render_compose_dialog(frame: &mut Frame, app: &App) {
    let form = &app.compose_form;
    let editing = form.editing.is_some();
    let title = if editing { "Edit post" } else { "New post" };

    // Title + body + optional image path + hints
    let content_height = if editing { 11 } else { 15 };
    let inner = render_dialog_frame(frame, frame.area(), title, 60, content_height);

    let mut y = inner.y;
    let title_field = InputFieldConfig::new("Title", &form.title)
        .focused(form.focus == ComposeField::Title);
    y += render_input_field(frame, Rect::new(inner.x, y, inner.width, 4), &title_field);

    let body_field = InputFieldConfig::new("Body", &form.body)
        .focused(form.focus == ComposeField::Body);
    y += render_input_field(frame, Rect::new(inner.x, y, inner.width, 4), &body_field);

    if !editing {
        let image_field = InputFieldConfig::new("Image path", &form.image_path)
            .focused(form.focus == ComposeField::ImagePath)
            .placeholder("~/pictures/cover.png")
            .error(form.error.as_deref());
        y += render_input_field(frame, Rect::new(inner.x, y, inner.width, 5), &image_field);
    } else if let Some(error) = form.error.as_deref() {
        let error_line = Paragraph::new(format!("✗ {}", error))
            .style(Style::default().fg(Color::Red));
        frame.render_widget(error_line, Rect::new(inner.x + 2, y, inner.width.saturating_sub(4), 1));
        y += 1;
    }

    let hint = if editing {
        "[Enter] Save  [Tab] Next field  [Esc] Cancel"
    } else {
        "[Enter] Publish  [Tab] Next field  [Esc] Cancel"
    };
    let hints = Paragraph::new(hint)
        .style(Style::default().fg(COLOR_DIM))
        .alignment(Alignment::Center);
    frame.render_widget(hints, Rect::new(inner.x, y + 1, inner.width, 1));
}
