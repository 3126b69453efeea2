//! Login and register screens.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::app::App;
use crate::ui::components::{render_input_field, InputFieldConfig};
use crate::ui::theme::{COLOR_BORDER, COLOR_DIM, COLOR_HEADER};
use crate::view_state::{LoginField, RegisterField};

const PLUMA_LOGO: [&str; 3] = [
    "╔═╗╦  ╦ ╦╔╦╗╔═╗",
    "╠═╝║  ║ ║║║║╠═╣",
    "╩  ╩═╝╚═╝╩ ╩╩ ╩",
];

fn render_chrome(frame: &mut Frame, tagline: &str) -> Rect {
    let area = frame.area();

    let outer = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(COLOR_BORDER));
    frame.render_widget(outer, area);

    let inner = area.inner(Margin::new(2, 1));

    let logo_area = Rect::new(inner.x, inner.y + 1, inner.width, 3);
    let logo = Paragraph::new(PLUMA_LOGO.join("\n"))
        .style(Style::default().fg(COLOR_HEADER))
        .alignment(Alignment::Center);
    frame.render_widget(logo, logo_area);

    let tagline_area = Rect::new(inner.x, inner.y + 5, inner.width, 1);
    let tagline = Paragraph::new(tagline)
        .style(Style::default().fg(COLOR_DIM))
        .alignment(Alignment::Center);
    frame.render_widget(tagline, tagline_area);

    // Form column centered below the logo
    let form_width = inner.width.clamp(20, 48);
    Rect::new(
        inner.x + (inner.width.saturating_sub(form_width)) / 2,
        inner.y + 7,
        form_width,
        inner.height.saturating_sub(8),
    )
}

pub fn render_login_screen(frame: &mut Frame, app: &App) {
    let form_area = render_chrome(frame, "Write. Share. Inspire.");
    let form = &app.login_form;

    let mut y = form_area.y;
    let email = InputFieldConfig::new("Email", &form.email)
        .focused(form.focus == LoginField::Email)
        .placeholder("you@example.com");
    y += render_input_field(frame, Rect::new(form_area.x, y, form_area.width, 4), &email);

    let password = InputFieldConfig::new("Password", &form.password)
        .focused(form.focus == LoginField::Password)
        .password(true)
        .error(form.error.as_deref());
    y += render_input_field(
        frame,
        Rect::new(form_area.x, y, form_area.width, 5),
        &password,
    );

    let hints = Paragraph::new("[Enter] Sign in  [Tab] Next field  [Ctrl+R] Create account")
        .style(Style::default().fg(COLOR_DIM))
        .alignment(Alignment::Center);
    frame.render_widget(hints, Rect::new(form_area.x, y + 1, form_area.width, 1));
}

pub fn render_register_screen(frame: &mut Frame, app: &App) {
    let form_area = render_chrome(frame, "Create your account");
    let form = &app.register_form;

    let mut y = form_area.y;
    let name = InputFieldConfig::new("Name", &form.name)
        .focused(form.focus == RegisterField::Name);
    y += render_input_field(frame, Rect::new(form_area.x, y, form_area.width, 4), &name);

    let email = InputFieldConfig::new("Email", &form.email)
        .focused(form.focus == RegisterField::Email)
        .placeholder("you@example.com");
    y += render_input_field(frame, Rect::new(form_area.x, y, form_area.width, 4), &email);

    let password = InputFieldConfig::new("Password", &form.password)
        .focused(form.focus == RegisterField::Password)
        .password(true)
        .error(form.error.as_deref());
    y += render_input_field(
        frame,
        Rect::new(form_area.x, y, form_area.width, 5),
        &password,
    );

    let hints = Paragraph::new("[Enter] Create account  [Tab] Next field  [Esc] Back to sign in")
        .style(Style::default().fg(COLOR_DIM))
        .alignment(Alignment::Center);
    frame.render_widget(hints, Rect::new(form_area.x, y + 1, form_area.width, 1));
}
