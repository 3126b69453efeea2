//! Password-reset dialogs: email entry, OTP verification, new password.
//!
//! Which step renders follows the [`ResetFlow`] state; there is no
//! separate dialog bookkeeping to fall out of sync with it.

use ratatui::{
    prelude::*,
    widgets::Paragraph,
};

use crate::app::App;
use crate::state::{PasswordCheck, ResetFlow};
use crate::ui::components::{render_dialog_frame, render_input_field, InputFieldConfig};
use crate::ui::theme::{COLOR_DIM, COLOR_ERROR, COLOR_OK};
use crate::view_state::ResetPasswordField;

pub fn render_reset_dialog(frame: &mut Frame, app: &App) {
    match &app.reset_flow {
        ResetFlow::Idle => render_email_step(frame, app),
        ResetFlow::AwaitingOtp { email, .. } => {
            let email = email.clone();
            render_code_step(frame, app, &email);
        }
        ResetFlow::AwaitingNewPassword { .. } => render_password_step(frame, app),
    }
}

fn render_email_step(frame: &mut Frame, app: &App) {
    let inner = render_dialog_frame(frame, frame.area(), "Reset password", 54, 9);

    let prompt = Paragraph::new("Enter your email to receive a verification code")
        .style(Style::default().fg(COLOR_DIM));
    frame.render_widget(prompt, Rect::new(inner.x + 2, inner.y, inner.width.saturating_sub(4), 1));

    let email = InputFieldConfig::new("Email", &app.reset_form.email)
        .focused(true)
        .placeholder("you@example.com")
        .error(app.reset_form.error.as_deref());
    render_input_field(frame, Rect::new(inner.x, inner.y + 2, inner.width, 5), &email);

    let hints = Paragraph::new("[Enter] Send code  [Esc] Cancel")
        .style(Style::default().fg(COLOR_DIM))
        .alignment(Alignment::Center);
    frame.render_widget(hints, Rect::new(inner.x, inner.y + 8, inner.width, 1));
}

fn render_code_step(frame: &mut Frame, app: &App, email: &str) {
    let inner = render_dialog_frame(frame, frame.area(), "Verify code", 54, 9);

    let prompt = Paragraph::new(format!("We sent a 6-digit code to {}", email))
        .style(Style::default().fg(COLOR_DIM));
    frame.render_widget(prompt, Rect::new(inner.x + 2, inner.y, inner.width.saturating_sub(4), 1));

    let code = InputFieldConfig::new("Verification code", &app.reset_form.code)
        .focused(true)
        .placeholder("000000")
        .error(app.reset_form.error.as_deref());
    render_input_field(frame, Rect::new(inner.x, inner.y + 2, inner.width, 5), &code);

    let hints = Paragraph::new("[Enter] Verify  [Ctrl+R] Resend code  [Esc] Cancel")
        .style(Style::default().fg(COLOR_DIM))
        .alignment(Alignment::Center);
    frame.render_widget(hints, Rect::new(inner.x, inner.y + 8, inner.width, 1));
}

fn render_password_step(frame: &mut Frame, app: &App) {
    let inner = render_dialog_frame(frame, frame.area(), "Create new password", 54, 16);
    let form = &app.reset_form;

    let mut y = inner.y;
    let password = InputFieldConfig::new("New password", &form.password)
        .focused(form.focus == ResetPasswordField::Password)
        .password(true);
    y += render_input_field(frame, Rect::new(inner.x, y, inner.width, 4), &password);

    let confirmation = InputFieldConfig::new("Confirm new password", &form.confirmation)
        .focused(form.focus == ResetPasswordField::Confirmation)
        .password(true)
        .error(form.error.as_deref());
    y += render_input_field(frame, Rect::new(inner.x, y, inner.width, 5), &confirmation);

    // Live rule checklist, mirroring what submission will enforce
    let check = PasswordCheck::evaluate(&form.password, &form.confirmation);
    let rules = [
        (check.min_length, "At least 6 characters"),
        (check.has_uppercase, "At least one uppercase letter"),
        (check.has_digit, "At least one digit"),
        (check.matches_confirmation, "Passwords match"),
    ];
    for (passed, label) in rules {
        let (mark, color) = if passed { ("✓", COLOR_OK) } else { ("✗", COLOR_ERROR) };
        let line = Paragraph::new(format!("{} {}", mark, label)).style(Style::default().fg(color));
        frame.render_widget(line, Rect::new(inner.x + 2, y, inner.width.saturating_sub(4), 1));
        y += 1;
    }

    let hints = Paragraph::new("[Enter] Reset password  [Tab] Switch field  [Esc] Cancel")
        .style(Style::default().fg(COLOR_DIM))
        .alignment(Alignment::Center);
    frame.render_widget(hints, Rect::new(inner.x, y + 1, inner.width, 1));
}
