//! Rendering: screen dispatch, navigation bar, status line, dialogs.

pub mod components;
pub mod compose;
pub mod feed;
pub mod helpers;
pub mod login;
pub mod post_detail;
pub mod profile;
pub mod reset;
pub mod theme;

use ratatui::{
    prelude::*,
    widgets::Paragraph,
};

use crate::app::{App, Dialog, Screen, StatusLevel};
use crate::ui::components::render_dialog_frame;
use crate::ui::theme::{COLOR_ACCENT, COLOR_DIM, COLOR_ERROR, COLOR_OK};

/// Render the whole frame: screen, nav/status chrome, then any dialog
/// on top.
pub fn render(frame: &mut Frame, app: &App) {
    match app.screen {
        Screen::Login => login::render_login_screen(frame, app),
        Screen::Register => login::render_register_screen(frame, app),
        Screen::Feed | Screen::PostDetail | Screen::Profile => render_main(frame, app),
    }

    match app.dialog {
        Some(Dialog::Compose) => compose::render_compose_dialog(frame, app),
        Some(Dialog::Reset) => reset::render_reset_dialog(frame, app),
        Some(Dialog::ConfirmDeletePost { .. }) => render_confirm(
            frame,
            "Delete post",
            "Delete this post? Its comments and favorites go with it.",
        ),
        Some(Dialog::ConfirmDeleteAccount) => render_confirm(
            frame,
            "Delete account",
            "Delete your account? This cannot be undone.",
        ),
        None => {}
    }
}

/// Layout for the authenticated screens: nav bar, content, status line.
fn render_main(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_nav_bar(frame, chunks[0], app);

    match app.screen {
        Screen::Feed => feed::render_feed_screen(frame, chunks[1], app),
        Screen::PostDetail => post_detail::render_post_detail_screen(frame, chunks[1], app),
        Screen::Profile => profile::render_profile_screen(frame, chunks[1], app),
        _ => {}
    }

    render_status_line(frame, chunks[2], app);
}

fn render_nav_bar(frame: &mut Frame, area: Rect, app: &App) {
    let user = app
        .current_user()
        .map(|u| u.name.clone())
        .unwrap_or_default();

    let location = match app.screen {
        Screen::Feed => "Feed",
        Screen::PostDetail => "Post",
        Screen::Profile => "Profile",
        _ => "",
    };

    let bar = Line::from(vec![
        Span::styled(" PLUMA ", Style::default().fg(COLOR_ACCENT).add_modifier(Modifier::BOLD)),
        Span::styled(format!("· {} ", location), Style::default().fg(COLOR_DIM)),
        Span::styled(format!("· {}", user), Style::default().fg(COLOR_DIM)),
    ]);
    frame.render_widget(Paragraph::new(bar), area);
}

fn render_status_line(frame: &mut Frame, area: Rect, app: &App) {
    let Some(status) = &app.status else {
        let hints = match app.screen {
            Screen::Feed => " [↑↓] Select  [Enter] Open  [f] Favorite  [n] New  [p] Profile  [r] Reload  [q] Quit",
            Screen::PostDetail => " [Tab] Comment  [f] Favorite  [e]dit/[d]elete comment  [u] Edit post  [x] Delete post  [Esc] Back",
            Screen::Profile => " [e] Edit  [w] Change password  [l] Sign out  [x] Delete account  [Esc] Back",
            _ => "",
        };
        frame.render_widget(
            Paragraph::new(Span::styled(hints, Style::default().fg(COLOR_DIM))),
            area,
        );
        return;
    };

    let color = match status.level {
        StatusLevel::Info => COLOR_OK,
        StatusLevel::Error => COLOR_ERROR,
    };
    frame.render_widget(
        Paragraph::new(Span::styled(format!(" {}", status.text), Style::default().fg(color))),
        area,
    );
}

fn render_confirm(frame: &mut Frame, title: &str, message: &str) {
    let inner = render_dialog_frame(frame, frame.area(), title, 54, 5);

    let prompt = Paragraph::new(message)
        .style(Style::default().fg(COLOR_ACCENT))
        .wrap(ratatui::widgets::Wrap { trim: true })
        .alignment(Alignment::Center);
    frame.render_widget(prompt, Rect::new(inner.x + 2, inner.y + 1, inner.width.saturating_sub(4), 2));

    let hints = Paragraph::new("[y] Yes  [n] No")
        .style(Style::default().fg(COLOR_DIM))
        .alignment(Alignment::Center);
    frame.render_widget(hints, Rect::new(inner.x, inner.y + 4, inner.width, 1));
}
