//! The profile screen: account details, edit form, and the user's
//! posts and favorites derived from the cache.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph},
};

use crate::app::App;
use crate::ui::components::{render_input_field, InputFieldConfig};
use crate::ui::helpers::truncate_string;
use crate::ui::theme::{COLOR_ACCENT, COLOR_BORDER, COLOR_DIM};
use crate::view_state::ProfileField;

pub fn render_profile_screen(frame: &mut Frame, area: Rect, app: &App) {
    let Some(user) = app.current_user() else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(11), Constraint::Min(4)])
        .split(area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(COLOR_BORDER))
        .title(" My Profile ");
    let inner = block.inner(chunks[0]);
    frame.render_widget(block, chunks[0]);

    if app.profile_form.editing {
        let mut y = inner.y;
        let name = InputFieldConfig::new("Name", &app.profile_form.name)
            .focused(app.profile_form.focus == ProfileField::Name);
        y += render_input_field(frame, Rect::new(inner.x, y, inner.width, 4), &name);

        let email = InputFieldConfig::new("Email", &app.profile_form.email)
            .focused(app.profile_form.focus == ProfileField::Email)
            .error(app.profile_form.error.as_deref());
        render_input_field(frame, Rect::new(inner.x, y, inner.width, 5), &email);
    } else {
        let lines = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled("  Name:  ", Style::default().fg(COLOR_DIM)),
                Span::styled(user.name.clone(), Style::default().fg(COLOR_ACCENT)),
            ]),
            Line::from(vec![
                Span::styled("  Email: ", Style::default().fg(COLOR_DIM)),
                Span::styled(user.email.clone(), Style::default().fg(COLOR_ACCENT)),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "  [e] Edit  [w] Change password  [l] Sign out  [x] Delete account  [Esc] Back",
                Style::default().fg(COLOR_DIM),
            )),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    }

    render_post_lists(frame, chunks[1], app, user.id);
}

fn render_post_lists(frame: &mut Frame, area: Rect, app: &App, user_id: i64) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let mine = app.cache.posts_by(user_id);
    render_post_list(frame, halves[0], " My posts ", &mine);

    let favorites = app.cache.favorited_posts_of(user_id);
    render_post_list(frame, halves[1], " Favorites ", &favorites);
}

fn render_post_list(frame: &mut Frame, area: Rect, title: &str, posts: &[&crate::models::Post]) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(COLOR_BORDER))
        .title(format!("{}({})", title, posts.len()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if posts.is_empty() {
        let empty = Paragraph::new("Nothing here yet.")
            .style(Style::default().fg(COLOR_DIM))
            .alignment(Alignment::Center);
        frame.render_widget(empty, inner);
        return;
    }

    let items: Vec<ListItem> = posts
        .iter()
        .map(|post| {
            ListItem::new(Line::from(vec![
                Span::raw(truncate_string(&post.title, 32)),
                Span::styled(
                    format!("  {} ♥", post.favorite_count),
                    Style::default().fg(COLOR_DIM),
                ),
            ]))
        })
        .collect();
    frame.render_widget(List::new(items), inner);
}
