//! The post feed screen.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph},
};

use crate::app::App;
use crate::ui::helpers::{spinner_frame, truncate_string};
use crate::ui::theme::{COLOR_ACCENT, COLOR_BORDER, COLOR_DIM, COLOR_FAVORITE};

pub fn render_feed_screen(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(COLOR_BORDER))
        .title(" Feed ");

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.loading {
        let loading = Paragraph::new(format!("{} Loading posts...", spinner_frame(app.tick_count)))
            .style(Style::default().fg(COLOR_DIM))
            .alignment(Alignment::Center);
        frame.render_widget(loading, inner);
        return;
    }

    if app.cache.posts().is_empty() {
        let empty = Paragraph::new("No posts yet. Press [n] to write the first one.")
            .style(Style::default().fg(COLOR_DIM))
            .alignment(Alignment::Center);
        frame.render_widget(empty, inner);
        return;
    }

    let user_id = app.current_user().map(|u| u.id);
    let items: Vec<ListItem> = app
        .cache
        .posts()
        .iter()
        .map(|post| {
            let author = post
                .owner
                .as_ref()
                .map(|u| u.name.as_str())
                .unwrap_or("unknown");
            let comment_count = app.cache.comments_for(post.id).len();
            let favorited = user_id
                .map(|id| app.cache.is_favorited_by(post.id, id))
                .unwrap_or(false);
            let marker = if favorited { "♥" } else { " " };

            let line = Line::from(vec![
                Span::styled(format!("{} ", marker), Style::default().fg(COLOR_FAVORITE)),
                Span::styled(
                    truncate_string(&post.title, 48),
                    Style::default().fg(COLOR_ACCENT),
                ),
                Span::styled(
                    format!("  by {}", author),
                    Style::default().fg(COLOR_DIM),
                ),
                Span::styled(
                    format!("  {} ♥  {} comments", post.favorite_count, comment_count),
                    Style::default().fg(COLOR_DIM),
                ),
            ]);
            ListItem::new(line)
        })
        .collect();

    let list = List::new(items)
        .highlight_style(
            Style::default()
                .bg(Color::Rgb(40, 40, 55))
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("› ");

    let mut state = ListState::default();
    state.select(Some(app.feed_selected));
    frame.render_stateful_widget(list, inner, &mut state);
}
