//! The post detail screen: one post, its comments, and the comment input.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::app::{App, DetailFocus};
use crate::models::format_timestamp;
use crate::ui::helpers::spinner_frame;
use crate::ui::theme::{COLOR_ACCENT, COLOR_BORDER, COLOR_DIM, COLOR_FAVORITE, COLOR_INPUT_BG};

pub fn render_post_detail_screen(frame: &mut Frame, area: Rect, app: &App) {
    let Some(post) = app.cache.viewed_post() else {
        let missing = Paragraph::new(if app.detail_loading {
            format!("{} Loading post...", spinner_frame(app.tick_count))
        } else {
            "Post not available. [Esc] Back".to_string()
        })
        .style(Style::default().fg(COLOR_DIM))
        .alignment(Alignment::Center);
        frame.render_widget(missing, area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7),
            Constraint::Min(4),
            Constraint::Length(3),
        ])
        .split(area);

    render_post_card(frame, chunks[0], app, post.id);
    render_comments(frame, chunks[1], app, post.id);
    render_comment_input(frame, chunks[2], app);
}

fn render_post_card(frame: &mut Frame, area: Rect, app: &App, post_id: i64) {
    let Some(post) = app.cache.post(post_id) else {
        return;
    };

    let author = post
        .owner
        .as_ref()
        .map(|u| u.name.as_str())
        .unwrap_or("unknown");
    let user_id = app.current_user().map(|u| u.id);
    let favorited = user_id
        .map(|id| app.cache.is_favorited_by(post_id, id))
        .unwrap_or(false);
    let heart = if favorited { "♥" } else { "♡" };
    let when = post
        .created_at
        .as_deref()
        .map(format_timestamp)
        .unwrap_or_default();

    let mut lines = vec![
        Line::from(Span::styled(
            post.title.clone(),
            Style::default()
                .fg(COLOR_ACCENT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("by {}  {}", author, when),
            Style::default().fg(COLOR_DIM),
        )),
        Line::from(""),
        Line::from(post.body.clone()),
    ];
    if let Some(image) = &post.image {
        lines.push(Line::from(Span::styled(
            format!("⎙ {}", image),
            Style::default().fg(COLOR_DIM),
        )));
    }

    let title = format!(
        " Post  {} {} ",
        heart, post.favorite_count
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(COLOR_BORDER))
        .title(Span::styled(title, Style::default().fg(COLOR_FAVORITE)));

    let card = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    frame.render_widget(card, area);
}

fn render_comments(frame: &mut Frame, area: Rect, app: &App, post_id: i64) {
    let comments = app.cache.comments_for(post_id);
    let focused = app.detail_focus == DetailFocus::Comments;

    let border = if focused { COLOR_ACCENT } else { COLOR_BORDER };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border))
        .title(format!(" Comments ({}) ", comments.len()));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if comments.is_empty() {
        let empty = Paragraph::new("No comments yet.")
            .style(Style::default().fg(COLOR_DIM))
            .alignment(Alignment::Center);
        frame.render_widget(empty, inner);
        return;
    }

    let items: Vec<ListItem> = comments
        .iter()
        .map(|comment| {
            let author = comment
                .author
                .as_ref()
                .map(|u| u.name.as_str())
                .unwrap_or("unknown");
            ListItem::new(Line::from(vec![
                Span::styled(format!("{}: ", author), Style::default().fg(COLOR_DIM)),
                Span::raw(comment.text.clone()),
            ]))
        })
        .collect();

    let list = List::new(items)
        .highlight_style(Style::default().bg(Color::Rgb(40, 40, 55)))
        .highlight_symbol("› ");

    let mut state = ListState::default();
    if focused {
        state.select(Some(app.comment_selected));
    }
    frame.render_stateful_widget(list, inner, &mut state);
}

fn render_comment_input(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.detail_focus == DetailFocus::Input;
    let border = if focused { COLOR_ACCENT } else { COLOR_BORDER };

    let label = match app.comment_form.editing {
        Some(_) => " Edit comment ",
        None => " Add comment ",
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border))
        .style(Style::default().bg(COLOR_INPUT_BG))
        .title(label);

    let mut content = app.comment_form.text.clone();
    if focused {
        content.push('\u{2588}');
    }

    let input = Paragraph::new(content).block(block);
    frame.render_widget(input, area);
}
