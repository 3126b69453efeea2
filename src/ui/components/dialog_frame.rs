//! Dialog Frame Component
//!
//! A centered dialog frame with rounded borders. Clears the background
//! behind it and returns the inner area for content.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders, Clear},
    Frame,
};

use crate::ui::helpers::centered_rect;
use crate::ui::theme::{COLOR_BORDER, COLOR_DIALOG_BG, COLOR_HEADER};

/// Render a centered dialog frame and return the inner content area.
pub fn render_dialog_frame(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    width: u16,
    content_height: u16,
) -> Rect {
    let dialog_area = centered_rect(area, width, content_height + 2);

    frame.render_widget(Clear, dialog_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(COLOR_BORDER))
        .style(Style::default().bg(COLOR_DIALOG_BG))
        .title(Span::styled(
            format!(" {} ", title),
            Style::default()
                .fg(COLOR_HEADER)
                .add_modifier(Modifier::BOLD),
        ));

    let inner = block.inner(dialog_area);
    frame.render_widget(block, dialog_area);
    inner
}
