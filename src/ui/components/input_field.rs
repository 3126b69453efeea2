//! Input Field Component
//!
//! A text input field with focus handling, password masking, and inline
//! error display. Rounded borders matching the dialog style.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::ui::theme::{COLOR_BORDER, COLOR_DIM, COLOR_INPUT_BG};

/// Configuration for rendering an input field
#[derive(Debug, Clone)]
pub struct InputFieldConfig<'a> {
    /// Label displayed above the input
    pub label: &'a str,
    /// Current value of the input
    pub value: &'a str,
    /// Whether the input is currently focused
    pub focused: bool,
    /// Whether to mask the value (for passwords)
    pub is_password: bool,
    /// Optional error message to display below the input
    pub error: Option<&'a str>,
    /// Optional placeholder text when empty
    pub placeholder: Option<&'a str>,
}

impl<'a> InputFieldConfig<'a> {
    /// Create a new input field configuration
    pub fn new(label: &'a str, value: &'a str) -> Self {
        Self {
            label,
            value,
            focused: false,
            is_password: false,
            error: None,
            placeholder: None,
        }
    }

    /// Set whether the input is focused
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Set whether to mask the value (for passwords)
    pub fn password(mut self, is_password: bool) -> Self {
        self.is_password = is_password;
        self
    }

    /// Set an error message to display
    pub fn error(mut self, error: Option<&'a str>) -> Self {
        self.error = error;
        self
    }

    /// Set placeholder text
    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }
}

/// Calculate the height needed for an input field: label + bordered box,
/// plus one row when an error is shown.
pub fn input_field_height(config: &InputFieldConfig) -> u16 {
    let mut height = 4;
    if config.error.is_some() {
        height += 1;
    }
    height
}

/// Render an input field with label, input box, and optional error.
///
/// Returns the height consumed.
pub fn render_input_field(frame: &mut Frame, area: Rect, config: &InputFieldConfig) -> u16 {
    let mut y_offset = 0;

    let label_style = if config.focused {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(COLOR_DIM)
    };

    let label_area = Rect {
        x: area.x + 2,
        y: area.y + y_offset,
        width: area.width.saturating_sub(4),
        height: 1,
    };
    let label = Paragraph::new(Line::from(Span::styled(config.label, label_style)));
    frame.render_widget(label, label_area);
    y_offset += 1;

    let input_area = Rect {
        x: area.x + 2,
        y: area.y + y_offset,
        width: area.width.saturating_sub(4),
        height: 3,
    };

    let border_color = if config.focused {
        Color::White
    } else {
        COLOR_BORDER
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color))
        .style(Style::default().bg(COLOR_INPUT_BG));

    let display_value = if config.is_password {
        "\u{2022}".repeat(config.value.chars().count())
    } else if config.value.is_empty() && config.placeholder.is_some() {
        config.placeholder.unwrap_or_default().to_string()
    } else {
        config.value.to_string()
    };

    let text_style = if config.value.is_empty() && config.placeholder.is_some() {
        Style::default().fg(COLOR_DIM)
    } else if config.focused {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(COLOR_DIM)
    };

    let mut content = display_value;
    if config.focused {
        content.push('\u{2588}'); // Block cursor
    }

    let input_text = Paragraph::new(Line::from(Span::styled(content, text_style))).block(block);
    frame.render_widget(input_text, input_area);
    y_offset += 3;

    if let Some(error) = config.error {
        let error_area = Rect {
            x: area.x + 2,
            y: area.y + y_offset,
            width: area.width.saturating_sub(4),
            height: 1,
        };
        let error_text = Paragraph::new(Line::from(vec![
            Span::styled("\u{2717} ", Style::default().fg(Color::Red)),
            Span::styled(error, Style::default().fg(Color::Red)),
        ]));
        frame.render_widget(error_text, error_area);
        y_offset += 1;
    }

    y_offset
}
