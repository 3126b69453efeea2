//! Color theme constants for the Pluma UI.
//!
//! Minimal dark palette used throughout the screens.

use ratatui::style::Color;

/// Primary border color
pub const COLOR_BORDER: Color = Color::DarkGray;

/// Accent color for highlights and focused elements
pub const COLOR_ACCENT: Color = Color::White;

/// Header/logo text color
pub const COLOR_HEADER: Color = Color::White;

/// Dim text for secondary info
pub const COLOR_DIM: Color = Color::DarkGray;

/// Background for input areas
pub const COLOR_INPUT_BG: Color = Color::Rgb(20, 20, 30);

/// Background for dialog boxes
pub const COLOR_DIALOG_BG: Color = Color::Rgb(10, 15, 35);

/// Favorite marker color
pub const COLOR_FAVORITE: Color = Color::LightRed;

/// Success/info status color
pub const COLOR_OK: Color = Color::Rgb(4, 181, 117);

/// Error status color
pub const COLOR_ERROR: Color = Color::Red;
