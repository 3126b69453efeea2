//! Terminal setup and teardown functions.
//!
//! Low-level functions for entering and leaving TUI mode. These are
//! used by `TerminalManager` but can also be used directly if needed.

use crossterm::{
    cursor::Show,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, Write};

/// Enter TUI mode.
///
/// Enters the alternate screen (preserving the original terminal
/// content) and enables mouse capture for scroll events.
pub fn enter_tui_mode<W: Write>(writer: &mut W) -> io::Result<()> {
    execute!(writer, EnterAlternateScreen, EnableMouseCapture)
}

/// Leave TUI mode and restore the terminal to its normal state.
///
/// Safe to call multiple times; errors are ignored so cleanup can run
/// in any terminal state.
pub fn leave_tui_mode<W: Write>(writer: &mut W) {
    let _ = disable_raw_mode();
    let _ = execute!(writer, DisableMouseCapture, LeaveAlternateScreen);
    let _ = writer.flush();
    let _ = execute!(writer, Show);
}

/// Restore the terminal after a panic or error.
///
/// Aggressive cleanup that ignores all errors.
pub fn emergency_restore() {
    let mut stdout = io::stdout();
    leave_tui_mode(&mut stdout);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leave_tui_mode_does_not_panic() {
        let mut buffer = Vec::new();
        leave_tui_mode(&mut buffer);
    }

    #[test]
    fn test_emergency_restore_does_not_panic() {
        emergency_restore();
    }
}
