use pluma::app::App;
use pluma::cli::{parse_args, CliCommand};
use pluma::startup::{self, StartupConfig};
use pluma::terminal::{setup_panic_hook, TerminalManager};
use pluma::ui;

use color_eyre::eyre::eyre;
use color_eyre::Result;
use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use std::time::Duration;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    match parse_args(std::env::args()) {
        CliCommand::Version => {
            println!("pluma {}", VERSION);
            return Ok(());
        }
        CliCommand::RunTui => {}
    }

    startup::init_tracing();
    setup_panic_hook();

    // Restore the persisted session before touching the terminal; a
    // valid one resumes straight into the feed.
    let mut app = startup::restore(StartupConfig::from_env()).await?;

    let mut terminal = TerminalManager::new()?;
    let result = run_app(&mut terminal, &mut app).await;

    // Restore explicitly so errors print on a sane terminal
    terminal.restore();
    result
}

/// The main event loop: draw, then wait for whichever arrives first of
/// a terminal event, a request-task result, or the animation tick.
async fn run_app(terminal: &mut TerminalManager, app: &mut App) -> Result<()> {
    let mut events = EventStream::new();
    let mut message_rx = app
        .message_rx
        .take()
        .ok_or_else(|| eyre!("message receiver already taken"))?;
    let mut ticker = tokio::time::interval(Duration::from_millis(100));

    loop {
        terminal.terminal().draw(|frame| ui::render(frame, app))?;

        tokio::select! {
            maybe_event = events.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) => app.handle_key(key),
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        tracing::warn!(error = %e, "terminal event error");
                    }
                    None => break,
                }
            }
            maybe_msg = message_rx.recv() => {
                if let Some(msg) = maybe_msg {
                    app.handle_message(msg);
                    // Apply whatever else already arrived before redrawing
                    while let Ok(msg) = message_rx.try_recv() {
                        app.handle_message(msg);
                    }
                }
            }
            _ = ticker.tick() => {
                app.tick();
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
