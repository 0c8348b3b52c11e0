//! The interactive chat loop: read one terminal event, update the app, and
//! redraw. A submitted message is handled to completion before the next
//! event is read.

mod lifecycle;
mod setup;

pub use lifecycle::{restore_terminal, setup_terminal, ChatTerminal};
pub use setup::{bootstrap_app, build_session, build_settings, ChatOptions};

use std::error::Error;
use std::time::Duration;

use ratatui::crossterm::event::{self, Event, KeyEventKind};
use tracing::{debug, info};

use crate::core::app::{App, AppAction};
use crate::core::completion::CompletionClient;
use crate::ui::renderer::ui;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub async fn run_chat(options: ChatOptions) -> Result<(), Box<dyn Error>> {
    let (mut app, client) = bootstrap_app(&options)?;

    let mut terminal = setup_terminal()?;
    let result = event_loop(&mut terminal, &mut app, &client).await;
    let restored = restore_terminal(&mut terminal);

    info!(
        exchanges = app.session.transcript().exchange_count(),
        "chat session ended"
    );
    result?;
    restored
}

async fn event_loop(
    terminal: &mut ChatTerminal,
    app: &mut App,
    client: &dyn CompletionClient,
) -> Result<(), Box<dyn Error>> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }

        let action = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(&key),
            Event::Paste(text) => {
                app.handle_paste(&text);
                AppAction::None
            }
            Event::Resize(width, height) => {
                debug!(width, height, "terminal resized");
                AppAction::None
            }
            _ => AppAction::None,
        };

        match action {
            AppAction::Quit => return Ok(()),
            AppAction::Submit(text) => {
                app.begin_turn(&text);
                terminal.draw(|f| ui(f, app))?;
                app.submit(text, client).await;
            }
            AppAction::None => {}
        }
    }
}
