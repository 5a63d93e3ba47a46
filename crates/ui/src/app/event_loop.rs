use super::App;
use crate::event_handler::EventHandler;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::Result;
use std::{panic, time::Duration};

const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(16);

pub async fn run(app: &mut App) -> Result<()> {
    crossterm::terminal::enable_raw_mode()?;
    crossterm::execute!(std::io::stdout(), crossterm::terminal::EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(std::io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let backend = CrosstermBackend::new(std::io::stdout());
        if let Ok(mut terminal) = Terminal::new(backend) {
            let _ = terminal.show_cursor();
        }
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(std::io::stdout(), crossterm::terminal::LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    terminal.clear()?;
    terminal.hide_cursor()?;
    app.draw(&mut terminal)?;

    while !app.state.should_exit() {
        let tui_poll = async {
            tokio::time::sleep(INPUT_POLL_INTERVAL).await;
            EventHandler::read()
        };

        tokio::select! {
            maybe_event = tui_poll => {
                if let Some(event) = maybe_event? {
                    app.handle_event(event);
                    app.draw(&mut terminal)?;
                }
            }
            Some(event) = app.events_rx.recv() => {
                app.handle_typewriter_event(event);
                app.draw(&mut terminal)?;
            }
            Ok(()) = app.state_rx.changed() => {
                app.sync_playback();
                app.draw(&mut terminal)?;
            }
        }
    }

    terminal.show_cursor()?;
    crossterm::terminal::disable_raw_mode()?;
    crossterm::execute!(std::io::stdout(), crossterm::terminal::LeaveAlternateScreen)?;

    Ok(())
}
