use anyhow::Context;
use confab::app::{App, AppState};
use confab::{config, key_handlers, ui};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{io, sync::Arc, time::Duration};
use tokio::sync::Mutex;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    config::initialize_config().context("failed to initialize configuration")?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let app = Arc::new(Mutex::new(App::new()));
    let res = run_app(&mut terminal, app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app_arc: Arc<Mutex<App>>,
) -> anyhow::Result<()> {
    loop {
        {
            let mut guard = app_arc.lock().await;
            terminal.draw(|f| ui::ui(f, &mut guard))?;
            if guard.state == AppState::Quit {
                break;
            }
        }

        // Poll with a short timeout so the spinner keeps animating while a
        // request task holds the app between redraws
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                let mut guard = app_arc.lock().await;
                match guard.state {
                    AppState::Chat => {
                        key_handlers::handle_chat_input(key, &mut guard, app_arc.clone())
                    }
                    AppState::QuitConfirm => key_handlers::handle_quit_confirm_input(key, &mut guard),
                    AppState::Quit => {}
                }
            }
        }
    }

    Ok(())
}
