use crate::app::{App, AppState};
use crate::chat_view::run_chat_request;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::Mutex;

pub fn handle_chat_input(key: KeyEvent, app: &mut App, app_arc: Arc<Mutex<App>>) {
    match key.code {
        KeyCode::Esc => {
            app.state = AppState::QuitConfirm;
        }
        KeyCode::Enter => {
            if let Some(request) = app.submit() {
                let clone = app_arc.clone();
                tokio::spawn(async move {
                    run_chat_request(clone, request).await;
                });
            }
        }
        KeyCode::Up => app.history_prev(),
        KeyCode::Down => app.history_next(),
        KeyCode::PageUp => app.scroll_up(),
        KeyCode::PageDown => app.scroll_down(),
        KeyCode::Backspace => {
            app.chat_input.pop();
            // Editing a recalled question turns it back into ordinary input
            app.command_index = None;
        }
        KeyCode::Char(c) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                match c {
                    'c' => app.state = AppState::QuitConfirm,
                    'u' => app.scroll_up(),
                    'd' => app.scroll_down(),
                    _ => {}
                }
            } else {
                app.chat_input.push(c);
                app.command_index = None;
            }
        }
        _ => {}
    }
}

pub fn handle_quit_confirm_input(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Enter => {
            app.state = AppState::Quit;
        }
        KeyCode::Char('n') | KeyCode::Esc => {
            app.state = AppState::Chat;
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_chars_accumulate_in_input() {
        let mut app = App::new();
        let arc = Arc::new(Mutex::new(App::new()));
        handle_chat_input(key(KeyCode::Char('h')), &mut app, arc.clone());
        handle_chat_input(key(KeyCode::Char('i')), &mut app, arc);
        assert_eq!(app.chat_input, "hi");
    }

    #[test]
    fn test_backspace_removes_last_char() {
        let mut app = App::new();
        app.chat_input = "hi".to_string();
        let arc = Arc::new(Mutex::new(App::new()));
        handle_chat_input(key(KeyCode::Backspace), &mut app, arc);
        assert_eq!(app.chat_input, "h");
    }

    #[test]
    fn test_esc_opens_quit_confirm() {
        let mut app = App::new();
        let arc = Arc::new(Mutex::new(App::new()));
        handle_chat_input(key(KeyCode::Esc), &mut app, arc);
        assert_eq!(app.state, AppState::QuitConfirm);
    }

    #[test]
    fn test_quit_confirm_yes_and_no() {
        let mut app = App::new();
        app.state = AppState::QuitConfirm;
        handle_quit_confirm_input(key(KeyCode::Char('n')), &mut app);
        assert_eq!(app.state, AppState::Chat);

        app.state = AppState::QuitConfirm;
        handle_quit_confirm_input(key(KeyCode::Char('y')), &mut app);
        assert_eq!(app.state, AppState::Quit);
    }
}
