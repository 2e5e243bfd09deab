use crate::api::fetch_reply;
use crate::app::{App, PendingRequest};
use crate::config::get_config;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Wrap},
    Frame,
};
use std::sync::Arc;
use tokio::sync::Mutex;
use unicode_width::UnicodeWidthStr;

pub fn draw_chat(f: &mut Frame, app: &mut App) {
    let size = f.area();
    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(2, 3), Constraint::Ratio(1, 3)])
        .margin(1)
        .split(size);

    let chat_vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Min(1),
                Constraint::Length(2),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(horizontal_chunks[0]);

    draw_messages(f, app, chat_vertical_chunks[0]);

    app.status_indicator.update_spinner();
    let thinking = app.has_requests_in_flight();
    app.status_indicator
        .render(f, chat_vertical_chunks[1], thinking);

    draw_input(f, app, chat_vertical_chunks[2]);
    draw_logs(f, app, horizontal_chunks[1], size);
}

fn draw_messages(f: &mut Frame, app: &mut App, area: Rect) {
    let mut lines = Vec::new();
    for message in app.chat_messages.iter() {
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        lines.extend(message.render(area));
    }

    let total_lines = lines.len() as u16;
    let available_height = area.height;
    let max_scroll = total_lines.saturating_sub(available_height);
    // New messages park the offset at u16::MAX, so this clamp is what
    // actually pins the view to the latest entry
    if app.chat_scroll > max_scroll {
        app.chat_scroll = max_scroll;
    }

    let msgs_para = Paragraph::new(lines)
        .style(Style::default())
        .block(Block::default())
        .wrap(Wrap { trim: true });
    f.render_widget(msgs_para.scroll((app.chat_scroll, 0)), area);
}

fn draw_input(f: &mut Frame, app: &App, area: Rect) {
    let separator = "─".repeat(area.width as usize);
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            &separator,
            Style::default().fg(Color::DarkGray),
        ))),
        Rect {
            x: area.x,
            y: area.y,
            width: area.width,
            height: 1,
        },
    );

    // History navigation gets its own prompt so it is obvious the buffer
    // holds a recalled question
    let prefix = if app.command_index.is_some() {
        "↕ "
    } else {
        "→ "
    };

    let prefix_style = if app.command_index.is_some() {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let input = Line::from(vec![
        Span::styled(prefix, prefix_style),
        Span::styled(&app.chat_input, Style::default().fg(Color::White)),
    ]);

    let visible_width = area.width.saturating_sub(2);
    let text_width = app.chat_input.width() as u16;
    let scroll_offset = text_width.saturating_sub(visible_width);

    f.render_widget(
        Paragraph::new(input).scroll((0, scroll_offset)),
        Rect {
            x: area.x,
            y: area.y + 1,
            width: area.width,
            height: area.height.saturating_sub(2),
        },
    );

    if let Some(index) = app.command_index {
        let history_text = format!(" [History {}/{}] ", index + 1, app.command_history.len());
        let indicator_width = history_text.len() as u16;

        // Skipped entirely when the column is too narrow for the label
        if indicator_width <= area.width {
            let history_indicator = Paragraph::new(Line::from(Span::styled(
                history_text.clone(),
                Style::default().fg(Color::Yellow).bg(Color::Black),
            )));

            f.render_widget(
                history_indicator,
                Rect {
                    x: area.x + area.width - indicator_width,
                    y: area.y + 1,
                    width: indicator_width,
                    height: 1,
                },
            );
        }
    }

    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            &separator,
            Style::default().fg(Color::DarkGray),
        ))),
        Rect {
            x: area.x,
            y: area.y + area.height - 1,
            width: area.width,
            height: 1,
        },
    );

    let cursor_x = area.x + 2 + text_width - scroll_offset;
    f.set_cursor_position((cursor_x, area.y + 1));
}

fn draw_logs(f: &mut Frame, app: &App, area: Rect, size: Rect) {
    let vsep = "│".repeat((size.height as usize).saturating_sub(2));
    f.render_widget(
        Paragraph::new(Span::raw(vsep)).style(Style::default().fg(Color::DarkGray)),
        Rect {
            x: area.x.saturating_sub(1),
            y: 1,
            width: 1,
            height: size.height.saturating_sub(2),
        },
    );

    app.logs.render(f, area);
}

/// Drives one accepted submission to completion.
///
/// The user message and placeholder are already on screen by the time this
/// runs; all that is left is the request itself and resolving the
/// placeholder. Overlapping submissions each get their own task, request and
/// placeholder, with no ordering between them.
pub async fn run_chat_request(app: Arc<Mutex<App>>, request: PendingRequest) {
    {
        let mut guard = app.lock().await;
        guard
            .logs
            .add(format!("Sending request: \"{}\"", request.question));
    }

    let chat_url = get_config().chat_url;
    let outcome = fetch_reply(&chat_url, &request.question).await;

    let mut guard = app.lock().await;
    match &outcome {
        Ok(reply) => {
            if reply.len() < 500 {
                guard.logs.add(format!("Response received: {}", reply));
            } else {
                guard
                    .logs
                    .add(format!("Response received: {} chars", reply.len()));
            }
        }
        Err(e) => {
            guard.logs.add(format!("Request failed: {}", e));
        }
    }
    guard.resolve(request.placeholder_id, outcome);
    guard.logs.add("Request complete".to_string());
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_draw_chat_survives_terminal_narrower_than_history_indicator() {
        let mut app = App::new();
        app.chat_input = "question".to_string();
        app.submit().unwrap();
        app.history_prev();
        assert!(app.command_index.is_some());

        let backend = TestBackend::new(10, 8);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw_chat(f, &mut app)).unwrap();
    }

    #[test]
    fn test_status_line_shows_thinking_while_request_in_flight() {
        let mut app = App::new();
        app.chat_input = "question".to_string();
        let request = app.submit().unwrap();

        let backend = TestBackend::new(60, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw_chat(f, &mut app)).unwrap();
        assert!(buffer_text(&terminal).contains("Thinking..."));

        app.resolve(request.placeholder_id, Ok("done".to_string()));
        terminal.draw(|f| draw_chat(f, &mut app)).unwrap();
        assert!(!buffer_text(&terminal).contains("Thinking..."));
    }
}
