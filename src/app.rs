use crate::chat_message::ChatMessage;
use crate::constants::{BOT_PREFIX, REQUEST_FAILED_MESSAGE, THINKING_MESSAGE, USER_PREFIX};
use crate::errors::ConfabError;
use crate::log_view::LogView;
use crate::status_indicator::StatusIndicator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Chat,
    QuitConfirm,
    Quit,
}

/// A submission accepted by [`App::submit`]: the question to send and the id
/// of the placeholder message to resolve once the request completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    pub placeholder_id: u64,
    pub question: String,
}

pub struct App {
    pub state: AppState,
    pub chat_messages: Vec<ChatMessage>,
    pub chat_input: String,
    pub chat_scroll: u16,
    pub command_history: Vec<String>,
    pub command_index: Option<usize>,
    pub status_indicator: StatusIndicator,
    pub logs: LogView,
    next_message_id: u64,
    in_flight: usize,
}

impl App {
    pub fn new() -> App {
        App {
            state: AppState::Chat,
            chat_messages: Vec::new(),
            chat_input: String::new(),
            chat_scroll: 0,
            command_history: Vec::new(),
            command_index: None,
            status_indicator: StatusIndicator::new(),
            logs: LogView::new(),
            next_message_id: 0,
            in_flight: 0,
        }
    }

    fn next_id(&mut self) -> u64 {
        let id = self.next_message_id;
        self.next_message_id += 1;
        id
    }

    /// Accepts the current input buffer as a submission.
    ///
    /// A whitespace-only buffer is rejected: nothing is rendered and no
    /// request is produced. Otherwise the user message and a thinking
    /// placeholder are appended, the input is cleared, and the caller gets
    /// back what it needs to drive the network request.
    pub fn submit(&mut self) -> Option<PendingRequest> {
        let question = self.chat_input.trim().to_string();
        if question.is_empty() {
            return None;
        }

        let user_id = self.next_id();
        self.chat_messages.push(ChatMessage::new(
            user_id,
            format!("{}{}", USER_PREFIX, question),
            true,
        ));

        let placeholder_id = self.next_id();
        self.chat_messages
            .push(ChatMessage::pending(placeholder_id, THINKING_MESSAGE.to_string()));

        self.chat_input.clear();
        self.command_history.push(question.clone());
        self.command_index = None;

        self.in_flight += 1;
        self.scroll_to_bottom();

        Some(PendingRequest {
            placeholder_id,
            question,
        })
    }

    /// Resolves an in-flight request: removes its placeholder and appends the
    /// bot reply, or the generic failure message if anything went wrong.
    ///
    /// Each placeholder is owned by exactly one request, so overlapping
    /// submissions resolve independently and in any order.
    pub fn resolve(&mut self, placeholder_id: u64, outcome: Result<String, ConfabError>) {
        self.chat_messages
            .retain(|message| message.id() != placeholder_id);

        let content = match outcome {
            Ok(reply) => format!("{}{}", BOT_PREFIX, reply),
            Err(_) => REQUEST_FAILED_MESSAGE.to_string(),
        };

        let id = self.next_id();
        self.chat_messages.push(ChatMessage::new(id, content, false));

        self.in_flight = self.in_flight.saturating_sub(1);
        self.scroll_to_bottom();
    }

    pub fn has_requests_in_flight(&self) -> bool {
        self.in_flight > 0
    }

    pub fn scroll_up(&mut self) {
        if self.chat_scroll > 0 {
            self.chat_scroll -= 1;
        }
    }

    pub fn scroll_down(&mut self) {
        self.chat_scroll = self.chat_scroll.saturating_add(1);
    }

    // The draw pass clamps this back down to the real maximum, so saturating
    // at u16::MAX pins the view to the newest entry.
    pub fn scroll_to_bottom(&mut self) {
        self.chat_scroll = u16::MAX;
    }

    /// Steps backwards through previously submitted questions.
    pub fn history_prev(&mut self) {
        if self.command_history.is_empty() {
            return;
        }
        let next_index = match self.command_index {
            None => self.command_history.len() - 1,
            Some(0) => 0,
            Some(i) => i - 1,
        };
        self.command_index = Some(next_index);
        self.chat_input = self.command_history[next_index].clone();
    }

    /// Steps forwards through history; walking past the newest entry returns
    /// to an empty input line.
    pub fn history_next(&mut self) {
        let Some(index) = self.command_index else {
            return;
        };
        if index + 1 < self.command_history.len() {
            self.command_index = Some(index + 1);
            self.chat_input = self.command_history[index + 1].clone();
        } else {
            self.command_index = None;
            self.chat_input.clear();
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ConfabError;

    #[test]
    fn test_submit_empty_input_is_rejected() {
        let mut app = App::new();
        app.chat_input = "".to_string();

        assert!(app.submit().is_none());
        assert!(app.chat_messages.is_empty());
    }

    #[test]
    fn test_submit_whitespace_only_input_is_rejected() {
        let mut app = App::new();
        app.chat_input = "   \t ".to_string();

        assert!(app.submit().is_none());
        assert!(app.chat_messages.is_empty());
        assert!(!app.has_requests_in_flight());
    }

    #[test]
    fn test_submit_renders_user_message_before_request_starts() {
        let mut app = App::new();
        app.chat_input = "hello there".to_string();

        let request = app.submit().expect("submission accepted");

        // User message first, placeholder second, nothing else yet
        assert_eq!(app.chat_messages.len(), 2);
        assert_eq!(app.chat_messages[0].content(), "You: hello there");
        assert!(app.chat_messages[0].is_from_user());
        assert_eq!(app.chat_messages[1].content(), "AI is thinking...");
        assert!(app.chat_messages[1].is_pending());
        assert_eq!(request.question, "hello there");
    }

    #[test]
    fn test_submit_trims_surrounding_whitespace() {
        let mut app = App::new();
        app.chat_input = "  padded question  ".to_string();

        let request = app.submit().unwrap();
        assert_eq!(request.question, "padded question");
        assert_eq!(app.chat_messages[0].content(), "You: padded question");
    }

    #[test]
    fn test_submit_clears_input() {
        let mut app = App::new();
        app.chat_input = "hello".to_string();

        app.submit().unwrap();
        assert!(app.chat_input.is_empty());
    }

    #[test]
    fn test_resolve_success_replaces_placeholder_with_reply() {
        let mut app = App::new();
        app.chat_input = "hi".to_string();
        let request = app.submit().unwrap();

        app.resolve(request.placeholder_id, Ok("Hello".to_string()));

        assert_eq!(app.chat_messages.len(), 2);
        assert_eq!(app.chat_messages[1].content(), "AI: Hello");
        assert!(!app.chat_messages[1].is_from_user());
        assert!(!app.chat_messages.iter().any(|m| m.is_pending()));
        assert!(!app.has_requests_in_flight());
    }

    #[test]
    fn test_resolve_failure_replaces_placeholder_with_error_message() {
        let mut app = App::new();
        app.chat_input = "hi".to_string();
        let request = app.submit().unwrap();

        app.resolve(
            request.placeholder_id,
            Err(ConfabError::api_error("server returned 500")),
        );

        assert_eq!(app.chat_messages.len(), 2);
        assert_eq!(
            app.chat_messages[1].content(),
            "Error: Failed to get response."
        );
        assert!(!app.chat_messages.iter().any(|m| m.is_pending()));
    }

    #[test]
    fn test_overlapping_requests_resolve_their_own_placeholders() {
        let mut app = App::new();

        app.chat_input = "first".to_string();
        let first = app.submit().unwrap();
        app.chat_input = "second".to_string();
        let second = app.submit().unwrap();

        // Two placeholders in flight, one per request
        assert_eq!(
            app.chat_messages.iter().filter(|m| m.is_pending()).count(),
            2
        );

        // Resolve out of order
        app.resolve(second.placeholder_id, Ok("reply two".to_string()));
        assert_eq!(
            app.chat_messages.iter().filter(|m| m.is_pending()).count(),
            1
        );
        assert!(app.has_requests_in_flight());

        app.resolve(first.placeholder_id, Ok("reply one".to_string()));
        assert!(!app.chat_messages.iter().any(|m| m.is_pending()));
        assert!(!app.has_requests_in_flight());
    }

    #[test]
    fn test_history_navigation() {
        let mut app = App::new();
        app.chat_input = "one".to_string();
        app.submit().unwrap();
        app.chat_input = "two".to_string();
        app.submit().unwrap();

        app.history_prev();
        assert_eq!(app.chat_input, "two");
        app.history_prev();
        assert_eq!(app.chat_input, "one");
        app.history_next();
        assert_eq!(app.chat_input, "two");
        app.history_next();
        assert!(app.chat_input.is_empty());
        assert!(app.command_index.is_none());
    }
}
