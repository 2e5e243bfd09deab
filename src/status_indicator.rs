use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const SPINNER_FRAMES: [&str; 4] = ["◐", "◓", "◑", "◒"];
const THINKING_TEXT: &str = "Thinking...";

/// Spinner line shown under the message list while requests are in flight.
///
/// The indicator holds no request state of its own; callers pass in whether
/// anything is pending (see `App::has_requests_in_flight`) and the indicator
/// only animates the spinner.
#[derive(Debug, Default)]
pub struct StatusIndicator {
    spinner_idx: usize,
}

impl StatusIndicator {
    pub fn new() -> Self {
        Self { spinner_idx: 0 }
    }

    pub fn update_spinner(&mut self) {
        self.spinner_idx = self.spinner_idx.wrapping_add(1);
    }

    fn spinner_frame(&self, thinking: bool) -> &'static str {
        if thinking {
            SPINNER_FRAMES[self.spinner_idx % SPINNER_FRAMES.len()]
        } else {
            " "
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, thinking: bool) {
        let status_text = if thinking { THINKING_TEXT } else { "" };

        let status = Line::from(vec![
            Span::styled(self.spinner_frame(thinking), Style::default().fg(Color::Gray)),
            Span::raw(" "),
            Span::styled(status_text, Style::default().fg(Color::DarkGray)),
        ]);

        frame.render_widget(
            Paragraph::new(status).alignment(ratatui::layout::Alignment::Left),
            Rect {
                x: area.x,
                y: area.y + 1,
                width: area.width,
                height: 1,
            },
        );
    }
}
