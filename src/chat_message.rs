use chrono::{DateTime, Local};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use textwrap::wrap;

#[derive(Debug, Clone)]
pub struct ChatMessage {
    id: u64,
    content: String,
    from_user: bool,
    timestamp: DateTime<Local>,
    pending: bool,
}

impl ChatMessage {
    pub fn new(id: u64, content: String, from_user: bool) -> Self {
        Self {
            id,
            content,
            from_user,
            timestamp: Local::now(),
            pending: false,
        }
    }

    /// A transient placeholder shown while a request is in flight.
    pub fn pending(id: u64, content: String) -> Self {
        Self {
            id,
            content,
            from_user: false,
            timestamp: Local::now(),
            pending: true,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_from_user(&self) -> bool {
        self.from_user
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn render(&self, area: Rect) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        let base_style = self.get_base_style();

        self.render_header(&mut lines, base_style);
        self.render_content(&mut lines, area, base_style);
        self.render_footer(&mut lines, base_style);

        lines
    }

    fn get_base_style(&self) -> Style {
        let mut style = Style::default().fg(if self.from_user {
            Color::Rgb(255, 223, 128) // Warmer yellow
        } else {
            Color::Rgb(144, 238, 144) // Softer green
        });

        if self.pending {
            style = style.add_modifier(Modifier::DIM);
        }

        style
    }

    fn render_header(&self, lines: &mut Vec<Line<'static>>, style: Style) {
        let timestamp = self.timestamp.format("%H:%M").to_string();
        let indent = self.indent();

        lines.push(Line::from(vec![
            Span::styled(indent.to_string(), style),
            Span::styled("┌─".to_string(), style),
            Span::styled(timestamp, style.add_modifier(Modifier::DIM)),
        ]));
    }

    // Literal newlines in the content become separate visual lines; long
    // lines wrap to the available width. The text itself is untouched.
    fn render_content(&self, lines: &mut Vec<Line<'static>>, area: Rect, style: Style) {
        let indent = self.indent();
        let wrap_width = (area.width as usize).saturating_sub(4).max(1);

        for content_line in self.content.split('\n') {
            if content_line.is_empty() {
                lines.push(Line::from(vec![
                    Span::styled(indent.to_string(), style),
                    Span::styled("│ ".to_string(), style),
                ]));
                continue;
            }

            for wrapped_line in wrap(content_line, wrap_width) {
                lines.push(Line::from(vec![
                    Span::styled(indent.to_string(), style),
                    Span::styled("│ ".to_string(), style),
                    Span::styled(wrapped_line.to_string(), style),
                ]));
            }
        }
    }

    fn render_footer(&self, lines: &mut Vec<Line<'static>>, style: Style) {
        lines.push(Line::from(vec![
            Span::styled(self.indent().to_string(), style),
            Span::styled("╰─".to_string(), style),
        ]));
    }

    fn indent(&self) -> &'static str {
        if self.from_user {
            "  "
        } else {
            ""
        }
    }
}
