use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

#[derive(Debug)]
pub struct LogView {
    pub entries: Vec<String>,
    pub scroll_offset: u16,
}

impl LogView {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            scroll_offset: 0,
        }
    }

    pub fn add(&mut self, entry: String) {
        self.entries.push(entry);
        if self.entries.len() > 200 {
            self.entries.remove(0);
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        let log_lines: Vec<Line> = self
            .entries
            .iter()
            .map(|entry| {
                Line::from(vec![
                    Span::styled("• ", Style::default().fg(Color::DarkGray)),
                    Span::raw(entry.as_str()),
                ])
            })
            .collect();

        let total_lines = log_lines.len() as u16;
        let available_height = area.height;
        let max_scroll = total_lines.saturating_sub(available_height);
        // Stick to the newest entries unless the user scrolled up
        let scroll = if self.scroll_offset == 0 {
            max_scroll
        } else {
            self.scroll_offset.min(max_scroll)
        };

        let logs_para = Paragraph::new(log_lines)
            .style(Style::default().fg(Color::DarkGray))
            .wrap(Wrap { trim: true });
        f.render_widget(logs_para.scroll((scroll, 0)), area);
    }
}

impl Default for LogView {
    fn default() -> Self {
        Self::new()
    }
}
