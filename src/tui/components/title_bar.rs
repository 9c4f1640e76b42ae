//! # TitleBar Component
//!
//! Top status bar: application name, backend reachability and the latest
//! status message.
//!
//! Purely presentational. All three props come from `App`:
//!
//! 1. **With status**: `"Product Review Analyzer | backend: online | Analyzing..."`
//! 2. **Default**: `"Product Review Analyzer | backend: online"`

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::core::state::BackendStatus;
use crate::tui::component::Component;

pub struct TitleBar {
    pub backend: BackendStatus,
    pub status_message: String,
}

impl TitleBar {
    pub fn new(backend: BackendStatus, status_message: String) -> Self {
        Self {
            backend,
            status_message,
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let backend_color = match self.backend {
            BackendStatus::Online => Color::Green,
            BackendStatus::Offline => Color::Red,
            BackendStatus::Unknown => Color::DarkGray,
        };

        let mut spans = vec![
            Span::styled(
                "Product Review Analyzer",
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(" | backend: "),
            Span::styled(self.backend.label(), Style::default().fg(backend_color)),
        ];
        if !self.status_message.is_empty() {
            spans.push(Span::raw(format!(" | {}", self.status_message)));
        }

        frame.render_widget(Line::from(spans), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::buffer_text;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render(backend_status: BackendStatus, status: &str) -> String {
        let backend = TestBackend::new(80, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut title_bar = TitleBar::new(backend_status, status.to_string());
        terminal.draw(|f| title_bar.render(f, f.area())).unwrap();
        buffer_text(terminal.backend().buffer())
    }

    #[test]
    fn test_title_bar_with_status_message() {
        let text = render(BackendStatus::Online, "Analyzing...");
        assert!(text.contains("Product Review Analyzer"));
        assert!(text.contains("backend: online"));
        assert!(text.contains("| Analyzing..."));
    }

    #[test]
    fn test_title_bar_default_no_status() {
        let text = render(BackendStatus::Offline, "");
        assert!(text.contains("backend: offline"));
        assert_eq!(text.matches('|').count(), 1);
    }
}
