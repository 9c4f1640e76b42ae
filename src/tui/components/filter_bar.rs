//! Sentiment filter tabs shown above the review list.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Tabs};

use crate::api::SentimentFilter;
use crate::tui::component::Component;

pub struct FilterBar {
    pub active: SentimentFilter,
    pub focused: bool,
}

impl FilterBar {
    pub fn new(active: SentimentFilter, focused: bool) -> Self {
        Self { active, focused }
    }
}

impl Component for FilterBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let titles = SentimentFilter::ALL
            .iter()
            .enumerate()
            .map(|(i, filter)| format!("{} {}", i + 1, filter.label()));
        let selected = SentimentFilter::ALL
            .iter()
            .position(|f| *f == self.active)
            .unwrap_or(0);

        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let tabs = Tabs::new(titles)
            .block(Block::bordered().title(" Filter ").border_style(border_style))
            .select(selected)
            .style(Style::default().fg(Color::Gray))
            .highlight_style(
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            );

        frame.render_widget(tabs, area);
    }
}
