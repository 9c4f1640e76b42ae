//! # ReviewResult Component
//!
//! Renders one analysis outcome: product, sentiment badge, key points and
//! the echoed review. Stateless; created each frame from the current result.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Wrap};

use crate::api::{Review, Sentiment};
use crate::tui::component::Component;

pub fn sentiment_color(sentiment: Sentiment) -> Color {
    match sentiment {
        Sentiment::Positive => Color::Rgb(0x22, 0xc5, 0x5e),
        Sentiment::Negative => Color::Rgb(0xef, 0x44, 0x44),
        Sentiment::Neutral => Color::Rgb(0x6b, 0x72, 0x80),
    }
}

pub struct ReviewResult<'a> {
    pub review: &'a Review,
}

impl<'a> ReviewResult<'a> {
    pub fn new(review: &'a Review) -> Self {
        Self { review }
    }

    fn heading(text: &'static str) -> Line<'static> {
        Line::from(Span::styled(
            text,
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        ))
    }

    fn badge(&self) -> Line<'a> {
        let sentiment = self.review.sentiment;
        let style = Style::default()
            .bg(sentiment_color(sentiment))
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);
        Line::from(vec![
            Span::styled(format!(" {} ", sentiment.glyph()), style),
            Span::styled(format!("{} ", sentiment.as_str().to_uppercase()), style),
            Span::styled(format!("{} ", self.review.score_percent()), style),
        ])
    }

    fn paragraph(&self) -> Paragraph<'a> {
        let mut lines = vec![
            Self::heading("Product"),
            Line::from(self.review.product_name.as_str()),
            Line::default(),
            Self::heading("Sentiment Analysis"),
            self.badge(),
            Line::default(),
            Self::heading("Key Points"),
        ];

        let points = self.review.key_point_lines();
        if points.is_empty() {
            lines.push(Line::from(Span::styled(
                "None extracted",
                Style::default().fg(Color::DarkGray),
            )));
        }
        lines.extend(points.into_iter().map(Line::from));

        lines.push(Line::default());
        lines.push(Self::heading("Original Review"));
        lines.extend(self.review.review_text.lines().map(|line| {
            Line::from(Span::styled(
                line,
                Style::default().add_modifier(Modifier::ITALIC),
            ))
        }));

        Paragraph::new(lines)
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(sentiment_color(self.review.sentiment)))
                    .title(" Analysis Results ")
                    .padding(Padding::horizontal(1)),
            )
            .wrap(Wrap { trim: true })
    }

    /// Rows needed to show the whole result at `width`, borders included.
    pub fn height(&self, width: u16) -> u16 {
        self.paragraph().line_count(width) as u16
    }
}

impl Component for ReviewResult<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(self.paragraph(), area);
    }
}
