//! # ReviewList Component
//!
//! Scrollable view of previously analyzed reviews.
//!
//! `ReviewList` is a transient component (created each frame) that wraps
//! `&'a mut ReviewListState` (persistent scroll state) and the reviews slice
//! (props). Card heights are predicted with `textwrap` so the scroll canvas
//! can be sized before anything is drawn.

use log::debug;
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Wrap};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::api::Review;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::review_result::sentiment_color;
use crate::tui::event::TuiEvent;

/// Horizontal space consumed by card borders (1 + 1) and padding (1 + 1).
const CARD_HORIZONTAL_OVERHEAD: u16 = 4;
/// Top border, meta line, bottom border.
const CARD_FIXED_ROWS: u16 = 3;

/// Keeps leading card heights while their sum fits a `u16` scroll canvas.
/// Cards past that point are not drawn.
fn fit_to_canvas(heights: impl Iterator<Item = u16>) -> Vec<u16> {
    let mut total: u32 = 0;
    heights
        .take_while(|height| {
            total += u32::from(*height);
            total <= u32::from(u16::MAX)
        })
        .collect()
}

#[derive(Default)]
pub struct ReviewListState {
    pub scroll_state: ScrollViewState,
}

impl ReviewListState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll_state.scroll_to_top();
    }
}

impl EventHandler for ReviewListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<()> {
        match event {
            TuiEvent::Up | TuiEvent::ScrollUp => self.scroll_state.scroll_up(),
            TuiEvent::Down | TuiEvent::ScrollDown => self.scroll_state.scroll_down(),
            TuiEvent::PageUp => self.scroll_state.scroll_page_up(),
            TuiEvent::PageDown => self.scroll_state.scroll_page_down(),
            _ => return None,
        }
        Some(())
    }
}

pub struct ReviewList<'a> {
    state: &'a mut ReviewListState,
    reviews: &'a [Review],
    loading: bool,
    focused: bool,
}

impl<'a> ReviewList<'a> {
    pub fn new(
        state: &'a mut ReviewListState,
        reviews: &'a [Review],
        loading: bool,
        focused: bool,
    ) -> Self {
        Self {
            state,
            reviews,
            loading,
            focused,
        }
    }

    /// Rows a card occupies at `width`, borders included.
    pub fn card_height(review: &Review, width: u16) -> u16 {
        let content_width = width.saturating_sub(CARD_HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            return CARD_FIXED_ROWS;
        }
        let options = textwrap::Options::new(content_width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);
        let preview = review.preview();
        let lines = textwrap::wrap(preview.trim(), options);
        (lines.len() as u16).max(1) + CARD_FIXED_ROWS
    }

    fn card(review: &Review) -> Paragraph<'static> {
        let sentiment = review.sentiment;
        let tag = Span::styled(
            format!(" {} ", sentiment.as_str()),
            Style::default()
                .fg(sentiment_color(sentiment))
                .add_modifier(Modifier::BOLD),
        );

        let meta = Line::from(vec![
            Span::styled(
                format!("Score: {}", review.score_percent_rounded()),
                Style::default().fg(Color::Gray),
            ),
            Span::raw("   "),
            Span::styled(review.date_label(), Style::default().fg(Color::DarkGray)),
        ]);

        let mut lines: Vec<Line> = review
            .preview()
            .trim()
            .split('\n')
            .map(|line| Line::from(line.to_string()))
            .collect();
        lines.push(meta);

        Paragraph::new(lines)
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(Color::DarkGray))
                    .title(Span::styled(
                        review.product_name.clone(),
                        Style::default().add_modifier(Modifier::BOLD),
                    ))
                    .title(Line::from(tag).right_aligned())
                    .padding(Padding::horizontal(1)),
            )
            .wrap(Wrap { trim: true })
    }
}

impl Component for ReviewList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let title = if self.loading || self.reviews.is_empty() {
            " Recent Reviews ".to_string()
        } else {
            format!(" Recent Reviews ({}) ", self.reviews.len())
        };
        let block = Block::bordered().title(title).border_style(if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        });
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.loading || self.reviews.is_empty() {
            let message = if self.loading {
                "Loading reviews..."
            } else {
                "No reviews yet"
            };
            let placeholder = Paragraph::new(message)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center);
            frame.render_widget(placeholder, inner);
            return;
        }

        // One column reserved for the scrollbar
        let content_width = inner.width.saturating_sub(1);
        let heights = fit_to_canvas(
            self.reviews
                .iter()
                .map(|review| Self::card_height(review, content_width)),
        );
        if heights.len() < self.reviews.len() {
            debug!(
                "Review list truncated to {} of {} cards",
                heights.len(),
                self.reviews.len()
            );
        }
        let total_height: u16 = heights.iter().map(|h| u32::from(*h)).sum::<u32>() as u16;

        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Always)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y_offset: u16 = 0;
        for (review, height) in self.reviews.iter().zip(&heights) {
            let card_rect = Rect::new(0, y_offset, content_width, *height);
            scroll_view.render_widget(Self::card(review), card_rect);
            y_offset += height;
        }

        frame.render_stateful_widget(scroll_view, inner, &mut self.state.scroll_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Sentiment;
    use crate::test_support::{buffer_text, record, review};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(reviews: &[Review], loading: bool, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut state = ReviewListState::new();
        terminal
            .draw(|f| ReviewList::new(&mut state, reviews, loading, false).render(f, f.area()))
            .unwrap();
        buffer_text(terminal.backend().buffer())
    }

    #[test]
    fn test_loading_placeholder() {
        let text = draw(&[review(1, "Anything at all", Sentiment::Positive)], true, 40, 5);
        assert!(text.contains("Loading reviews..."));
        assert!(!text.contains("Anything"));
    }

    #[test]
    fn test_empty_placeholder() {
        let text = draw(&[], false, 40, 5);
        assert!(text.contains("No reviews yet"));
    }

    #[test]
    fn test_cards_show_tag_score_and_date() {
        let mut rec = record(1, "Kettle boils fast", Sentiment::Negative);
        rec.product_name = Some("Kettle".to_string());
        rec.sentiment_score = 0.42;
        rec.created_at = Some("2024-03-05T10:00:00".to_string());
        let reviews = vec![Review::from_record(rec, None)];

        let text = draw(&reviews, false, 60, 10);
        assert!(text.contains("Recent Reviews (1)"));
        assert!(text.contains("Kettle"));
        assert!(text.contains("negative"));
        assert!(text.contains("Score: 42%"));
        assert!(text.contains(&reviews[0].date_label()));
    }

    #[test]
    fn test_long_review_is_truncated() {
        let long = format!("{}END", "word ".repeat(40));
        let reviews = vec![review(1, &long, Sentiment::Neutral)];
        let text = draw(&reviews, false, 200, 10);
        assert!(text.contains("..."));
        assert!(!text.contains("END"));
    }

    #[test]
    fn test_card_height_matches_wrapping() {
        let short = review(1, "Short one", Sentiment::Positive);
        assert_eq!(ReviewList::card_height(&short, 40), 4);

        let long = review(2, &"abcd ".repeat(30), Sentiment::Positive);
        assert!(ReviewList::card_height(&long, 40) > 4);
    }

    #[test]
    fn test_fit_to_canvas_stops_at_u16_limit() {
        assert_eq!(fit_to_canvas([4u16, 5, 6].into_iter()), vec![4, 5, 6]);

        let fitted = fit_to_canvas(std::iter::repeat_n(14u16, 5000));
        assert_eq!(fitted.len(), usize::from(u16::MAX / 14));
        let total: u32 = fitted.iter().map(|h| u32::from(*h)).sum();
        assert!(total <= u32::from(u16::MAX));

        assert_eq!(fit_to_canvas([u16::MAX, 1].into_iter()), vec![u16::MAX]);
    }

    #[test]
    fn test_many_reviews_in_narrow_terminal() {
        let text = "x".repeat(200);
        let reviews: Vec<Review> = (0..5000)
            .map(|id| review(id, &text, Sentiment::Neutral))
            .collect();

        let rendered = draw(&reviews, false, 20, 30);
        assert!(rendered.contains("xxxx"));
    }

    #[test]
    fn test_scroll_events_are_handled() {
        let mut state = ReviewListState::new();
        assert_eq!(state.handle_event(&TuiEvent::Down), Some(()));
        assert_eq!(state.handle_event(&TuiEvent::PageUp), Some(()));
        assert_eq!(state.handle_event(&TuiEvent::InputChar('x')), None);
    }
}
