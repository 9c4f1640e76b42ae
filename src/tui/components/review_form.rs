//! # ReviewForm Component
//!
//! Collects a product name and review text and emits a submission.
//!
//! ## Responsibilities
//!
//! - Capture text for two fields (product name, review text)
//! - Validate the review length before emitting `FormEvent::Submit`
//! - Show a live character count and the local validation error
//!
//! ## State Management
//!
//! Both buffers, the active field and the validation error are internal
//! state. `loading` and `focused` are props set by the parent each frame.
//! While `loading` the form is disabled: edits and submission are ignored.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

use crate::core::validation::validate_review_text;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Rows taken by the form: outer border, product field, review field, footer.
pub const FORM_HEIGHT: u16 = 2 + PRODUCT_HEIGHT + REVIEW_HEIGHT + 1;
const PRODUCT_HEIGHT: u16 = 3;
const REVIEW_HEIGHT: u16 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    ProductName,
    ReviewText,
}

/// High-level events emitted by the ReviewForm
#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    /// Review passed validation; hand it to the parent.
    Submit {
        product_name: String,
        review_text: String,
    },
    ContentChanged,
}

pub struct ReviewForm {
    pub product_name: String,
    pub review_text: String,
    pub field: FormField,
    /// Local validation message, cleared on every submit attempt
    pub error: Option<String>,
    /// Analysis in flight (Prop)
    pub loading: bool,
    /// Keyboard focus is on the form (Prop)
    pub focused: bool,
}

impl Default for ReviewForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ReviewForm {
    pub fn new() -> Self {
        Self {
            product_name: String::new(),
            review_text: String::new(),
            field: FormField::ProductName,
            error: None,
            loading: false,
            focused: true,
        }
    }

    fn active_buffer(&mut self) -> &mut String {
        match self.field {
            FormField::ProductName => &mut self.product_name,
            FormField::ReviewText => &mut self.review_text,
        }
    }

    fn insert(&mut self, text: &str) {
        let text = match self.field {
            // Single-line field
            FormField::ProductName => text.replace(['\n', '\r'], " "),
            FormField::ReviewText => text.replace('\r', ""),
        };
        self.active_buffer().push_str(&text);
    }

    fn submit(&mut self) -> Option<FormEvent> {
        self.error = None;
        if let Err(msg) = validate_review_text(&self.review_text) {
            self.error = Some(msg.to_string());
            return None;
        }
        Some(FormEvent::Submit {
            product_name: self.product_name.clone(),
            review_text: self.review_text.clone(),
        })
    }

    fn field_block(&self, title: &'static str, field: FormField) -> Block<'static> {
        let active = self.focused && self.field == field && !self.loading;
        let border_style = if active {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(title)
    }

    fn render_review_field(&self, frame: &mut Frame, area: Rect) {
        let block = self.field_block("Review *", FormField::ReviewText);
        let inner = block.inner(area);

        let (lines, placeholder) = if self.review_text.is_empty() {
            (Vec::new(), true)
        } else {
            (wrap_lines(&self.review_text, inner.width), false)
        };

        // Keep the end of the text (where typing happens) in view
        let overflow = (lines.len() as u16).saturating_sub(inner.height);

        let paragraph = if placeholder {
            Paragraph::new("Write your product review here...")
                .style(Style::default().fg(Color::DarkGray))
        } else {
            Paragraph::new(self.review_text.as_str())
                .wrap(Wrap { trim: true })
                .scroll((overflow, 0))
        };
        frame.render_widget(paragraph.block(block), area);

        if self.focused && !self.loading && self.field == FormField::ReviewText {
            let last = lines.last().map(String::as_str).unwrap_or("");
            let row = (lines.len() as u16).saturating_sub(1).saturating_sub(overflow);
            let col = (last.width() as u16).min(inner.width.saturating_sub(1));
            frame.set_cursor_position((inner.x + col, inner.y + row));
        }
    }

    fn render_product_field(&self, frame: &mut Frame, area: Rect) {
        let block = self.field_block("Product Name", FormField::ProductName);
        let inner = block.inner(area);

        let paragraph = if self.product_name.is_empty() {
            Paragraph::new("e.g., iPhone 15 Pro").style(Style::default().fg(Color::DarkGray))
        } else {
            Paragraph::new(self.product_name.as_str())
        };
        frame.render_widget(paragraph.block(block), area);

        if self.focused && !self.loading && self.field == FormField::ProductName {
            let col = (self.product_name.width() as u16).min(inner.width.saturating_sub(1));
            frame.set_cursor_position((inner.x + col, inner.y));
        }
    }

    fn footer(&self) -> Line<'static> {
        let left = match &self.error {
            Some(msg) => Span::styled(msg.clone(), Style::default().fg(Color::Red)),
            None => Span::styled(
                format!("{} characters", self.review_text.chars().count()),
                Style::default().fg(Color::DarkGray),
            ),
        };
        let button = if self.loading {
            Span::styled(" [ Analyzing... ] ", Style::default().fg(Color::DarkGray))
        } else {
            Span::styled(
                " [ Enter: Analyze Review ] ",
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            )
        };
        Line::from(vec![left, Span::raw("  "), button])
    }
}

/// Wraps text the way `Paragraph` with `Wrap { trim: true }` lays it out.
fn wrap_lines(text: &str, width: u16) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }
    let options = textwrap::Options::new(width as usize)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace);
    textwrap::wrap(text, options)
        .into_iter()
        .map(|line| line.into_owned())
        .collect()
}

impl Component for ReviewForm {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let outer = Block::bordered()
            .title(" Submit Product Review ")
            .border_style(if self.focused {
                Style::default()
            } else {
                Style::default().fg(Color::DarkGray)
            });
        let inner = outer.inner(area);
        frame.render_widget(outer, area);

        let [product_area, review_area, footer_area] = Layout::vertical([
            Constraint::Length(PRODUCT_HEIGHT),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .areas(inner);

        self.render_product_field(frame, product_area);
        self.render_review_field(frame, review_area);
        frame.render_widget(Paragraph::new(self.footer()), footer_area);
    }
}

impl EventHandler for ReviewForm {
    type Event = FormEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        if self.loading {
            return None;
        }
        match event {
            TuiEvent::InputChar(c) => {
                let mut buf = [0u8; 4];
                self.insert(c.encode_utf8(&mut buf));
                Some(FormEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                self.insert(text);
                Some(FormEvent::ContentChanged)
            }
            TuiEvent::Backspace => self
                .active_buffer()
                .pop()
                .map(|_| FormEvent::ContentChanged),
            TuiEvent::Up => {
                self.field = FormField::ProductName;
                None
            }
            TuiEvent::Down => {
                self.field = FormField::ReviewText;
                None
            }
            TuiEvent::Submit => self.submit(),
            _ => None,
        }
    }
}
