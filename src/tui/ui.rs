use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::{
    FORM_HEIGHT, FilterBar, ReviewList, ReviewResult, TitleBar,
};
use crate::tui::{Focus, TuiState};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// The result panel never takes more than this share of the screen (percent).
const RESULT_MAX_PERCENT: u16 = 40;

const FILTER_HEIGHT: u16 = 3;
const ALERT_HEIGHT: u16 = 3;

/// Vertical sections in screen order. Optional ones are omitted when empty.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Section {
    Title,
    Form,
    Alert,
    Spinner,
    Result,
    Filter,
    List,
    Help,
}

fn result_max_height(height: u16) -> u16 {
    (u32::from(height) * u32::from(RESULT_MAX_PERCENT) / 100) as u16
}

fn sections(app: &App, width: u16, height: u16) -> Vec<(Section, Constraint)> {
    let mut sections = vec![
        (Section::Title, Constraint::Length(1)),
        (Section::Form, Constraint::Length(FORM_HEIGHT)),
    ];
    if app.error.is_some() {
        sections.push((Section::Alert, Constraint::Length(ALERT_HEIGHT)));
    }
    if app.is_submitting {
        sections.push((Section::Spinner, Constraint::Length(1)));
    }
    if let Some(review) = &app.result {
        let max = result_max_height(height);
        let wanted = ReviewResult::new(review).height(width);
        sections.push((Section::Result, Constraint::Length(wanted.min(max))));
    }
    sections.push((Section::Filter, Constraint::Length(FILTER_HEIGHT)));
    sections.push((Section::List, Constraint::Min(3)));
    sections.push((Section::Help, Constraint::Length(1)));
    sections
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    let area = frame.area();
    let sections = sections(app, area.width, area.height);
    let areas = Layout::vertical(sections.iter().map(|(_, c)| *c)).split(area);

    for ((section, _), rect) in sections.iter().zip(areas.iter()) {
        let rect = *rect;
        match section {
            Section::Title => {
                TitleBar::new(app.backend, app.status_message.clone()).render(frame, rect);
            }
            Section::Form => {
                tui.form.loading = app.is_submitting;
                tui.form.focused = tui.focus == Focus::Form;
                tui.form.render(frame, rect);
            }
            Section::Alert => {
                if let Some(error) = &app.error {
                    draw_error_alert(frame, rect, error);
                }
            }
            Section::Spinner => draw_spinner(frame, rect, spinner_frame),
            Section::Result => {
                if let Some(review) = &app.result {
                    ReviewResult::new(review).render(frame, rect);
                }
            }
            Section::Filter => {
                FilterBar::new(app.filter, tui.focus == Focus::Reviews).render(frame, rect);
            }
            Section::List => {
                ReviewList::new(
                    &mut tui.review_list,
                    &app.reviews,
                    app.reviews_loading,
                    tui.focus == Focus::Reviews,
                )
                .render(frame, rect);
            }
            Section::Help => draw_help(frame, rect, tui.focus),
        }
    }
}

fn draw_error_alert(frame: &mut Frame, area: Rect, error: &str) {
    let line = Line::from(vec![
        Span::styled("Error: ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(error),
    ]);
    let alert = Paragraph::new(line)
        .style(Style::default().fg(Color::Red))
        .block(Block::bordered().border_style(Style::default().fg(Color::Red)))
        .wrap(Wrap { trim: true });
    frame.render_widget(alert, area);
}

fn draw_spinner(frame: &mut Frame, area: Rect, spinner_frame: usize) {
    let glyph = SPINNER_FRAMES[spinner_frame % SPINNER_FRAMES.len()];
    let line = Line::from(vec![
        Span::styled(format!("{glyph} "), Style::default().fg(Color::Cyan)),
        Span::styled(
            "Analyzing review... This may take a few seconds",
            Style::default().fg(Color::Gray),
        ),
    ]);
    frame.render_widget(line, area);
}

fn draw_help(frame: &mut Frame, area: Rect, focus: Focus) {
    let text = match focus {
        Focus::Form => "Tab next field · Enter analyze · Ctrl+J newline · Esc quit",
        Focus::Reviews => "←/→ or 1-4 filter · ↑/↓ scroll · r refresh · Tab form · Esc quit",
    };
    frame.render_widget(
        Span::styled(text, Style::default().fg(Color::DarkGray)),
        area,
    );
}
