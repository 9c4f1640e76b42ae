//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! - **Busy** (a request is in flight): draws every ~80ms so the spinner moves.
//! - **Idle**: sleeps up to 500ms, only redraws on events, resize or when a
//!   background task reports back.

mod component;
pub mod components;
mod event;
pub mod tasks;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;

use crate::api::{ReviewClient, ReviewService, SentimentFilter};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::{FormEvent, FormField, ReviewForm, ReviewListState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Which part of the screen receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Form,
    Reviews,
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub form: ReviewForm,
    pub review_list: ReviewListState,
    pub focus: Focus,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            form: ReviewForm::new(),
            review_list: ReviewListState::new(),
            focus: Focus::Form, // User expects to type immediately
        }
    }

    /// Product → Review → Reviews → Product.
    pub fn focus_next(&mut self) {
        match (self.focus, self.form.field) {
            (Focus::Form, FormField::ProductName) => self.form.field = FormField::ReviewText,
            (Focus::Form, FormField::ReviewText) => self.focus = Focus::Reviews,
            (Focus::Reviews, _) => {
                self.focus = Focus::Form;
                self.form.field = FormField::ProductName;
            }
        }
    }

    pub fn focus_prev(&mut self) {
        match (self.focus, self.form.field) {
            (Focus::Form, FormField::ProductName) => self.focus = Focus::Reviews,
            (Focus::Form, FormField::ReviewText) => self.form.field = FormField::ProductName,
            (Focus::Reviews, _) => {
                self.focus = Focus::Form;
                self.form.field = FormField::ReviewText;
            }
        }
    }
}

/// Maps a key pressed while the review list has focus to an app action.
fn reviews_key_action(event: &TuiEvent, current: SentimentFilter) -> Option<Action> {
    match event {
        TuiEvent::Left => Some(Action::SetFilter(current.prev())),
        TuiEvent::Right => Some(Action::SetFilter(current.next())),
        TuiEvent::InputChar(c @ '1'..='4') => {
            let index = (*c as usize) - ('1' as usize);
            Some(Action::SetFilter(SentimentFilter::ALL[index]))
        }
        TuiEvent::InputChar('r') => Some(Action::Refresh),
        _ => None,
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    /// Mouse capture and bracketed paste are optional; on failure the app
    /// runs without them.
    fn new() -> Self {
        match execute!(stdout(), EnableMouseCapture, EnableBracketedPaste) {
            Ok(()) => info!("Terminal modes enabled (mouse, bracketed paste)"),
            Err(e) => warn!("Could not enable mouse capture / bracketed paste: {e}"),
        }
        Self
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, DisableBracketedPaste);
    }
}

/// Applies an action and starts whatever I/O it asks for.
/// Returns true when the app should exit.
fn dispatch(
    app: &mut App,
    action: Action,
    service: &Arc<dyn ReviewService>,
    tx: &mpsc::Sender<Action>,
) -> bool {
    match update(app, action) {
        Effect::Quit => true,
        Effect::None => false,
        effect => {
            tasks::spawn_effect(service.clone(), effect, tx.clone());
            false
        }
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let service: Arc<dyn ReviewService> = Arc::new(ReviewClient::new(config.base_url.clone()));
    info!("Using review service at {}", config.base_url);

    let mut app = App::from_config(&config);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    tasks::spawn_health_check(service.clone(), tx.clone());
    dispatch(&mut app, Action::Init, &service, &tx);

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    let result = loop {
        let busy = app.is_busy();
        if busy {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            if let Err(e) = terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame)) {
                break Err(e);
            }
            needs_redraw = false;
        }

        let timeout = if busy {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = match poll_event_timeout(timeout) {
            Ok(event) => event,
            Err(e) => break Err(e),
        };

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        let mut pending = first_event;
        while let Some(event) = pending.take() {
            needs_redraw = true;
            should_quit |= handle_event(&mut app, &mut tui, event, &service, &tx);
            if should_quit {
                break;
            }
            pending = poll_event_immediate().ok().flatten();
        }

        if should_quit {
            break Ok(());
        }

        // Handle background task results
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if dispatch(&mut app, action, &service, &tx) {
                should_quit = true;
            }
        }

        if should_quit {
            break Ok(());
        }
    };

    ratatui::restore();
    result
}

/// Routes one terminal event. Returns true when the app should exit.
fn handle_event(
    app: &mut App,
    tui: &mut TuiState,
    event: TuiEvent,
    service: &Arc<dyn ReviewService>,
    tx: &mpsc::Sender<Action>,
) -> bool {
    match event {
        TuiEvent::Resize => false,
        TuiEvent::Quit => dispatch(app, Action::Quit, service, tx),
        TuiEvent::FocusNext => {
            tui.focus_next();
            false
        }
        TuiEvent::FocusPrev => {
            tui.focus_prev();
            false
        }
        // Mouse wheel always scrolls the list
        TuiEvent::ScrollUp | TuiEvent::ScrollDown => {
            tui.review_list.handle_event(&event);
            false
        }
        _ => match tui.focus {
            Focus::Form => {
                tui.form.loading = app.is_submitting;
                match tui.form.handle_event(&event) {
                    Some(FormEvent::Submit {
                        product_name,
                        review_text,
                    }) => dispatch(
                        app,
                        Action::Submit {
                            product_name,
                            review_text,
                        },
                        service,
                        tx,
                    ),
                    _ => false,
                }
            }
            Focus::Reviews => {
                if let Some(action) = reviews_key_action(&event, app.filter) {
                    if matches!(action, Action::SetFilter(_)) {
                        tui.review_list.scroll_to_top();
                    }
                    return dispatch(app, action, service, tx);
                }
                tui.review_list.handle_event(&event);
                false
            }
        },
    }
}
