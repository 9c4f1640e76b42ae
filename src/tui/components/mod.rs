//! # TUI Components
//!
//! All UI components for the review screen.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as parameters:
//! - `TitleBar`: Top status bar with backend status
//! - `ReviewResult`: One analysis outcome
//! - `FilterBar`: Sentiment filter tabs
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that manage local state and emit events:
//! - `ReviewForm`: Product/review inputs with local validation
//! - `ReviewList`: Scrollable review cards (state in `ReviewListState`)
//!
//! ### Props-Based Data Flow
//!
//! Components receive external data as props, never by reaching into `App`:
//!
//! ```rust,ignore
//! // Good: Dependencies are explicit
//! ReviewList::new(&mut tui.review_list, &app.reviews, app.reviews_loading, focused)
//!     .render(frame, area);
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs            (this file)
//! ├── title_bar.rs      (Top status bar)
//! ├── review_form.rs    (Submission form)
//! ├── review_result.rs  (Analysis result panel)
//! ├── filter_bar.rs     (Sentiment filter tabs)
//! └── review_list.rs    (Scrollable review cards)
//! ```

pub mod filter_bar;
pub mod review_form;
pub mod review_list;
pub mod review_result;
pub mod title_bar;

pub use filter_bar::FilterBar;
pub use review_form::{FORM_HEIGHT, FormEvent, FormField, ReviewForm};
pub use review_list::{ReviewList, ReviewListState};
pub use review_result::ReviewResult;
pub use title_bar::TitleBar;
