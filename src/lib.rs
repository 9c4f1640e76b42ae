//! Terminal client for the product review sentiment service.

pub mod api;
pub mod cli;
pub mod core;
pub mod tui;

#[cfg(test)]
pub mod test_support;
