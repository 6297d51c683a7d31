//! State types split into domain-focused modules.
//!
//! - `runtime`: State struct (board, selection, drag gesture, status line)
//! - `viewport`: conversion between terminal cells and board pixels

pub mod runtime;
pub mod viewport;

pub use runtime::{DragState, State, StatusLevel};
