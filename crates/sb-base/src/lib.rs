pub mod board;
pub mod config;
pub mod constants;
pub mod geometry;

pub use board::{Board, SourceRef, Sticker, StickerId, snap_to_grid};
