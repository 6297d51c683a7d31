pub mod config;
pub mod constants;
pub mod error;
pub mod export;
pub mod images;
pub mod logging;
