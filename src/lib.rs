pub mod board;
pub mod config;
pub mod edit;
pub mod tui;
