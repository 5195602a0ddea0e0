//! Recipe Book - record recipes and filter them by ingredient

pub mod collection;
pub mod commands;
pub mod config;
pub mod entry;
pub mod models;
pub mod shell;
pub mod tui;
