pub mod config;
pub mod diagnostics;
pub mod picker;
pub mod ui;
