// src/utils/mod.rs

pub mod config;
pub mod constants;
pub mod env;
pub mod format;
pub mod logging;
pub mod progress_config;
pub mod time;
