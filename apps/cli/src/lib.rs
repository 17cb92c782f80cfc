//! formcheck command-line front end
//!
//! Loads settings and rendering rules, builds a terminology client and runs
//! form validation over schema files.

pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod render;

pub use config::Config;
