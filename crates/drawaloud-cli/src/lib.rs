//! Library side of the `drawaloud` command-line tool.

pub mod commands;
pub mod logging;
pub mod settings;
pub mod tables;
