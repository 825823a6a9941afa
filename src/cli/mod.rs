pub mod args;
pub mod commands;
pub mod render;

pub use args::{Cli, Commands, OutputFormat, ViewSelection};
pub use commands::run;
