mod args;
mod backend;
mod commands;
mod tail;
mod types;

pub use args::Cli;
pub use commands::run;
