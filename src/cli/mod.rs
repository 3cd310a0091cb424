mod args;
mod commands;
mod config_cmd;
mod render;

pub use args::Cli;
