//! Command-line interface

mod args;
pub mod commands;

pub use args::{
    Cli, Commands, ConfigAction, ConfigArgs, GetArgs, ImagePathArgs, LogoArgs, OutputFormat,
    SetArgs, ShowArgs, UndoArgs, VarsArgs,
};
