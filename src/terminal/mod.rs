//! Line-oriented shell front end over the directory tree.

mod command;
mod terminal;

pub use command::{Command, Reply};
pub use terminal::{Terminal, TerminalError};
