use std::path::PathBuf;

use clap::Parser;

use crate::cli::LogLevel;

/// An interactive, in-memory directory tree driven by shell-like commands.
#[derive(Parser, Debug, Clone)]
#[command(version)]
pub struct Cli {
    /// File of commands to run instead of reading standard input
    pub script: Option<PathBuf>,

    #[clap(long, short, default_value = "warn", value_enum)]
    pub log_level: LogLevel,

    /// YAML file overriding the prompt, session messages and startup commands
    #[clap(long, short)]
    pub config: Option<PathBuf>,

    /// Print the whole tree from the root once the session ends
    #[clap(long)]
    pub print_tree_on_exit: bool,
}
