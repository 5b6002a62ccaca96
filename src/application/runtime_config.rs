use std::path::PathBuf;

use crate::cli::Cli;

#[derive(Debug, Clone, Default)]
pub struct RuntimeConfig {
    pub script: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub print_tree_on_exit: bool,
}

impl From<Cli> for RuntimeConfig {
    fn from(cli: Cli) -> Self {
        Self {
            script: cli.script,
            config: cli.config,
            print_tree_on_exit: cli.print_tree_on_exit,
        }
    }
}
